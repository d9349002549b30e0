//! A character-keyed treap with randomized priorities and space accounting.

pub mod treap;
