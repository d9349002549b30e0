//! Binary search tree over characters that stays balanced by maintaining a
//! heap invariant on randomized per-node priorities.

mod map;
mod node;
mod tree;

pub use self::map::CharTreap;
