use crate::treap::node::Node;
use crate::treap::tree;
use rand::{Rng, XorShiftRng};
use std::fmt;
use std::mem;

/// An ordered multiset of characters implemented by a treap, with running
/// accounting of the space the structure occupies.
///
/// A treap is a tree that satisfies both the binary search tree property and a
/// heap property. Each node has a key and a priority. The key of any node is
/// greater than all keys in its left subtree and no less than all keys in its
/// right subtree, and the priority of a node is less than or equal to the
/// priority of all nodes in its subtrees. By randomly generating priorities,
/// the expected height of the tree is proportional to the logarithm of the
/// number of keys.
///
/// Equal keys are kept as distinct nodes and routed into the right subtree, so
/// the structure behaves as a multiset rather than a set.
///
/// The structure keeps two running byte counters: the overhead spent on
/// balancing metadata (the priority and both child links of every node), and
/// the total spent per node including the key itself. Both grow by a fixed
/// amount on every insertion and never shrink.
///
/// # Examples
///
/// ```
/// use char_treap::treap::CharTreap;
///
/// let mut t = CharTreap::new();
/// t.insert('a');
/// t.insert('b');
///
/// assert!(t.search('a').is_some());
/// assert_eq!(t.search('z'), None);
/// assert_eq!(t.len(), 2);
///
/// assert_eq!(t.total_bytes(), 2 * CharTreap::NODE_TOTAL_BYTES);
/// assert_eq!(t.overhead_bytes(), 2 * CharTreap::NODE_OVERHEAD_BYTES);
/// ```
pub struct CharTreap {
    root: tree::Tree,
    rng: XorShiftRng,
    len: usize,
    overhead_bytes: u64,
    total_bytes: u64,
}

impl CharTreap {
    /// Exclusive upper bound of the range node priorities are sampled from.
    pub const PRIORITY_RANGE: u32 = 51;

    /// Bytes of balancing metadata accounted for each node: the priority and
    /// both child links.
    pub const NODE_OVERHEAD_BYTES: u64 =
        (mem::size_of::<u32>() + 2 * mem::size_of::<tree::Tree>()) as u64;

    /// Bytes accounted for each node in full: the key plus the balancing
    /// metadata.
    pub const NODE_TOTAL_BYTES: u64 = Self::NODE_OVERHEAD_BYTES + mem::size_of::<char>() as u64;

    /// Constructs a new, empty `CharTreap`.
    ///
    /// # Examples
    ///
    /// ```
    /// use char_treap::treap::CharTreap;
    ///
    /// let t = CharTreap::new();
    /// assert!(t.is_empty());
    /// ```
    pub fn new() -> Self {
        CharTreap {
            root: None,
            rng: XorShiftRng::new_unseeded(),
            len: 0,
            overhead_bytes: 0,
            total_bytes: 0,
        }
    }

    /// Constructs a new, empty `CharTreap` whose priority generator is seeded
    /// with `seed`, so that the sequence of sampled priorities is
    /// deterministic.
    ///
    /// # Panics
    ///
    /// Panics if `seed` is all zeroes.
    ///
    /// # Examples
    ///
    /// ```
    /// use char_treap::treap::CharTreap;
    ///
    /// let mut n = CharTreap::with_seed([1, 1, 1, 1]);
    /// let mut m = CharTreap::with_seed([1, 1, 1, 1]);
    /// for key in "badcfe".chars() {
    ///     n.insert(key);
    ///     m.insert(key);
    /// }
    ///
    /// assert_eq!(n.diagram(), m.diagram());
    /// ```
    pub fn with_seed(seed: [u32; 4]) -> Self {
        CharTreap {
            root: None,
            rng: rand::SeedableRng::from_seed(seed),
            len: 0,
            overhead_bytes: 0,
            total_bytes: 0,
        }
    }

    /// Inserts a key into the treap. The new node is assigned a random
    /// priority in `[0, PRIORITY_RANGE)` and both byte counters grow by one
    /// node's worth of cost.
    ///
    /// A key equal to one already present is kept as a distinct node in the
    /// right subtree of its equal, so repeated insertions accumulate.
    ///
    /// # Examples
    ///
    /// ```
    /// use char_treap::treap::CharTreap;
    ///
    /// let mut t = CharTreap::new();
    /// t.insert('m');
    /// t.insert('m');
    /// assert_eq!(t.len(), 2);
    /// ```
    pub fn insert(&mut self, key: char) {
        let CharTreap {
            ref mut root,
            ref mut rng,
            ref mut len,
            ref mut overhead_bytes,
            ref mut total_bytes,
        } = self;
        let priority = rng.gen_range(0, Self::PRIORITY_RANGE);
        tree::insert(root, Node::new(key, priority));
        *len += 1;
        *overhead_bytes += Self::NODE_OVERHEAD_BYTES;
        *total_bytes += Self::NODE_TOTAL_BYTES;
    }

    /// Returns the priority of a node holding `key`, or `None` if no such key
    /// exists. When equal keys are present, the priority returned is that of
    /// the first one encountered on the descent path.
    ///
    /// # Examples
    ///
    /// ```
    /// use char_treap::treap::CharTreap;
    ///
    /// let mut t = CharTreap::new();
    /// t.insert('a');
    ///
    /// let priority = t.search('a').unwrap();
    /// assert!(priority < CharTreap::PRIORITY_RANGE);
    /// assert_eq!(t.search('z'), None);
    /// ```
    pub fn search(&self, key: char) -> Option<u32> {
        let CharTreap { ref root, .. } = self;
        tree::get(root, key)
    }

    /// Checks if a key exists in the treap.
    ///
    /// # Examples
    ///
    /// ```
    /// use char_treap::treap::CharTreap;
    ///
    /// let mut t = CharTreap::new();
    /// t.insert('a');
    /// assert!(t.contains('a'));
    /// assert!(!t.contains('z'));
    /// ```
    pub fn contains(&self, key: char) -> bool {
        let CharTreap { ref root, .. } = self;
        tree::contains(root, key)
    }

    /// Renders the treap as an indented diagram rotated ninety degrees, with
    /// the right subtree on top. Each node produces one line of the form
    /// `<priority>|<key>`, indented proportionally to its depth. Read bottom
    /// to top, the lines yield the keys in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use char_treap::treap::CharTreap;
    ///
    /// let mut t = CharTreap::new();
    /// assert!(t.diagram().is_empty());
    ///
    /// t.insert('a');
    /// t.insert('b');
    /// assert_eq!(t.diagram().len(), 2);
    /// ```
    pub fn diagram(&self) -> Vec<String> {
        let CharTreap { ref root, .. } = self;
        let mut lines = Vec::new();
        tree::write_diagram(root, 0, &mut lines);
        lines
    }

    /// Returns the number of keys in the treap, counting equal keys
    /// individually.
    ///
    /// # Examples
    ///
    /// ```
    /// use char_treap::treap::CharTreap;
    ///
    /// let mut t = CharTreap::new();
    /// t.insert('a');
    /// assert_eq!(t.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the treap holds no keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use char_treap::treap::CharTreap;
    ///
    /// let mut t = CharTreap::new();
    /// assert!(t.is_empty());
    /// t.insert('a');
    /// assert!(!t.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the bytes of space overhead spent on balancing metadata across
    /// all nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use char_treap::treap::CharTreap;
    ///
    /// let mut t = CharTreap::new();
    /// t.insert('a');
    /// assert_eq!(t.overhead_bytes(), CharTreap::NODE_OVERHEAD_BYTES);
    /// ```
    pub fn overhead_bytes(&self) -> u64 {
        self.overhead_bytes
    }

    /// Returns the total bytes of space required by all nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use char_treap::treap::CharTreap;
    ///
    /// let mut t = CharTreap::new();
    /// t.insert('a');
    /// assert_eq!(t.total_bytes(), CharTreap::NODE_TOTAL_BYTES);
    /// ```
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Returns the fraction of the total space spent on balancing metadata,
    /// or `0.0` for an empty treap.
    ///
    /// # Examples
    ///
    /// ```
    /// use char_treap::treap::CharTreap;
    ///
    /// let mut t = CharTreap::new();
    /// assert_eq!(t.overhead_fraction(), 0.0);
    ///
    /// t.insert('a');
    /// let fraction = t.overhead_fraction();
    /// assert!(fraction > 0.0 && fraction <= 1.0);
    /// ```
    pub fn overhead_fraction(&self) -> f64 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        self.overhead_bytes as f64 / self.total_bytes as f64
    }
}

impl Default for CharTreap {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharTreap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for line in self.diagram() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::CharTreap;

    #[test]
    fn test_len_empty() {
        let t = CharTreap::new();
        assert_eq!(t.len(), 0);
        assert!(t.is_empty());
    }

    #[test]
    fn test_search_empty() {
        let t = CharTreap::new();
        assert_eq!(t.search('a'), None);
        assert!(!t.contains('a'));
    }

    #[test]
    fn test_insert() {
        let mut t = CharTreap::new();
        t.insert('a');
        assert!(t.contains('a'));
        assert!(t.search('a').unwrap() < CharTreap::PRIORITY_RANGE);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_insert_duplicates() {
        let mut t = CharTreap::new();
        t.insert('m');
        t.insert('m');
        assert_eq!(t.len(), 2);
        assert_eq!(t.diagram().len(), 2);
    }

    #[test]
    fn test_counters_grow_by_fixed_amounts() {
        let mut t = CharTreap::new();
        for (index, key) in "treap".chars().enumerate() {
            t.insert(key);
            let count = (index + 1) as u64;
            assert_eq!(t.overhead_bytes(), count * CharTreap::NODE_OVERHEAD_BYTES);
            assert_eq!(t.total_bytes(), count * CharTreap::NODE_TOTAL_BYTES);
        }
    }

    #[test]
    fn test_overhead_fraction() {
        let mut t = CharTreap::new();
        assert_eq!(t.overhead_fraction(), 0.0);

        t.insert('a');
        let expected =
            CharTreap::NODE_OVERHEAD_BYTES as f64 / CharTreap::NODE_TOTAL_BYTES as f64;
        assert_eq!(t.overhead_fraction(), expected);

        // the ratio is independent of how many nodes are stored
        t.insert('b');
        t.insert('c');
        assert_eq!(t.overhead_fraction(), expected);
    }

    #[test]
    fn test_diagram_root_has_no_indent() {
        let mut t = CharTreap::new();
        t.insert('a');

        let lines = t.diagram();
        assert_eq!(lines.len(), 1);
        assert!(!lines[0].starts_with(' '));
        assert!(lines[0].ends_with("|a"));
    }

    #[test]
    fn test_observation_is_idempotent() {
        let mut t = CharTreap::with_seed([1, 1, 1, 1]);
        for key in "treap".chars() {
            t.insert(key);
        }

        assert_eq!(t.diagram(), t.diagram());
        assert_eq!(t.search('r'), t.search('r'));
        assert_eq!(t.total_bytes(), t.total_bytes());
    }

    #[test]
    fn test_display_matches_diagram() {
        let mut t = CharTreap::with_seed([1, 1, 1, 1]);
        for key in "treap".chars() {
            t.insert(key);
        }

        let rendered = format!("{}", t);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines, t.diagram());
    }

    #[test]
    fn test_seeded_treaps_agree() {
        let mut n = CharTreap::with_seed([1, 2, 3, 4]);
        let mut m = CharTreap::with_seed([1, 2, 3, 4]);
        for key in "abcdef".chars() {
            n.insert(key);
            m.insert(key);
        }

        assert_eq!(n.diagram(), m.diagram());
        assert_eq!(n.search('c'), m.search('c'));
    }
}
