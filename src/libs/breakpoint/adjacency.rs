use std::collections::BTreeMap;

/// "Block `start` is followed by block `end`", both signed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Connection {
    pub start: i64,
    pub end: i64,
}

/// Inferred adjacencies between block extremities.
///
/// The map is symmetric: `partner(a) == Some(b)` iff `partner(b) == Some(a)`.
/// Extremities without an entry are unresolved.
///
/// ```
/// use ragr::libs::breakpoint::{Adjacencies, Connection};
///
/// let mut adj = Adjacencies::new();
/// adj.insert_pair(-1, 3);
/// assert_eq!(adj.partner(3), Some(-1));
/// assert_eq!(
///     adj.connections(),
///     vec![
///         Connection { start: -3, end: -1 },
///         Connection { start: 1, end: 3 },
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacencies {
    partners: BTreeMap<i64, i64>,
}

impl Adjacencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Link `u` and `v` in both directions, replacing any previous partners
    pub fn insert_pair(&mut self, u: i64, v: i64) {
        for node in [u, v] {
            if let Some(old) = self.partners.remove(&node) {
                if old != u && old != v {
                    self.partners.remove(&old);
                }
            }
        }
        self.partners.insert(u, v);
        self.partners.insert(v, u);
    }

    pub fn partner(&self, node: i64) -> Option<i64> {
        self.partners.get(&node).copied()
    }

    /// Number of extremities with a partner
    pub fn len(&self) -> usize {
        self.partners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }

    /// Every linked pair once, as `(u, v)` with `u <= v`
    pub fn pairs(&self) -> Vec<(i64, i64)> {
        self.partners
            .iter()
            .filter(|(u, v)| u <= v)
            .map(|(&u, &v)| (u, v))
            .collect()
    }

    /// The block following `block`, if its right end is resolved
    pub fn connection(&self, block: i64) -> Option<Connection> {
        self.partner(-block).map(|end| Connection { start: block, end })
    }

    /// All connections, sorted by start
    pub fn connections(&self) -> Vec<Connection> {
        self.partners
            .keys()
            .filter_map(|&node| self.connection(-node))
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Add the pairs of `other`; both sides must cover disjoint extremities
    pub fn merge(&mut self, other: Adjacencies) {
        self.partners.extend(other.partners);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric() {
        let mut adj = Adjacencies::new();
        adj.insert_pair(5, -7);
        adj.insert_pair(-2, 3);
        assert_eq!(adj.len(), 4);
        for (u, v) in adj.pairs() {
            assert_eq!(adj.partner(u), Some(v));
            assert_eq!(adj.partner(v), Some(u));
        }
        assert_eq!(adj.pairs(), vec![(-7, 5), (-2, 3)]);
        assert_eq!(adj.partner(1), None);
    }

    #[test]
    fn test_relink() {
        let mut adj = Adjacencies::new();
        adj.insert_pair(1, 2);
        adj.insert_pair(2, 3);
        assert_eq!(adj.partner(1), None);
        assert_eq!(adj.partner(3), Some(2));
        assert_eq!(adj.len(), 2);
    }

    #[test]
    fn test_connections() {
        let mut adj = Adjacencies::new();
        // -1 paired with 2: block 1 followed by block 2, and -2 followed by -1
        adj.insert_pair(-1, 2);
        assert_eq!(adj.connection(1), Some(Connection { start: 1, end: 2 }));
        assert_eq!(adj.connection(-2), Some(Connection { start: -2, end: -1 }));
        assert_eq!(adj.connection(2), None);
        assert_eq!(adj.connections().len(), 2);
    }

    #[test]
    fn test_merge() {
        let mut a = Adjacencies::new();
        a.insert_pair(1, 2);
        let mut b = Adjacencies::new();
        b.insert_pair(-3, 4);
        a.merge(b);
        assert_eq!(a.pairs(), vec![(-3, 4), (1, 2)]);
    }
}
