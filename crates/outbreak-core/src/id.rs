//! Strongly-typed identifiers.

use std::fmt;

/// Dense, zero-based index of a node.
///
/// Assigned sequentially in placement order and immutable afterwards.
/// `NodeId(n)` is always the n-th entry of the world's node list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The node's position in the node list.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Monotonically increasing tick counter.
///
/// Tick 0 is the state before the first update; every call to the
/// update engine advances it by exactly one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl TickId {
    /// The tick that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_index_round_trips() {
        assert_eq!(NodeId(7).index(), 7);
        assert_eq!(NodeId::from(3), NodeId(3));
    }

    #[test]
    fn tick_id_next_increments() {
        assert_eq!(TickId::default().next(), TickId(1));
        assert_eq!(TickId(41).next().to_string(), "42");
    }
}
