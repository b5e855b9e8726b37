use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Numeric identity of a node, unique among every node built from the same
/// [`IdGenerator`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Monotonic id source handed to node constructors.
///
/// Ids are never reused. Share one generator (behind an `Arc`) between every
/// scene of the process to keep ids unique process-wide.
#[derive(Debug, Default)]
pub struct IdGenerator {
    counter: AtomicUsize,
}

impl IdGenerator {
    pub fn new() -> Self {
        IdGenerator::default()
    }

    pub fn next(&self) -> NodeId {
        NodeId(self.counter.fetch_add(1, Ordering::Relaxed))
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> usize {
        self.counter.load(Ordering::Relaxed)
    }
}
