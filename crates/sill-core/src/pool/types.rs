/// Handle to an instance checked out of an [`ObjectPool`](super::ObjectPool).
///
/// A handle is only valid while the instance stays active; once retired,
/// the same slot handed out again gets a new generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolHandle {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl PoolHandle {
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Lifecycle hooks for pooled instances.
pub trait Poolable {
    /// Called when the instance is handed out.
    fn activate(&mut self) {}

    /// Called when the instance goes back to the pool. Reset per-use state here.
    fn deactivate(&mut self) {}
}
