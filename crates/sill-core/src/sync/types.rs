use serde::{Deserialize, Serialize};

/// What one synchronization pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Segments seen for the first time, backed by a freshly checked-out collider
    pub allocated: usize,
    /// Colliders returned to the pool because their segment disappeared
    pub retired: usize,
    /// Segments whose existing collider was configured in place
    pub reconfigured: usize,
    /// Active colliders after the pass
    pub active: usize,
}
