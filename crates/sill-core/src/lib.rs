//! sill-core: walkable surfaces resolved from the live desktop window stack.
//!
//! Every frame the [`Playspace`] queries the visible windows, resolves the
//! unobstructed top edge of each one into [`Segment`]s and keeps a pool of
//! [`BoundaryCollider`]s in step with them.

pub mod cache;
pub mod clickthrough;
pub mod collider;
pub mod debug;
pub mod errors;
pub mod events;
pub mod geometry;
pub mod hooks;
pub mod logging;
pub mod playspace;
pub mod pool;
pub mod resolver;
pub mod sync;
pub mod transform;
pub mod watch;
pub mod window;

pub use clickthrough::{ClickDecision, ClickThroughProbe, FramebufferSampler, SolidSampler};
pub use collider::BoundaryCollider;
pub use debug::{DebugDrawMode, DebugLine, debug_lines};
pub use errors::{SillError, SillResult};
pub use events::{EventBus, EventKind, PlayspaceEvent, SubscriptionId};
pub use geometry::{Aabb, Point2, Point3, WindowRect};
pub use hooks::{HookSet, InputHooks, PlatformHooks, RecordingHooks, platform_hooks};
pub use logging::init_logging;
pub use playspace::{FrameReport, Playspace};
pub use resolver::{FLOOR_ID, ScreenGeometry, Segment, display_border, resolve_top_borders};
pub use sync::{BoundarySynchronizer, SyncReport};
pub use transform::{CoordinateTransform, OrthoCameraTransform};
pub use window::{
    DisplayInfo, StaticWindowSource, WindowError, WindowQuery, WindowRecord, WindowSource,
    XcapWindowSource,
};
