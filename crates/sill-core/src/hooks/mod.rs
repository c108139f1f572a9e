//! Process-wide input intercepts: click pass-through, keyboard, file drop.

pub mod backends;
pub mod errors;
mod guard;
mod queue;
pub mod traits;
pub mod types;

pub use backends::{PlatformHooks, RecordingHooks, UnsupportedHooks, platform_hooks};
pub use errors::HookError;
pub use guard::HookSet;
pub use queue::HookQueue;
pub use traits::InputHooks;
pub use types::{DroppedFiles, HookKind, KeyEvent, KeyTransition};
