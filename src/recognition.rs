mod cache;
mod registry;
mod scheduler;
mod session;
mod target;
mod visibility;

pub use cache::{CacheError, TargetCache};
pub use registry::{ContentAnchor, LoadState, TargetRegistry, TrackedTarget};
pub use scheduler::{ResolveOutcome, ResolveScheduler};
pub use session::{CloudStatus, ResolveSession};
pub use target::{TARGET_FILE_EXT, TargetDescriptor, TargetSource};
pub use visibility::{MenuPanels, ViewPhase, ViewState};
