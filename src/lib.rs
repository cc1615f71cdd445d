//! Orchestration for cloud image-target recognition and tracking.
//!
//! Wraps a cloud recognition service and an image tracking engine (both
//! behind traits) with the plumbing a recognition app needs: a rate-limited
//! auto-resolve loop, de-duplication of already-seen targets, an offline disk
//! cache of resolved descriptors, and level-triggered UI visibility rules.
//!
//! Detection, feature matching, and pose estimation are owned by the engine
//! backends; this crate only schedules requests and wires lifecycles.
//!
//! # Example
//!
//! ```ignore
//! use cloudtrack_rs::{RecognitionPipeline, RecognizerConfig};
//!
//! let mut pipeline = RecognitionPipeline::new(my_resolver, my_tracker, RecognizerConfig::default())?;
//! loop {
//!     let view = pipeline.tick(clock.now())?;
//!     apply_visibility(view);
//! }
//! ```

pub mod integration;
pub mod recognition;

pub use integration::{
    CloudResolver, DescriptorBuilder, PipelineError, RecognitionPipeline, RecognizerConfig,
    ResolveEvent, TargetTracker, TrackingEvent,
};
pub use recognition::{
    CacheError, CloudStatus, ContentAnchor, LoadState, MenuPanels, ResolveOutcome, ResolveSession,
    ResolveScheduler, TargetCache, TargetDescriptor, TargetRegistry, TargetSource, TrackedTarget,
    ViewPhase, ViewState,
};
