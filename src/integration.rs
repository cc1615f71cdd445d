//! Integration module for connecting recognition and tracking backends.
//!
//! This module provides the traits a cloud recognition service and an image
//! tracking engine must implement, plus the per-tick pipeline that wires them
//! to the scheduler, registry, and offline cache.

mod builder;
mod pipeline;
mod resolver;
mod tracker;

pub use builder::DescriptorBuilder;
pub use pipeline::{PipelineError, RecognitionPipeline, RecognizerConfig};
pub use resolver::{CloudResolver, ResolveEvent};
pub use tracker::{TargetTracker, TrackingEvent};
