//! Trait for image tracking engine backends.

use crate::recognition::TargetDescriptor;

/// Events emitted by a [`TargetTracker`] for loaded targets.
#[derive(Debug, Clone)]
pub enum TrackingEvent {
    /// The engine finished loading a target handed to it via `load_target`.
    LoadFinished { uid: String, success: bool },
    /// The target entered the camera view.
    TargetFound { uid: String },
    /// The target left the camera view.
    TargetLost { uid: String },
}

/// Trait for image tracking engine backends.
///
/// The engine owns detection and pose estimation; this crate only hands it
/// descriptors and consumes its lifecycle events. Like [`CloudResolver`],
/// all calls are non-blocking and events are drained per tick.
///
/// [`CloudResolver`]: crate::integration::CloudResolver
pub trait TargetTracker {
    /// Error type for engine failures.
    type Error;

    /// Register a descriptor with the engine. Completion is reported later
    /// through a `LoadFinished` event carrying the descriptor's UID.
    fn load_target(&mut self, descriptor: &TargetDescriptor) -> Result<(), Self::Error>;

    /// Activate or deactivate the tracking subsystem. Idempotent; called
    /// every tick with the computed visibility state.
    fn set_active(&mut self, active: bool);

    /// Drop every loaded target.
    fn unload_all(&mut self);

    /// Drain events that arrived since the last call, in order.
    fn poll_events(&mut self) -> Vec<TrackingEvent>;
}
