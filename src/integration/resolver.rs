//! Trait for cloud recognition service backends.

use crate::recognition::ResolveOutcome;

/// Events emitted by a [`CloudResolver`] for a submitted request.
#[derive(Debug, Clone)]
pub enum ResolveEvent {
    /// The service accepted the request.
    Issued,
    /// The request finished.
    Completed(ResolveOutcome),
}

/// Trait for cloud recognition service backends.
///
/// Implement this trait to connect a recognition service (or an SDK binding
/// around one) to the resolve pipeline. `submit` must not block: the request
/// runs elsewhere and its `Issued`/`Completed` events are surfaced through
/// later `poll_events` calls on the same cooperative tick loop. The pipeline
/// never has more than one request outstanding.
///
/// # Example
///
/// ```ignore
/// use cloudtrack_rs::{CloudResolver, ResolveEvent};
///
/// struct MyService {
///     // Your SDK handle here
/// }
///
/// impl CloudResolver for MyService {
///     type Error = std::io::Error;
///
///     fn submit(&mut self) -> Result<(), Self::Error> {
///         // Kick off one recognition request
///         Ok(())
///     }
///
///     fn poll_events(&mut self) -> Vec<ResolveEvent> {
///         // Drain whatever arrived since the last tick
///         vec![]
///     }
/// }
/// ```
pub trait CloudResolver {
    /// Error type for submission failures.
    type Error;

    /// Start one resolve request against the service.
    fn submit(&mut self) -> Result<(), Self::Error>;

    /// Drain events that arrived since the last call, in order.
    fn poll_events(&mut self) -> Vec<ResolveEvent>;
}
