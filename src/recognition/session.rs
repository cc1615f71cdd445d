//! Resolve session state for the auto-resolve loop.

/// Status code reported by the cloud recognition service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CloudStatus {
    /// A target was identified in the submitted frame.
    FoundTarget,
    /// The frame was processed but matched no known target.
    TargetNotFound,
    /// The account's recognition quota is exhausted.
    ReachedAccessLimit,
    /// Requests are arriving faster than the service allows.
    RequestIntervalTooLow,
    /// Anything else, including transport failures.
    #[default]
    UnknownError,
}

/// Bookkeeping for one auto-resolve session.
///
/// Exists only while auto-resolve is enabled; the scheduler holds it as
/// `Option<ResolveSession>` and recreates it on every `start_auto_resolve`.
#[derive(Debug, Clone)]
pub struct ResolveSession {
    /// Monotonically increasing count of completed resolves.
    pub index: u64,
    /// Whether a resolve request is currently in flight.
    pub in_flight: bool,
    /// Timestamp (seconds) of the last issued resolve.
    pub resolve_time: f64,
    /// Elapsed cost (seconds) of the last completed resolve.
    pub cost_time: f64,
    /// Status of the last completed resolve.
    pub status: CloudStatus,
    /// Name of the last identified target, `"-"` when none.
    pub target_name: String,
    /// Error message of the last completed resolve, if the service sent one.
    pub error_message: Option<String>,
}

impl Default for ResolveSession {
    fn default() -> Self {
        Self {
            index: 0,
            in_flight: false,
            resolve_time: 0.0,
            cost_time: 0.0,
            status: CloudStatus::default(),
            target_name: "-".to_string(),
            error_message: None,
        }
    }
}
