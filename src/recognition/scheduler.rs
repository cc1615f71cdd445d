//! Rate-limited scheduling of cloud resolve requests.

use tracing::{debug, info};

use crate::recognition::session::{CloudStatus, ResolveSession};
use crate::recognition::target::TargetDescriptor;

/// Result of one completed resolve request.
#[derive(Debug, Clone, Default)]
pub struct ResolveOutcome {
    /// Status code reported by the service.
    pub status: CloudStatus,
    /// The identified target, if any.
    pub target: Option<TargetDescriptor>,
    /// Service-provided error message, if any.
    pub error_message: Option<String>,
}

/// Sequences resolve requests against the cloud recognition service.
///
/// Driven by a cooperative per-tick `poll`; guarantees at most one request in
/// flight and at least `rate` seconds between consecutive attempts. A session
/// is active between `start_auto_resolve` and `stop_resolve`; completions
/// arriving outside a session are discarded.
#[derive(Debug, Default)]
pub struct ResolveScheduler {
    session: Option<ResolveSession>,
    rate: f64,
}

impl ResolveScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin periodic resolve attempts no more often than once per `rate`
    /// seconds. No-op if a session is already active.
    pub fn start_auto_resolve(&mut self, rate: f64) {
        if self.session.is_none() {
            info!(rate, "starting auto resolve session");
            self.rate = rate;
            self.session = Some(ResolveSession::default());
        }
    }

    /// Cancel the session. An in-flight request is allowed to complete but
    /// its result will be discarded by `on_completed`.
    pub fn stop_resolve(&mut self) {
        if self.session.take().is_some() {
            info!("stopped auto resolve session");
        }
    }

    /// Whether a session is currently active.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The current session state, if any.
    pub fn session(&self) -> Option<&ResolveSession> {
        self.session.as_ref()
    }

    /// Per-tick decision: returns `true` when the caller must issue exactly
    /// one resolve request now.
    ///
    /// Skips when no session is active, a request is already in flight, a
    /// target is currently being tracked, or the rate interval has not yet
    /// elapsed since the last issued resolve.
    pub fn poll(&mut self, now: f64, is_tracking: bool) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if is_tracking || session.in_flight || now - session.resolve_time < self.rate {
            return false;
        }
        session.in_flight = true;
        true
    }

    /// The service accepted the request; timestamp the attempt.
    pub fn on_issued(&mut self, now: f64) {
        if let Some(session) = self.session.as_mut() {
            session.resolve_time = now;
        }
    }

    /// A resolve request finished. Returns the identified descriptor, if any,
    /// for the caller to de-duplicate and load.
    ///
    /// Stale completions arriving after `stop_resolve` mutate nothing and
    /// return `None`.
    pub fn on_completed(&mut self, outcome: ResolveOutcome, now: f64) -> Option<TargetDescriptor> {
        let session = self.session.as_mut()?;

        session.index += 1;
        session.in_flight = false;
        session.cost_time = now - session.resolve_time;
        session.status = outcome.status;
        session.error_message = outcome.error_message;
        session.target_name = match &outcome.target {
            Some(target) => target.name.clone(),
            None => "-".to_string(),
        };
        debug!(
            index = session.index,
            status = ?session.status,
            cost = session.cost_time,
            target = %session.target_name,
            "resolve completed"
        );

        outcome.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(uid: &str) -> ResolveOutcome {
        ResolveOutcome {
            status: CloudStatus::FoundTarget,
            target: Some(TargetDescriptor::new(uid, uid, 1.0, Vec::new())),
            error_message: None,
        }
    }

    #[test]
    fn test_poll_without_session_is_noop() {
        let mut scheduler = ResolveScheduler::new();
        assert!(!scheduler.poll(10.0, false));
    }

    #[test]
    fn test_start_is_idempotent_while_active() {
        let mut scheduler = ResolveScheduler::new();
        scheduler.start_auto_resolve(1.0);
        assert!(scheduler.poll(10.0, false));
        scheduler.on_issued(10.0);

        // A second start must not reset the in-flight session.
        scheduler.start_auto_resolve(5.0);
        assert!(scheduler.session().unwrap().in_flight);
        assert!(!scheduler.poll(11.0, false));
    }

    #[test]
    fn test_at_most_one_request_in_flight() {
        let mut scheduler = ResolveScheduler::new();
        scheduler.start_auto_resolve(1.0);
        assert!(scheduler.poll(10.0, false));
        scheduler.on_issued(10.0);
        assert!(!scheduler.poll(20.0, false));

        scheduler.on_completed(found("a"), 20.5);
        assert!(scheduler.poll(22.0, false));
    }

    #[test]
    fn test_rate_interval_is_respected() {
        let mut scheduler = ResolveScheduler::new();
        scheduler.start_auto_resolve(2.0);
        assert!(scheduler.poll(10.0, false));
        scheduler.on_issued(10.0);
        scheduler.on_completed(found("a"), 10.1);

        assert!(!scheduler.poll(11.9, false));
        assert!(scheduler.poll(12.0, false));
    }

    #[test]
    fn test_tracking_suppresses_attempts() {
        let mut scheduler = ResolveScheduler::new();
        scheduler.start_auto_resolve(1.0);
        assert!(!scheduler.poll(100.0, true));
        assert!(scheduler.poll(100.0, false));
    }

    #[test]
    fn test_stale_completion_after_stop_is_discarded() {
        let mut scheduler = ResolveScheduler::new();
        scheduler.start_auto_resolve(1.0);
        assert!(scheduler.poll(10.0, false));
        scheduler.on_issued(10.0);
        scheduler.stop_resolve();

        assert!(scheduler.on_completed(found("a"), 10.5).is_none());
        assert!(scheduler.session().is_none());
    }

    #[test]
    fn test_completion_records_session_fields() {
        let mut scheduler = ResolveScheduler::new();
        scheduler.start_auto_resolve(1.0);
        assert!(scheduler.poll(10.0, false));
        scheduler.on_issued(10.0);
        let descriptor = scheduler.on_completed(found("a"), 10.25).unwrap();
        assert_eq!(descriptor.uid, "a");

        let session = scheduler.session().unwrap();
        assert_eq!(session.index, 1);
        assert!(!session.in_flight);
        assert_eq!(session.status, CloudStatus::FoundTarget);
        assert_eq!(session.target_name, "a");
        assert!((session.cost_time - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_miss_resets_target_name() {
        let mut scheduler = ResolveScheduler::new();
        scheduler.start_auto_resolve(1.0);
        assert!(scheduler.poll(10.0, false));
        scheduler.on_issued(10.0);
        scheduler.on_completed(found("a"), 10.1);

        assert!(scheduler.poll(12.0, false));
        scheduler.on_issued(12.0);
        let outcome = ResolveOutcome {
            status: CloudStatus::TargetNotFound,
            ..Default::default()
        };
        assert!(scheduler.on_completed(outcome, 12.1).is_none());
        assert_eq!(scheduler.session().unwrap().target_name, "-");
    }
}
