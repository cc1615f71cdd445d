//! RecognitionPipeline for combining cloud resolving with target tracking.

use std::path::PathBuf;

use thiserror::Error;
use tracing::error;

use crate::recognition::{
    CacheError, CloudStatus, MenuPanels, ResolveOutcome, ResolveScheduler, ResolveSession,
    TargetCache, TargetDescriptor, TargetRegistry, ViewState,
};

use super::{CloudResolver, ResolveEvent, TargetTracker, TrackingEvent};

/// Configuration for the recognition pipeline.
#[derive(Debug, Clone)]
pub struct RecognizerConfig {
    /// Minimum interval between resolve attempts, in seconds.
    pub resolve_rate: f64,
    /// Persist resolved targets to disk and reload them at startup.
    pub use_offline_cache: bool,
    /// Cache directory override; platform data directory when `None`.
    pub cache_dir: Option<PathBuf>,
    /// Begin auto-resolving immediately on construction.
    pub auto_start: bool,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            resolve_rate: 1.0,
            use_offline_cache: true,
            cache_dir: None,
            auto_start: true,
        }
    }
}

/// Failures surfaced by the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError<RE, TE>
where
    RE: std::error::Error + 'static,
    TE: std::error::Error + 'static,
{
    #[error("resolver failed to submit request")]
    Resolver(#[source] RE),
    #[error("tracking engine rejected target")]
    Tracker(#[source] TE),
    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Wires a cloud resolver, a tracking engine, the resolve scheduler, the
/// target registry, and the offline cache into one per-tick loop.
///
/// Single-threaded and cooperative: `tick` drains collaborator events, makes
/// at most one resolve attempt, and recomputes UI visibility. The caller
/// drives it once per frame with a monotonic `now` in seconds.
pub struct RecognitionPipeline<R: CloudResolver, T: TargetTracker> {
    resolver: R,
    tracker: T,
    scheduler: ResolveScheduler,
    registry: TargetRegistry,
    cache: Option<TargetCache>,
    menus: MenuPanels,
    is_tracking: bool,
}

impl<R, T> RecognitionPipeline<R, T>
where
    R: CloudResolver,
    T: TargetTracker,
    R::Error: std::error::Error + 'static,
    T::Error: std::error::Error + 'static,
{
    /// Create a pipeline, initialize the offline cache, and hand every cached
    /// descriptor to the tracking engine.
    pub fn new(
        resolver: R,
        tracker: T,
        config: RecognizerConfig,
    ) -> Result<Self, PipelineError<R::Error, T::Error>> {
        let cache = if config.use_offline_cache {
            let dir = config
                .cache_dir
                .clone()
                .unwrap_or_else(TargetCache::default_dir);
            Some(TargetCache::new(dir)?)
        } else {
            None
        };

        let mut pipeline = Self {
            resolver,
            tracker,
            scheduler: ResolveScheduler::new(),
            registry: TargetRegistry::new(),
            cache,
            menus: MenuPanels::default(),
            is_tracking: false,
        };

        if let Some(cache) = &pipeline.cache {
            for descriptor in cache.scan()? {
                if pipeline.registry.insert_cached(&descriptor) {
                    pipeline
                        .tracker
                        .load_target(&descriptor)
                        .map_err(PipelineError::Tracker)?;
                }
            }
        }

        if config.auto_start {
            pipeline.scheduler.start_auto_resolve(config.resolve_rate);
        }
        Ok(pipeline)
    }

    /// Create a pipeline with default configuration.
    pub fn with_default_config(
        resolver: R,
        tracker: T,
    ) -> Result<Self, PipelineError<R::Error, T::Error>> {
        Self::new(resolver, tracker, RecognizerConfig::default())
    }

    /// Advance the pipeline by one frame.
    ///
    /// Drains resolver and tracking events, issues at most one new resolve
    /// request, recomputes the visibility state, and pushes the tracker
    /// active flag into the engine.
    pub fn tick(&mut self, now: f64) -> Result<ViewState, PipelineError<R::Error, T::Error>> {
        for event in self.resolver.poll_events() {
            match event {
                ResolveEvent::Issued => self.scheduler.on_issued(now),
                ResolveEvent::Completed(outcome) => {
                    if let Some(descriptor) = self.scheduler.on_completed(outcome, now) {
                        self.load_cloud_target(&descriptor)?;
                    }
                }
            }
        }

        for event in self.tracker.poll_events() {
            match event {
                TrackingEvent::LoadFinished { uid, success } => {
                    self.registry.finish_load(&uid, success);
                }
                TrackingEvent::TargetFound { .. } => self.is_tracking = true,
                TrackingEvent::TargetLost { .. } => self.is_tracking = false,
            }
        }

        if self.scheduler.poll(now, self.is_tracking) {
            if let Err(err) = self.resolver.submit() {
                // Complete the attempt in place so the next interval retries.
                self.scheduler.on_completed(
                    ResolveOutcome {
                        status: CloudStatus::UnknownError,
                        target: None,
                        error_message: Some(err.to_string()),
                    },
                    now,
                );
                return Err(PipelineError::Resolver(err));
            }
        }

        let view = ViewState::compute(self.menus.any_open(), self.is_tracking);
        self.tracker.set_active(view.tracker_active);
        Ok(view)
    }

    fn load_cloud_target(
        &mut self,
        descriptor: &TargetDescriptor,
    ) -> Result<(), PipelineError<R::Error, T::Error>> {
        if !self.registry.insert_cloud(descriptor) {
            return Ok(());
        }
        self.tracker
            .load_target(descriptor)
            .map_err(PipelineError::Tracker)?;

        if let Some(cache) = &self.cache {
            match cache.save(descriptor) {
                Ok(()) => self.registry.record_cache_save(),
                Err(err) => error!(uid = %descriptor.uid, %err, "failed to cache target"),
            }
        }
        Ok(())
    }

    /// Begin periodic resolve attempts; no-op while a session is active.
    pub fn start_auto_resolve(&mut self, rate: f64) {
        self.scheduler.start_auto_resolve(rate);
    }

    /// Cancel the resolve session; late completions are discarded.
    pub fn stop_resolve(&mut self) {
        self.scheduler.stop_resolve();
    }

    /// Delete every cached descriptor file, unload every tracked target, and
    /// reset the registry. A full reset for testing and demo purposes.
    pub fn clear_all(&mut self) -> Result<(), PipelineError<R::Error, T::Error>> {
        if let Some(cache) = &self.cache {
            cache.clear()?;
        }
        self.tracker.unload_all();
        self.registry.clear();
        Ok(())
    }

    /// Whether a target is currently tracked.
    pub fn is_tracking(&self) -> bool {
        self.is_tracking
    }

    /// Current resolve session state, if a session is active.
    pub fn session(&self) -> Option<&ResolveSession> {
        self.scheduler.session()
    }

    /// Get a reference to the target registry.
    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    /// Get a reference to the offline cache, if enabled.
    pub fn cache(&self) -> Option<&TargetCache> {
        self.cache.as_ref()
    }

    /// Get a reference to the menu panel flags.
    pub fn menus(&self) -> &MenuPanels {
        &self.menus
    }

    /// Get a mutable reference to the menu panel flags.
    pub fn menus_mut(&mut self) -> &mut MenuPanels {
        &mut self.menus
    }

    /// Get a reference to the underlying resolver.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Get a mutable reference to the underlying resolver.
    pub fn resolver_mut(&mut self) -> &mut R {
        &mut self.resolver
    }

    /// Get a reference to the underlying tracking engine.
    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    /// Get a mutable reference to the underlying tracking engine.
    pub fn tracker_mut(&mut self) -> &mut T {
        &mut self.tracker
    }
}
