//! Registry of tracked targets keyed by UID.
//!
//! Owns the one-entity-per-UID invariant shared by the cloud-resolve and
//! offline-cache load paths, and attaches supplementary content to a target
//! once the tracking engine finishes loading it.

use std::collections::HashMap;

use tracing::{debug, error};

use crate::recognition::target::{TargetDescriptor, TargetSource};

/// Load lifecycle of a tracked target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Handed to the tracking engine, result pending.
    #[default]
    Pending,
    /// Engine loaded the target; content is attached.
    Loaded,
    /// Engine reported a load failure. The target stays registered but
    /// carries no content; it is neither retried nor destroyed.
    Failed,
}

/// Placement of supplementary content relative to a tracked target, scaled by
/// the target's aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentAnchor {
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
}

impl ContentAnchor {
    /// Content sits just in front of the target, height-normalized to it.
    pub fn for_aspect_ratio(aspect_ratio: f32) -> Self {
        Self {
            position: [0.0, 0.0, -0.1],
            rotation: [0.0, 0.0, 0.0],
            scale: [1.0, 1.0 / aspect_ratio, 1.0],
        }
    }
}

/// One in-scene target bound to the tracking engine.
#[derive(Debug, Clone)]
pub struct TrackedTarget {
    /// Unique identifier of the underlying descriptor.
    pub uid: String,
    /// Display name; cache-loaded targets carry an `-offline` suffix.
    pub name: String,
    /// Which path materialized this target.
    pub source: TargetSource,
    /// Width / height of the reference image.
    pub aspect_ratio: f32,
    /// Load lifecycle state.
    pub load: LoadState,
    /// Supplementary content, attached on load success.
    pub content: Option<ContentAnchor>,
}

/// Registry of all materialized targets, keyed by UID.
#[derive(Debug, Default)]
pub struct TargetRegistry {
    targets: HashMap<String, TrackedTarget>,
    cached_count: u32,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a target with this UID has already been materialized.
    pub fn contains(&self, uid: &str) -> bool {
        self.targets.contains_key(uid)
    }

    /// Register a freshly cloud-resolved target. Returns `false` without
    /// side effects when the UID is already known.
    pub fn insert_cloud(&mut self, descriptor: &TargetDescriptor) -> bool {
        self.insert(descriptor, TargetSource::Cloud, descriptor.name.clone())
    }

    /// Register a target reconstructed from the offline cache.
    pub fn insert_cached(&mut self, descriptor: &TargetDescriptor) -> bool {
        let name = format!("{}-offline", descriptor.name);
        self.insert(descriptor, TargetSource::OfflineCache, name)
    }

    fn insert(&mut self, descriptor: &TargetDescriptor, source: TargetSource, name: String) -> bool {
        if self.contains(&descriptor.uid) {
            debug!(uid = %descriptor.uid, "target already loaded, skipping");
            return false;
        }
        self.targets.insert(
            descriptor.uid.clone(),
            TrackedTarget {
                uid: descriptor.uid.clone(),
                name,
                source,
                aspect_ratio: descriptor.aspect_ratio,
                load: LoadState::Pending,
                content: None,
            },
        );
        true
    }

    /// Record the tracking engine's load result for `uid`. On success the
    /// content anchor is attached; on failure the target is left in place
    /// without content. Cache-loaded targets count toward `cached_count` once
    /// they load.
    pub fn finish_load(&mut self, uid: &str, success: bool) {
        let Some(target) = self.targets.get_mut(uid) else {
            return;
        };
        if !success {
            error!(uid, "target load failed");
            target.load = LoadState::Failed;
            return;
        }
        target.load = LoadState::Loaded;
        target.content = Some(ContentAnchor::for_aspect_ratio(target.aspect_ratio));
        if target.source == TargetSource::OfflineCache {
            self.cached_count += 1;
        }
    }

    /// A cloud target was persisted to the offline cache.
    pub fn record_cache_save(&mut self) {
        self.cached_count += 1;
    }

    /// Number of targets known to be present in the offline cache.
    pub fn cached_count(&self) -> u32 {
        self.cached_count
    }

    pub fn get(&self, uid: &str) -> Option<&TrackedTarget> {
        self.targets.get(uid)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackedTarget> {
        self.targets.values()
    }

    /// Drop every target and reset the cached-target counter.
    pub fn clear(&mut self) {
        self.targets.clear();
        self.cached_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(uid: &str, aspect: f32) -> TargetDescriptor {
        TargetDescriptor::new(uid, uid, aspect, Vec::new())
    }

    #[test]
    fn test_duplicate_uid_is_noop_across_paths() {
        let mut registry = TargetRegistry::new();
        assert!(registry.insert_cloud(&descriptor("a", 1.0)));
        assert!(!registry.insert_cloud(&descriptor("a", 1.0)));
        assert!(!registry.insert_cached(&descriptor("a", 1.0)));
        assert_eq!(registry.len(), 1);

        // Same invariant starting from the cache path.
        assert!(registry.insert_cached(&descriptor("b", 1.0)));
        assert!(!registry.insert_cloud(&descriptor("b", 1.0)));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_offline_targets_get_name_suffix() {
        let mut registry = TargetRegistry::new();
        registry.insert_cached(&descriptor("a", 1.0));
        assert_eq!(registry.get("a").unwrap().name, "a-offline");
    }

    #[test]
    fn test_load_success_attaches_content() {
        let mut registry = TargetRegistry::new();
        registry.insert_cloud(&descriptor("a", 2.0));
        registry.finish_load("a", true);

        let target = registry.get("a").unwrap();
        assert_eq!(target.load, LoadState::Loaded);
        let anchor = target.content.unwrap();
        assert_eq!(anchor.position, [0.0, 0.0, -0.1]);
        assert_eq!(anchor.scale, [1.0, 0.5, 1.0]);
    }

    #[test]
    fn test_load_failure_leaves_registered_contentless_target() {
        let mut registry = TargetRegistry::new();
        registry.insert_cloud(&descriptor("a", 1.0));
        registry.finish_load("a", false);

        let target = registry.get("a").unwrap();
        assert_eq!(target.load, LoadState::Failed);
        assert!(target.content.is_none());
        // Still occupies the UID; a later resolve of "a" stays a no-op.
        assert!(!registry.insert_cloud(&descriptor("a", 1.0)));
    }

    #[test]
    fn test_cached_count_sources() {
        let mut registry = TargetRegistry::new();
        registry.insert_cached(&descriptor("a", 1.0));
        registry.finish_load("a", true);
        assert_eq!(registry.cached_count(), 1);

        registry.insert_cloud(&descriptor("b", 1.0));
        registry.finish_load("b", true);
        // Cloud loads only count once actually saved to the cache.
        assert_eq!(registry.cached_count(), 1);
        registry.record_cache_save();
        assert_eq!(registry.cached_count(), 2);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut registry = TargetRegistry::new();
        registry.insert_cached(&descriptor("a", 1.0));
        registry.finish_load("a", true);
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.cached_count(), 0);
        assert!(registry.insert_cloud(&descriptor("a", 1.0)));
    }
}
