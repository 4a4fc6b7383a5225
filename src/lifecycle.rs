//! Chart instance lifecycle: at most one live instance per drawing surface,
//! disposed before replacement, skipped when inputs are unchanged.

use crate::config::ChartConfig;
use ahash::AHashMap;
use anyhow::Result;
use std::hash::{Hash, Hasher};

/// Names one drawing surface (by convention, the metric id).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub String);

impl SurfaceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SurfaceId {
    fn from(s: &str) -> Self {
        SurfaceId(s.to_string())
    }
}

impl std::fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// External drawing capability: given a configuration, draw a bar chart into
/// a surface and hand back a disposable instance. The lifecycle manager is
/// the only caller; no other component may create or destroy instances.
pub trait ChartBackend {
    type Instance;

    /// Draw a chart into the surface. The surface is guaranteed free: any
    /// previous instance has already been passed to [`ChartBackend::unmount`].
    fn mount(&mut self, surface: &SurfaceId, config: &ChartConfig) -> Result<Self::Instance>;

    /// Dispose a previously mounted instance, releasing the surface.
    fn unmount(&mut self, surface: &SurfaceId, instance: Self::Instance);
}

/// What one `sync` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No instance existed; one was created.
    Created,
    /// An instance existed with different inputs; it was disposed and a new
    /// one created.
    Replaced,
    /// An instance existed with structurally identical inputs; nothing done.
    Unchanged,
    /// `None` config with a live instance: disposed, nothing created.
    Cleared,
    /// `None` config and no instance: nothing to do.
    Empty,
}

struct Live<I> {
    instance: I,
    fingerprint: u64,
}

/// Owns every live chart instance, keyed by surface.
///
/// Surfaces are independent; syncs may happen in any order. State errors
/// from the backend leave the surface empty rather than half-mounted.
pub struct ChartSync<B: ChartBackend> {
    charts: AHashMap<SurfaceId, Live<B::Instance>>,
}

impl<B: ChartBackend> Default for ChartSync<B> {
    fn default() -> Self {
        Self {
            charts: AHashMap::new(),
        }
    }
}

impl<B: ChartBackend> ChartSync<B> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently live instances.
    pub fn live_count(&self) -> usize {
        self.charts.len()
    }

    /// Whether a surface currently holds a live instance.
    pub fn is_live(&self, surface: &SurfaceId) -> bool {
        self.charts.contains_key(surface)
    }

    /// Every surface currently holding a live instance, in no particular
    /// order. Callers reconciling against a new desired set use this to
    /// find surfaces that must be synced to `None`.
    pub fn live_surfaces(&self) -> Vec<SurfaceId> {
        self.charts.keys().cloned().collect()
    }

    /// Reconcile one surface with the desired config.
    ///
    /// Invariants upheld:
    /// - at most one live instance per surface, always;
    /// - a stale instance is unmounted before its replacement mounts;
    /// - structurally identical inputs cause no rebuild.
    pub fn sync(
        &mut self,
        backend: &mut B,
        surface: &SurfaceId,
        config: Option<&ChartConfig>,
    ) -> Result<SyncOutcome> {
        let Some(config) = config else {
            return Ok(match self.charts.remove(surface) {
                Some(live) => {
                    backend.unmount(surface, live.instance);
                    log::debug!("surface {surface}: cleared");
                    SyncOutcome::Cleared
                }
                None => SyncOutcome::Empty,
            });
        };

        let fingerprint = fingerprint(config);
        let had_instance = match self.charts.remove(surface) {
            Some(live) if live.fingerprint == fingerprint => {
                // Unchanged inputs: keep the existing instance untouched.
                self.charts.insert(surface.clone(), live);
                return Ok(SyncOutcome::Unchanged);
            }
            Some(live) => {
                backend.unmount(surface, live.instance);
                true
            }
            None => false,
        };

        let instance = backend.mount(surface, config)?;
        self.charts.insert(
            surface.clone(),
            Live {
                instance,
                fingerprint,
            },
        );
        log::debug!(
            "surface {surface}: {}",
            if had_instance { "replaced" } else { "created" }
        );
        Ok(if had_instance {
            SyncOutcome::Replaced
        } else {
            SyncOutcome::Created
        })
    }

    /// Dispose every live instance (teardown path).
    pub fn clear(&mut self, backend: &mut B) {
        for (surface, live) in self.charts.drain() {
            backend.unmount(&surface, live.instance);
        }
    }
}

/// Structural fingerprint of the inputs that matter for rebuild detection:
/// labels, values, fills, borders, and the axis policy. Floats hash by bit
/// pattern, which is exact for values copied straight from the dataset.
fn fingerprint(config: &ChartConfig) -> u64 {
    let mut h = ahash::AHasher::default();
    config.metric_id.hash(&mut h);
    config.title.hash(&mut h);
    for entry in &config.entries {
        entry.label.hash(&mut h);
        entry.value.map(f64::to_bits).hash(&mut h);
        entry.fill.hash(&mut h);
        entry.border_color.hash(&mut h);
    }
    config.axis.max.to_bits().hash(&mut h);
    config.axis.step.to_bits().hash(&mut h);
    config.axis.zero_based.hash(&mut h);
    h.finish()
}
