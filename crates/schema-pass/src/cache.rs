//! The process-wide type-model cache for one analysis pass.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::trace;

use schema_model::{ModelContext, ModelError, TypeModel};
use schema_reflect::TypeId;

/// Cache operation metrics (thread-safe counters).
#[derive(Debug, Clone, Default)]
pub struct CacheMetrics {
    /// Lookups answered from the cache.
    hits: Arc<AtomicU64>,
    /// Models constructed on a miss.
    builds: Arc<AtomicU64>,
    /// Constructions discarded because another thread published first.
    races_lost: Arc<AtomicU64>,
}

impl CacheMetrics {
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_build(&self) {
        self.builds.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_race_lost(&self) {
        self.races_lost.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            builds: self.builds.load(Ordering::Relaxed),
            races_lost: self.races_lost.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of metrics (for reporting).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub hits: u64,
    pub builds: u64,
    pub races_lost: u64,
}

impl MetricsSnapshot {
    pub fn total_lookups(&self) -> u64 {
        self.hits + self.builds
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.total_lookups();
        if total == 0 {
            return 0.0;
        }
        self.hits as f64 / total as f64
    }
}

/// Identity cache: at most one published [`TypeModel`] per type within a
/// pass.
///
/// Construction happens outside the lock; publication is
/// first-writer-wins, so a racing builder discards its own result and
/// returns the already-published model.
#[derive(Default)]
pub struct ModelCache {
    models: RwLock<HashMap<TypeId, Arc<TypeModel>>>,
    metrics: CacheMetrics,
}

impl ModelCache {
    pub fn new() -> Self {
        ModelCache::default()
    }

    /// The published model for `ty`, if any.
    pub fn get(&self, ty: TypeId) -> Option<Arc<TypeModel>> {
        self.models.read().get(&ty).cloned()
    }

    /// Fetch the published model or build and publish one.
    ///
    /// Errors are not cached: a failed type stays absent so diagnostics
    /// remain attributable per attempt.
    pub fn get_or_build(
        &self,
        cx: &ModelContext<'_>,
        ty: TypeId,
    ) -> Result<Arc<TypeModel>, ModelError> {
        if let Some(model) = self.get(ty) {
            self.metrics.record_hit();
            return Ok(model);
        }

        self.metrics.record_build();
        let built = Arc::new(TypeModel::build(cx, ty)?);

        let mut models = self.models.write();
        match models.entry(ty) {
            Entry::Occupied(existing) => {
                // Another worker published while we were building.
                self.metrics.record_race_lost();
                trace!(ty = %ty, "discarding model built in lost race");
                Ok(existing.get().clone())
            }
            Entry::Vacant(slot) => {
                slot.insert(built.clone());
                Ok(built)
            }
        }
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    pub fn len(&self) -> usize {
        self.models.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.read().is_empty()
    }
}
