//! Analysis-pass orchestration over the classification engine.
//!
//! One pass constructs at most one [`TypeModel`](schema_model::TypeModel)
//! per type, in parallel across worker threads, publishing through a
//! synchronized identity cache. Fatal errors abort only the offending
//! type; siblings complete for maximal diagnostic yield.

pub mod cache;
pub mod config;
pub mod pass;

pub use cache::{CacheMetrics, MetricsSnapshot, ModelCache};
pub use config::PassConfig;
pub use pass::{AnalysisPass, PassOutcome, TypeFailure};
