//! The parallel analysis pass.

use std::sync::Arc;

use rayon::prelude::*;
use serde_json::json;
use tracing::{debug, info};

use schema_model::{AccessPolicy, ModelContext, ModelError, StandardAccessPolicy, TypeModel};
use schema_reflect::{TypeId, TypeReflection};

use crate::cache::ModelCache;
use crate::config::PassConfig;

/// A type whose model construction failed.
#[derive(Debug, Clone)]
pub struct TypeFailure {
    pub type_id: TypeId,
    pub type_name: String,
    pub error: ModelError,
}

/// The aggregate result of one pass: models and failures in input order.
///
/// A fatal error on one type never prevents sibling types from completing;
/// the pass reports everything it learned.
#[derive(Debug, Default)]
pub struct PassOutcome {
    pub models: Vec<Arc<TypeModel>>,
    pub failures: Vec<TypeFailure>,
}

impl PassOutcome {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Collapse into a single result at the outer boundary.
    pub fn into_result(self) -> anyhow::Result<Vec<Arc<TypeModel>>> {
        if self.failures.is_empty() {
            return Ok(self.models);
        }
        let rendered: Vec<String> = self
            .failures
            .iter()
            .map(|failure| failure.error.to_string())
            .collect();
        anyhow::bail!(
            "analysis pass failed for {} type(s):\n{}",
            rendered.len(),
            rendered.join("\n")
        )
    }

    /// A machine-readable diagnostics report for the consuming tooling,
    /// including each model's silent-drop audit trail.
    pub fn diagnostics_json(&self) -> serde_json::Value {
        let failures: Vec<_> = self
            .failures
            .iter()
            .map(|failure| {
                json!({
                    "type": failure.type_name,
                    "members": failure.error.members(),
                    "message": failure.error.to_string(),
                })
            })
            .collect();
        let drops: Vec<_> = self
            .models
            .iter()
            .flat_map(|model| {
                model.dropped().iter().map(move |drop| {
                    json!({
                        "type": model.qualified_name(),
                        "member": drop.member.name,
                        "reason": drop.reason.to_string(),
                    })
                })
            })
            .collect();
        json!({
            "models": self.models.len(),
            "failures": failures,
            "dropped": drops,
        })
    }
}

/// One analysis pass over a set of candidate types.
///
/// Types are processed in parallel; each construction reads only immutable
/// reflection facts and publishes through the shared [`ModelCache`].
pub struct AnalysisPass {
    reflection: Arc<dyn TypeReflection>,
    policy: Arc<dyn AccessPolicy>,
    config: PassConfig,
    cache: ModelCache,
}

impl AnalysisPass {
    pub fn new(reflection: Arc<dyn TypeReflection>, config: PassConfig) -> Self {
        AnalysisPass::with_policy(reflection, Arc::new(StandardAccessPolicy), config)
    }

    pub fn with_policy(
        reflection: Arc<dyn TypeReflection>,
        policy: Arc<dyn AccessPolicy>,
        config: PassConfig,
    ) -> Self {
        AnalysisPass {
            reflection,
            policy,
            config,
            cache: ModelCache::new(),
        }
    }

    /// Construct models for every listed type.
    pub fn run(&self, types: &[TypeId]) -> PassOutcome {
        debug!(types = types.len(), "starting analysis pass");
        let results: Vec<(TypeId, Result<Arc<TypeModel>, ModelError>)> = types
            .par_iter()
            .map(|&ty| {
                let cx = ModelContext {
                    reflection: self.reflection.as_ref(),
                    policy: self.policy.as_ref(),
                    defaults: self.config.model_defaults(),
                };
                (ty, self.cache.get_or_build(&cx, ty))
            })
            .collect();

        let mut outcome = PassOutcome::default();
        for (ty, result) in results {
            match result {
                Ok(model) => outcome.models.push(model),
                Err(error) => outcome.failures.push(TypeFailure {
                    type_id: ty,
                    type_name: error.type_name().to_string(),
                    error,
                }),
            }
        }
        info!(
            models = outcome.models.len(),
            failures = outcome.failures.len(),
            "analysis pass finished"
        );
        outcome
    }

    pub fn cache(&self) -> &ModelCache {
        &self.cache
    }

    pub fn config(&self) -> &PassConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema_reflect::{MemberMarkers, MemberSpec, ScopeDecl, TypeRegistry, TypeSpec};

    fn sample_registry() -> (Arc<TypeRegistry>, Vec<TypeId>) {
        let mut reg = TypeRegistry::new();
        let scope = reg.declare_scope(ScopeDecl::named("orders"));

        let order = reg.declare_type(scope, TypeSpec::new("Order"));
        reg.add_field(order, MemberSpec::new("sku"));
        reg.add_field(order, MemberSpec::new("id").with_markers(MemberMarkers::attribute()));

        let broken = reg.declare_type(scope, TypeSpec::new("Broken"));
        reg.add_field(broken, MemberSpec::new("a").with_markers(MemberMarkers::value()));
        reg.add_field(broken, MemberSpec::new("b").with_markers(MemberMarkers::value()));

        let item = reg.declare_type(scope, TypeSpec::new("Item"));
        reg.add_field(item, MemberSpec::new("name"));

        (Arc::new(reg), vec![order, broken, item])
    }

    #[test]
    fn test_siblings_complete_despite_failure() {
        let (reg, types) = sample_registry();
        let pass = AnalysisPass::new(reg, PassConfig::default());
        let outcome = pass.run(&types);

        assert!(!outcome.is_success());
        assert_eq!(outcome.models.len(), 2);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].type_name, "orders.Broken");
        assert!(matches!(
            outcome.failures[0].error,
            ModelError::DuplicateValue { .. }
        ));
    }

    #[test]
    fn test_results_preserve_input_order() {
        let (reg, types) = sample_registry();
        let ok_types = vec![types[2], types[0]];
        let pass = AnalysisPass::new(reg, PassConfig::default());
        let outcome = pass.run(&ok_types);

        assert!(outcome.is_success());
        let names: Vec<&str> = outcome
            .models
            .iter()
            .map(|m| m.qualified_name())
            .collect();
        assert_eq!(names, vec!["orders.Item", "orders.Order"]);
    }

    #[test]
    fn test_repeat_types_share_one_model_identity() {
        let (reg, types) = sample_registry();
        let order = types[0];
        let pass = AnalysisPass::new(reg, PassConfig::default());
        let outcome = pass.run(&[order, order, order]);

        assert_eq!(outcome.models.len(), 3);
        assert!(Arc::ptr_eq(&outcome.models[0], &outcome.models[1]));
        assert!(Arc::ptr_eq(&outcome.models[1], &outcome.models[2]));
        assert_eq!(pass.cache().len(), 1);
    }

    #[test]
    fn test_into_result_renders_failures() {
        let (reg, types) = sample_registry();
        let pass = AnalysisPass::new(reg, PassConfig::default());
        let err = pass.run(&types).into_result().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("orders.Broken"));
        assert!(message.contains("value accessor"));
    }

    #[test]
    fn test_diagnostics_json_shape() {
        let (reg, types) = sample_registry();
        let pass = AnalysisPass::new(reg, PassConfig::default());
        let report = pass.run(&types).diagnostics_json();

        assert_eq!(report["models"], 2);
        assert_eq!(report["failures"][0]["type"], "orders.Broken");
        assert!(report["dropped"].as_array().unwrap().is_empty());
    }
}
