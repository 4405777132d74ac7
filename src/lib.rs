//! Accessor classification and ordering engine for schema contract models.
//!
//! Given a class-like type with a possibly transparent ancestry chain and a
//! set of declared members, the engine decides which members participate in
//! the structural schema, assigns each exactly one role, enforces the
//! cross-member invariants, and produces a deterministically ordered,
//! immutable type model.
//!
//! This crate is a facade over the workspace members:
//! - [`schema_reflect`] — declarations, markers and the reflection boundary
//! - [`schema_model`] — the classification/ordering engine itself
//! - [`schema_pass`] — cached, parallel analysis passes
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use schema_contract::{
//!     AnalysisPass, MemberMarkers, MemberSpec, PassConfig, ScopeDecl, TypeRegistry, TypeSpec,
//! };
//!
//! let mut registry = TypeRegistry::new();
//! let scope = registry.declare_scope(ScopeDecl {
//!     name: "orders".to_string(),
//!     namespace: Some("urn:orders".to_string()),
//!     ..ScopeDecl::default()
//! });
//! let order = registry.declare_type(scope, TypeSpec::new("Order"));
//! registry.add_field(order, MemberSpec::new("id").with_markers(MemberMarkers::attribute()));
//! registry.add_field(order, MemberSpec::new("sku"));
//!
//! let pass = AnalysisPass::new(Arc::new(registry), PassConfig::default());
//! let outcome = pass.run(&[order]);
//! assert!(outcome.is_success());
//! assert_eq!(outcome.models[0].qname().to_string(), "{urn:orders}order");
//! ```

pub use schema_model::{
    Accessor, AccessorRole, AccessPolicy, DropReason, DroppedAccessor, ModelContext,
    ModelDefaults, ModelError, QName, StandardAccessPolicy, TypeModel,
};
pub use schema_pass::{AnalysisPass, CacheMetrics, MetricsSnapshot, ModelCache, PassConfig, PassOutcome, TypeFailure};
pub use schema_reflect::{
    AccessMode, AccessOrder, Facet, MemberDecl, MemberKind, MemberMarkers, MemberSpec, MethodId,
    PropertyMethods, ScopeDecl, ScopeId, TypeId, TypeMarkers, TypeReflection, TypeRegistry,
    TypeSpec,
};
