//! Declaration model and reflection boundary for the schema contract engine.
//!
//! This crate provides the read-only facts the engine consumes about a
//! language type: its ancestry, its declared fields and properties, the role
//! markers attached by the metadata source, and override relationships
//! between accessor methods. The engine itself never derives these facts; it
//! asks a [`TypeReflection`] implementation.
//!
//! ## Key Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TypeReflection`] | Capability trait for ancestry/member/override queries |
//! | [`TypeRegistry`] | In-memory implementation with a declaration API |
//! | [`MemberDecl`] | One declared field or property, with its markers |
//! | [`MemberMarkers`] / [`TypeMarkers`] | Role-indicating tags from the metadata source |

pub mod decl;
pub mod markers;
pub mod reflection;
pub mod registry;

pub use decl::{
    AccessMode, AccessOrder, MemberDecl, MemberKind, MethodId, PolicyParseError, ScopeDecl,
    ScopeId, TypeId,
};
pub use markers::{Facet, MemberMarkers, TypeMarkers};
pub use reflection::TypeReflection;
pub use registry::{MemberSpec, PropertyMethods, TypeRegistry, TypeSpec};
