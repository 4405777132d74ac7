//! # Accessor Classification Engine
//!
//! Given one type and a reflection source, this crate decides which of the
//! type's members participate in its structural schema, assigns each a
//! single role, enforces the cross-member invariants, and produces the
//! deterministically ordered, immutable [`TypeModel`].
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────────┐   ancestry walk, transparency,
//! │ MemberCollector  │   insert-or-replace by name
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐   access-mode cascade +
//! │ AccessorFilter   │   eligibility policy
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐   precedence-ordered roles,
//! │ Classifier       │   fail-fast invariants,
//! └────────┬─────────┘   silent-drop leniency
//!          ▼
//! ┌──────────────────┐   explicit order / declaration /
//! │ ElementSet       │   alphabetical
//! └────────┬─────────┘
//!          ▼
//!      TypeModel
//! ```
//!
//! ## Key Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TypeModel`] | The immutable per-type aggregate |
//! | [`ModelContext`] | Reflection + policy + defaults for one build |
//! | [`ModelError`] | The closed, type-level-fatal error taxonomy |
//! | [`AccessPolicy`] | Pluggable accessor-eligibility semantics |
//! | [`DroppedAccessor`] | Silent-drop audit entry for tooling |

pub mod access;
pub mod accessor;
pub mod collector;
pub mod error;
pub mod model;
pub mod names;
pub mod ordering;

pub use access::{
    resolve_access_mode, resolve_access_order, AccessPolicy, AccessorFilter, ModelDefaults,
    StandardAccessPolicy,
};
pub use accessor::{Accessor, AccessorRole, DropReason, DroppedAccessor};
pub use collector::{collect, MemberBuckets};
pub use error::ModelError;
pub use model::{ModelContext, TypeModel};
pub use names::QName;
pub use ordering::{ElementOrdering, ElementSet};
