//! Identities, member declarations and access policies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::markers::{Facet, MemberMarkers};

/// Identity of a declared type, issued by the reflection source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    /// The raw index behind this identity.
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type#{}", self.0)
    }
}

/// Identity of an accessor method (a property getter or setter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodId(pub(crate) u32);

/// Identity of a declaration scope (namespace/package analog).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScopeId(pub(crate) u32);

/// Whether a member is a plain field or a getter/setter property pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberKind {
    Field,
    Property,
}

/// Which candidate members are eligible to become accessors at all.
///
/// Resolved per type by a cascade: explicit marker on the type, nearest
/// ancestor's explicit marker, scope default, pass-wide default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessMode {
    /// Public fields and public properties.
    PublicMember,
    /// Fields, regardless of visibility.
    Field,
    /// Properties, regardless of visibility.
    Property,
    /// Only members carrying an explicit role marker.
    None,
}

impl Default for AccessMode {
    fn default() -> Self {
        AccessMode::PublicMember
    }
}

/// Fallback ordering policy for element accessors when no explicit order
/// is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessOrder {
    /// Preserve the member collector's emission order.
    Declaration,
    /// Sort by ordinal name comparison.
    Alphabetical,
}

impl Default for AccessOrder {
    fn default() -> Self {
        AccessOrder::Declaration
    }
}

/// Error parsing an access policy value from a string.
#[derive(Debug, Clone, Error)]
#[error("unrecognized {what} `{value}`")]
pub struct PolicyParseError {
    what: &'static str,
    value: String,
}

impl FromStr for AccessMode {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PUBLIC_MEMBER" => Ok(AccessMode::PublicMember),
            "FIELD" => Ok(AccessMode::Field),
            "PROPERTY" => Ok(AccessMode::Property),
            "NONE" => Ok(AccessMode::None),
            _ => Err(PolicyParseError {
                what: "access mode",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for AccessOrder {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DECLARATION" => Ok(AccessOrder::Declaration),
            "ALPHABETICAL" => Ok(AccessOrder::Alphabetical),
            _ => Err(PolicyParseError {
                what: "access order",
                value: s.to_string(),
            }),
        }
    }
}

/// One declared member: a candidate for accessor-hood.
///
/// Immutable once handed to the engine. `getter`/`setter` are present for
/// properties only and identify the accessor methods for override checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDecl {
    /// Member name, unique within its bucket.
    pub name: String,
    /// Field or property.
    pub kind: MemberKind,
    /// The type that introduced this member.
    pub declared_in: TypeId,
    /// Source-language visibility.
    pub public: bool,
    /// Role-indicating tags attached by the metadata source.
    pub markers: MemberMarkers,
    /// Getter method identity (properties only).
    pub getter: Option<MethodId>,
    /// Setter method identity (properties only).
    pub setter: Option<MethodId>,
}

/// A declaration scope: the namespace/package a type belongs to, with
/// scope-level policy defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeDecl {
    /// Scope name, used as the qualified-name prefix.
    pub name: String,
    /// Target namespace for types in this scope.
    pub namespace: Option<String>,
    /// Scope-level access mode default.
    pub access_mode: Option<AccessMode>,
    /// Scope-level access order default.
    pub access_order: Option<AccessOrder>,
    /// Facets applying to every type in the scope.
    pub facets: Vec<Facet>,
}

impl ScopeDecl {
    /// Create a scope with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        ScopeDecl {
            name: name.into(),
            ..ScopeDecl::default()
        }
    }
}
