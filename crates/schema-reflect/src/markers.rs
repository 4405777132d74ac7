//! Role markers attached to members and types by the metadata source.
//!
//! Markers are the abstract form of the annotations the surrounding system
//! reads off the source language. The engine only ever inspects them through
//! these structs; it never sees the annotation syntax itself.

use serde::{Deserialize, Serialize};

use crate::decl::{AccessMode, AccessOrder, TypeId};

/// Role-indicating tags on one member.
///
/// At most one of the role tags is expected to be meaningful; when several
/// are set, classification precedence decides which one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberMarkers {
    /// Simple scalar-like member serialized as an attribute.
    pub attribute: bool,
    /// The type's character content. At most one per type.
    pub value: bool,
    /// Reference-typed member.
    pub element_ref: bool,
    /// Wildcard attribute catch-all.
    pub any_attribute: bool,
    /// Enumeration of known qualified names for the wildcard attribute.
    pub known_qnames: Option<TypeId>,
    /// Wildcard element catch-all.
    pub any_element: bool,
    /// Mixed-content marker. Intentionally unsupported.
    pub mixed: bool,
    /// Identifier marker. At most one per type, across all roles.
    pub identifier: bool,
    /// The member is excluded from the contract entirely.
    pub transparent: bool,
}

impl MemberMarkers {
    /// Whether any role-naming tag is present. Such members are eligible
    /// regardless of the access mode.
    pub fn names_role(&self) -> bool {
        self.attribute
            || self.value
            || self.element_ref
            || self.any_attribute
            || self.any_element
            || self.mixed
    }

    /// Marker set for an attribute member.
    pub fn attribute() -> Self {
        MemberMarkers {
            attribute: true,
            ..MemberMarkers::default()
        }
    }

    /// Marker set for a value member.
    pub fn value() -> Self {
        MemberMarkers {
            value: true,
            ..MemberMarkers::default()
        }
    }

    /// Marker set for an element-reference member.
    pub fn element_ref() -> Self {
        MemberMarkers {
            element_ref: true,
            ..MemberMarkers::default()
        }
    }

    /// Marker set for a wildcard-attribute member.
    pub fn any_attribute() -> Self {
        MemberMarkers {
            any_attribute: true,
            ..MemberMarkers::default()
        }
    }

    /// Marker set for a wildcard-element member.
    pub fn any_element() -> Self {
        MemberMarkers {
            any_element: true,
            ..MemberMarkers::default()
        }
    }

    /// Attach the identifier marker.
    pub fn with_identifier(mut self) -> Self {
        self.identifier = true;
        self
    }
}

/// Markers on a type declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMarkers {
    /// Explicit schema-local name. `None` derives from the simple name;
    /// an explicit empty string makes the type anonymous.
    pub local_name: Option<String>,
    /// Explicit namespace, overriding the scope namespace.
    pub namespace: Option<String>,
    /// Explicit element ordering (name sequence). A lone empty string
    /// counts as absent.
    pub explicit_order: Option<Vec<String>>,
    /// Explicit access mode for this type.
    pub access_mode: Option<AccessMode>,
    /// Explicit access order for this type.
    pub access_order: Option<AccessOrder>,
    /// The type's members fold into its descendants instead of the type
    /// being modeled on its own.
    pub transparent: bool,
    /// Simple-name override for generated client code.
    pub client_name: Option<String>,
    /// Additional types the contract should also process.
    pub see_also: Vec<TypeId>,
    /// Facets attached to this type.
    pub facets: Vec<Facet>,
}

/// A named tag with an optional value, grouping types for downstream
/// tooling.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Facet {
    pub name: String,
    pub value: Option<String>,
}

impl Facet {
    pub fn new(name: impl Into<String>) -> Self {
        Facet {
            name: name.into(),
            value: None,
        }
    }

    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Facet {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}
