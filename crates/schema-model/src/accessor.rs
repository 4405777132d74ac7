//! Classified accessors and the silent-drop audit trail.

use std::fmt;

use serde::Serialize;

use schema_reflect::{MemberDecl, MemberMarkers};

/// The role a classified member plays in the structural schema. Roles are
/// mutually exclusive; the wildcard attribute is a type-level flag and has
/// no accessor of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AccessorRole {
    Attribute,
    Value,
    Element,
    ElementRef,
    AnyElement,
}

/// A member classified into exactly one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Accessor {
    pub member: MemberDecl,
    pub role: AccessorRole,
}

impl Accessor {
    pub fn new(member: MemberDecl, role: AccessorRole) -> Self {
        Accessor { member, role }
    }

    pub fn name(&self) -> &str {
        &self.member.name
    }
}

/// The classification outcome for one candidate's marker set.
///
/// Precedence is first-match over this order; it is load-bearing and must
/// not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Classification {
    Attribute,
    Value,
    ElementRef,
    AnyAttribute,
    AnyElement,
    Unsupported,
    Element,
}

/// Map a marker set to its classification.
pub(crate) fn classify(markers: &MemberMarkers) -> Classification {
    if markers.attribute {
        Classification::Attribute
    } else if markers.value {
        Classification::Value
    } else if markers.element_ref {
        Classification::ElementRef
    } else if markers.any_attribute {
        Classification::AnyAttribute
    } else if markers.any_element {
        Classification::AnyElement
    } else if markers.mixed {
        Classification::Unsupported
    } else {
        Classification::Element
    }
}

/// Why a candidate was silently dropped. Drops are policy-sanctioned and
/// deterministic; they are recorded for tooling visibility, never raised
/// as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DropReason {
    /// An accessor with the same name was already classified.
    NameCollision,
    /// A property accessor method overrides an ancestor's method; the
    /// member re-exposes an inherited concern and is not double-counted.
    OverrideSuppressed,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::NameCollision => write!(f, "name collision"),
            DropReason::OverrideSuppressed => write!(f, "override suppressed"),
        }
    }
}

/// One silent-drop audit entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedAccessor {
    pub member: MemberDecl,
    pub reason: DropReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_first_match_wins() {
        // A marker set with everything lit still classifies as attribute.
        let all = MemberMarkers {
            attribute: true,
            value: true,
            element_ref: true,
            any_attribute: true,
            any_element: true,
            mixed: true,
            ..MemberMarkers::default()
        };
        assert_eq!(classify(&all), Classification::Attribute);

        let value_and_below = MemberMarkers {
            value: true,
            element_ref: true,
            mixed: true,
            ..MemberMarkers::default()
        };
        assert_eq!(classify(&value_and_below), Classification::Value);

        assert_eq!(
            classify(&MemberMarkers::element_ref()),
            Classification::ElementRef
        );
        assert_eq!(
            classify(&MemberMarkers::any_attribute()),
            Classification::AnyAttribute
        );
        assert_eq!(
            classify(&MemberMarkers::any_element()),
            Classification::AnyElement
        );

        let mixed = MemberMarkers {
            mixed: true,
            ..MemberMarkers::default()
        };
        assert_eq!(classify(&mixed), Classification::Unsupported);
    }

    #[test]
    fn test_unmarked_member_is_element() {
        assert_eq!(classify(&MemberMarkers::default()), Classification::Element);
        // The identifier marker does not change the role.
        let id_only = MemberMarkers::default().with_identifier();
        assert_eq!(classify(&id_only), Classification::Element);
    }
}
