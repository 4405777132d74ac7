//! Element ordering: explicit name sequences and fallback policies.
//!
//! The ordered element container doubles as the collision detector: two
//! accessors compare equal exactly when their names are equal, which is the
//! condition the classifier's silent-drop leniency keys on.

use std::cmp::Ordering;

use schema_reflect::AccessOrder;

use crate::accessor::Accessor;
use crate::error::ModelError;

/// The ordering policy for one type's element accessors.
#[derive(Debug, Clone)]
pub struct ElementOrdering {
    explicit: Option<Vec<String>>,
    fallback: AccessOrder,
    tolerate_unlisted: bool,
}

impl ElementOrdering {
    /// Normalize and capture the policy inputs. An explicit order that is
    /// empty or consists of a single empty string counts as absent.
    pub fn new(
        explicit: Option<Vec<String>>,
        fallback: AccessOrder,
        tolerate_unlisted: bool,
    ) -> Self {
        let explicit = explicit
            .filter(|names| !names.is_empty() && !(names.len() == 1 && names[0].is_empty()));
        ElementOrdering {
            explicit,
            fallback,
            tolerate_unlisted,
        }
    }

    pub fn explicit(&self) -> Option<&[String]> {
        self.explicit.as_deref()
    }

    /// The order key for an element, or `None` when the name is missing
    /// from a strict explicit order (the caller raises the error, which
    /// needs the type identity this module does not have).
    fn key_for(&self, name: &str, declaration_index: usize) -> Option<OrderKey> {
        if let Some(listed) = &self.explicit {
            // A name listed twice uses its first occurrence's index.
            return match listed.iter().position(|entry| entry == name) {
                Some(index) => Some(OrderKey::Listed(index)),
                None if self.tolerate_unlisted => Some(OrderKey::Unlisted(declaration_index)),
                None => None,
            };
        }
        Some(match self.fallback {
            AccessOrder::Declaration => OrderKey::Declared(declaration_index),
            AccessOrder::Alphabetical => OrderKey::Named(name.to_string()),
        })
    }
}

/// Sort key for one element accessor. Entries of one [`ElementSet`] are
/// homogeneous apart from the Listed/Unlisted split; the cross-variant
/// ranking keeps the order total regardless.
#[derive(Debug, Clone, PartialEq, Eq)]
enum OrderKey {
    Listed(usize),
    Unlisted(usize),
    Declared(usize),
    Named(String),
}

impl OrderKey {
    fn rank(&self) -> u8 {
        match self {
            OrderKey::Listed(_) => 0,
            OrderKey::Unlisted(_) => 1,
            OrderKey::Declared(_) => 2,
            OrderKey::Named(_) => 3,
        }
    }
}

impl PartialOrd for OrderKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (OrderKey::Listed(a), OrderKey::Listed(b)) => a.cmp(b),
            (OrderKey::Unlisted(a), OrderKey::Unlisted(b)) => a.cmp(b),
            (OrderKey::Declared(a), OrderKey::Declared(b)) => a.cmp(b),
            (OrderKey::Named(a), OrderKey::Named(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

#[derive(Debug)]
struct ElementEntry {
    accessor: Accessor,
    key: OrderKey,
    declaration_index: usize,
}

/// The ordered, name-unique element accessor collection under
/// construction.
#[derive(Debug)]
pub struct ElementSet {
    ordering: ElementOrdering,
    entries: Vec<ElementEntry>,
}

impl ElementSet {
    pub fn new(ordering: ElementOrdering) -> Self {
        ElementSet {
            ordering,
            entries: Vec::new(),
        }
    }

    /// Whether an element with this name was already inserted. The caller
    /// checks this before classifying, to apply the silent-drop leniency.
    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.accessor.member.name == name)
    }

    /// Insert an element accessor. Fails with `MissingFromExplicitOrder`
    /// when a strict explicit order does not list the name.
    pub fn insert(
        &mut self,
        accessor: Accessor,
        declaration_index: usize,
        type_name: &str,
    ) -> Result<(), ModelError> {
        let key = self
            .ordering
            .key_for(&accessor.member.name, declaration_index)
            .ok_or_else(|| ModelError::MissingFromExplicitOrder {
                type_name: type_name.to_string(),
                member: accessor.member.name.clone(),
                order: self.ordering.explicit().unwrap_or_default().to_vec(),
            })?;
        self.entries.push(ElementEntry {
            accessor,
            key,
            declaration_index,
        });
        Ok(())
    }

    /// Finish: sort by key with a declaration-index tie-break and yield
    /// the accessors. Names are unique at this point, so the order is
    /// strict and total.
    pub fn into_ordered(mut self) -> Vec<Accessor> {
        self.entries.sort_by(|a, b| {
            a.key
                .cmp(&b.key)
                .then(a.declaration_index.cmp(&b.declaration_index))
        });
        self.entries.into_iter().map(|entry| entry.accessor).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::AccessorRole;
    use schema_reflect::{
        MemberDecl, MemberKind, MemberMarkers, ScopeDecl, TypeId, TypeRegistry, TypeSpec,
    };

    fn test_type() -> TypeId {
        let mut reg = TypeRegistry::new();
        let scope = reg.declare_scope(ScopeDecl::named("s"));
        reg.declare_type(scope, TypeSpec::new("T"))
    }

    fn element(name: &str) -> Accessor {
        Accessor {
            member: MemberDecl {
                name: name.to_string(),
                kind: MemberKind::Field,
                declared_in: test_type(),
                public: true,
                markers: MemberMarkers::default(),
                getter: None,
                setter: None,
            },
            role: AccessorRole::Element,
        }
    }

    fn ordered_names(set: ElementSet) -> Vec<String> {
        set.into_ordered()
            .into_iter()
            .map(|a| a.member.name)
            .collect()
    }

    #[test]
    fn test_explicit_order_wins() {
        let ordering = ElementOrdering::new(
            Some(vec!["b".to_string(), "a".to_string()]),
            AccessOrder::Declaration,
            false,
        );
        let mut set = ElementSet::new(ordering);
        set.insert(element("a"), 0, "s.T").unwrap();
        set.insert(element("b"), 1, "s.T").unwrap();
        assert_eq!(ordered_names(set), vec!["b", "a"]);
    }

    #[test]
    fn test_declaration_fallback() {
        let ordering = ElementOrdering::new(None, AccessOrder::Declaration, false);
        let mut set = ElementSet::new(ordering);
        set.insert(element("a"), 0, "s.T").unwrap();
        set.insert(element("b"), 1, "s.T").unwrap();
        assert_eq!(ordered_names(set), vec!["a", "b"]);
    }

    #[test]
    fn test_alphabetical_fallback() {
        let ordering = ElementOrdering::new(None, AccessOrder::Alphabetical, false);
        let mut set = ElementSet::new(ordering);
        set.insert(element("b"), 0, "s.T").unwrap();
        set.insert(element("a"), 1, "s.T").unwrap();
        assert_eq!(ordered_names(set), vec!["a", "b"]);
    }

    #[test]
    fn test_lone_empty_string_counts_as_absent() {
        let ordering = ElementOrdering::new(
            Some(vec![String::new()]),
            AccessOrder::Declaration,
            false,
        );
        assert!(ordering.explicit().is_none());
        let mut set = ElementSet::new(ordering);
        // Would be MissingFromExplicitOrder if the list were live.
        set.insert(element("a"), 0, "s.T").unwrap();
    }

    #[test]
    fn test_missing_from_strict_explicit_order() {
        let ordering =
            ElementOrdering::new(Some(vec!["a".to_string()]), AccessOrder::Declaration, false);
        let mut set = ElementSet::new(ordering);
        set.insert(element("a"), 0, "s.T").unwrap();
        let err = set.insert(element("b"), 1, "s.T").unwrap_err();
        assert_eq!(
            err,
            ModelError::MissingFromExplicitOrder {
                type_name: "s.T".to_string(),
                member: "b".to_string(),
                order: vec!["a".to_string()],
            }
        );
    }

    #[test]
    fn test_tolerant_unlisted_sort_after_listed() {
        let ordering =
            ElementOrdering::new(Some(vec!["z".to_string()]), AccessOrder::Declaration, true);
        let mut set = ElementSet::new(ordering);
        set.insert(element("extra_b"), 0, "s.T").unwrap();
        set.insert(element("z"), 1, "s.T").unwrap();
        set.insert(element("extra_a"), 2, "s.T").unwrap();
        assert_eq!(ordered_names(set), vec!["z", "extra_b", "extra_a"]);
    }

    #[test]
    fn test_contains_tracks_names() {
        let ordering = ElementOrdering::new(None, AccessOrder::Declaration, false);
        let mut set = ElementSet::new(ordering);
        assert!(!set.contains("a"));
        set.insert(element("a"), 0, "s.T").unwrap();
        assert!(set.contains("a"));
        assert!(!set.contains("b"));
    }
}
