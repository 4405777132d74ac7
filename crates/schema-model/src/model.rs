//! Type-model construction: collect, filter, classify, order, assemble.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use schema_reflect::{
    Facet, MemberKind, MethodId, TypeId, TypeReflection,
};

use crate::access::{
    resolve_access_mode, resolve_access_order, AccessPolicy, AccessorFilter, ModelDefaults,
};
use crate::accessor::{
    classify, Accessor, AccessorRole, Classification, DropReason, DroppedAccessor,
};
use crate::collector::collect;
use crate::error::ModelError;
use crate::names::{decapitalize, QName};
use crate::ordering::{ElementOrdering, ElementSet};

/// Everything a model construction needs besides the type identity.
pub struct ModelContext<'a> {
    pub reflection: &'a dyn TypeReflection,
    pub policy: &'a dyn AccessPolicy,
    pub defaults: ModelDefaults,
}

/// The immutable classification result for one type.
///
/// Constructed once, never mutated; safe to share across threads behind an
/// `Arc` once published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeModel {
    type_id: TypeId,
    qualified_name: String,
    simple_name: String,
    client_simple_name: String,
    local_name: Option<String>,
    namespace: Option<String>,
    elements: Vec<Accessor>,
    attributes: Vec<Accessor>,
    value: Option<Accessor>,
    identifier: Option<Accessor>,
    has_any_attribute: bool,
    any_attribute_known_qnames: Option<TypeId>,
    any_element: Option<Accessor>,
    see_also: Vec<TypeId>,
    facets: BTreeSet<Facet>,
    dropped: Vec<DroppedAccessor>,
}

impl TypeModel {
    /// Classify, validate and order the members of `ty`.
    ///
    /// Fails fast on the first fatal condition; silent drops are recorded
    /// in the model's audit trail instead.
    pub fn build(cx: &ModelContext<'_>, ty: TypeId) -> Result<TypeModel, ModelError> {
        let reflection = cx.reflection;
        let qualified_name = reflection.qualified_name(ty);

        let mode = resolve_access_mode(reflection, ty, &cx.defaults);
        let order = resolve_access_order(reflection, ty, &cx.defaults);
        let markers = reflection.type_markers(ty);
        let ordering = ElementOrdering::new(
            markers.explicit_order.clone(),
            order,
            cx.defaults.tolerate_partial_order,
        );
        debug!(ty = %qualified_name, ?mode, ?order, "building type model");

        let filter = AccessorFilter::new(mode, cx.policy);
        let candidates = collect(reflection, ty, &filter).into_candidates();

        let mut elements = ElementSet::new(ordering);
        let mut attributes: Vec<Accessor> = Vec::new();
        let mut value: Option<Accessor> = None;
        let mut identifier: Option<Accessor> = None;
        let mut has_any_attribute = false;
        let mut any_attribute_known_qnames: Option<TypeId> = None;
        let mut any_element: Option<Accessor> = None;
        let mut dropped: Vec<DroppedAccessor> = Vec::new();

        for (index, member) in candidates.into_iter().enumerate() {
            let added = match classify(&member.markers) {
                Classification::Attribute => {
                    let accessor = Accessor::new(member, AccessorRole::Attribute);
                    attributes.push(accessor.clone());
                    accessor
                }
                Classification::Value => {
                    if let Some(previous) = &value {
                        return Err(ModelError::DuplicateValue {
                            type_name: qualified_name,
                            first: previous.member.name.clone(),
                            second: member.name,
                        });
                    }
                    let accessor = Accessor::new(member, AccessorRole::Value);
                    value = Some(accessor.clone());
                    accessor
                }
                Classification::ElementRef => {
                    if elements.contains(&member.name) {
                        debug!(member = %member.name, "element ref dropped on name collision");
                        dropped.push(DroppedAccessor {
                            member,
                            reason: DropReason::NameCollision,
                        });
                        continue;
                    }
                    let accessor = Accessor::new(member, AccessorRole::ElementRef);
                    elements.insert(accessor.clone(), index, &qualified_name)?;
                    accessor
                }
                Classification::AnyAttribute => {
                    has_any_attribute = true;
                    if member.markers.known_qnames.is_some() {
                        any_attribute_known_qnames = member.markers.known_qnames;
                    }
                    // Consumed: the wildcard attribute is a flag, not an
                    // accessor.
                    continue;
                }
                Classification::AnyElement => {
                    if let Some(previous) = &any_element {
                        return Err(ModelError::DuplicateAnyElement {
                            type_name: qualified_name,
                            first: previous.member.name.clone(),
                            second: member.name,
                        });
                    }
                    let accessor = Accessor::new(member, AccessorRole::AnyElement);
                    any_element = Some(accessor.clone());
                    accessor
                }
                Classification::Unsupported => {
                    return Err(ModelError::UnsupportedAccessorKind {
                        type_name: qualified_name,
                        member: member.name,
                    });
                }
                Classification::Element => {
                    if member.kind == MemberKind::Property
                        && property_overrides_ancestor(reflection, member.declared_in, member.getter, member.setter)
                    {
                        debug!(member = %member.name, "element suppressed by ancestor override");
                        dropped.push(DroppedAccessor {
                            member,
                            reason: DropReason::OverrideSuppressed,
                        });
                        continue;
                    }
                    if elements.contains(&member.name) {
                        debug!(member = %member.name, "element dropped on name collision");
                        dropped.push(DroppedAccessor {
                            member,
                            reason: DropReason::NameCollision,
                        });
                        continue;
                    }
                    let accessor = Accessor::new(member, AccessorRole::Element);
                    elements.insert(accessor.clone(), index, &qualified_name)?;
                    accessor
                }
            };

            if added.member.markers.identifier {
                if let Some(previous) = &identifier {
                    return Err(ModelError::DuplicateIdentifier {
                        type_name: qualified_name,
                        first: previous.member.name.clone(),
                        second: added.member.name.clone(),
                    });
                }
                identifier = Some(added);
            }
        }

        let simple_name = reflection.simple_name(ty).to_string();
        let local_name = match &markers.local_name {
            Some(explicit) if explicit.is_empty() => None,
            Some(explicit) => Some(explicit.clone()),
            None => Some(decapitalize(&simple_name)),
        };
        let scope = reflection.scope(reflection.scope_of(ty));
        let namespace = markers
            .namespace
            .clone()
            .or_else(|| scope.namespace.clone());
        let client_simple_name = markers
            .client_name
            .clone()
            .unwrap_or_else(|| simple_name.clone());
        let mut facets: BTreeSet<Facet> = markers.facets.iter().cloned().collect();
        facets.extend(scope.facets.iter().cloned());

        let model = TypeModel {
            type_id: ty,
            qualified_name,
            simple_name,
            client_simple_name,
            local_name,
            namespace,
            elements: elements.into_ordered(),
            attributes,
            value,
            identifier,
            has_any_attribute,
            any_attribute_known_qnames,
            any_element,
            see_also: markers.see_also.clone(),
            facets,
            dropped,
        };
        debug!(
            ty = %model.qualified_name,
            elements = model.elements.len(),
            attributes = model.attributes.len(),
            dropped = model.dropped.len(),
            "type model built"
        );
        Ok(model)
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The source-language qualified name, for diagnostics.
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    /// The simple name for generated client code.
    pub fn client_simple_name(&self) -> &str {
        &self.client_simple_name
    }

    /// The schema-local name, or `None` for an anonymous type.
    pub fn local_name(&self) -> Option<&str> {
        self.local_name.as_deref()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The qualified schema name. Anonymous types carry an empty local
    /// part.
    pub fn qname(&self) -> QName {
        QName {
            namespace: self.namespace.clone(),
            local: self.local_name.clone().unwrap_or_default(),
        }
    }

    /// Whether no schema-name marker yields a usable local name.
    pub fn is_anonymous(&self) -> bool {
        self.local_name.is_none()
    }

    /// Element accessors (Element and ElementRef roles) in their total
    /// order.
    pub fn elements(&self) -> &[Accessor] {
        &self.elements
    }

    pub fn attributes(&self) -> &[Accessor] {
        &self.attributes
    }

    pub fn value(&self) -> Option<&Accessor> {
        self.value.as_ref()
    }

    /// The accessor carrying the identifier marker, across all roles.
    pub fn identifier(&self) -> Option<&Accessor> {
        self.identifier.as_ref()
    }

    pub fn has_any_attribute(&self) -> bool {
        self.has_any_attribute
    }

    /// The known-qname enumeration captured with the wildcard attribute.
    pub fn any_attribute_known_qnames(&self) -> Option<TypeId> {
        self.any_attribute_known_qnames
    }

    pub fn any_element(&self) -> Option<&Accessor> {
        self.any_element.as_ref()
    }

    /// Types the contract should also process.
    pub fn see_also(&self) -> &[TypeId] {
        &self.see_also
    }

    /// Facets of the type and its scope, ordered and deduplicated.
    pub fn facets(&self) -> &BTreeSet<Facet> {
        &self.facets
    }

    /// The silent-drop audit trail: deterministic, inspectable, not an
    /// error.
    pub fn dropped(&self) -> &[DroppedAccessor] {
        &self.dropped
    }

    /// All accessors classified into `role`.
    pub fn by_role(&self, role: AccessorRole) -> Vec<&Accessor> {
        self.elements
            .iter()
            .chain(self.attributes.iter())
            .chain(self.value.iter())
            .chain(self.any_element.iter())
            .filter(|accessor| accessor.role == role)
            .collect()
    }
}

/// Whether a property's getter or setter overrides any ancestor method.
///
/// The walk crosses transparent and non-transparent ancestors alike: the
/// check is about method identity, not transparency. Method resolution
/// itself stays behind the reflection boundary.
fn property_overrides_ancestor(
    reflection: &dyn TypeReflection,
    declared_in: TypeId,
    getter: Option<MethodId>,
    setter: Option<MethodId>,
) -> bool {
    let overrides_from = |method: Option<MethodId>| -> bool {
        let Some(method) = method else {
            return false;
        };
        let mut ancestor = reflection.superclass(declared_in);
        while let Some(current) = ancestor {
            for &candidate in reflection.declared_methods(current) {
                if reflection.does_override(method, candidate) {
                    return true;
                }
            }
            ancestor = reflection.superclass(current);
        }
        false
    };
    overrides_from(getter) || overrides_from(setter)
}
