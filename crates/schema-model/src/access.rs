//! Accessor eligibility: the access-mode cascade and the filter predicate.

use schema_reflect::{AccessMode, AccessOrder, MemberDecl, MemberKind, TypeId, TypeReflection};

/// Pass-wide policy defaults, applied when neither the type nor its scope
/// says otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelDefaults {
    pub access_mode: AccessMode,
    pub access_order: AccessOrder,
    /// Tolerate element names missing from an explicit order instead of
    /// failing the type.
    pub tolerate_partial_order: bool,
}

/// Decides whether a candidate member is eligible to become an accessor at
/// all, independent of role.
///
/// The mode semantics are a policy input: implementations must be
/// deterministic and total over all candidate members.
pub trait AccessPolicy: Send + Sync {
    fn accept(&self, member: &MemberDecl, mode: AccessMode) -> bool;
}

/// The conventional mode semantics: role-marked members are always
/// eligible, member-transparent members never are, and otherwise the mode
/// selects by kind and visibility.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardAccessPolicy;

impl AccessPolicy for StandardAccessPolicy {
    fn accept(&self, member: &MemberDecl, mode: AccessMode) -> bool {
        if member.markers.transparent {
            return false;
        }
        if member.markers.names_role() {
            return true;
        }
        match mode {
            AccessMode::None => false,
            AccessMode::Field => member.kind == MemberKind::Field,
            AccessMode::Property => member.kind == MemberKind::Property,
            AccessMode::PublicMember => member.public,
        }
    }
}

/// The filter predicate handed to the member collector: a resolved access
/// mode bound to a policy.
pub struct AccessorFilter<'a> {
    mode: AccessMode,
    policy: &'a dyn AccessPolicy,
}

impl<'a> AccessorFilter<'a> {
    pub fn new(mode: AccessMode, policy: &'a dyn AccessPolicy) -> Self {
        AccessorFilter { mode, policy }
    }

    pub fn accept(&self, member: &MemberDecl) -> bool {
        self.policy.accept(member, self.mode)
    }

    pub fn mode(&self) -> AccessMode {
        self.mode
    }
}

/// Resolve the effective access mode for a type.
///
/// Cascade: explicit marker on the type, then the nearest ancestor's
/// explicit marker (the walk crosses transparent and non-transparent
/// ancestors alike and stops at the hierarchy root), then the scope
/// default, then the pass-wide default.
pub fn resolve_access_mode(
    reflection: &dyn TypeReflection,
    ty: TypeId,
    defaults: &ModelDefaults,
) -> AccessMode {
    if let Some(mode) = reflection.type_markers(ty).access_mode {
        return mode;
    }
    let mut ancestor = reflection.superclass(ty);
    while let Some(current) = ancestor {
        if let Some(mode) = reflection.type_markers(current).access_mode {
            return mode;
        }
        ancestor = reflection.superclass(current);
    }
    reflection
        .scope(reflection.scope_of(ty))
        .access_mode
        .unwrap_or(defaults.access_mode)
}

/// Resolve the effective access order for a type.
///
/// Cascade: explicit marker on the type, then the scope default, then the
/// pass-wide default. Unlike the access mode, the order is not inherited
/// from ancestors.
pub fn resolve_access_order(
    reflection: &dyn TypeReflection,
    ty: TypeId,
    defaults: &ModelDefaults,
) -> AccessOrder {
    if let Some(order) = reflection.type_markers(ty).access_order {
        return order;
    }
    reflection
        .scope(reflection.scope_of(ty))
        .access_order
        .unwrap_or(defaults.access_order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema_reflect::{
        MemberMarkers, MemberSpec, ScopeDecl, TypeMarkers, TypeRegistry, TypeSpec,
    };

    fn field(reg: &mut TypeRegistry, ty: TypeId, name: &str, public: bool) -> MemberDecl {
        let spec = if public {
            MemberSpec::new(name)
        } else {
            MemberSpec::new(name).private()
        };
        reg.add_field(ty, spec);
        reg.declared_fields(ty).last().cloned().unwrap()
    }

    #[test]
    fn test_standard_policy_modes() {
        let mut reg = TypeRegistry::new();
        let scope = reg.declare_scope(ScopeDecl::named("s"));
        let ty = reg.declare_type(scope, TypeSpec::new("T"));
        let public_field = field(&mut reg, ty, "a", true);
        let private_field = field(&mut reg, ty, "b", false);
        reg.add_property(ty, MemberSpec::new("c"));
        let property = reg.declared_properties(ty)[0].clone();

        let policy = StandardAccessPolicy;
        assert!(policy.accept(&public_field, AccessMode::PublicMember));
        assert!(!policy.accept(&private_field, AccessMode::PublicMember));
        assert!(policy.accept(&private_field, AccessMode::Field));
        assert!(!policy.accept(&property, AccessMode::Field));
        assert!(policy.accept(&property, AccessMode::Property));
        assert!(!policy.accept(&public_field, AccessMode::None));
    }

    #[test]
    fn test_role_marked_member_bypasses_mode() {
        let mut reg = TypeRegistry::new();
        let scope = reg.declare_scope(ScopeDecl::named("s"));
        let ty = reg.declare_type(scope, TypeSpec::new("T"));
        reg.add_field(
            ty,
            MemberSpec::new("tagged")
                .private()
                .with_markers(MemberMarkers::attribute()),
        );
        let tagged = reg.declared_fields(ty)[0].clone();

        let policy = StandardAccessPolicy;
        assert!(policy.accept(&tagged, AccessMode::None));
    }

    #[test]
    fn test_member_transparent_never_eligible() {
        let mut reg = TypeRegistry::new();
        let scope = reg.declare_scope(ScopeDecl::named("s"));
        let ty = reg.declare_type(scope, TypeSpec::new("T"));
        let markers = MemberMarkers {
            transparent: true,
            attribute: true,
            ..MemberMarkers::default()
        };
        reg.add_field(ty, MemberSpec::new("skipped").with_markers(markers));
        let skipped = reg.declared_fields(ty)[0].clone();

        assert!(!StandardAccessPolicy.accept(&skipped, AccessMode::Field));
    }

    #[test]
    fn test_access_mode_cascade() {
        let mut reg = TypeRegistry::new();
        let scope = reg.declare_scope(ScopeDecl {
            name: "s".to_string(),
            access_mode: Some(AccessMode::Property),
            ..ScopeDecl::default()
        });
        let grandparent = reg.declare_type(
            scope,
            TypeSpec::new("Grandparent").with_markers(TypeMarkers {
                access_mode: Some(AccessMode::Field),
                ..TypeMarkers::default()
            }),
        );
        let parent = reg.declare_type(scope, TypeSpec::new("Parent").extends(grandparent));
        let child = reg.declare_type(scope, TypeSpec::new("Child").extends(parent));
        let defaults = ModelDefaults::default();

        // Nearest ancestor explicit marker wins over the scope default.
        assert_eq!(
            resolve_access_mode(&reg, child, &defaults),
            AccessMode::Field
        );
        assert_eq!(
            resolve_access_mode(&reg, grandparent, &defaults),
            AccessMode::Field
        );

        // Without any explicit marker up the chain, the scope decides.
        let loner = reg.declare_type(scope, TypeSpec::new("Loner"));
        assert_eq!(
            resolve_access_mode(&reg, loner, &defaults),
            AccessMode::Property
        );
    }

    #[test]
    fn test_access_order_not_inherited() {
        let mut reg = TypeRegistry::new();
        let scope = reg.declare_scope(ScopeDecl::named("s"));
        let parent = reg.declare_type(
            scope,
            TypeSpec::new("Parent").with_markers(TypeMarkers {
                access_order: Some(AccessOrder::Alphabetical),
                ..TypeMarkers::default()
            }),
        );
        let child = reg.declare_type(scope, TypeSpec::new("Child").extends(parent));
        let defaults = ModelDefaults::default();

        assert_eq!(
            resolve_access_order(&reg, parent, &defaults),
            AccessOrder::Alphabetical
        );
        // The child falls through to the default despite the parent marker.
        assert_eq!(
            resolve_access_order(&reg, child, &defaults),
            AccessOrder::Declaration
        );
    }
}
