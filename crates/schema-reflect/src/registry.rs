//! In-memory type registry implementing [`TypeReflection`].
//!
//! Embedders and tests declare scopes, types and members through the
//! registration API; the engine then reads them back through the trait.

use smallvec::SmallVec;
use std::collections::HashSet;

use crate::decl::{
    MemberDecl, MemberKind, MethodId, ScopeDecl, ScopeId, TypeId,
};
use crate::markers::{MemberMarkers, TypeMarkers};
use crate::reflection::TypeReflection;

/// Declaration-time description of a type.
#[derive(Debug, Clone, Default)]
pub struct TypeSpec {
    pub simple_name: String,
    pub superclass: Option<TypeId>,
    pub markers: TypeMarkers,
}

impl TypeSpec {
    pub fn new(simple_name: impl Into<String>) -> Self {
        TypeSpec {
            simple_name: simple_name.into(),
            ..TypeSpec::default()
        }
    }

    /// Link this type under a superclass.
    pub fn extends(mut self, superclass: TypeId) -> Self {
        self.superclass = Some(superclass);
        self
    }

    /// Mark the type transparent: its members fold into descendants.
    pub fn transparent(mut self) -> Self {
        self.markers.transparent = true;
        self
    }

    pub fn with_markers(mut self, markers: TypeMarkers) -> Self {
        // `transparent()` may have been called before this.
        let transparent = self.markers.transparent;
        self.markers = markers;
        self.markers.transparent |= transparent;
        self
    }
}

/// Declaration-time description of a member.
#[derive(Debug, Clone)]
pub struct MemberSpec {
    pub name: String,
    pub public: bool,
    pub markers: MemberMarkers,
}

impl MemberSpec {
    pub fn new(name: impl Into<String>) -> Self {
        MemberSpec {
            name: name.into(),
            public: true,
            markers: MemberMarkers::default(),
        }
    }

    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }

    pub fn with_markers(mut self, markers: MemberMarkers) -> Self {
        self.markers = markers;
        self
    }
}

/// The accessor methods allocated for a registered property.
#[derive(Debug, Clone, Copy)]
pub struct PropertyMethods {
    pub getter: MethodId,
    pub setter: MethodId,
}

#[derive(Debug)]
struct TypeEntry {
    simple_name: String,
    scope: ScopeId,
    superclass: Option<TypeId>,
    markers: TypeMarkers,
    fields: Vec<MemberDecl>,
    properties: Vec<MemberDecl>,
    methods: SmallVec<[MethodId; 8]>,
}

/// In-memory reflection source.
///
/// Identities issued by one registry are only meaningful against that
/// registry.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    scopes: Vec<ScopeDecl>,
    types: Vec<TypeEntry>,
    next_method: u32,
    overrides: HashSet<(MethodId, MethodId)>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        TypeRegistry::default()
    }

    /// Register a scope and return its identity.
    pub fn declare_scope(&mut self, scope: ScopeDecl) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(scope);
        id
    }

    /// Register a type in a scope and return its identity.
    pub fn declare_type(&mut self, scope: ScopeId, spec: TypeSpec) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(TypeEntry {
            simple_name: spec.simple_name,
            scope,
            superclass: spec.superclass,
            markers: spec.markers,
            fields: Vec::new(),
            properties: Vec::new(),
            methods: SmallVec::new(),
        });
        id
    }

    /// Declare a field directly on a type.
    pub fn add_field(&mut self, ty: TypeId, spec: MemberSpec) {
        let decl = MemberDecl {
            name: spec.name,
            kind: MemberKind::Field,
            declared_in: ty,
            public: spec.public,
            markers: spec.markers,
            getter: None,
            setter: None,
        };
        self.types[ty.0 as usize].fields.push(decl);
    }

    /// Declare a property directly on a type, allocating its accessor
    /// methods.
    pub fn add_property(&mut self, ty: TypeId, spec: MemberSpec) -> PropertyMethods {
        let getter = self.alloc_method(ty);
        let setter = self.alloc_method(ty);
        let decl = MemberDecl {
            name: spec.name,
            kind: MemberKind::Property,
            declared_in: ty,
            public: spec.public,
            markers: spec.markers,
            getter: Some(getter),
            setter: Some(setter),
        };
        self.types[ty.0 as usize].properties.push(decl);
        PropertyMethods { getter, setter }
    }

    /// Record that `method` overrides `ancestor`.
    pub fn mark_override(&mut self, method: MethodId, ancestor: MethodId) {
        self.overrides.insert((method, ancestor));
    }

    fn alloc_method(&mut self, ty: TypeId) -> MethodId {
        let id = MethodId(self.next_method);
        self.next_method += 1;
        self.types[ty.0 as usize].methods.push(id);
        id
    }

    fn entry(&self, ty: TypeId) -> &TypeEntry {
        &self.types[ty.0 as usize]
    }
}

impl TypeReflection for TypeRegistry {
    fn superclass(&self, ty: TypeId) -> Option<TypeId> {
        self.entry(ty).superclass
    }

    fn simple_name(&self, ty: TypeId) -> &str {
        &self.entry(ty).simple_name
    }

    fn qualified_name(&self, ty: TypeId) -> String {
        let entry = self.entry(ty);
        let scope = &self.scopes[entry.scope.0 as usize];
        if scope.name.is_empty() {
            entry.simple_name.clone()
        } else {
            format!("{}.{}", scope.name, entry.simple_name)
        }
    }

    fn scope_of(&self, ty: TypeId) -> ScopeId {
        self.entry(ty).scope
    }

    fn scope(&self, scope: ScopeId) -> &ScopeDecl {
        &self.scopes[scope.0 as usize]
    }

    fn type_markers(&self, ty: TypeId) -> &TypeMarkers {
        &self.entry(ty).markers
    }

    fn declared_fields(&self, ty: TypeId) -> &[MemberDecl] {
        &self.entry(ty).fields
    }

    fn declared_properties(&self, ty: TypeId) -> &[MemberDecl] {
        &self.entry(ty).properties
    }

    fn declared_methods(&self, ty: TypeId) -> &[MethodId] {
        &self.entry(ty).methods
    }

    fn does_override(&self, method: MethodId, ancestor: MethodId) -> bool {
        self.overrides.contains(&(method, ancestor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_and_query() {
        let mut reg = TypeRegistry::new();
        let scope = reg.declare_scope(ScopeDecl {
            name: "orders".to_string(),
            namespace: Some("urn:orders".to_string()),
            ..ScopeDecl::default()
        });
        let base = reg.declare_type(scope, TypeSpec::new("OrderBase").transparent());
        let order = reg.declare_type(scope, TypeSpec::new("Order").extends(base));

        reg.add_field(base, MemberSpec::new("created"));
        reg.add_field(order, MemberSpec::new("sku"));

        assert_eq!(reg.superclass(order), Some(base));
        assert_eq!(reg.superclass(base), None);
        assert!(reg.is_transparent(base));
        assert!(!reg.is_transparent(order));
        assert_eq!(reg.qualified_name(order), "orders.Order");
        assert_eq!(reg.declared_fields(order).len(), 1);
        assert_eq!(reg.declared_fields(order)[0].name, "sku");
        assert_eq!(reg.scope(reg.scope_of(order)).namespace.as_deref(), Some("urn:orders"));
    }

    #[test]
    fn test_property_methods_and_overrides() {
        let mut reg = TypeRegistry::new();
        let scope = reg.declare_scope(ScopeDecl::named("orders"));
        let base = reg.declare_type(scope, TypeSpec::new("Base"));
        let child = reg.declare_type(scope, TypeSpec::new("Child").extends(base));

        let base_methods = reg.add_property(base, MemberSpec::new("label"));
        let child_methods = reg.add_property(child, MemberSpec::new("label"));
        reg.mark_override(child_methods.getter, base_methods.getter);

        assert!(reg.does_override(child_methods.getter, base_methods.getter));
        assert!(!reg.does_override(base_methods.getter, child_methods.getter));
        assert_eq!(reg.declared_methods(base).len(), 2);

        let prop = &reg.declared_properties(child)[0];
        assert_eq!(prop.kind, MemberKind::Property);
        assert_eq!(prop.getter, Some(child_methods.getter));
    }

    #[test]
    fn test_qualified_name_without_scope_name() {
        let mut reg = TypeRegistry::new();
        let scope = reg.declare_scope(ScopeDecl::default());
        let ty = reg.declare_type(scope, TypeSpec::new("Loose"));
        assert_eq!(reg.qualified_name(ty), "Loose");
    }
}
