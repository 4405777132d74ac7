//! The reflection capability the engine consumes.

use crate::decl::{MemberDecl, MethodId, ScopeDecl, ScopeId, TypeId};
use crate::markers::TypeMarkers;

/// Read-only ancestry, member and override queries over declared types.
///
/// Implementations must be deterministic: the engine may issue the same
/// query from multiple worker threads and caches nothing on this boundary.
/// The root of the type hierarchy is represented by `superclass` returning
/// `None`; the engine never walks past it.
pub trait TypeReflection: Send + Sync {
    /// The direct superclass, or `None` at the hierarchy root.
    fn superclass(&self, ty: TypeId) -> Option<TypeId>;

    /// Whether the type's members fold into descendants rather than the
    /// type being modeled on its own.
    fn is_transparent(&self, ty: TypeId) -> bool {
        self.type_markers(ty).transparent
    }

    /// The type's simple (unqualified) name.
    fn simple_name(&self, ty: TypeId) -> &str;

    /// The type's qualified name, for diagnostics.
    fn qualified_name(&self, ty: TypeId) -> String;

    /// The scope the type was declared in.
    fn scope_of(&self, ty: TypeId) -> ScopeId;

    /// Scope facts (namespace, policy defaults, facets).
    fn scope(&self, scope: ScopeId) -> &ScopeDecl;

    /// Markers attached to the type declaration.
    fn type_markers(&self, ty: TypeId) -> &TypeMarkers;

    /// Fields declared directly on the type, in declaration order.
    fn declared_fields(&self, ty: TypeId) -> &[MemberDecl];

    /// Properties declared directly on the type, in declaration order.
    fn declared_properties(&self, ty: TypeId) -> &[MemberDecl];

    /// Accessor methods declared directly on the type.
    fn declared_methods(&self, ty: TypeId) -> &[MethodId];

    /// Whether `method` overrides `ancestor`. Method resolution rules stay
    /// on this side of the boundary; the engine only compares identities
    /// it obtained from `declared_methods` and member declarations.
    fn does_override(&self, method: MethodId, ancestor: MethodId) -> bool;
}
