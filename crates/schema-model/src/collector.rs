//! Member collection: the ancestry walk that aggregates candidate members.

use tracing::trace;

use schema_reflect::{MemberDecl, TypeId, TypeReflection};

use crate::access::AccessorFilter;

/// The two name-deduplicated, insertion-ordered candidate buckets.
#[derive(Debug, Default)]
pub struct MemberBuckets {
    pub fields: Vec<MemberDecl>,
    pub properties: Vec<MemberDecl>,
}

impl MemberBuckets {
    /// All candidates in classification order: fields first, then
    /// properties. The position in this sequence is the declaration index
    /// the orderer falls back on.
    pub fn into_candidates(self) -> Vec<MemberDecl> {
        let mut candidates = self.fields;
        candidates.extend(self.properties);
        candidates
    }
}

/// Collect candidate members for `ty`, folding in transparent ancestors.
///
/// The ancestry chain is materialized as an explicit worklist and processed
/// ancestor-before-descendant, so a transparent ancestor's members land in
/// the buckets before the descendant's own. The upward walk continues while
/// the next ancestor is transparent or has already been reached through a
/// transparent link; the first non-transparent ancestor terminates it (that
/// ancestor is modeled as its own type elsewhere). The hierarchy root is
/// never walked: `superclass` returns `None` there.
///
/// At each level, a candidate rejected by the filter removes any same-named
/// entry an ancestor contributed; an accepted candidate replaces a
/// same-named entry or appends.
pub fn collect(
    reflection: &dyn TypeReflection,
    ty: TypeId,
    filter: &AccessorFilter<'_>,
) -> MemberBuckets {
    let mut chain = vec![ty];
    let mut current = ty;
    let mut through_transparent = false;
    while let Some(ancestor) = reflection.superclass(current) {
        if !through_transparent && !reflection.is_transparent(ancestor) {
            break;
        }
        chain.push(ancestor);
        through_transparent = true;
        current = ancestor;
    }

    let mut buckets = MemberBuckets::default();
    // Ancestor-before-descendant.
    for &level in chain.iter().rev() {
        trace!(level = %reflection.qualified_name(level), "aggregating members");
        for member in reflection.declared_fields(level) {
            merge(&mut buckets.fields, member, filter);
        }
        for member in reflection.declared_properties(level) {
            merge(&mut buckets.properties, member, filter);
        }
    }
    buckets
}

/// Apply one candidate to a bucket: reject-and-unshadow or
/// insert-or-replace by name.
fn merge(bucket: &mut Vec<MemberDecl>, member: &MemberDecl, filter: &AccessorFilter<'_>) {
    if !filter.accept(member) {
        bucket.retain(|existing| existing.name != member.name);
    } else {
        bucket.retain(|existing| existing.name != member.name);
        bucket.push(member.clone());
    }
}
