//! Sanified hint records.
//!
//! A [`HintSane`] is the unit of reduction output: a hint together with the
//! metadata that travels with it down the tree: the active type-arg table,
//! the path-scoped recursion-guard state, and a cacheability flag. Because
//! every field is an interned id, the record is `Copy` and is itself a valid
//! memoization key.

use crate::intern::HintInterner;
use crate::types::{DepthMapId, HintId, TypeArgMapId};

/// A hint plus the reduction metadata cascading from its ancestors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HintSane {
    /// The (possibly further-reducible) canonical hint.
    pub hint: HintId,
    /// Type-arg table active for this hint and its descendants.
    pub typeargs: TypeArgMapId,
    /// Recursion-guard state inherited along the path from the root.
    pub depths: DepthMapId,
    /// `false` when the generated check is valid only in the decoration
    /// context that produced it (e.g. a resolved self type) and must not be
    /// shared across call sites.
    pub cacheable: bool,
}

impl HintSane {
    /// Fresh record for the root of a top-level hint.
    pub const fn new(hint: HintId) -> Self {
        Self {
            hint,
            typeargs: TypeArgMapId::EMPTY,
            depths: DepthMapId::EMPTY,
            cacheable: true,
        }
    }

    /// Copy-with-overridden-hint; all metadata carried forward.
    pub const fn with_hint(self, hint: HintId) -> Self {
        Self { hint, ..self }
    }

    /// Copy marked context-bound: the generated check must not be shared
    /// across decoration sites.
    pub const fn uncacheable(self) -> Self {
        Self { cacheable: false, ..self }
    }

    /// Derive a child record: the child's own type-arg contributions are
    /// merged over the parent's (child wins on collision); guard state and
    /// cacheability cascade unchanged.
    pub fn permute(self, db: &HintInterner, hint: HintId, child_typeargs: TypeArgMapId) -> Self {
        Self {
            hint,
            typeargs: db.typearg_merge(self.typeargs, child_typeargs),
            depths: self.depths,
            cacheable: self.cacheable,
        }
    }

    #[inline]
    pub fn is_ignorable(&self) -> bool {
        self.hint == HintId::IGNORABLE
    }

    #[inline]
    pub fn is_recursive_marker(&self) -> bool {
        self.hint == HintId::RECURSIVE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeVarKind;

    #[test]
    fn root_record_is_clean() {
        let sane = HintSane::new(HintId::STR);
        assert_eq!(sane.hint, HintId::STR);
        assert_eq!(sane.typeargs, TypeArgMapId::EMPTY);
        assert_eq!(sane.depths, DepthMapId::EMPTY);
        assert!(sane.cacheable);
    }

    #[test]
    fn permute_merges_child_wins() {
        let db = HintInterner::new();
        let t = db.declare_typevar("T", TypeVarKind::Ordinary, None, None);
        let u = db.declare_typevar("U", TypeVarKind::Ordinary, None, None);

        let parent_map = db.typearg_map_from_pairs(&[(t, HintId::STR), (u, HintId::STR)]);
        let child_map = db.typearg_map_from_pairs(&[(t, HintId::BOOL)]);

        let parent = HintSane::new(HintId::OBJECT).permute(&db, HintId::OBJECT, parent_map);
        let child = parent.permute(&db, HintId::BOOL, child_map);

        use crate::typeargs::TypeArgLookup;
        assert_eq!(db.typearg_get(child.typeargs, t), TypeArgLookup::Hit(HintId::BOOL));
        assert_eq!(db.typearg_get(child.typeargs, u), TypeArgLookup::Hit(HintId::STR));
        assert_eq!(child.hint, HintId::BOOL);
    }

    #[test]
    fn uncacheable_propagates_through_permute() {
        let db = HintInterner::new();
        let parent = HintSane::new(HintId::OBJECT).uncacheable();
        let child = parent.permute(&db, HintId::STR, TypeArgMapId::EMPTY);
        assert!(!child.cacheable);
    }
}
