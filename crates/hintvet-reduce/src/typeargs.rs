//! Type-argument substitution tables.
//!
//! A type-arg map binds type-variable identities to concrete hints. Maps are
//! immutable and interned ([`TypeArgMapId`]); every update interns a new
//! table. Keys are always the unpacked per-variable form: a variadic
//! type-variable tuple is keyed by its own `TypeVarId` and bound to an
//! unpacked-tuple hint, never stored as a packed composite key.

use crate::intern::HintInterner;
use crate::types::{HintId, TypeArgMapId, TypeVarId};

/// Result of a type-arg table lookup.
///
/// A dedicated enum rather than `Option` so that call sites spell out the
/// difference between "this variable has no binding" and any in-band hint
/// value a binding could carry (including the markers).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TypeArgLookup {
    /// The variable is bound to this hint.
    Hit(HintId),
    /// The variable has no binding in this table.
    Miss,
}

impl TypeArgLookup {
    #[inline]
    pub fn is_hit(self) -> bool {
        matches!(self, Self::Hit(_))
    }
}

impl HintInterner {
    /// Look up a type variable's binding.
    pub fn typearg_get(&self, map: TypeArgMapId, var: TypeVarId) -> TypeArgLookup {
        if map == TypeArgMapId::EMPTY {
            return TypeArgLookup::Miss;
        }
        let pairs = self.typearg_pairs(map);
        match pairs.binary_search_by_key(&var, |&(key, _)| key) {
            Ok(index) => TypeArgLookup::Hit(pairs[index].1),
            Err(_) => TypeArgLookup::Miss,
        }
    }

    /// Build a table from unordered pairs. Later duplicates of the same key
    /// win, matching right-biased merge semantics.
    pub fn typearg_map_from_pairs(&self, pairs: &[(TypeVarId, HintId)]) -> TypeArgMapId {
        if pairs.is_empty() {
            return TypeArgMapId::EMPTY;
        }
        let mut sorted = pairs.to_vec();
        // Stable sort: equal keys keep their relative order, so keeping the
        // last occurrence below implements child-wins.
        sorted.sort_by_key(|&(key, _)| key);
        let mut deduped: Vec<(TypeVarId, HintId)> = Vec::with_capacity(sorted.len());
        for pair in sorted {
            match deduped.last_mut() {
                Some(last) if last.0 == pair.0 => *last = pair,
                _ => deduped.push(pair),
            }
        }
        self.intern_typearg_pairs(deduped)
    }

    /// Merge two tables right-biased: on key collision the child's binding
    /// wins (the child is more locally specific).
    pub fn typearg_merge(&self, parent: TypeArgMapId, child: TypeArgMapId) -> TypeArgMapId {
        if parent == TypeArgMapId::EMPTY || parent == child {
            return child;
        }
        if child == TypeArgMapId::EMPTY {
            return parent;
        }
        let parent_pairs = self.typearg_pairs(parent);
        let child_pairs = self.typearg_pairs(child);
        let mut merged: Vec<(TypeVarId, HintId)> =
            Vec::with_capacity(parent_pairs.len() + child_pairs.len());
        let (mut i, mut j) = (0, 0);
        while i < parent_pairs.len() && j < child_pairs.len() {
            let p = parent_pairs[i];
            let c = child_pairs[j];
            if p.0 < c.0 {
                merged.push(p);
                i += 1;
            } else if p.0 > c.0 {
                merged.push(c);
                j += 1;
            } else {
                merged.push(c);
                i += 1;
                j += 1;
            }
        }
        merged.extend_from_slice(&parent_pairs[i..]);
        merged.extend_from_slice(&child_pairs[j..]);
        self.intern_typearg_pairs(merged)
    }

    /// Number of bindings in a table.
    pub fn typearg_len(&self, map: TypeArgMapId) -> usize {
        if map == TypeArgMapId::EMPTY {
            return 0;
        }
        self.typearg_pairs(map).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HintData;

    #[test]
    fn lookup_distinguishes_miss_from_hit() {
        let db = HintInterner::new();
        let t = db.declare_typevar("T", crate::types::TypeVarKind::Ordinary, None, None);
        let u = db.declare_typevar("U", crate::types::TypeVarKind::Ordinary, None, None);
        let map = db.typearg_map_from_pairs(&[(t, HintId::STR)]);

        assert_eq!(db.typearg_get(map, t), TypeArgLookup::Hit(HintId::STR));
        assert_eq!(db.typearg_get(map, u), TypeArgLookup::Miss);
        assert_eq!(db.typearg_get(TypeArgMapId::EMPTY, t), TypeArgLookup::Miss);
    }

    #[test]
    fn merge_is_right_biased() {
        let db = HintInterner::new();
        let t = db.declare_typevar("T", crate::types::TypeVarKind::Ordinary, None, None);
        let u = db.declare_typevar("U", crate::types::TypeVarKind::Ordinary, None, None);
        let v = db.declare_typevar("V", crate::types::TypeVarKind::Ordinary, None, None);

        let parent = db.typearg_map_from_pairs(&[(t, HintId::STR), (u, HintId::BOOL)]);
        let child = db.typearg_map_from_pairs(&[(t, HintId::OBJECT), (v, HintId::STR)]);
        let merged = db.typearg_merge(parent, child);

        assert_eq!(db.typearg_get(merged, t), TypeArgLookup::Hit(HintId::OBJECT));
        assert_eq!(db.typearg_get(merged, u), TypeArgLookup::Hit(HintId::BOOL));
        assert_eq!(db.typearg_get(merged, v), TypeArgLookup::Hit(HintId::STR));
        assert_eq!(db.typearg_len(merged), 3);
    }

    #[test]
    fn merge_with_empty_is_identity() {
        let db = HintInterner::new();
        let t = db.declare_typevar("T", crate::types::TypeVarKind::Ordinary, None, None);
        let map = db.typearg_map_from_pairs(&[(t, HintId::BOOL)]);

        assert_eq!(db.typearg_merge(TypeArgMapId::EMPTY, map), map);
        assert_eq!(db.typearg_merge(map, TypeArgMapId::EMPTY), map);
        assert_eq!(db.typearg_merge(map, map), map);
    }

    #[test]
    fn duplicate_pairs_keep_last() {
        let db = HintInterner::new();
        let t = db.declare_typevar("T", crate::types::TypeVarKind::Ordinary, None, None);
        let map = db.typearg_map_from_pairs(&[(t, HintId::STR), (t, HintId::BOOL)]);
        assert_eq!(db.typearg_get(map, t), TypeArgLookup::Hit(HintId::BOOL));
        assert_eq!(db.typearg_len(map), 1);
    }

    #[test]
    fn equal_tables_intern_to_equal_ids() {
        let db = HintInterner::new();
        let t = db.declare_typevar("T", crate::types::TypeVarKind::Ordinary, None, None);
        let list = db.intern_hint_list(&[HintId::STR]);
        let hint = db.intern(HintData::UnpackedTuple(list));
        let a = db.typearg_map_from_pairs(&[(t, hint)]);
        let b = db.typearg_map_from_pairs(&[(t, hint)]);
        assert_eq!(a, b);
    }
}
