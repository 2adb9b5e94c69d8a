//! Path-scoped recursion guard for self-referential hints.
//!
//! # Design
//!
//! Naively expanding a self-referential hint (`type X = int | X`) never
//! terminates. The guard bounds expansion while still unrolling exactly one
//! productive level, so the generated check conveys the first layer of
//! recursive structure.
//!
//! Guard state is a per-path visit-count map carried on [`HintSane`]
//! records, not a global set: two sibling subtrees referencing the same
//! recursable identity each get their own unrolling, because only ancestors
//! contribute counts. The maps are interned ([`DepthMapId`]), so extending
//! the guard for a child interns a new map and never mutates the parent's.
//!
//! # Protocol
//!
//! 1. A reducer for a recursable construct first asks
//!    [`is_recursive`]; if the construct was already visited more than its
//!    budget allows along this path, the reducer substitutes
//!    [`HintId::RECURSIVE`] instead of expanding.
//! 2. Otherwise it expands through [`make_recursable`], which bumps the
//!    visit count and wraps the expansion in a new record carrying the
//!    extended guard map.
//!
//! Budgets are centralized in [`hintvet_common::limits`]
//! (`RECURSABLE_DEPTH_TYPEVAR`, `RECURSABLE_DEPTH_ALIAS`).

use tracing::trace;

use crate::intern::HintInterner;
use crate::sane::HintSane;
use crate::types::{DepthMapId, HintId};

/// Visit count for `recursable` along the path recorded in `parent`.
///
/// Zero when there is no parent or no entry: the construct has not been
/// visited on this path.
pub fn recursable_depth(db: &HintInterner, recursable: HintId, parent: Option<&HintSane>) -> u32 {
    let Some(parent) = parent else { return 0 };
    if parent.depths == DepthMapId::EMPTY {
        return 0;
    }
    let pairs = db.depth_pairs(parent.depths);
    match pairs.binary_search_by_key(&recursable, |&(key, _)| key) {
        Ok(index) => pairs[index].1,
        Err(_) => 0,
    }
}

/// Has `recursable` already been visited more than `max_depth` times along
/// the current root-to-node path?
///
/// `true` means the caller must not expand further and should substitute
/// the recursive marker.
pub fn is_recursive(
    db: &HintInterner,
    recursable: HintId,
    parent: Option<&HintSane>,
    max_depth: u32,
) -> bool {
    recursable_depth(db, recursable, parent) > max_depth
}

/// Record one visit of `recursable` and wrap `nonrecursable` (its one-level
/// expansion) in a record carrying the extended guard map.
///
/// The new entry takes precedence over any same-key entry inherited from
/// the parent; type-arg table and cacheability cascade unchanged.
pub fn make_recursable(
    db: &HintInterner,
    recursable: HintId,
    nonrecursable: HintId,
    parent: Option<&HintSane>,
) -> HintSane {
    let visits = recursable_depth(db, recursable, parent) + 1;

    let depths = match parent {
        Some(parent) if parent.depths != DepthMapId::EMPTY => {
            let pairs = db.depth_pairs(parent.depths);
            let mut extended: Vec<(HintId, u32)> = Vec::with_capacity(pairs.len() + 1);
            match pairs.binary_search_by_key(&recursable, |&(key, _)| key) {
                Ok(index) => {
                    extended.extend_from_slice(&pairs);
                    extended[index].1 = visits;
                }
                Err(index) => {
                    extended.extend_from_slice(&pairs[..index]);
                    extended.push((recursable, visits));
                    extended.extend_from_slice(&pairs[index..]);
                }
            }
            db.intern_depth_pairs(extended)
        }
        _ => db.intern_depth_pairs(vec![(recursable, visits)]),
    };

    trace!(recursable = recursable.0, visits, "recorded recursable visit");

    let base = match parent {
        Some(parent) => *parent,
        None => HintSane::new(nonrecursable),
    };
    HintSane { hint: nonrecursable, depths, ..base }
}
