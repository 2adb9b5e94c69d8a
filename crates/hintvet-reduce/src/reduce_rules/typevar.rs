//! Type-variable reduction.
//!
//! A mapped type variable expands to its binding, guarded against a
//! variable that (through the binding) recursively reaches itself. An
//! unmapped variable falls back to its declared bound, to the union of its
//! constraint set, or, carrying no constraint at all, to the ignorable
//! marker.

use hintvet_common::limits::RECURSABLE_DEPTH_TYPEVAR;

use crate::diagnostics::ReduceError;
use crate::intern::HintInterner;
use crate::recursion::{is_recursive, make_recursable};
use crate::sane::HintSane;
use crate::sanify::ReducerOutcome;
use crate::typeargs::TypeArgLookup;
use crate::types::{HintData, HintId, TypeArgMapId};

pub(crate) fn reduce_typevar(
    db: &HintInterner,
    hint: HintId,
    parent: Option<&HintSane>,
) -> Result<ReducerOutcome, ReduceError> {
    let var = match db.lookup(hint) {
        HintData::TypeVar(var) => var,
        _ => unreachable!("TypeVar tag contract violated"),
    };
    let typeargs = parent.map_or(TypeArgMapId::EMPTY, |parent| parent.typeargs);

    match db.typearg_get(typeargs, var) {
        TypeArgLookup::Hit(mapped) => {
            // A variable mapped to itself is an immediate cycle with no
            // productive expansion; indirect cycles trip the guard below.
            if mapped == hint || is_recursive(db, hint, parent, RECURSABLE_DEPTH_TYPEVAR) {
                return Ok(ReducerOutcome::Step(HintId::RECURSIVE));
            }
            Ok(ReducerOutcome::Done(make_recursable(db, hint, mapped, parent)))
        }
        TypeArgLookup::Miss => {
            let info = db.typevar_info(var);
            if let Some(bound) = info.bound {
                return Ok(ReducerOutcome::Step(bound));
            }
            if let Some(constraints) = info.constraints {
                let members = db.hint_list(constraints);
                return Ok(ReducerOutcome::Step(db.union(&members)));
            }
            // Unbound and unconstrained: conveys nothing.
            Ok(ReducerOutcome::Step(HintId::IGNORABLE))
        }
    }
}

pub(crate) fn reduce_typevar_tuple(
    db: &HintInterner,
    hint: HintId,
    parent: Option<&HintSane>,
) -> Result<ReducerOutcome, ReduceError> {
    let var = match db.lookup(hint) {
        HintData::TypeVarTuple(var) => var,
        _ => unreachable!("TypeVarTuple tag contract violated"),
    };
    let typeargs = parent.map_or(TypeArgMapId::EMPTY, |parent| parent.typeargs);

    match db.typearg_get(typeargs, var) {
        TypeArgLookup::Hit(mapped) => {
            if mapped == hint || is_recursive(db, hint, parent, RECURSABLE_DEPTH_TYPEVAR) {
                return Ok(ReducerOutcome::Step(HintId::RECURSIVE));
            }
            Ok(ReducerOutcome::Done(make_recursable(db, hint, mapped, parent)))
        }
        TypeArgLookup::Miss => Ok(ReducerOutcome::Step(HintId::IGNORABLE)),
    }
}
