//! Structural-protocol reduction.
//!
//! A protocol conveying no constraint reduces to the ignorable marker:
//! either it is subscripted only by type variables with no bindings in
//! scope, or it is unsubscripted and its unparametrized origin declares
//! type variables (all necessarily unbound). Anything else is a real
//! structural constraint: unsubscripted protocols reduce to their origin
//! class, subscripted ones resolve their type-arg table like any generic.

use crate::diagnostics::ReduceError;
use crate::intern::HintInterner;
use crate::sane::HintSane;
use crate::sanify::ReducerOutcome;
use crate::typeargs::TypeArgLookup;
use crate::types::{HintData, HintId, HintListId, TypeArgMapId};

use super::subscripted::reduce_subscription;

pub(crate) fn reduce_protocol(
    db: &HintInterner,
    hint: HintId,
    parent: Option<&HintSane>,
) -> Result<ReducerOutcome, ReduceError> {
    let (origin, args) = match db.lookup(hint) {
        HintData::Protocol { origin, args } => (origin, args),
        _ => unreachable!("Protocol tag contract violated"),
    };
    let typeargs = parent.map_or(TypeArgMapId::EMPTY, |parent| parent.typeargs);

    if args == HintListId::EMPTY {
        // Unsubscripted: fall back to the origin's own declaration.
        let declared = db.typevar_list(db.class_typevars(origin));
        if !declared.is_empty() {
            // Parametrized construct used bare: all variables unbound.
            return Ok(ReducerOutcome::Step(HintId::IGNORABLE));
        }
        // A concrete protocol with members: a plain structural class check.
        return Ok(ReducerOutcome::Step(db.class_hint(origin)));
    }

    let members = db.hint_list(args);
    let all_unbound_typevars = members.iter().all(|&member| match db.lookup(member) {
        HintData::TypeVar(var) | HintData::TypeVarTuple(var) => {
            db.typearg_get(typeargs, var) == TypeArgLookup::Miss
        }
        _ => false,
    });
    if all_unbound_typevars {
        return Ok(ReducerOutcome::Step(HintId::IGNORABLE));
    }

    reduce_subscription(db, hint, origin, args, parent)
}
