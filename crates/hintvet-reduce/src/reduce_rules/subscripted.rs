//! Subscripted-generic reduction.
//!
//! Resolves the subscription into a type-arg table and cascades it onto
//! the record so descendants see the bindings (merged child-wins over any
//! table inherited from above). An identity subscription conveys nothing
//! and reduces to the bare origin class.

use crate::diagnostics::ReduceError;
use crate::intern::HintInterner;
use crate::sane::HintSane;
use crate::sanify::ReducerOutcome;
use crate::typearg_resolve::{TypeArgBinding, resolve_typeargs};
use crate::types::{ClassId, HintData, HintId, HintListId};

pub(crate) fn reduce_subscripted(
    db: &HintInterner,
    hint: HintId,
    parent: Option<&HintSane>,
) -> Result<ReducerOutcome, ReduceError> {
    let (origin, args) = match db.lookup(hint) {
        HintData::Subscripted { origin, args } => (origin, args),
        _ => unreachable!("Subscripted tag contract violated"),
    };
    reduce_subscription(db, hint, origin, args, parent)
}

/// Shared subscription logic, also used by the protocol rule.
pub(crate) fn reduce_subscription(
    db: &HintInterner,
    hint: HintId,
    origin: ClassId,
    args: HintListId,
    parent: Option<&HintSane>,
) -> Result<ReducerOutcome, ReduceError> {
    let params = db.class_typevars(origin);
    match resolve_typeargs(db, origin, params, args)? {
        TypeArgBinding::Unchanged => Ok(ReducerOutcome::Step(db.class_hint(origin))),
        TypeArgBinding::Map(map) => {
            let base = match parent {
                Some(parent) => *parent,
                None => HintSane::new(hint),
            };
            // Terminal: the hint is canonical, the table rides along for
            // the children the driver will enqueue.
            Ok(ReducerOutcome::Done(base.permute(db, hint, map)))
        }
    }
}
