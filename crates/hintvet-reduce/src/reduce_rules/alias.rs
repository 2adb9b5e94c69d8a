//! Type-alias reduction.
//!
//! An alias expands to its body exactly once per root-to-node path; a
//! second visit along the same path substitutes the recursive marker, so
//! `type X = int | X` unrolls one productive level and terminates. An
//! alias whose body has not been attached yet is preserved unchanged:
//! deferred, not an error, matching forward-reference semantics.

use hintvet_common::limits::RECURSABLE_DEPTH_ALIAS;

use crate::diagnostics::ReduceError;
use crate::intern::HintInterner;
use crate::recursion::{is_recursive, make_recursable};
use crate::sane::HintSane;
use crate::sanify::ReducerOutcome;
use crate::types::{HintData, HintId};

pub(crate) fn reduce_alias(
    db: &HintInterner,
    hint: HintId,
    parent: Option<&HintSane>,
) -> Result<ReducerOutcome, ReduceError> {
    let alias = match db.lookup(hint) {
        HintData::Alias(alias) => alias,
        _ => unreachable!("Alias tag contract violated"),
    };

    let Some(body) = db.alias_body(alias) else {
        // Body not yet attached; resolution may succeed on a later pass.
        return Ok(ReducerOutcome::Step(hint));
    };

    if is_recursive(db, hint, parent, RECURSABLE_DEPTH_ALIAS) {
        return Ok(ReducerOutcome::Step(HintId::RECURSIVE));
    }
    Ok(ReducerOutcome::Done(make_recursable(db, hint, body, parent)))
}
