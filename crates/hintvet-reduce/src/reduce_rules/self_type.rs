//! Self-type reduction.
//!
//! The self type binds to the innermost enclosing class of the decoration
//! site. The result is context-bound: the same hint object means a
//! different concrete class at every site, so the record is marked
//! uncacheable and nothing derived from it may be shared. Outside any
//! class there is nothing to bind to, which is an authoring mistake and
//! reported as such rather than silently ignored.

use crate::diagnostics::ReduceError;
use crate::sane::HintSane;
use crate::sanify::{ReducerOutcome, Sanifier};
use crate::types::HintId;

pub(crate) fn reduce_self_type(
    sanifier: &Sanifier<'_>,
    hint: HintId,
    parent: Option<&HintSane>,
) -> Result<ReducerOutcome, ReduceError> {
    let Some(&innermost) = sanifier.class_stack().last() else {
        return Err(ReduceError::SelfOutsideClass { hint });
    };

    let base = match parent {
        Some(parent) => *parent,
        None => HintSane::new(hint),
    };
    let resolved = sanifier.db().class_hint(innermost);
    Ok(ReducerOutcome::Done(base.with_hint(resolved).uncacheable()))
}
