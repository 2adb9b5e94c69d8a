//! Forward-reference reduction.
//!
//! Resolves a symbolic reference against the enclosing classes' attribute
//! namespaces, innermost first. A successful resolution is context-bound,
//! since another decoration site may resolve the same name differently.
//! An unresolved reference is preserved unchanged rather than rejected:
//! the name may become defined later.

use crate::diagnostics::ReduceError;
use crate::sane::HintSane;
use crate::sanify::{ReducerOutcome, Sanifier};
use crate::types::{HintData, HintId};

pub(crate) fn reduce_forward_ref(
    sanifier: &Sanifier<'_>,
    hint: HintId,
    parent: Option<&HintSane>,
) -> Result<ReducerOutcome, ReduceError> {
    let name = match sanifier.db().lookup(hint) {
        HintData::ForwardRef(name) => name,
        _ => unreachable!("ForwardRef tag contract violated"),
    };

    for &class in sanifier.class_stack().iter().rev() {
        if let Some(resolved) = sanifier.db().class_attr(class, name) {
            let base = match parent {
                Some(parent) => *parent,
                None => HintSane::new(hint),
            };
            return Ok(ReducerOutcome::Done(base.with_hint(resolved).uncacheable()));
        }
    }

    // Unresolvable here; leave it for a later pass or check time.
    Ok(ReducerOutcome::Step(hint))
}
