//! Type-guard reduction.
//!
//! Type guards are a static-analysis construct: at runtime the annotated
//! callable simply returns a boolean, so in return position the hint
//! reduces unconditionally to `bool`. Anywhere else it is meaningless and
//! raises a corrective diagnostic.

use crate::diagnostics::ReduceError;
use crate::sane::HintSane;
use crate::sanify::{CheckedPosition, ReducerOutcome, Sanifier};
use crate::types::HintId;

pub(crate) fn reduce_type_guard(
    sanifier: &Sanifier<'_>,
    _hint: HintId,
    _parent: Option<&HintSane>,
) -> Result<ReducerOutcome, ReduceError> {
    match sanifier.position() {
        Some(CheckedPosition::Return) => Ok(ReducerOutcome::Step(HintId::BOOL)),
        Some(CheckedPosition::Parameter(name)) => {
            Err(ReduceError::TypeGuardOutsideReturn { position: Some(name) })
        }
        None => Err(ReduceError::TypeGuardOutsideReturn { position: None }),
    }
}
