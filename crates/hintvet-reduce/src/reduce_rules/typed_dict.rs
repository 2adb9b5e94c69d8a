//! Typed-dict reduction.
//!
//! A structurally-typed mapping reduces to the untyped string-keyed
//! mapping supertype. Deliberate under-approximation: per-field structural
//! validation is out of scope for this layer.

use crate::diagnostics::ReduceError;
use crate::intern::HintInterner;
use crate::sane::HintSane;
use crate::sanify::ReducerOutcome;
use crate::types::HintId;

pub(crate) fn reduce_typed_dict(
    _db: &HintInterner,
    _hint: HintId,
    _parent: Option<&HintSane>,
) -> Result<ReducerOutcome, ReduceError> {
    Ok(ReducerOutcome::Step(HintId::STR_OBJECT_MAPPING))
}
