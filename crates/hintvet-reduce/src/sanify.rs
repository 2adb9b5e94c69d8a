//! The reduction entry point and reducer dispatch.
//!
//! Reduction rewrites a hint one step at a time toward canonical form.
//! Dispatch is a pair of lazily-built strategy tables keyed by
//! [`HintTag`], with no virtual dispatch hierarchy:
//!
//! - **Memoizable reducers** are pure in `(hint, type-args, guard state)`
//!   and their results are shared process-wide through the interner's
//!   reduce cache.
//! - **Context reducers** consult the decoration context (enclosing-class
//!   stack, annotated position) and are never cached by the dispatch
//!   layer.
//!
//! [`Sanifier::reduce`] loops until a pass leaves the hint unchanged, the
//! hint classifies as plain (the common fast path), or the pass budget is
//! exhausted (a reducer bug, surfaced as a typed error).

use rustc_hash::FxHashMap;
use std::sync::LazyLock;
use tracing::trace;

use hintvet_common::Atom;
use hintvet_common::limits::MAX_REDUCTION_PASSES;

use crate::classify::{HintTag, classify};
use crate::diagnostics::ReduceError;
use crate::intern::HintInterner;
use crate::reduce_rules;
use crate::sane::HintSane;
use crate::types::{ClassId, HintId};
use crate::unions;

// =============================================================================
// Reducer Contracts
// =============================================================================

/// One reduction step's result.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReducerOutcome {
    /// Rewritten hint; reduce again. Returning the input hint unchanged
    /// terminates reduction with the current record.
    Step(HintId),
    /// Terminal sanified record (or one carrying new metadata for further
    /// passes when its hint differs from the input).
    Done(HintSane),
}

/// Pure reducer: consults only the interner and the parent record's
/// interned metadata. Cacheable.
type MemoReducer =
    fn(&HintInterner, HintId, Option<&HintSane>) -> Result<ReducerOutcome, ReduceError>;

/// Context reducer: additionally consults the decoration context. Never
/// cached by the dispatch layer.
type ContextReducer =
    fn(&Sanifier<'_>, HintId, Option<&HintSane>) -> Result<ReducerOutcome, ReduceError>;

static MEMO_REDUCERS: LazyLock<FxHashMap<HintTag, MemoReducer>> = LazyLock::new(|| {
    let mut table: FxHashMap<HintTag, MemoReducer> = FxHashMap::default();
    table.insert(HintTag::TypeVar, reduce_rules::reduce_typevar);
    table.insert(HintTag::TypeVarTuple, reduce_rules::reduce_typevar_tuple);
    table.insert(HintTag::Alias, reduce_rules::reduce_alias);
    table.insert(HintTag::Subscripted, reduce_rules::reduce_subscripted);
    table.insert(HintTag::TypedDict, reduce_rules::reduce_typed_dict);
    table.insert(HintTag::Protocol, reduce_rules::reduce_protocol);
    table
});

static CONTEXT_REDUCERS: LazyLock<FxHashMap<HintTag, ContextReducer>> = LazyLock::new(|| {
    let mut table: FxHashMap<HintTag, ContextReducer> = FxHashMap::default();
    table.insert(HintTag::SelfType, reduce_rules::reduce_self_type);
    table.insert(HintTag::ForwardRef, reduce_rules::reduce_forward_ref);
    table.insert(HintTag::TypeGuard, reduce_rules::reduce_type_guard);
    table.insert(HintTag::Union, unions::reduce_union);
    table
});

// =============================================================================
// Decoration Context
// =============================================================================

/// Which annotated position of the decorated callable is being reduced.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CheckedPosition {
    /// The callable's return annotation.
    Return,
    /// A named parameter annotation.
    Parameter(Atom),
}

// =============================================================================
// Sanifier
// =============================================================================

/// Per-decoration reduction driver: the interner plus the context that
/// cannot be memoized (enclosing classes, annotated position).
pub struct Sanifier<'db> {
    db: &'db HintInterner,
    class_stack: Vec<ClassId>,
    position: Option<CheckedPosition>,
}

impl<'db> Sanifier<'db> {
    pub fn new(db: &'db HintInterner) -> Self {
        Self { db, class_stack: Vec::new(), position: None }
    }

    /// Builder: the lexically enclosing classes, outermost first.
    pub fn with_class_stack(mut self, stack: &[ClassId]) -> Self {
        self.class_stack = stack.to_vec();
        self
    }

    /// Builder: the annotated position being reduced.
    pub fn with_position(mut self, position: CheckedPosition) -> Self {
        self.position = Some(position);
        self
    }

    pub fn db(&self) -> &'db HintInterner {
        self.db
    }

    pub(crate) fn class_stack(&self) -> &[ClassId] {
        &self.class_stack
    }

    pub(crate) fn position(&self) -> Option<CheckedPosition> {
        self.position
    }

    /// Reduce a hint to a terminal sanified record.
    ///
    /// `parent` is the immediate parent's record, or `None` at the root of
    /// a top-level hint. Reentrant: reducers call back into this for child
    /// hints before their own call completes.
    pub fn reduce(
        &self,
        hint: HintId,
        parent: Option<&HintSane>,
    ) -> Result<HintSane, ReduceError> {
        let mut current = match parent {
            Some(parent) => parent.with_hint(hint),
            None => HintSane::new(hint),
        };

        for pass in 0..MAX_REDUCTION_PASSES {
            let hint_now = current.hint;
            if hint_now.is_marker() {
                return Ok(current);
            }
            let Some(tag) = classify(self.db, hint_now) else {
                // Plain isinstanceable hint: nothing to do.
                return Ok(current);
            };

            trace!(hint = hint_now.0, ?tag, pass, "reduction step");
            match self.dispatch(tag, hint_now, &current)? {
                ReducerOutcome::Step(next) if next == hint_now => return Ok(current),
                ReducerOutcome::Step(next) => current = current.with_hint(next),
                ReducerOutcome::Done(sane) if sane.hint == hint_now => return Ok(sane),
                ReducerOutcome::Done(sane) => current = sane,
            }
        }

        Err(ReduceError::ReductionLimitExceeded { hint, passes: MAX_REDUCTION_PASSES })
    }

    fn dispatch(
        &self,
        tag: HintTag,
        hint: HintId,
        current: &HintSane,
    ) -> Result<ReducerOutcome, ReduceError> {
        if let Some(reducer) = MEMO_REDUCERS.get(&tag) {
            // Normalize the cacheability flag out of the key: memoizable
            // reducers never consult it, they only cascade it.
            let normalized = HintSane { cacheable: true, ..*current };
            let key = (hint, normalized.typeargs, normalized.depths);
            let outcome = match self.db.caches.reduce.get(&key) {
                Some(cached) => {
                    self.db.caches.stats.record_reduce(true);
                    *cached
                }
                None => {
                    self.db.caches.stats.record_reduce(false);
                    let outcome = reducer(self.db, hint, Some(&normalized))?;
                    self.db.caches.reduce.insert(key, outcome);
                    outcome
                }
            };
            return Ok(restore_cacheability(outcome, current.cacheable));
        }

        let Some(reducer) = CONTEXT_REDUCERS.get(&tag) else {
            // Every classifiable tag is registered in exactly one table.
            unreachable!("HintTag {tag:?} has no registered reducer");
        };
        reducer(self, hint, Some(current))
    }
}

/// Re-apply a context-bound parent's `cacheable = false` to a cached
/// (normalized) outcome.
fn restore_cacheability(outcome: ReducerOutcome, cacheable: bool) -> ReducerOutcome {
    match outcome {
        ReducerOutcome::Done(sane) if !cacheable => ReducerOutcome::Done(sane.uncacheable()),
        other => other,
    }
}
