//! Union flattening and check-code contribution.
//!
//! A union's children are sanified against the union's own record and
//! flattened across nested unions. Nesting arises when a non-union child
//! *reduces into* a union (a type variable expanding to its constraint
//! set, an alias body, a numeric-tower-style widening). Flattening uses an
//! explicit work stack, not call recursion, and preserves declaration
//! order exactly: union members may have priority-sensitive matching
//! semantics downstream, so `A | (B | C) | D` must flatten to
//! `[A, B, C, D]`, never a reordering.
//!
//! Ignorable children are dropped; a union whose every child is ignorable
//! collapses to the ignorable marker and contributes no check code.

use std::sync::Arc;
use tracing::trace;

use hintvet_common::limits::MAX_UNION_FLATTEN_ITERATIONS;

use crate::diagnostics::ReduceError;
use crate::format::display_hint;
use crate::intern::HintInterner;
use crate::sane::HintSane;
use crate::sanify::{ReducerOutcome, Sanifier};
use crate::types::{HintData, HintId, HintListId};

// =============================================================================
// Flattening
// =============================================================================

/// Reducer for union hints: flatten, drop ignorables, collapse degenerate
/// results.
pub(crate) fn reduce_union(
    sanifier: &Sanifier<'_>,
    hint: HintId,
    parent: Option<&HintSane>,
) -> Result<ReducerOutcome, ReduceError> {
    let members = match sanifier.db().lookup(hint) {
        HintData::Union(members) => members,
        _ => unreachable!("Union tag contract violated"),
    };
    let union_sane = match parent {
        Some(parent) => parent.with_hint(hint),
        None => HintSane::new(hint),
    };

    let children = flatten_union(sanifier, members, &union_sane)?;
    match children.as_ref() {
        [] => {
            trace!(hint = hint.0, "union collapsed to ignorable");
            Ok(ReducerOutcome::Step(HintId::IGNORABLE))
        }
        [only] => Ok(ReducerOutcome::Done(*only)),
        _ => {
            let hints: Vec<HintId> = children.iter().map(|child| child.hint).collect();
            let flattened = sanifier.db().union(&hints);
            Ok(ReducerOutcome::Done(union_sane.with_hint(flattened)))
        }
    }
}

/// Flatten a union's members into sanified, non-ignorable children in
/// declaration order.
///
/// Memoized on the union's own record; skipped when any involved record is
/// context-bound (`cacheable == false`), since those reductions depend on
/// the enclosing decoration context.
pub fn flatten_union(
    sanifier: &Sanifier<'_>,
    members: HintListId,
    union_sane: &HintSane,
) -> Result<Arc<[HintSane]>, ReduceError> {
    let db = sanifier.db();

    if union_sane.cacheable
        && let Some(cached) = db.caches.unions.get(union_sane)
    {
        db.caches.stats.record_union(true);
        return Ok(cached.clone());
    }
    db.caches.stats.record_union(false);

    // Work stack of (child hint, immediate parent record). Children are
    // processed in reverse declared order off the stack; the final reverse
    // restores declaration order.
    let mut stack: Vec<(HintId, HintSane)> = db
        .hint_list(members)
        .iter()
        .map(|&member| (member, *union_sane))
        .collect();
    let mut flattened_rev: Vec<HintSane> = Vec::with_capacity(stack.len());

    let mut iterations = 0u32;
    while let Some((child, parent_record)) = stack.pop() {
        iterations += 1;
        if iterations > MAX_UNION_FLATTEN_ITERATIONS {
            return Err(ReduceError::ReductionLimitExceeded {
                hint: union_sane.hint,
                passes: iterations,
            });
        }

        let child_sane = sanifier.reduce(child, Some(&parent_record))?;
        if child_sane.is_ignorable() {
            trace!(child = child.0, "dropped ignorable union member");
            continue;
        }

        if let HintData::Union(inner) = db.lookup(child_sane.hint) {
            // A child reduced into a union: splice its members in with the
            // child's own record as their immediate parent.
            for &grandchild in db.hint_list(inner).iter() {
                stack.push((grandchild, child_sane));
            }
        } else {
            flattened_rev.push(child_sane);
        }
    }

    flattened_rev.reverse();
    let flattened: Arc<[HintSane]> = flattened_rev.into();

    if union_sane.cacheable && flattened.iter().all(|child| child.cacheable) {
        db.caches.unions.insert(*union_sane, flattened.clone());
    }
    Ok(flattened)
}

// =============================================================================
// Code Contribution
// =============================================================================

/// Interface to the outer code-generation driver's work queue.
///
/// `enqueue` registers a child needing a recursively generated check and
/// returns the expression to splice into the union's skeleton; the
/// expression must test `subject` (already the bound local for every test
/// after the first).
pub trait SanifyQueue {
    fn enqueue(&mut self, child: HintSane, subject: &str) -> String;
}

/// A union's contribution to the generated check.
#[derive(Debug)]
pub struct UnionCode {
    /// The short-circuiting disjunction over all member tests.
    pub expr: String,
    /// Members checkable by a single membership test (classes; plus the
    /// recursive marker's always-true placeholder).
    pub shallow: Vec<HintSane>,
    /// Members requiring recursively generated check code.
    pub deep: Vec<HintSane>,
}

/// Assemble the check skeleton for flattened union children.
///
/// The cheap membership test over all class members is emitted first so
/// the common case short-circuits before any nested check runs. The first
/// emitted test evaluates the raw subject expression (binding it to
/// `subject_var` on the way when more tests follow) and every subsequent
/// test reuses the bound variable, never re-evaluating the subject.
///
/// Returns `None` when there are no children: the union was ignorable and
/// must contribute no code at all (not empty-but-meaningful code).
pub fn contribute_union_code(
    db: &HintInterner,
    children: &[HintSane],
    subject: &str,
    subject_var: &str,
    queue: &mut dyn SanifyQueue,
) -> Option<UnionCode> {
    if children.is_empty() {
        return None;
    }

    let mut shallow: Vec<HintSane> = Vec::new();
    let mut deep: Vec<HintSane> = Vec::new();
    let mut class_names: Vec<String> = Vec::new();
    let mut has_recursive = false;

    for &child in children {
        match db.lookup(child.hint) {
            HintData::Class(_) => {
                class_names.push(display_hint(db, child.hint));
                shallow.push(child);
            }
            HintData::Recursive => {
                has_recursive = true;
                shallow.push(child);
            }
            _ => deep.push(child),
        }
    }

    let test_count =
        usize::from(!class_names.is_empty()) + usize::from(has_recursive) + deep.len();
    // Binding is only needed when more than one test evaluates the subject.
    let subject_tests = usize::from(!class_names.is_empty()) + deep.len();
    let needs_binding = subject_tests > 1;

    // Subject expression for the first test; later tests reuse the local.
    let mut first = true;
    let mut subject_expr = |first: &mut bool| -> String {
        if *first {
            *first = false;
            if needs_binding {
                format!("({subject_var} := {subject})")
            } else {
                subject.to_string()
            }
        } else {
            subject_var.to_string()
        }
    };

    let mut tests: Vec<String> = Vec::with_capacity(test_count);
    if !class_names.is_empty() {
        let target = subject_expr(&mut first);
        if class_names.len() == 1 {
            tests.push(format!("isinstance({target}, {})", class_names[0]));
        } else {
            tests.push(format!("isinstance({target}, ({}))", class_names.join(", ")));
        }
    }
    if has_recursive {
        // A cycle back to an ancestor: matched structurally up to this
        // point, absorbed as an unconditional pass. Does not touch the
        // subject, so it claims no binding slot.
        tests.push("True".to_string());
    }
    for &child in &deep {
        let target = subject_expr(&mut first);
        tests.push(queue.enqueue(child, &target));
    }

    let expr = format!("({})", tests.join(" or "));
    Some(UnionCode { expr, shallow, deep })
}
