//! Type-parameter binding resolution.
//!
//! Given the ordered type parameters declared by an unsubscripted construct
//! and the ordered argument hints it was subscripted with, produce the
//! type-arg table binding each parameter to its argument.
//!
//! At most one parameter may be a variadic type-variable tuple; it may
//! appear anywhere in the parameter list and greedily absorbs every
//! argument not claimed by the fixed-arity parameters around it. Binding is
//! deliberately iterative (a forward cursor, a backward cursor, then the
//! absorption step) because the greedy rules are positional, not
//! structural:
//!
//! 1. **Forward**: bind ordinary parameters left-to-right until the
//!    parameters run out, the arguments run out (trailing parameters stay
//!    unbound; valid), or the variadic tuple is reached while arguments
//!    remain.
//! 2. **Backward**: bind trailing ordinary parameters right-to-left against
//!    trailing arguments until either side runs out.
//! 3. **Absorption**: the variadic tuple takes whatever is left between the
//!    cursors. Zero arguments bind the empty-tuple marker (bound, not
//!    unbound), exactly one binds that argument directly, two or more bind
//!    a synthesized unpacked fixed tuple.
//!
//! Note: structurally similar fixed/variadic flattening also exists for
//! tuple *hints*; that is a separate algorithm over different inputs and
//! must not be folded into this one.
//!
//! Resolution is pure in its `(construct, parameters, arguments)` triple
//! and memoized on exactly that triple of interned ids.

use smallvec::SmallVec;
use tracing::trace;

use hintvet_common::limits::HINT_ARGS_INLINE;

use crate::diagnostics::ReduceError;
use crate::intern::HintInterner;
use crate::types::{
    ClassId, HintData, HintId, HintListId, TypeArgMapId, TypeVarId, TypeVarInfo, TypeVarKind,
    TypeVarListId,
};

/// Binding resolution output.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TypeArgBinding {
    /// The subscription is an identity mapping and conveys no information;
    /// callers should fall back to the bare unsubscripted construct.
    Unchanged,
    /// The resolved substitution table.
    Map(TypeArgMapId),
}

/// Resolve a subscription into a type-arg table. See the module docs for
/// the sweep rules.
pub fn resolve_typeargs(
    db: &HintInterner,
    origin: ClassId,
    params: TypeVarListId,
    args: HintListId,
) -> Result<TypeArgBinding, ReduceError> {
    let key = (origin, params, args);
    if let Some(cached) = db.caches.binding.get(&key) {
        db.caches.stats.record_binding(true);
        return Ok(*cached);
    }
    db.caches.stats.record_binding(false);

    let binding = resolve_typeargs_uncached(db, origin, params, args)?;
    db.caches.binding.insert(key, binding);
    Ok(binding)
}

fn resolve_typeargs_uncached(
    db: &HintInterner,
    origin: ClassId,
    params: TypeVarListId,
    args: HintListId,
) -> Result<TypeArgBinding, ReduceError> {
    let param_list = db.typevar_list(params);
    let arg_list = db.hint_list(args);

    if param_list.is_empty() {
        return Err(ReduceError::EmptyTypeArgs { origin });
    }
    if arg_list.is_empty() {
        let hint = db.intern(HintData::Subscripted { origin, args });
        return Err(ReduceError::NoChildHints { hint });
    }

    // At most one variadic tuple, anywhere in the list.
    let mut variadic_seen: Option<TypeVarId> = None;
    let mut has_variadic = false;
    for &param in param_list.iter() {
        if db.typevar_info(param).kind == TypeVarKind::VariadicTuple {
            if let Some(first) = variadic_seen {
                return Err(ReduceError::MultipleVariadicTypeArgs {
                    origin,
                    first,
                    second: param,
                });
            }
            variadic_seen = Some(param);
            has_variadic = true;
        }
    }

    if !has_variadic && arg_list.len() > param_list.len() {
        let hint = db.intern(HintData::Subscripted { origin, args });
        return Err(ReduceError::MoreArgsThanParams {
            hint,
            n_params: param_list.len(),
            n_args: arg_list.len(),
        });
    }

    // Identity subscription, e.g. `Pair[L, R]` inside `Pair`'s own body:
    // the mapping would convey nothing.
    if arg_list.len() == param_list.len()
        && param_list
            .iter()
            .zip(arg_list.iter())
            .all(|(&param, &arg)| db.typevar_hint(param) == arg)
    {
        trace!(origin = origin.0, "identity subscription; no table produced");
        return Ok(TypeArgBinding::Unchanged);
    }

    let mut pairs: SmallVec<[(TypeVarId, HintId); HINT_ARGS_INLINE]> = SmallVec::new();

    // Phase 1: forward sweep.
    let mut front = 0usize;
    let mut variadic_at: Option<usize> = None;
    while front < param_list.len() {
        let param = param_list[front];
        let info = db.typevar_info(param);
        if info.kind == TypeVarKind::VariadicTuple {
            // The variadic participates only while arguments remain;
            // otherwise it stays unbound like any trailing parameter.
            if front < arg_list.len() {
                variadic_at = Some(front);
            }
            break;
        }
        if front >= arg_list.len() {
            // Fewer arguments than parameters: the rest stay unbound.
            break;
        }
        let arg = arg_list[front];
        check_bound(db, param, &info, arg)?;
        pairs.push((param, arg));
        front += 1;
    }

    if let Some(variadic) = variadic_at {
        // Phase 2: backward sweep over the parameters after the variadic.
        let mut back_param = param_list.len();
        let mut back_arg = arg_list.len();
        while back_param - 1 > variadic && back_arg > front {
            let param = param_list[back_param - 1];
            let info = db.typevar_info(param);
            let arg = arg_list[back_arg - 1];
            check_bound(db, param, &info, arg)?;
            pairs.push((param, arg));
            back_param -= 1;
            back_arg -= 1;
        }

        // Phase 3: the variadic absorbs everything between the cursors.
        let leftover = &arg_list[front..back_arg];
        let absorbed = match leftover {
            [] => HintId::EMPTY_TUPLE,
            // One leftover argument binds directly, not as a 1-tuple:
            // downstream consumers read it without unwrapping.
            [only] => *only,
            _ => db.unpacked_tuple(leftover),
        };
        pairs.push((param_list[variadic], absorbed));
    }

    if pairs.is_empty() {
        return Ok(TypeArgBinding::Unchanged);
    }
    Ok(TypeArgBinding::Map(db.typearg_map_from_pairs(&pairs)))
}

/// Verify a bound argument against its parameter's declared bound or
/// constraint set.
///
/// Only isinstanceable (class-vs-class) relationships are structurally
/// verified; bounds or arguments that are themselves unions, references, or
/// other structured hints are accepted without verification. Deliberate
/// under-approximation, kept as a documented non-goal.
fn check_bound(
    db: &HintInterner,
    param: TypeVarId,
    info: &TypeVarInfo,
    arg: HintId,
) -> Result<(), ReduceError> {
    let HintData::Class(arg_class) = db.lookup(arg) else {
        return Ok(());
    };

    if let Some(bound) = info.bound
        && let HintData::Class(bound_class) = db.lookup(bound)
        && !db.is_subclass(arg_class, bound_class)
    {
        return Err(ReduceError::TypeArgBoundViolation { param, bound, culprit: arg });
    }

    if let Some(constraints) = info.constraints {
        let members = db.hint_list(constraints);
        let mut all_classes = true;
        let mut satisfied = false;
        for &member in members.iter() {
            match db.lookup(member) {
                HintData::Class(constraint_class) => {
                    if db.is_subclass(arg_class, constraint_class) {
                        satisfied = true;
                    }
                }
                _ => all_classes = false,
            }
        }
        if all_classes && !satisfied {
            let rendered = db.union(&members);
            return Err(ReduceError::TypeArgBoundViolation {
                param,
                bound: rendered,
                culprit: arg,
            });
        }
    }

    Ok(())
}
