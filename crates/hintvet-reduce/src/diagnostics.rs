//! Typed errors raised by the reduction engine.
//!
//! Errors carry interned ids ("culprits", counts, indices) rather than
//! pre-rendered strings; [`ReduceError::render`] formats the full message
//! lazily against the interner, so tentative reduction paths never pay for
//! string formatting. The blanket `Display` impl renders ids only and is
//! meant for logs, not end users.
//!
//! Taxonomy:
//! - structural errors (malformed subscriptions), never recovered locally;
//! - constraint-violation errors, carrying the offending hint as culprit;
//! - unsupported-context errors with long corrective messages, since they
//!   indicate an authoring mistake at the decoration site;
//! - deferred forward-reference resolution and recursion are *not* errors.

use hintvet_common::Atom;

use crate::format::display_hint;
use crate::intern::HintInterner;
use crate::types::{ClassId, HintId, TypeVarId};

/// Error raised while reducing a hint. All variants propagate unmodified to
/// the outer driver and surface at decoration time, never at call time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReduceError {
    /// A construct declaring zero type parameters was subscripted.
    EmptyTypeArgs { origin: ClassId },

    /// A construct was subscripted with zero arguments.
    NoChildHints { hint: HintId },

    /// More arguments than parameters, with no variadic tuple to absorb
    /// the surplus.
    MoreArgsThanParams {
        hint: HintId,
        n_params: usize,
        n_args: usize,
    },

    /// Two or more variadic type-variable tuples in one parameter list.
    MultipleVariadicTypeArgs {
        origin: ClassId,
        first: TypeVarId,
        second: TypeVarId,
    },

    /// A bounded type parameter received an argument violating its bound
    /// or constraint set. `culprit` is the offending argument.
    TypeArgBoundViolation {
        param: TypeVarId,
        bound: HintId,
        culprit: HintId,
    },

    /// A self type was reduced with no enclosing class context.
    SelfOutsideClass { hint: HintId },

    /// A type guard annotated something other than a return.
    TypeGuardOutsideReturn { position: Option<Atom> },

    /// The rewrite loop failed to converge; indicates a reducer bug, not a
    /// user mistake.
    ReductionLimitExceeded { hint: HintId, passes: u32 },
}

impl ReduceError {
    /// Render the full user-facing message against the interner.
    pub fn render(&self, db: &HintInterner) -> String {
        match *self {
            Self::EmptyTypeArgs { origin } => format!(
                "type hint {}[...] invalid: '{}' declares no type parameters \
                 and cannot be subscripted",
                db.resolve_atom(db.class_name(origin)),
                db.resolve_atom(db.class_name(origin)),
            ),
            Self::NoChildHints { hint } => format!(
                "type hint {} invalid: subscripted with no arguments",
                display_hint(db, hint),
            ),
            Self::MoreArgsThanParams { hint, n_params, n_args } => format!(
                "type hint {} invalid: {} argument(s) passed to a construct \
                 declaring only {} type parameter(s)",
                display_hint(db, hint),
                n_args,
                n_params,
            ),
            Self::MultipleVariadicTypeArgs { origin, first, second } => format!(
                "type hint {}[...] invalid: type parameters *{} and *{} are both \
                 variadic; at most one variadic type-parameter tuple is permitted",
                db.resolve_atom(db.class_name(origin)),
                db.resolve_atom(db.typevar_info(first).name),
                db.resolve_atom(db.typevar_info(second).name),
            ),
            Self::TypeArgBoundViolation { param, bound, culprit } => format!(
                "type argument {} violates the bound {} of type parameter {}",
                display_hint(db, culprit),
                display_hint(db, bound),
                db.resolve_atom(db.typevar_info(param).name),
            ),
            Self::SelfOutsideClass { hint } => format!(
                "type hint {} invalid: the self type is only meaningful inside a \
                 class body. It binds to the class whose method is being checked; \
                 outside any class there is nothing for it to bind to.\n\
                 Consider either moving the annotated callable into the class it \
                 describes, or naming that class explicitly:\n\
                 \n\
                 \u{20}   class Widget:\n\
                 \u{20}       def clone(self) -> Self: ...        # supported\n\
                 \n\
                 \u{20}   def clone(widget) -> Self: ...          # unsupported\n\
                 \u{20}   def clone(widget) -> 'Widget': ...      # supported",
                display_hint(db, hint),
            ),
            Self::TypeGuardOutsideReturn { position } => {
                let place = match position {
                    Some(name) => format!("parameter '{}'", db.resolve_atom(name)),
                    None => "a non-return position".to_string(),
                };
                format!(
                    "type guard invalid in {place}: type guards narrow the type of \
                     an argument from the caller's perspective and carry meaning \
                     only when annotating a callable's return.\n\
                     Annotate the return instead:\n\
                     \n\
                     \u{20}   def is_str(obj: object) -> TypeGuard: ...   # supported\n\
                     \u{20}   def is_str(obj: TypeGuard) -> bool: ...     # unsupported",
                )
            }
            Self::ReductionLimitExceeded { hint, passes } => format!(
                "type hint {} failed to converge after {} reduction passes; \
                 this is a bug in a reducer, please report it",
                display_hint(db, hint),
                passes,
            ),
        }
    }
}

impl std::fmt::Display for ReduceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::EmptyTypeArgs { origin } => {
                write!(f, "construct #{} declares no type parameters", origin.0)
            }
            Self::NoChildHints { hint } => {
                write!(f, "hint #{} subscripted with no arguments", hint.0)
            }
            Self::MoreArgsThanParams { hint, n_params, n_args } => write!(
                f,
                "hint #{}: {} argument(s) for {} parameter(s)",
                hint.0, n_args, n_params
            ),
            Self::MultipleVariadicTypeArgs { origin, .. } => {
                write!(f, "construct #{}: multiple variadic type parameters", origin.0)
            }
            Self::TypeArgBoundViolation { param, culprit, .. } => write!(
                f,
                "type parameter #{}: bound violated by hint #{}",
                param.0, culprit.0
            ),
            Self::SelfOutsideClass { hint } => {
                write!(f, "hint #{}: self type outside a class", hint.0)
            }
            Self::TypeGuardOutsideReturn { .. } => {
                write!(f, "type guard outside return position")
            }
            Self::ReductionLimitExceeded { hint, passes } => {
                write!(f, "hint #{} did not converge after {} passes", hint.0, passes)
            }
        }
    }
}

impl std::error::Error for ReduceError {}
