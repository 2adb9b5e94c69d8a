//! Hint discriminator classification.
//!
//! Reduction dispatches on a hint's syntactic category, not its full
//! structure. [`classify`] is the discriminator oracle: a single interner
//! lookup mapping a hint to its [`HintTag`], or `None` for hints that need
//! no reduction at all: plain classes, the singleton markers, synthesized
//! unpacked tuples. That `None` path is the common case.
//!
//! Invariant: every tag returned here is a key in the reducer dispatch
//! tables, and each table entry accepts exactly the hint shape its tag
//! promises.

use crate::intern::HintInterner;
use crate::types::{HintData, HintId};

/// Syntactic category of a reducible hint.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HintTag {
    /// Union of two or more members.
    Union,
    /// Parametrized construct applied to arguments.
    Subscripted,
    /// Ordinary type variable.
    TypeVar,
    /// Variadic type-variable tuple.
    TypeVarTuple,
    /// Lazy type-alias reference.
    Alias,
    /// Enclosing-class self type.
    SelfType,
    /// Unresolved symbolic reference.
    ForwardRef,
    /// Return-position-only boolean narrowing form.
    TypeGuard,
    /// Structurally-typed mapping construct.
    TypedDict,
    /// Structural protocol.
    Protocol,
}

/// Classify a hint, or return `None` when it requires no reduction.
pub fn classify(db: &HintInterner, hint: HintId) -> Option<HintTag> {
    match db.lookup(hint) {
        HintData::Union(_) => Some(HintTag::Union),
        HintData::Subscripted { .. } => Some(HintTag::Subscripted),
        HintData::TypeVar(_) => Some(HintTag::TypeVar),
        HintData::TypeVarTuple(_) => Some(HintTag::TypeVarTuple),
        HintData::Alias(_) => Some(HintTag::Alias),
        HintData::SelfType => Some(HintTag::SelfType),
        HintData::ForwardRef(_) => Some(HintTag::ForwardRef),
        HintData::TypeGuard => Some(HintTag::TypeGuard),
        HintData::TypedDict(_) => Some(HintTag::TypedDict),
        HintData::Protocol { .. } => Some(HintTag::Protocol),
        // Plain classes, the two markers, and synthesized unpacked tuples
        // are already canonical.
        HintData::Ignorable
        | HintData::Recursive
        | HintData::Class(_)
        | HintData::UnpackedTuple(_) => None,
    }
}
