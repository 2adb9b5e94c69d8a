//! Hint Reduction Engine
//!
//! This crate implements the reduction core of the hintvet runtime
//! type-checking engine: the pipeline that takes a raw, possibly deeply
//! nested, possibly self-referential type hint and rewrites it into a
//! canonical, checkable form. It uses:
//!
//! - **Interning**: hints, hint lists, type-arg tables, and recursion
//!   guard maps are all interned, so every record is `Copy`, equality is
//!   O(1), and records double as memoization keys
//! - **Path-scoped recursion guards**: self-referential hints unroll
//!   exactly one productive level, then terminate with a marker
//! - **Tag-keyed reducer dispatch**: one strategy table for memoizable
//!   reducers, one for context-dependent reducers
//!
//! The outer code-generation driver consumes [`HintSane`] records from
//! [`Sanifier::reduce`] and the union skeletons from
//! [`unions::contribute_union_code`].

pub mod classify;
pub mod diagnostics;
pub mod format;
mod intern;
mod reduce_rules;
pub mod recursion;
pub mod sane;
pub mod sanify;
pub mod typearg_resolve;
pub mod typeargs;
pub mod types;
pub mod unions;

pub use classify::{HintTag, classify};
pub use diagnostics::ReduceError;
pub use format::display_hint;
pub use intern::{AliasInfo, CacheStatsSnapshot, ClassInfo, HintInterner};
pub use recursion::{is_recursive, make_recursable, recursable_depth};
pub use sane::HintSane;
pub use sanify::{CheckedPosition, ReducerOutcome, Sanifier};
pub use typearg_resolve::{TypeArgBinding, resolve_typeargs};
pub use typeargs::TypeArgLookup;
pub use types::{
    AliasId, ClassId, DepthMapId, HintData, HintId, HintListId, TypeArgMapId, TypeVarId,
    TypeVarInfo, TypeVarKind, TypeVarListId,
};
pub use unions::{SanifyQueue, UnionCode, contribute_union_code, flatten_union};

#[cfg(test)]
mod tests;
