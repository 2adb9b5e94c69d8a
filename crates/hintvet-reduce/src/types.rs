//! Core identifier types and the structural hint representation.
//!
//! Hints are interned: a [`HintId`] is a stable `u32` handle whose identity
//! comparison *is* structural equality, because equal [`HintData`] keys
//! always intern to the same id. All auxiliary tables (hint lists, type-arg
//! maps, recursion depth maps) are interned the same way, so every record
//! the reduction pipeline passes around is `Copy + Eq + Hash` and can serve
//! directly as a memoization key.

use hintvet_common::Atom;

// =============================================================================
// HintId - Interned Hint Identifier
// =============================================================================

/// Interned hint identifier.
///
/// O(1) equality; two `HintId`s are equal iff the hints are structurally
/// identical. Identity doubles as the "recursable identity" tracked by the
/// recursion guard.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HintId(pub u32);

impl HintId {
    /// The ignorable marker: a hint conveying no constraint. Dropped from
    /// the checkable tree wherever it appears.
    pub const IGNORABLE: Self = Self(0);

    /// The recursive marker: a cycle back to an ancestor hint. Never
    /// expanded further; absorbed by the caller.
    pub const RECURSIVE: Self = Self(1);

    /// The root class every runtime value is an instance of.
    pub const OBJECT: Self = Self(2);

    /// The boolean class; the reduction target of type guards.
    pub const BOOL: Self = Self(3);

    /// The string class.
    pub const STR: Self = Self(4);

    /// The empty unpacked tuple: what a variadic type-variable tuple binds
    /// to when it absorbed zero arguments. Distinct from "unbound".
    pub const EMPTY_TUPLE: Self = Self(5);

    /// The untyped string-keyed mapping supertype; the reduction target of
    /// structurally-typed mapping hints.
    pub const STR_OBJECT_MAPPING: Self = Self(6);

    /// Returns `true` for the two singleton markers, which terminate
    /// reduction unconditionally.
    pub const fn is_marker(self) -> bool {
        matches!(self, Self::IGNORABLE | Self::RECURSIVE)
    }
}

// =============================================================================
// Auxiliary Interned Ids
// =============================================================================

/// Interned ordered list of hints (union members, subscription arguments).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HintListId(pub u32);

impl HintListId {
    pub const EMPTY: Self = Self(0);
}

/// Interned ordered list of declared type variables.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeVarListId(pub u32);

impl TypeVarListId {
    pub const EMPTY: Self = Self(0);
}

/// Interned type-argument substitution table: sorted
/// `(TypeVarId, HintId)` pairs. Immutable; merges intern new tables.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeArgMapId(pub u32);

impl TypeArgMapId {
    pub const EMPTY: Self = Self(0);
}

/// Interned recursion-guard state: sorted `(HintId, u32)` visit counts,
/// scoped to one root-to-node path.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DepthMapId(pub u32);

impl DepthMapId {
    pub const EMPTY: Self = Self(0);
}

// =============================================================================
// Registry Ids
// =============================================================================

/// Registered runtime class.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub u32);

impl ClassId {
    pub const OBJECT: Self = Self(0);
    pub const BOOL: Self = Self(1);
    pub const STR: Self = Self(2);
    pub const MAPPING: Self = Self(3);
}

/// Declared type variable (ordinary or variadic tuple).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeVarId(pub u32);

/// Declared (possibly self-referential) type alias.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AliasId(pub u32);

// =============================================================================
// HintData - Structural Hint Key
// =============================================================================

/// Structural representation of a hint; the interning key behind [`HintId`].
///
/// Every variant holds interned handles only, so `HintData` itself is
/// `Copy` and cheap to hash.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HintData {
    /// The ignorable singleton marker.
    Ignorable,

    /// The recursive singleton marker.
    Recursive,

    /// A plain isinstanceable runtime class. The common fast path: no
    /// reduction needed.
    Class(ClassId),

    /// A union of two or more members, declaration order preserved.
    Union(HintListId),

    /// A parametrized construct applied to concrete arguments,
    /// e.g. `Mapping[str, object]`.
    Subscripted { origin: ClassId, args: HintListId },

    /// An ordinary type variable.
    TypeVar(TypeVarId),

    /// A variadic type-variable tuple (consumes zero or more subscription
    /// arguments).
    TypeVarTuple(TypeVarId),

    /// A synthesized unpacked fixed tuple of hints; the binding resolver's
    /// representation for a variadic tuple that absorbed two or more
    /// arguments. The empty list is the empty-tuple marker.
    UnpackedTuple(HintListId),

    /// Lazy reference to a type alias definition. Bodies are set after
    /// declaration so an alias may reference itself.
    Alias(AliasId),

    /// The enclosing-class self type. Context-dependent: resolves to a
    /// different class at every decoration site.
    SelfType,

    /// An unresolved symbolic reference to a type by name.
    ForwardRef(Atom),

    /// A type-guard form, meaningful only in return position.
    TypeGuard,

    /// A structurally-typed mapping construct.
    TypedDict(ClassId),

    /// A structural protocol, possibly parametrized.
    Protocol { origin: ClassId, args: HintListId },
}

// =============================================================================
// Type Variable Metadata
// =============================================================================

/// Arity class of a declared type variable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeVarKind {
    /// Consumes exactly one subscription argument.
    Ordinary,
    /// Consumes zero or more subscription arguments (at most one permitted
    /// per parameter list).
    VariadicTuple,
}

/// Declaration-time metadata for a type variable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeVarInfo {
    /// Name, for diagnostics.
    pub name: Atom,
    /// Ordinary vs. variadic tuple.
    pub kind: TypeVarKind,
    /// Upper bound, if declared. Only isinstanceable (class) bounds are
    /// structurally verified by the binding resolver.
    pub bound: Option<HintId>,
    /// Constraint set, if declared. Mutually exclusive with `bound`.
    pub constraints: Option<HintListId>,
}
