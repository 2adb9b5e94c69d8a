//! Centralized limits and thresholds for the hintvet engine.
//!
//! This module provides shared constants for recursion depths and operation
//! counts used throughout the codebase. Centralizing these values:
//! - Prevents duplicate definitions with inconsistent values
//! - Documents the rationale for each limit
//!
//! # Categories
//!
//! - **Reduction passes**: bounds on the iterative rewrite loop
//! - **Recursable depths**: per-construct visit budgets for self-referential
//!   hints (the recursion guard's `max_depth` values)
//! - **Capacity limits**: pre-allocation sizes for hot-path accumulators

// =============================================================================
// Reduction Pass Limits
// =============================================================================

/// Maximum number of rewrite passes the reduction loop performs on a single
/// hint before giving up.
///
/// Every reducer either terminates reduction or rewrites the hint one step
/// closer to canonical form; well-formed hints converge in a handful of
/// passes. The bound exists so that a buggy reducer that oscillates between
/// two forms surfaces as a typed error instead of a hang.
pub const MAX_REDUCTION_PASSES: u32 = 64;

/// Maximum number of work-stack iterations when flattening nested unions.
///
/// Nested unions spliced into their parent can only multiply the member
/// count; any hint tree a user can actually write stays far below this.
pub const MAX_UNION_FLATTEN_ITERATIONS: u32 = 10_000;

// =============================================================================
// Recursable Depths
// =============================================================================
// A hint's recursable identity is recorded in the path-scoped guard map
// *before* its expansion is descended into. A `max_depth` of 0 therefore
// yields exactly one productive expansion: the first visit proceeds and
// records visit-count 1; a second visit of the same identity along the same
// path sees 1 > 0 and is replaced by the recursive marker.

/// Visit budget for type variables and type-variable tuples.
///
/// Type variables are never themselves parents in a hint tree, so a plain
/// "expand once" rule suffices.
pub const RECURSABLE_DEPTH_TYPEVAR: u32 = 0;

/// Visit budget for self-referential type aliases.
///
/// The alias's guard entry is recorded before its body is descended, so a
/// budget of 0 still unrolls the structurally interesting first layer:
/// `X = int | X` reduces to `int | <recursive>`, never loops.
pub const RECURSABLE_DEPTH_ALIAS: u32 = 0;

// =============================================================================
// Capacity Limits
// =============================================================================

/// Inline capacity for short hint-argument vectors (`SmallVec`).
///
/// Subscriptions with more than this many arguments spill to the heap;
/// virtually all real-world generics take between one and four arguments.
pub const HINT_ARGS_INLINE: usize = 4;
