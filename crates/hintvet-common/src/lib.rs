//! Common types and utilities for the hintvet runtime type-checking engine.
//!
//! This crate provides foundational pieces used across hintvet crates:
//! - String interning (`Atom`, `Interner`)
//! - Centralized limits and thresholds (`limits`)

// String interning for identifier deduplication
pub mod interner;
pub use interner::{Atom, Interner};

// Centralized limits and thresholds
pub mod limits;
