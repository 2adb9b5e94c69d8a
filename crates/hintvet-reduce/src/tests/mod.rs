//! Crate-internal tests needing access to private interner state.
//! Behavioral coverage lives in `tests/` at the crate root.

mod intern_tests;
