//! Thread-safe string interning.
//!
//! Identifiers (class names, type-variable names, forward-reference targets)
//! are deduplicated into `Atom` handles so that name comparison is an `u32`
//! comparison and every name is stored exactly once per process.
//!
//! The interner is safe for concurrent use: interning goes through a sharded
//! map, resolution through an append-only row table. Reads never block reads.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/// Interned string handle.
///
/// Two `Atom`s compare equal iff they were interned from equal strings in the
/// same [`Interner`]. Atoms from different interners must never be mixed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom(pub u32);

/// Thread-safe string interner.
///
/// ```
/// use hintvet_common::Interner;
///
/// let interner = Interner::new();
/// let a = interner.intern("list");
/// let b = interner.intern("list");
/// assert_eq!(a, b);
/// assert_eq!(interner.resolve(a).as_ref(), "list");
/// ```
pub struct Interner {
    map: DashMap<Arc<str>, Atom>,
    rows: DashMap<u32, Arc<str>>,
    next: AtomicU32,
}

impl Interner {
    pub fn new() -> Self {
        Self {
            map: DashMap::new(),
            rows: DashMap::new(),
            next: AtomicU32::new(0),
        }
    }

    /// Intern a string, returning its stable `Atom`.
    pub fn intern(&self, text: &str) -> Atom {
        // Fast path: already interned.
        if let Some(atom) = self.map.get(text) {
            return *atom;
        }
        match self.map.entry(Arc::from(text)) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let id = self.next.fetch_add(1, Ordering::Relaxed);
                let atom = Atom(id);
                let key = entry.key().clone();
                entry.insert(atom);
                self.rows.insert(id, key);
                atom
            }
        }
    }

    /// Resolve an `Atom` back to its string.
    ///
    /// Panics if `atom` was not produced by this interner; that is an
    /// internal invariant violation, not a recoverable condition.
    pub fn resolve(&self, atom: Atom) -> Arc<str> {
        match self.rows.get(&atom.0) {
            Some(row) => row.clone(),
            None => panic!("Atom({}) was not interned by this Interner", atom.0),
        }
    }

    /// Number of distinct strings interned so far.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_deduplicates() {
        let interner = Interner::new();
        let a = interner.intern("T");
        let b = interner.intern("T");
        let c = interner.intern("U");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn resolve_round_trips() {
        let interner = Interner::new();
        let atom = interner.intern("Sequence");
        assert_eq!(interner.resolve(atom).as_ref(), "Sequence");
    }

    #[test]
    fn concurrent_interning_is_stable() {
        let interner = Arc::new(Interner::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let interner = interner.clone();
            handles.push(std::thread::spawn(move || {
                (0..64)
                    .map(|i| interner.intern(&format!("name{}", i % 16)))
                    .collect::<Vec<_>>()
            }));
        }
        let results: Vec<Vec<Atom>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for window in results.windows(2) {
            assert_eq!(window[0], window[1]);
        }
        assert_eq!(interner.len(), 16);
    }
}
