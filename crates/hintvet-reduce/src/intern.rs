//! Hint interning and the process-wide hint database.
//!
//! [`HintInterner`] owns every table the reduction pipeline reads:
//!
//! - the structural hint store (`HintData` ⇄ `HintId`)
//! - interned hint lists, type-variable lists, type-arg maps, depth maps
//! - the class registry (names, bases, declared type variables, attribute
//!   namespaces)
//! - the type-variable registry and the alias definition store
//! - the shared memoization caches and their hit/miss statistics
//!
//! All tables are append-only and backed by sharded maps, so the interner is
//! safe for concurrent use from multiple threads as well as for reentrant
//! recursive calls from within one reduction.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use hintvet_common::{Atom, Interner};
use indexmap::IndexMap;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use tracing::trace;

use crate::sane::HintSane;
use crate::sanify::ReducerOutcome;
use crate::typearg_resolve::TypeArgBinding;
use crate::types::{
    AliasId, ClassId, DepthMapId, HintData, HintId, HintListId, TypeArgMapId, TypeVarId,
    TypeVarInfo, TypeVarKind, TypeVarListId,
};

// =============================================================================
// Generic Interning Table
// =============================================================================

/// Bidirectional append-only interning table.
///
/// `intern` is idempotent under races: the forward map's entry lock ensures
/// one id per key even when two threads intern the same key concurrently.
struct Table<K: Eq + Hash + Clone> {
    fwd: DashMap<K, u32>,
    rows: DashMap<u32, K>,
    next: AtomicU32,
}

impl<K: Eq + Hash + Clone> Table<K> {
    fn new() -> Self {
        Self {
            fwd: DashMap::new(),
            rows: DashMap::new(),
            next: AtomicU32::new(0),
        }
    }

    fn intern(&self, key: K) -> u32 {
        if let Some(id) = self.fwd.get(&key) {
            return *id;
        }
        match self.fwd.entry(key) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let id = self.next.fetch_add(1, Ordering::Relaxed);
                let key = entry.key().clone();
                entry.insert(id);
                self.rows.insert(id, key);
                id
            }
        }
    }

    fn get(&self, id: u32) -> K {
        match self.rows.get(&id) {
            Some(row) => row.clone(),
            None => panic!("interned id {id} has no row; id from a foreign interner?"),
        }
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

// =============================================================================
// Registry Records
// =============================================================================

/// Registered runtime class.
#[derive(Clone, Debug)]
pub struct ClassInfo {
    /// Class name, for diagnostics and forward-reference resolution.
    pub name: Atom,
    /// Direct base classes. `object` is an implicit base of everything.
    pub bases: Vec<ClassId>,
    /// Type variables declared by the unsubscripted construct, in order.
    pub typevars: TypeVarListId,
    /// Attribute namespace: nested type declarations resolvable by forward
    /// references. Declaration order preserved for deterministic rendering.
    pub attrs: IndexMap<Atom, HintId>,
}

/// Type alias definition. The body is set after declaration so an alias may
/// reference itself.
#[derive(Clone, Debug)]
pub struct AliasInfo {
    pub name: Atom,
    pub body: Option<HintId>,
}

// =============================================================================
// Cache Statistics
// =============================================================================

/// Hit/miss counters for the shared memoization caches.
#[derive(Default)]
pub struct CacheStats {
    reduce_hits: AtomicU64,
    reduce_misses: AtomicU64,
    binding_hits: AtomicU64,
    binding_misses: AtomicU64,
    union_hits: AtomicU64,
    union_misses: AtomicU64,
}

/// Point-in-time snapshot of [`CacheStats`], for tests and tracing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CacheStatsSnapshot {
    pub reduce_hits: u64,
    pub reduce_misses: u64,
    pub binding_hits: u64,
    pub binding_misses: u64,
    pub union_hits: u64,
    pub union_misses: u64,
}

impl CacheStats {
    pub(crate) fn record_reduce(&self, hit: bool) {
        let counter = if hit { &self.reduce_hits } else { &self.reduce_misses };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_binding(&self, hit: bool) {
        let counter = if hit { &self.binding_hits } else { &self.binding_misses };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_union(&self, hit: bool) {
        let counter = if hit { &self.union_hits } else { &self.union_misses };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> CacheStatsSnapshot {
        CacheStatsSnapshot {
            reduce_hits: self.reduce_hits.load(Ordering::Relaxed),
            reduce_misses: self.reduce_misses.load(Ordering::Relaxed),
            binding_hits: self.binding_hits.load(Ordering::Relaxed),
            binding_misses: self.binding_misses.load(Ordering::Relaxed),
            union_hits: self.union_hits.load(Ordering::Relaxed),
            union_misses: self.union_misses.load(Ordering::Relaxed),
        }
    }
}

/// Shared memoization stores.
///
/// Keys are interned `Copy + Eq + Hash` records only, never references to
/// in-flight state, so reentrant recursive lookups from the same thread are
/// safe, and concurrent threads share results without coordination.
pub(crate) struct ReduceCaches {
    /// Memoizable-reducer results, keyed on the hint plus the parent
    /// metadata the reducer may consult.
    pub(crate) reduce: DashMap<(HintId, TypeArgMapId, DepthMapId), ReducerOutcome>,
    /// Binding-resolver results, keyed on the exact
    /// (construct, parameters, arguments) triple.
    pub(crate) binding: DashMap<(ClassId, TypeVarListId, HintListId), TypeArgBinding>,
    /// Union-flattening results, keyed on the union's own sanified record.
    pub(crate) unions: DashMap<HintSane, Arc<[HintSane]>>,
    pub(crate) stats: CacheStats,
}

impl ReduceCaches {
    fn new() -> Self {
        Self {
            reduce: DashMap::new(),
            binding: DashMap::new(),
            unions: DashMap::new(),
            stats: CacheStats::default(),
        }
    }
}

// =============================================================================
// HintInterner
// =============================================================================

/// The process-wide hint database.
pub struct HintInterner {
    strings: Interner,
    hints: Table<HintData>,
    hint_lists: Table<Arc<[HintId]>>,
    typevar_lists: Table<Arc<[TypeVarId]>>,
    typearg_maps: Table<Arc<[(TypeVarId, HintId)]>>,
    depth_maps: Table<Arc<[(HintId, u32)]>>,
    classes: DashMap<ClassId, ClassInfo>,
    next_class: AtomicU32,
    typevars: DashMap<TypeVarId, TypeVarInfo>,
    next_typevar: AtomicU32,
    aliases: DashMap<AliasId, AliasInfo>,
    next_alias: AtomicU32,
    pub(crate) caches: ReduceCaches,
}

impl HintInterner {
    /// Create an interner pre-seeded with the well-known ids
    /// (`HintId::IGNORABLE` through `HintId::STR_OBJECT_MAPPING` and the
    /// builtin classes).
    pub fn new() -> Self {
        let interner = Self {
            strings: Interner::new(),
            hints: Table::new(),
            hint_lists: Table::new(),
            typevar_lists: Table::new(),
            typearg_maps: Table::new(),
            depth_maps: Table::new(),
            classes: DashMap::new(),
            next_class: AtomicU32::new(0),
            typevars: DashMap::new(),
            next_typevar: AtomicU32::new(0),
            aliases: DashMap::new(),
            next_alias: AtomicU32::new(0),
            caches: ReduceCaches::new(),
        };
        interner.seed();
        interner
    }

    /// Intern the well-known rows in a fixed order so the `const` ids on
    /// `HintId`, `ClassId`, and the auxiliary id types stay valid.
    fn seed(&self) {
        let empty_hints = self.intern_hint_list(&[]);
        debug_assert_eq!(empty_hints, HintListId::EMPTY);
        let empty_typevars = self.intern_typevar_list(&[]);
        debug_assert_eq!(empty_typevars, TypeVarListId::EMPTY);
        let empty_map = TypeArgMapId(self.typearg_maps.intern(Arc::from(Vec::new())));
        debug_assert_eq!(empty_map, TypeArgMapId::EMPTY);
        let empty_depths = DepthMapId(self.depth_maps.intern(Arc::from(Vec::new())));
        debug_assert_eq!(empty_depths, DepthMapId::EMPTY);

        let object = self.register_class("object", &[]);
        debug_assert_eq!(object, ClassId::OBJECT);
        let bool_class = self.register_class("bool", &[]);
        debug_assert_eq!(bool_class, ClassId::BOOL);
        let str_class = self.register_class("str", &[]);
        debug_assert_eq!(str_class, ClassId::STR);
        let mapping = self.register_class("Mapping", &[]);
        debug_assert_eq!(mapping, ClassId::MAPPING);
        let key_var = self.declare_typevar("_KT", TypeVarKind::Ordinary, None, None);
        let value_var = self.declare_typevar("_VT", TypeVarKind::Ordinary, None, None);
        self.set_class_typevars(mapping, &[key_var, value_var]);

        let ignorable = self.intern(HintData::Ignorable);
        debug_assert_eq!(ignorable, HintId::IGNORABLE);
        let recursive = self.intern(HintData::Recursive);
        debug_assert_eq!(recursive, HintId::RECURSIVE);
        let object_hint = self.intern(HintData::Class(object));
        debug_assert_eq!(object_hint, HintId::OBJECT);
        let bool_hint = self.intern(HintData::Class(bool_class));
        debug_assert_eq!(bool_hint, HintId::BOOL);
        let str_hint = self.intern(HintData::Class(str_class));
        debug_assert_eq!(str_hint, HintId::STR);
        let empty_tuple = self.intern(HintData::UnpackedTuple(HintListId::EMPTY));
        debug_assert_eq!(empty_tuple, HintId::EMPTY_TUPLE);
        let str_object = self.intern_hint_list(&[HintId::STR, HintId::OBJECT]);
        let str_object_mapping =
            self.intern(HintData::Subscripted { origin: mapping, args: str_object });
        debug_assert_eq!(str_object_mapping, HintId::STR_OBJECT_MAPPING);
    }

    // -------------------------------------------------------------------------
    // Strings
    // -------------------------------------------------------------------------

    pub fn intern_str(&self, text: &str) -> Atom {
        self.strings.intern(text)
    }

    pub fn resolve_atom(&self, atom: Atom) -> Arc<str> {
        self.strings.resolve(atom)
    }

    // -------------------------------------------------------------------------
    // Hints and Hint Lists
    // -------------------------------------------------------------------------

    /// Intern a structural hint key, returning its stable id.
    pub fn intern(&self, data: HintData) -> HintId {
        HintId(self.hints.intern(data))
    }

    /// Look up the structural key behind a hint id.
    pub fn lookup(&self, id: HintId) -> HintData {
        self.hints.get(id.0)
    }

    pub fn intern_hint_list(&self, items: &[HintId]) -> HintListId {
        HintListId(self.hint_lists.intern(Arc::from(items)))
    }

    pub fn hint_list(&self, id: HintListId) -> Arc<[HintId]> {
        self.hint_lists.get(id.0)
    }

    pub fn intern_typevar_list(&self, items: &[TypeVarId]) -> TypeVarListId {
        TypeVarListId(self.typevar_lists.intern(Arc::from(items)))
    }

    pub fn typevar_list(&self, id: TypeVarListId) -> Arc<[TypeVarId]> {
        self.typevar_lists.get(id.0)
    }

    /// Number of distinct hints interned; for tests and tracing.
    pub fn hint_count(&self) -> usize {
        self.hints.len()
    }

    // -------------------------------------------------------------------------
    // Type-Arg Maps and Depth Maps (raw storage; semantics in typeargs.rs)
    // -------------------------------------------------------------------------

    /// Intern a type-arg table. `pairs` must be sorted by `TypeVarId` with
    /// unique keys; [`crate::typeargs`] constructors uphold this.
    pub(crate) fn intern_typearg_pairs(&self, pairs: Vec<(TypeVarId, HintId)>) -> TypeArgMapId {
        debug_assert!(pairs.windows(2).all(|w| w[0].0 < w[1].0));
        TypeArgMapId(self.typearg_maps.intern(Arc::from(pairs)))
    }

    pub fn typearg_pairs(&self, id: TypeArgMapId) -> Arc<[(TypeVarId, HintId)]> {
        self.typearg_maps.get(id.0)
    }

    pub(crate) fn intern_depth_pairs(&self, pairs: Vec<(HintId, u32)>) -> DepthMapId {
        debug_assert!(pairs.windows(2).all(|w| w[0].0 < w[1].0));
        DepthMapId(self.depth_maps.intern(Arc::from(pairs)))
    }

    pub fn depth_pairs(&self, id: DepthMapId) -> Arc<[(HintId, u32)]> {
        self.depth_maps.get(id.0)
    }

    // -------------------------------------------------------------------------
    // Class Registry
    // -------------------------------------------------------------------------

    /// Register a runtime class with its direct bases.
    pub fn register_class(&self, name: &str, bases: &[ClassId]) -> ClassId {
        let id = ClassId(self.next_class.fetch_add(1, Ordering::Relaxed));
        let info = ClassInfo {
            name: self.strings.intern(name),
            bases: bases.to_vec(),
            typevars: TypeVarListId::EMPTY,
            attrs: IndexMap::new(),
        };
        trace!(class = name, id = id.0, "registered class");
        self.classes.insert(id, info);
        id
    }

    /// Declare the ordered type variables of a parametrized construct.
    pub fn set_class_typevars(&self, class: ClassId, typevars: &[TypeVarId]) {
        let list = self.intern_typevar_list(typevars);
        if let Some(mut info) = self.classes.get_mut(&class) {
            info.typevars = list;
        }
    }

    /// Add a named attribute (nested type declaration) to a class
    /// namespace; the forward-reference reducer resolves against these.
    pub fn set_class_attr(&self, class: ClassId, name: &str, hint: HintId) {
        let atom = self.strings.intern(name);
        if let Some(mut info) = self.classes.get_mut(&class) {
            info.attrs.insert(atom, hint);
        }
    }

    pub fn class_name(&self, class: ClassId) -> Atom {
        self.class_info(class).name
    }

    pub fn class_typevars(&self, class: ClassId) -> TypeVarListId {
        self.class_info(class).typevars
    }

    pub fn class_attr(&self, class: ClassId, name: Atom) -> Option<HintId> {
        self.classes.get(&class).and_then(|info| info.attrs.get(&name).copied())
    }

    pub fn class_info(&self, class: ClassId) -> ClassInfo {
        match self.classes.get(&class) {
            Some(info) => info.clone(),
            None => panic!("ClassId({}) was not registered", class.0),
        }
    }

    /// Is-subclass test over the class registry. Every class is a subclass
    /// of itself and of `object`.
    pub fn is_subclass(&self, class: ClassId, base: ClassId) -> bool {
        if class == base || base == ClassId::OBJECT {
            return true;
        }
        let mut pending = vec![class];
        let mut seen = rustc_hash::FxHashSet::default();
        while let Some(current) = pending.pop() {
            if !seen.insert(current) {
                continue;
            }
            let Some(info) = self.classes.get(&current) else { continue };
            for &parent in &info.bases {
                if parent == base {
                    return true;
                }
                pending.push(parent);
            }
        }
        false
    }

    // -------------------------------------------------------------------------
    // Type-Variable Registry
    // -------------------------------------------------------------------------

    pub fn declare_typevar(
        &self,
        name: &str,
        kind: TypeVarKind,
        bound: Option<HintId>,
        constraints: Option<HintListId>,
    ) -> TypeVarId {
        let id = TypeVarId(self.next_typevar.fetch_add(1, Ordering::Relaxed));
        let info = TypeVarInfo { name: self.strings.intern(name), kind, bound, constraints };
        self.typevars.insert(id, info);
        id
    }

    pub fn typevar_info(&self, id: TypeVarId) -> TypeVarInfo {
        match self.typevars.get(&id) {
            Some(info) => *info,
            None => panic!("TypeVarId({}) was not declared", id.0),
        }
    }

    // -------------------------------------------------------------------------
    // Alias Definition Store
    // -------------------------------------------------------------------------

    /// Declare a type alias; its body is attached later via
    /// [`set_alias_body`](Self::set_alias_body), which is what lets an alias
    /// reference itself.
    pub fn declare_alias(&self, name: &str) -> AliasId {
        let id = AliasId(self.next_alias.fetch_add(1, Ordering::Relaxed));
        let info = AliasInfo { name: self.strings.intern(name), body: None };
        trace!(alias = name, id = id.0, "declared alias");
        self.aliases.insert(id, info);
        id
    }

    pub fn set_alias_body(&self, alias: AliasId, body: HintId) {
        if let Some(mut info) = self.aliases.get_mut(&alias) {
            info.body = Some(body);
        }
    }

    pub fn alias_name(&self, alias: AliasId) -> Atom {
        match self.aliases.get(&alias) {
            Some(info) => info.name,
            None => panic!("AliasId({}) was not declared", alias.0),
        }
    }

    /// `None` while the alias body is not yet attached; the alias reducer
    /// treats that as deferred, not as an error.
    pub fn alias_body(&self, alias: AliasId) -> Option<HintId> {
        self.aliases.get(&alias).and_then(|info| info.body)
    }

    // -------------------------------------------------------------------------
    // Hint Construction Conveniences
    // -------------------------------------------------------------------------

    pub fn class_hint(&self, class: ClassId) -> HintId {
        self.intern(HintData::Class(class))
    }

    pub fn typevar_hint(&self, typevar: TypeVarId) -> HintId {
        match self.typevar_info(typevar).kind {
            TypeVarKind::Ordinary => self.intern(HintData::TypeVar(typevar)),
            TypeVarKind::VariadicTuple => self.intern(HintData::TypeVarTuple(typevar)),
        }
    }

    /// Intern a union of the given members. Zero members collapse to the
    /// ignorable marker, one member to itself.
    pub fn union(&self, members: &[HintId]) -> HintId {
        match members {
            [] => HintId::IGNORABLE,
            [only] => *only,
            _ => {
                let list = self.intern_hint_list(members);
                self.intern(HintData::Union(list))
            }
        }
    }

    pub fn subscript(&self, origin: ClassId, args: &[HintId]) -> HintId {
        let args = self.intern_hint_list(args);
        self.intern(HintData::Subscripted { origin, args })
    }

    pub fn unpacked_tuple(&self, items: &[HintId]) -> HintId {
        let list = self.intern_hint_list(items);
        self.intern(HintData::UnpackedTuple(list))
    }

    pub fn alias_hint(&self, alias: AliasId) -> HintId {
        self.intern(HintData::Alias(alias))
    }

    pub fn forward_ref(&self, name: &str) -> HintId {
        let atom = self.strings.intern(name);
        self.intern(HintData::ForwardRef(atom))
    }

    // -------------------------------------------------------------------------
    // Cache Statistics
    // -------------------------------------------------------------------------

    pub fn cache_stats(&self) -> CacheStatsSnapshot {
        self.caches.stats.snapshot()
    }
}

impl Default for HintInterner {
    fn default() -> Self {
        Self::new()
    }
}
