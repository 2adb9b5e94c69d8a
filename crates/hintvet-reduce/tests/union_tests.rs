//! Union flattening and check-code contribution.

use hintvet_reduce::{
    ClassId, HintData, HintId, HintInterner, HintSane, SanifyQueue, Sanifier, TypeVarKind,
    contribute_union_code, display_hint, flatten_union,
};

fn class(db: &HintInterner, name: &str) -> HintId {
    db.class_hint(db.register_class(name, &[]))
}

#[test]
fn nested_unions_flatten_in_declaration_order() {
    let db = HintInterner::new();
    let a = class(&db, "A");
    let b = class(&db, "B");
    let c = class(&db, "C");
    let d = class(&db, "D");

    let inner = db.union(&[b, c]);
    let outer = db.union(&[a, inner, d]);

    let sanifier = Sanifier::new(&db);
    let sane = sanifier.reduce(outer, None).unwrap();

    let HintData::Union(members) = db.lookup(sane.hint) else {
        panic!("expected a flattened union");
    };
    assert_eq!(db.hint_list(members).as_ref(), &[a, b, c, d]);
}

#[test]
fn dynamically_arising_unions_are_spliced_in_place() {
    let db = HintInterner::new();
    let a = class(&db, "A");
    let b = class(&db, "B");
    let c = class(&db, "C");
    let d = class(&db, "D");

    // An unmapped constrained variable expands into its constraint union
    // mid-flattening; its members must land between A and D.
    let constraints = db.intern_hint_list(&[b, c]);
    let t = db.declare_typevar("T", TypeVarKind::Ordinary, None, Some(constraints));
    let outer = db.union(&[a, db.typevar_hint(t), d]);

    let sane = Sanifier::new(&db).reduce(outer, None).unwrap();
    let HintData::Union(members) = db.lookup(sane.hint) else {
        panic!("expected a flattened union");
    };
    assert_eq!(db.hint_list(members).as_ref(), &[a, b, c, d]);
    assert_eq!(display_hint(&db, sane.hint), "A | B | C | D");
}

#[test]
fn ignorable_members_are_dropped() {
    let db = HintInterner::new();
    let a = class(&db, "A");
    let unconstrained = db.typevar_hint(db.declare_typevar("T", TypeVarKind::Ordinary, None, None));

    let union = db.union(&[a, unconstrained]);
    let sane = Sanifier::new(&db).reduce(union, None).unwrap();
    // One survivor: the union collapses to it.
    assert_eq!(sane.hint, a);
}

#[test]
fn fully_ignorable_union_collapses_to_the_marker() {
    let db = HintInterner::new();
    let t = db.typevar_hint(db.declare_typevar("T", TypeVarKind::Ordinary, None, None));
    let u = db.typevar_hint(db.declare_typevar("U", TypeVarKind::Ordinary, None, None));

    let union = db.union(&[t, u]);
    let sane = Sanifier::new(&db).reduce(union, None).unwrap();
    assert!(sane.is_ignorable());
}

#[test]
fn flattening_is_memoized_per_union_record() {
    let db = HintInterner::new();
    let a = class(&db, "A");
    let b = class(&db, "B");
    let union = db.union(&[a, b]);
    let members = match db.lookup(union) {
        HintData::Union(members) => members,
        _ => unreachable!(),
    };

    let sanifier = Sanifier::new(&db);
    let record = HintSane::new(union);
    let first = flatten_union(&sanifier, members, &record).unwrap();
    let before = db.cache_stats();
    let second = flatten_union(&sanifier, members, &record).unwrap();
    let after = db.cache_stats();

    assert_eq!(first.as_ref(), second.as_ref());
    assert_eq!(after.union_hits, before.union_hits + 1);
}

#[test]
fn context_bound_flattenings_are_never_cached() {
    let db = HintInterner::new();
    let a = class(&db, "A");
    let b = class(&db, "B");
    let union = db.union(&[a, b]);
    let members = match db.lookup(union) {
        HintData::Union(members) => members,
        _ => unreachable!(),
    };

    let sanifier = Sanifier::new(&db);
    let record = HintSane::new(union).uncacheable();
    let before = db.cache_stats();
    flatten_union(&sanifier, members, &record).unwrap();
    flatten_union(&sanifier, members, &record).unwrap();
    let after = db.cache_stats();
    assert_eq!(after.union_hits, before.union_hits);
}

// -----------------------------------------------------------------------------
// Code contribution
// -----------------------------------------------------------------------------

/// Records enqueued children and splices a placeholder call per child.
#[derive(Default)]
struct RecordingQueue {
    enqueued: Vec<(HintSane, String)>,
}

impl SanifyQueue for RecordingQueue {
    fn enqueue(&mut self, child: HintSane, subject: &str) -> String {
        let index = self.enqueued.len();
        self.enqueued.push((child, subject.to_string()));
        format!("check_{index}({subject})")
    }
}

fn sanified(db: &HintInterner, hints: &[HintId]) -> Vec<HintSane> {
    let sanifier = Sanifier::new(db);
    hints.iter().map(|&hint| sanifier.reduce(hint, None).unwrap()).collect()
}

#[test]
fn class_membership_test_comes_first_and_binds_the_subject() {
    let db = HintInterner::new();
    let int = class(&db, "int");
    let children = sanified(&db, &[int, HintId::STR, HintId::STR_OBJECT_MAPPING]);

    let mut queue = RecordingQueue::default();
    let code = contribute_union_code(&db, &children, "obj.field", "pith", &mut queue)
        .expect("non-empty children contribute code");

    // Two subject evaluations: the membership test binds, the deep check
    // reuses the binding.
    assert_eq!(
        code.expr,
        "(isinstance((pith := obj.field), (int, str)) or check_0(pith))"
    );
    assert_eq!(code.shallow.len(), 2);
    assert_eq!(code.deep.len(), 1);
    assert_eq!(queue.enqueued.len(), 1);
    assert_eq!(queue.enqueued[0].0.hint, HintId::STR_OBJECT_MAPPING);
    assert_eq!(queue.enqueued[0].1, "pith");
}

#[test]
fn single_test_skips_the_binding() {
    let db = HintInterner::new();
    let int = class(&db, "int");
    let children = sanified(&db, &[int, HintId::STR]);

    let mut queue = RecordingQueue::default();
    let code = contribute_union_code(&db, &children, "value", "pith", &mut queue).unwrap();
    assert_eq!(code.expr, "(isinstance(value, (int, str)))");
    assert!(queue.enqueued.is_empty());
}

#[test]
fn recursive_marker_is_an_unconditional_pass_without_a_binding_slot() {
    let db = HintInterner::new();
    let int = class(&db, "int");
    let children = vec![HintSane::new(int), HintSane::new(HintId::RECURSIVE)];

    let mut queue = RecordingQueue::default();
    let code = contribute_union_code(&db, &children, "value", "pith", &mut queue).unwrap();
    // The marker never touches the subject, so no binding is introduced.
    assert_eq!(code.expr, "(isinstance(value, int) or True)");
    assert_eq!(code.shallow.len(), 2);
    assert!(code.deep.is_empty());
}

#[test]
fn empty_children_contribute_nothing() {
    let db = HintInterner::new();
    let mut queue = RecordingQueue::default();
    assert!(contribute_union_code(&db, &[], "value", "pith", &mut queue).is_none());
}

#[test]
fn deep_only_children_still_share_one_binding() {
    let db = HintInterner::new();
    let map_a = db.subscript(ClassId::MAPPING, &[HintId::STR, HintId::STR]);
    let map_b = HintId::STR_OBJECT_MAPPING;
    let children = sanified(&db, &[map_a, map_b]);

    let mut queue = RecordingQueue::default();
    let code = contribute_union_code(&db, &children, "value", "pith", &mut queue).unwrap();
    assert_eq!(code.expr, "(check_0((pith := value)) or check_1(pith))");
}
