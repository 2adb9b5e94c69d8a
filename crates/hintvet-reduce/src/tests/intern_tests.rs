use crate::intern::HintInterner;
use crate::types::{ClassId, HintData, HintId, HintListId, TypeVarKind, TypeVarListId};

#[test]
fn well_known_ids_survive_seeding() {
    let db = HintInterner::new();

    assert_eq!(db.lookup(HintId::IGNORABLE), HintData::Ignorable);
    assert_eq!(db.lookup(HintId::RECURSIVE), HintData::Recursive);
    assert_eq!(db.lookup(HintId::OBJECT), HintData::Class(ClassId::OBJECT));
    assert_eq!(db.lookup(HintId::BOOL), HintData::Class(ClassId::BOOL));
    assert_eq!(db.lookup(HintId::STR), HintData::Class(ClassId::STR));
    assert_eq!(
        db.lookup(HintId::EMPTY_TUPLE),
        HintData::UnpackedTuple(HintListId::EMPTY)
    );

    let HintData::Subscripted { origin, args } = db.lookup(HintId::STR_OBJECT_MAPPING) else {
        panic!("string-keyed mapping seeded with the wrong shape");
    };
    assert_eq!(origin, ClassId::MAPPING);
    assert_eq!(db.hint_list(args).as_ref(), &[HintId::STR, HintId::OBJECT]);

    assert!(HintId::IGNORABLE.is_marker());
    assert!(HintId::RECURSIVE.is_marker());
    assert!(!HintId::OBJECT.is_marker());
}

#[test]
fn interning_is_idempotent() {
    let db = HintInterner::new();
    let before = db.hint_count();

    let a = db.intern(HintData::Class(ClassId::STR));
    let b = db.class_hint(ClassId::STR);
    assert_eq!(a, HintId::STR);
    assert_eq!(a, b);
    assert_eq!(db.hint_count(), before);

    let list_a = db.intern_hint_list(&[HintId::STR, HintId::BOOL]);
    let list_b = db.intern_hint_list(&[HintId::STR, HintId::BOOL]);
    assert_eq!(list_a, list_b);

    let reversed = db.intern_hint_list(&[HintId::BOOL, HintId::STR]);
    assert_ne!(list_a, reversed);
}

#[test]
fn atoms_round_trip() {
    let db = HintInterner::new();
    let a = db.intern_str("Widget");
    let b = db.intern_str("Widget");
    assert_eq!(a, b);
    assert_eq!(db.resolve_atom(a).as_ref(), "Widget");
}

#[test]
fn subclass_walks_transitive_bases() {
    let db = HintInterner::new();
    let animal = db.register_class("Animal", &[]);
    let mammal = db.register_class("Mammal", &[animal]);
    let cat = db.register_class("Cat", &[mammal]);
    let rock = db.register_class("Rock", &[]);

    assert!(db.is_subclass(cat, cat));
    assert!(db.is_subclass(cat, mammal));
    assert!(db.is_subclass(cat, animal));
    assert!(db.is_subclass(cat, ClassId::OBJECT));
    assert!(!db.is_subclass(animal, cat));
    assert!(!db.is_subclass(rock, animal));
}

#[test]
fn class_attrs_resolve_by_atom() {
    let db = HintInterner::new();
    let widget = db.register_class("Widget", &[]);
    db.set_class_attr(widget, "Part", HintId::STR);

    let part = db.intern_str("Part");
    let missing = db.intern_str("Whole");
    assert_eq!(db.class_attr(widget, part), Some(HintId::STR));
    assert_eq!(db.class_attr(widget, missing), None);
}

#[test]
fn alias_bodies_attach_after_declaration() {
    let db = HintInterner::new();
    let alias = db.declare_alias("X");
    assert_eq!(db.alias_body(alias), None);

    db.set_alias_body(alias, HintId::STR);
    assert_eq!(db.alias_body(alias), Some(HintId::STR));
    assert_eq!(db.resolve_atom(db.alias_name(alias)).as_ref(), "X");
}

#[test]
fn typevar_hint_follows_the_declared_kind() {
    let db = HintInterner::new();
    let t = db.declare_typevar("T", TypeVarKind::Ordinary, None, None);
    let ts = db.declare_typevar("Ts", TypeVarKind::VariadicTuple, None, None);

    assert_eq!(db.lookup(db.typevar_hint(t)), HintData::TypeVar(t));
    assert_eq!(db.lookup(db.typevar_hint(ts)), HintData::TypeVarTuple(ts));
}

#[test]
fn union_constructor_collapses_degenerate_lists() {
    let db = HintInterner::new();
    assert_eq!(db.union(&[]), HintId::IGNORABLE);
    assert_eq!(db.union(&[HintId::STR]), HintId::STR);

    let union = db.union(&[HintId::STR, HintId::BOOL]);
    let HintData::Union(members) = db.lookup(union) else {
        panic!("two members must produce a union");
    };
    assert_eq!(db.hint_list(members).as_ref(), &[HintId::STR, HintId::BOOL]);
}

#[test]
fn seeded_mapping_declares_key_and_value_parameters() {
    let db = HintInterner::new();
    let params = db.class_typevars(ClassId::MAPPING);
    assert_ne!(params, TypeVarListId::EMPTY);
    assert_eq!(db.typevar_list(params).len(), 2);
}
