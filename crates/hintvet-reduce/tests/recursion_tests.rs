//! End-to-end recursion guarding: self-referential aliases unroll exactly
//! one productive level per root-to-node path.

use hintvet_reduce::{HintData, HintId, HintInterner, Sanifier, display_hint};

fn class(db: &HintInterner, name: &str) -> HintId {
    db.class_hint(db.register_class(name, &[]))
}

#[test]
fn self_referential_alias_unrolls_once_then_marks_the_cycle() {
    let db = HintInterner::new();
    let int = class(&db, "int");

    // type X = int | X
    let alias = db.declare_alias("X");
    let alias_hint = db.alias_hint(alias);
    db.set_alias_body(alias, db.union(&[int, alias_hint]));

    let sane = Sanifier::new(&db).reduce(alias_hint, None).unwrap();
    let HintData::Union(members) = db.lookup(sane.hint) else {
        panic!("expected the unrolled body");
    };
    assert_eq!(db.hint_list(members).as_ref(), &[int, HintId::RECURSIVE]);
    assert_eq!(display_hint(&db, sane.hint), "int | <recursive>");
}

#[test]
fn sibling_references_each_get_their_own_unrolling() {
    let db = HintInterner::new();
    let int = class(&db, "int");
    let str_like = class(&db, "text");

    // type X = int | X; the top-level hint references X twice as siblings.
    let alias = db.declare_alias("X");
    let alias_hint = db.alias_hint(alias);
    db.set_alias_body(alias, db.union(&[int, alias_hint]));
    let top = db.union(&[str_like, alias_hint, alias_hint]);

    let sane = Sanifier::new(&db).reduce(top, None).unwrap();
    let HintData::Union(members) = db.lookup(sane.hint) else {
        panic!("expected a flattened union");
    };
    // Both siblings expanded their first level; neither saw the other's
    // guard state.
    assert_eq!(
        db.hint_list(members).as_ref(),
        &[str_like, int, HintId::RECURSIVE, int, HintId::RECURSIVE]
    );
}

#[test]
fn mutually_recursive_aliases_terminate() {
    let db = HintInterner::new();
    let int = class(&db, "int");
    let text = class(&db, "text");

    // type X = int | Y; type Y = text | X
    let x = db.declare_alias("X");
    let y = db.declare_alias("Y");
    let x_hint = db.alias_hint(x);
    let y_hint = db.alias_hint(y);
    db.set_alias_body(x, db.union(&[int, y_hint]));
    db.set_alias_body(y, db.union(&[text, x_hint]));

    let sane = Sanifier::new(&db).reduce(x_hint, None).unwrap();
    let HintData::Union(members) = db.lookup(sane.hint) else {
        panic!("expected a flattened union");
    };
    // X unrolls, Y unrolls inside it, the inner X reference is the cycle.
    assert_eq!(
        db.hint_list(members).as_ref(),
        &[int, text, HintId::RECURSIVE]
    );
}

#[test]
fn alias_without_a_body_is_preserved_for_a_later_pass() {
    let db = HintInterner::new();
    let alias = db.declare_alias("Pending");
    let alias_hint = db.alias_hint(alias);

    let sane = Sanifier::new(&db).reduce(alias_hint, None).unwrap();
    assert_eq!(sane.hint, alias_hint);
}

#[test]
fn non_recursive_alias_chain_reduces_to_its_ground_hint() {
    let db = HintInterner::new();
    let int = class(&db, "int");

    // type Inner = int; type Outer = Inner
    let inner = db.declare_alias("Inner");
    db.set_alias_body(inner, int);
    let outer = db.declare_alias("Outer");
    db.set_alias_body(outer, db.alias_hint(inner));

    let sane = Sanifier::new(&db).reduce(db.alias_hint(outer), None).unwrap();
    assert_eq!(sane.hint, int);
}
