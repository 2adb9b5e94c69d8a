//! Human-readable hint rendering for diagnostics.
//!
//! Rendering is lazy by construction: errors carry interned ids and only
//! this module turns them into text, so nothing is formatted unless a
//! message is actually displayed.

use crate::intern::HintInterner;
use crate::types::{HintData, HintId, HintListId};

/// Render a hint in source-like notation, e.g. `Mapping[str, object]` or
/// `int | str`.
pub fn display_hint(db: &HintInterner, hint: HintId) -> String {
    match db.lookup(hint) {
        HintData::Ignorable => "<ignorable>".to_string(),
        HintData::Recursive => "<recursive>".to_string(),
        HintData::Class(class) => db.resolve_atom(db.class_name(class)).to_string(),
        HintData::Union(members) => join_hints(db, members, " | "),
        HintData::Subscripted { origin, args } => {
            let name = db.resolve_atom(db.class_name(origin));
            format!("{}[{}]", name, join_hints(db, args, ", "))
        }
        HintData::TypeVar(var) => db.resolve_atom(db.typevar_info(var).name).to_string(),
        HintData::TypeVarTuple(var) => {
            format!("*{}", db.resolve_atom(db.typevar_info(var).name))
        }
        HintData::UnpackedTuple(items) => {
            if items == HintListId::EMPTY {
                "*tuple[()]".to_string()
            } else {
                format!("*tuple[{}]", join_hints(db, items, ", "))
            }
        }
        HintData::Alias(alias) => db.resolve_atom(db.alias_name(alias)).to_string(),
        HintData::SelfType => "Self".to_string(),
        HintData::ForwardRef(name) => format!("'{}'", db.resolve_atom(name)),
        HintData::TypeGuard => "TypeGuard".to_string(),
        HintData::TypedDict(class) => db.resolve_atom(db.class_name(class)).to_string(),
        HintData::Protocol { origin, args } => {
            let name = db.resolve_atom(db.class_name(origin));
            if args == HintListId::EMPTY {
                name.to_string()
            } else {
                format!("{}[{}]", name, join_hints(db, args, ", "))
            }
        }
    }
}

fn join_hints(db: &HintInterner, list: HintListId, separator: &str) -> String {
    db.hint_list(list)
        .iter()
        .map(|&member| display_hint(db, member))
        .collect::<Vec<_>>()
        .join(separator)
}
