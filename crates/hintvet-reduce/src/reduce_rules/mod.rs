//! Single-purpose rewrite rules, one narrow reduction apiece.
//!
//! Each rule is registered under its tag in the dispatch tables
//! (`crate::sanify`); the union rule lives with the flattening engine in
//! `crate::unions`.

mod alias;
mod forward_ref;
mod protocol;
mod self_type;
mod subscripted;
mod type_guard;
mod typed_dict;
mod typevar;

pub(crate) use alias::reduce_alias;
pub(crate) use forward_ref::reduce_forward_ref;
pub(crate) use protocol::reduce_protocol;
pub(crate) use self_type::reduce_self_type;
pub(crate) use subscripted::reduce_subscripted;
pub(crate) use type_guard::reduce_type_guard;
pub(crate) use typed_dict::reduce_typed_dict;
pub(crate) use typevar::{reduce_typevar, reduce_typevar_tuple};
