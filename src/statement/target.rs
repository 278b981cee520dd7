//! Target identifier resolution shared by CRUD statements.

use crate::expr::quote_identifier;
use crate::protocol::wire::Collection;

/// Append the quoted table identifier of `collection`:
/// `` `schema`.`name` `` or `` `name` `` when no schema is given.
pub fn write_target(collection: &Collection, out: &mut String) {
    if let Some(schema) = collection.schema.as_deref().filter(|s| !s.is_empty()) {
        quote_identifier(schema, out);
        out.push('.');
    }
    quote_identifier(&collection.name, out);
}

/// Owned form of [`write_target`].
pub fn resolve_target(collection: &Collection) -> String {
    let mut out = String::with_capacity(collection.name.len() + 2);
    write_target(collection, &mut out);
    out
}
