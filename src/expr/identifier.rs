//! Column identifiers and JSON document paths.

use crate::protocol::wire::{ColumnIdentifier, DocumentPathItem, DocumentPathItemType};

use super::literal::{is_plain_identifier, quote_identifier, quote_string};
use super::{ExprError, ExprResult};

/// Column holding the JSON document of a collection.
pub const DOC_COLUMN: &str = "doc";

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

pub(super) fn write_column_identifier(
    id: &ColumnIdentifier,
    is_relation: bool,
    out: &mut String,
) -> ExprResult<()> {
    let name = non_empty(id.name.as_ref());
    let table = non_empty(id.table_name.as_ref());
    let schema = non_empty(id.schema_name.as_ref());

    if schema.is_some() && table.is_none() {
        return Err(ExprError::missing(
            "Table name is required if schema name is specified in ColumnIdentifier",
        ));
    }
    if table.is_some() && name.is_none() {
        return Err(ExprError::missing(
            "Column name is required if table name is specified in ColumnIdentifier",
        ));
    }

    if id.document_path.is_empty() {
        return match name {
            Some(name) => {
                write_qualified_column(schema, table, name, out);
                Ok(())
            }
            None if !is_relation => {
                out.push_str(DOC_COLUMN);
                Ok(())
            }
            None => Err(ExprError::missing(
                "Column name is required in ColumnIdentifier for TABLE data model",
            )),
        };
    }

    out.push_str("JSON_EXTRACT(");
    match name {
        Some(name) => write_qualified_column(schema, table, name, out),
        None => out.push_str(DOC_COLUMN),
    }
    out.push(',');
    write_document_path(&id.document_path, out)?;
    out.push(')');
    Ok(())
}

fn write_qualified_column(schema: Option<&str>, table: Option<&str>, name: &str, out: &mut String) {
    if let Some(schema) = schema {
        quote_identifier(schema, out);
        out.push('.');
    }
    if let Some(table) = table {
        quote_identifier(table, out);
        out.push('.');
    }
    quote_identifier(name, out);
}

/// Append a document path as a quoted JSON path literal, e.g. `'$.a[0]'`.
pub fn write_document_path(path: &[DocumentPathItem], out: &mut String) -> ExprResult<()> {
    let mut json_path = String::from("$");
    for item in path {
        let kind = DocumentPathItemType::try_from(item.kind).map_err(|_| {
            ExprError::bad_type(format!("Invalid document path item type {}", item.kind))
        })?;
        match kind {
            DocumentPathItemType::Member => {
                let member = non_empty(item.value.as_ref())
                    .ok_or_else(|| ExprError::missing("Document path member requires a value"))?;
                json_path.push('.');
                write_member(member, &mut json_path);
            }
            DocumentPathItemType::MemberAsterisk => json_path.push_str(".*"),
            DocumentPathItemType::ArrayIndex => {
                let index = item
                    .index
                    .ok_or_else(|| ExprError::missing("Document path array index requires an index"))?;
                json_path.push('[');
                json_path.push_str(&index.to_string());
                json_path.push(']');
            }
            DocumentPathItemType::ArrayIndexAsterisk => json_path.push_str("[*]"),
            DocumentPathItemType::DoubleAsterisk => json_path.push_str("**"),
        }
    }
    quote_string(json_path.as_bytes(), out);
    Ok(())
}

fn write_member(member: &str, out: &mut String) {
    if is_plain_identifier(member) {
        out.push_str(member);
        return;
    }
    out.push('"');
    for c in member.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
}
