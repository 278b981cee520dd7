//! `Crud.Insert` -> `INSERT INTO ... VALUES ...`

use prost::Message;

use crate::expr::{self, ExprGenerator, DOC_COLUMN};
use crate::protocol::error::{XCrudError, XCrudResult};
use crate::protocol::wire::{decode_insert, Column, DataModel, Insert, Scalar, TypedRow};

use super::target::write_target;

/// Compiles Insert requests into SQL. Stateless; one value can serve any
/// number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertStatementBuilder;

impl InsertStatementBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Decode `payload` and compile it.
    pub fn build(&self, payload: &[u8]) -> XCrudResult<String> {
        let msg = decode_insert(payload)?;
        self.build_request(&msg)
    }

    /// Compile an already decoded request.
    ///
    /// On error nothing is returned; the partially written buffer is dropped.
    pub fn build_request(&self, msg: &Insert) -> XCrudResult<String> {
        let collection = msg.target()?;
        let is_relation = msg.model()? == DataModel::Table;
        let width = projection_width(&msg.projection, is_relation);

        // Sized from the encoded request so the reservation never outgrows the input
        let mut sql = String::with_capacity(64 + msg.encoded_len());
        sql.push_str("INSERT INTO ");
        write_target(collection, &mut sql);
        write_projection(&msg.projection, is_relation, &mut sql)?;
        write_values(&msg.row, width, is_relation, &msg.args, &mut sql)?;
        Ok(sql)
    }
}

/// Number of values each row must carry.
///
/// An empty TABLE projection omits the column list but still counts as one
/// column, so such requests accept single-value rows only.
pub fn projection_width(projection: &[Column], is_relation: bool) -> usize {
    if is_relation {
        projection.len().max(1)
    } else {
        1
    }
}

fn write_projection(projection: &[Column], is_relation: bool, out: &mut String) -> XCrudResult<()> {
    if !is_relation {
        if !projection.is_empty() {
            return Err(XCrudError::bad_projection(
                "Invalid projection for document operation",
            ));
        }
        out.push_str(" (");
        out.push_str(DOC_COLUMN);
        out.push(')');
        return Ok(());
    }

    if projection.is_empty() {
        return Ok(());
    }

    out.push_str(" (");
    expr::for_each(projection, ",", out, |index, column, out| {
        let name = column
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| {
                XCrudError::bad_projection(format!("Missing column name in projection at {index}"))
            })?;
        expr::quote_identifier(name, out);
        Ok::<(), XCrudError>(())
    })?;
    out.push(')');
    Ok(())
}

fn write_values(
    rows: &[TypedRow],
    width: usize,
    is_relation: bool,
    args: &[Scalar],
    out: &mut String,
) -> XCrudResult<()> {
    if rows.is_empty() {
        return Err(XCrudError::bad_projection("Missing row data for Insert"));
    }

    out.push_str(" VALUES ");
    let generator = ExprGenerator::new(args, is_relation);
    expr::for_each(rows, ",", out, |index, row, out| {
        write_row(index, row, width, &generator, out)
    })
}

fn write_row(
    index: usize,
    row: &TypedRow,
    width: usize,
    generator: &ExprGenerator<'_>,
    out: &mut String,
) -> XCrudResult<()> {
    let fields = &row.field;
    if fields.is_empty() || fields.len() != width {
        return Err(XCrudError::BadInsertData {
            row: index,
            fields: fields.len(),
            expected: width,
        });
    }

    out.push('(');
    expr::for_each(fields, ",", out, |field, value, out| {
        generator
            .generate(value, out)
            .map_err(|source| XCrudError::Expression {
                row: index,
                field,
                source,
            })
    })?;
    out.push(')');
    Ok(())
}
