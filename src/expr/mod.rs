//! # Expression Compiler
//!
//! Renders `Mysqlx.Expr.Expr` trees into SQL text.
//!
//! ## Pipeline Position
//!
//! ```text
//! TypedRow field (Expr) + bound args -> [ExprGenerator] -> SQL fragment
//! ```
//!
//! The generator appends into a caller-owned buffer so a whole statement is
//! built in one allocation-friendly pass. [`render`] is the convenience form
//! returning an owned fragment.
//!
//! `is_relation` selects the addressing rules: in TABLE mode identifiers name
//! columns, in DOCUMENT mode they address paths inside the `doc` column.

mod error;
mod identifier;
mod literal;
mod operator;

pub use error::{ExprError, ExprResult};
pub use identifier::{write_document_path, DOC_COLUMN};
pub use literal::{is_plain_identifier, quote_identifier, quote_string, write_scalar};

use crate::protocol::wire::{Expr, ExprType, FunctionCall, Scalar};

/// Renders expressions of one request.
#[derive(Debug, Clone, Copy)]
pub struct ExprGenerator<'a> {
    args: &'a [Scalar],
    is_relation: bool,
}

impl<'a> ExprGenerator<'a> {
    pub fn new(args: &'a [Scalar], is_relation: bool) -> Self {
        Self { args, is_relation }
    }

    pub fn is_relation(&self) -> bool {
        self.is_relation
    }

    /// Append the SQL text of `expr` to `out`.
    pub fn generate(&self, expr: &Expr, out: &mut String) -> ExprResult<()> {
        let kind = ExprType::try_from(expr.kind)
            .map_err(|_| ExprError::bad_type(format!("Invalid expression type {}", expr.kind)))?;

        match kind {
            ExprType::Ident => {
                let id = expr
                    .identifier
                    .as_ref()
                    .ok_or_else(|| ExprError::missing("Missing identifier in IDENT expression"))?;
                identifier::write_column_identifier(id, self.is_relation, out)
            }
            ExprType::Literal => {
                let scalar = expr
                    .literal
                    .as_ref()
                    .ok_or_else(|| ExprError::missing("Missing literal in LITERAL expression"))?;
                write_scalar(scalar, out)
            }
            ExprType::Variable => Err(ExprError::Unsupported {
                what: "Mysqlx::Expr::Expr::VARIABLE".to_string(),
            }),
            ExprType::FuncCall => {
                let call = expr.function_call.as_ref().ok_or_else(|| {
                    ExprError::missing("Missing function call in FUNC_CALL expression")
                })?;
                self.write_function_call(call, out)
            }
            ExprType::Operator => {
                let op = expr
                    .operator
                    .as_ref()
                    .ok_or_else(|| ExprError::missing("Missing operator in OPERATOR expression"))?;
                operator::write_operator(self, op, out)
            }
            ExprType::Placeholder => self.write_placeholder(expr.position, out),
            ExprType::Object => {
                let object = expr
                    .object
                    .as_ref()
                    .ok_or_else(|| ExprError::missing("Missing object in OBJECT expression"))?;
                out.push_str("JSON_OBJECT(");
                for_each(&object.fld, ",", out, |_, field, out| {
                    let value = field.value.as_ref().ok_or_else(|| {
                        ExprError::missing(format!("Missing value for object key '{}'", field.key))
                    })?;
                    quote_string(field.key.as_bytes(), out);
                    out.push(',');
                    self.generate(value, out)
                })?;
                out.push(')');
                Ok(())
            }
            ExprType::Array => {
                let array = expr
                    .array
                    .as_ref()
                    .ok_or_else(|| ExprError::missing("Missing array in ARRAY expression"))?;
                out.push_str("JSON_ARRAY(");
                self.generate_list(&array.value, ",", out)?;
                out.push(')');
                Ok(())
            }
        }
    }

    /// Append every expression, separated by `separator`.
    pub fn generate_list(&self, exprs: &[Expr], separator: &str, out: &mut String) -> ExprResult<()> {
        for_each(exprs, separator, out, |_, expr, out| self.generate(expr, out))
    }

    fn write_placeholder(&self, position: Option<u32>, out: &mut String) -> ExprResult<()> {
        let arg = position
            .and_then(|p| self.args.get(p as usize))
            .ok_or_else(|| ExprError::bad_value("Invalid value of placeholder"))?;
        write_scalar(arg, out)
    }

    fn write_function_call(&self, call: &FunctionCall, out: &mut String) -> ExprResult<()> {
        let name = call
            .name
            .as_ref()
            .filter(|n| !n.name.is_empty())
            .ok_or_else(|| ExprError::missing("Missing function name in FUNC_CALL expression"))?;

        match name.schema_name.as_deref().filter(|s| !s.is_empty()) {
            Some(schema) => {
                quote_identifier(schema, out);
                out.push('.');
                quote_identifier(&name.name, out);
            }
            None if is_plain_identifier(&name.name) => out.push_str(&name.name),
            None => quote_identifier(&name.name, out),
        }
        out.push('(');
        self.generate_list(&call.param, ",", out)?;
        out.push(')');
        Ok(())
    }
}

/// Render a single expression into an owned fragment.
pub fn render(expr: &Expr, is_relation: bool, args: &[Scalar]) -> ExprResult<String> {
    let mut out = String::new();
    ExprGenerator::new(args, is_relation).generate(expr, &mut out)?;
    Ok(out)
}

/// Append each item through `f`, writing `separator` between items.
///
/// Stops at the first error; whatever was appended before it is left in
/// `out`, so callers discard the buffer on failure.
pub fn for_each<T, E, F>(items: &[T], separator: &str, out: &mut String, mut f: F) -> Result<(), E>
where
    F: FnMut(usize, &T, &mut String) -> Result<(), E>,
{
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            out.push_str(separator);
        }
        f(index, item, out)?;
    }
    Ok(())
}
