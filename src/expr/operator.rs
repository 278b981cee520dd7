//! Operator rendering.
//!
//! Binary operators are always parenthesized so operand precedence from the
//! expression tree survives in the SQL text.

use crate::protocol::wire::{Expr, ExprType, Operator, ScalarType};

use super::{ExprError, ExprGenerator, ExprResult};

const CAST_TYPES: &[&str] = &[
    "BINARY", "CHAR", "DATE", "DATETIME", "DECIMAL", "JSON", "SIGNED", "TIME", "UNSIGNED",
];

const INTERVAL_UNITS: &[&str] = &[
    "MICROSECOND",
    "SECOND",
    "MINUTE",
    "HOUR",
    "DAY",
    "WEEK",
    "MONTH",
    "QUARTER",
    "YEAR",
    "SECOND_MICROSECOND",
    "MINUTE_MICROSECOND",
    "MINUTE_SECOND",
    "HOUR_MICROSECOND",
    "HOUR_SECOND",
    "HOUR_MINUTE",
    "DAY_MICROSECOND",
    "DAY_SECOND",
    "DAY_MINUTE",
    "DAY_HOUR",
    "YEAR_MONTH",
];

pub(super) fn write_operator(
    gen: &ExprGenerator<'_>,
    op: &Operator,
    out: &mut String,
) -> ExprResult<()> {
    let name = op.name.as_str();
    let params = op.param.as_slice();
    match name {
        "==" => binary(gen, name, " = ", params, out),
        "!=" => binary(gen, name, " != ", params, out),
        ">" => binary(gen, name, " > ", params, out),
        ">=" => binary(gen, name, " >= ", params, out),
        "<" => binary(gen, name, " < ", params, out),
        "<=" => binary(gen, name, " <= ", params, out),
        "&" => binary(gen, name, " & ", params, out),
        "|" => binary(gen, name, " | ", params, out),
        "^" => binary(gen, name, " ^ ", params, out),
        "<<" => binary(gen, name, " << ", params, out),
        ">>" => binary(gen, name, " >> ", params, out),
        "+" => binary(gen, name, " + ", params, out),
        "-" => binary(gen, name, " - ", params, out),
        "*" if params.is_empty() => {
            out.push('*');
            Ok(())
        }
        "*" => binary(gen, name, " * ", params, out),
        "/" => binary(gen, name, " / ", params, out),
        "div" => binary(gen, name, " DIV ", params, out),
        "%" => binary(gen, name, " % ", params, out),
        "&&" => binary(gen, name, " AND ", params, out),
        "||" => binary(gen, name, " OR ", params, out),
        "xor" => binary(gen, name, " XOR ", params, out),
        "is" => binary(gen, name, " IS ", params, out),
        "is_not" => binary(gen, name, " IS NOT ", params, out),
        "regexp" => binary(gen, name, " REGEXP ", params, out),
        "not_regexp" => binary(gen, name, " NOT REGEXP ", params, out),
        "like" => like(gen, name, " LIKE ", params, out),
        "not_like" => like(gen, name, " NOT LIKE ", params, out),
        "in" => in_list(gen, name, " IN ", params, out),
        "not_in" => in_list(gen, name, " NOT IN ", params, out),
        "between" => between(gen, name, " BETWEEN ", params, out),
        "not_between" => between(gen, name, " NOT BETWEEN ", params, out),
        "not" => unary(gen, name, "NOT ", params, out),
        "!" => unary(gen, name, "!", params, out),
        "~" => unary(gen, name, "~", params, out),
        "sign_plus" => unary(gen, name, "+", params, out),
        "sign_minus" => unary(gen, name, "-", params, out),
        "cast" => cast(gen, name, params, out),
        "date_add" => date_interval(gen, name, "DATE_ADD(", params, out),
        "date_sub" => date_interval(gen, name, "DATE_SUB(", params, out),
        "default" => {
            expect_args(name, params, 0)?;
            out.push_str("DEFAULT");
            Ok(())
        }
        _ => Err(ExprError::BadOperator {
            name: name.to_string(),
        }),
    }
}

fn expect_args(name: &str, params: &[Expr], expected: usize) -> ExprResult<()> {
    if params.len() == expected {
        return Ok(());
    }
    Err(bad_num_args(name, expected.to_string(), params.len()))
}

fn bad_num_args(name: &str, expected: String, got: usize) -> ExprError {
    ExprError::BadNumArgs {
        name: name.to_string(),
        expected,
        got,
    }
}

fn binary(
    gen: &ExprGenerator<'_>,
    name: &str,
    sql_op: &str,
    params: &[Expr],
    out: &mut String,
) -> ExprResult<()> {
    expect_args(name, params, 2)?;
    out.push('(');
    gen.generate(&params[0], out)?;
    out.push_str(sql_op);
    gen.generate(&params[1], out)?;
    out.push(')');
    Ok(())
}

fn unary(
    gen: &ExprGenerator<'_>,
    name: &str,
    sql_op: &str,
    params: &[Expr],
    out: &mut String,
) -> ExprResult<()> {
    expect_args(name, params, 1)?;
    out.push('(');
    out.push_str(sql_op);
    gen.generate(&params[0], out)?;
    out.push(')');
    Ok(())
}

fn like(
    gen: &ExprGenerator<'_>,
    name: &str,
    sql_op: &str,
    params: &[Expr],
    out: &mut String,
) -> ExprResult<()> {
    if params.len() != 2 && params.len() != 3 {
        return Err(bad_num_args(name, "2 or 3".to_string(), params.len()));
    }
    out.push('(');
    gen.generate(&params[0], out)?;
    out.push_str(sql_op);
    gen.generate(&params[1], out)?;
    if let Some(escape) = params.get(2) {
        out.push_str(" ESCAPE ");
        gen.generate(escape, out)?;
    }
    out.push(')');
    Ok(())
}

fn in_list(
    gen: &ExprGenerator<'_>,
    name: &str,
    sql_op: &str,
    params: &[Expr],
    out: &mut String,
) -> ExprResult<()> {
    if params.len() < 2 {
        return Err(bad_num_args(name, "at least 2".to_string(), params.len()));
    }
    out.push('(');
    gen.generate(&params[0], out)?;
    out.push_str(sql_op);
    out.push('(');
    gen.generate_list(&params[1..], ",", out)?;
    out.push_str("))");
    Ok(())
}

fn between(
    gen: &ExprGenerator<'_>,
    name: &str,
    sql_op: &str,
    params: &[Expr],
    out: &mut String,
) -> ExprResult<()> {
    expect_args(name, params, 3)?;
    out.push('(');
    gen.generate(&params[0], out)?;
    out.push_str(sql_op);
    gen.generate(&params[1], out)?;
    out.push_str(" AND ");
    gen.generate(&params[2], out)?;
    out.push(')');
    Ok(())
}

fn cast(gen: &ExprGenerator<'_>, name: &str, params: &[Expr], out: &mut String) -> ExprResult<()> {
    expect_args(name, params, 2)?;
    let target = literal_text(&params[1])
        .map(str::trim)
        .filter(|t| is_valid_cast_type(t))
        .ok_or_else(|| ExprError::bad_value("CAST type invalid"))?;
    out.push_str("CAST(");
    gen.generate(&params[0], out)?;
    out.push_str(" AS ");
    out.push_str(&target.to_ascii_uppercase());
    out.push(')');
    Ok(())
}

fn date_interval(
    gen: &ExprGenerator<'_>,
    name: &str,
    prefix: &str,
    params: &[Expr],
    out: &mut String,
) -> ExprResult<()> {
    expect_args(name, params, 3)?;
    let unit = literal_text(&params[2])
        .map(str::to_ascii_uppercase)
        .filter(|u| INTERVAL_UNITS.contains(&u.as_str()))
        .ok_or_else(|| ExprError::bad_value("DATE interval unit invalid"))?;
    out.push_str(prefix);
    gen.generate(&params[0], out)?;
    out.push_str(", INTERVAL ");
    gen.generate(&params[1], out)?;
    out.push(' ');
    out.push_str(&unit);
    out.push(')');
    Ok(())
}

/// Text of an octets or string literal, used where the protocol passes a
/// keyword (cast target, interval unit) as a value.
fn literal_text(expr: &Expr) -> Option<&str> {
    if expr.kind != ExprType::Literal as i32 {
        return None;
    }
    let scalar = expr.literal.as_ref()?;
    let bytes = match ScalarType::try_from(scalar.kind).ok()? {
        ScalarType::Octets => &scalar.v_octets.as_ref()?.value,
        ScalarType::String => &scalar.v_string.as_ref()?.value,
        _ => return None,
    };
    std::str::from_utf8(bytes).ok()
}

/// Accepts `TYPE`, `TYPE(n)`, `TYPE(m,n)` and `SIGNED INTEGER`-style names.
fn is_valid_cast_type(target: &str) -> bool {
    let upper = target.trim().to_ascii_uppercase();
    let keyword_end = upper
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(upper.len());
    let (keyword, rest) = upper.split_at(keyword_end);
    if !CAST_TYPES.contains(&keyword) {
        return false;
    }
    let rest = rest.trim();
    if rest.is_empty() {
        return true;
    }
    if rest == "INTEGER" {
        return matches!(keyword, "SIGNED" | "UNSIGNED");
    }
    let Some(inner) = rest.strip_prefix('(').and_then(|r| r.strip_suffix(')')) else {
        return false;
    };
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    parts.len() <= 2
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}
