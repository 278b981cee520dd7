//! Literal rendering and SQL quoting.
//!
//! Everything that ends up between quotes in the generated statement goes
//! through [`quote_string`] or [`quote_identifier`].

use crate::protocol::wire::{ContentType, Scalar, ScalarType};

use super::{ExprError, ExprResult};

/// Append a scalar as an SQL literal.
pub fn write_scalar(scalar: &Scalar, out: &mut String) -> ExprResult<()> {
    let kind = ScalarType::try_from(scalar.kind)
        .map_err(|_| ExprError::bad_type(format!("Invalid scalar type {}", scalar.kind)))?;

    match kind {
        ScalarType::Sint => {
            let v = scalar.v_signed_int.ok_or_else(|| missing_value("V_SINT"))?;
            out.push_str(&v.to_string());
        }
        ScalarType::Uint => {
            let v = scalar
                .v_unsigned_int
                .ok_or_else(|| missing_value("V_UINT"))?;
            out.push_str(&v.to_string());
        }
        ScalarType::Null => out.push_str("NULL"),
        ScalarType::Double => {
            let v = scalar.v_double.ok_or_else(|| missing_value("V_DOUBLE"))?;
            write_float(v, out)?;
        }
        ScalarType::Float => {
            let v = scalar.v_float.ok_or_else(|| missing_value("V_FLOAT"))?;
            write_float(v, out)?;
        }
        ScalarType::Bool => {
            let v = scalar.v_bool.ok_or_else(|| missing_value("V_BOOL"))?;
            out.push_str(if v { "TRUE" } else { "FALSE" });
        }
        ScalarType::String => {
            let s = scalar
                .v_string
                .as_ref()
                .ok_or_else(|| missing_value("V_STRING"))?;
            quote_string(&s.value, out);
        }
        ScalarType::Octets => {
            let octets = scalar
                .v_octets
                .as_ref()
                .ok_or_else(|| missing_value("V_OCTETS"))?;
            let raw = octets.content_type.unwrap_or(0);
            let content_type = ContentType::from_wire(raw).ok_or_else(|| {
                ExprError::bad_type(format!("Invalid content type {raw} for octets scalar"))
            })?;
            match content_type {
                ContentType::Plain | ContentType::Xml => quote_string(&octets.value, out),
                ContentType::Geometry => {
                    out.push_str("ST_GEOMETRYFROMWKB(");
                    quote_string(&octets.value, out);
                    out.push(')');
                }
                ContentType::Json => {
                    out.push_str("CAST(");
                    quote_string(&octets.value, out);
                    out.push_str(" AS JSON)");
                }
            }
        }
    }
    Ok(())
}

fn missing_value(kind: &str) -> ExprError {
    ExprError::bad_type(format!("Missing value for scalar of type {kind}"))
}

fn write_float<F>(v: F, out: &mut String) -> ExprResult<()>
where
    F: Copy + Into<f64> + std::fmt::Display,
{
    if !v.into().is_finite() {
        return Err(ExprError::bad_value(format!(
            "Floating point value {v} has no SQL representation"
        )));
    }
    out.push_str(&v.to_string());
    Ok(())
}

/// Append `bytes` as a single-quoted string literal.
///
/// Bytes that are not UTF-8 are written as a hex literal (`x'..'`) so the
/// statement stays valid text.
pub fn quote_string(bytes: &[u8], out: &mut String) {
    let Ok(s) = std::str::from_utf8(bytes) else {
        out.push_str("x'");
        for b in bytes {
            out.push_str(&format!("{b:02x}"));
        }
        out.push('\'');
        return;
    };

    out.reserve(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\0' => out.push_str("\\0"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\x1a' => out.push_str("\\Z"),
            c => out.push(c),
        }
    }
    out.push('\'');
}

/// Append a backtick-quoted identifier. Embedded backticks are doubled.
pub fn quote_identifier(name: &str, out: &mut String) {
    out.reserve(name.len() + 2);
    out.push('`');
    for c in name.chars() {
        if c == '`' {
            out.push('`');
        }
        out.push(c);
    }
    out.push('`');
}

/// True for names usable without quoting: `[A-Za-z_$][A-Za-z0-9_$]*`.
pub fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
