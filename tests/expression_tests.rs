//! Expression rendering through the public generator API.

use xcrud::expr::{render, ExprError};
use xcrud::protocol::builders::{
    array, col, func, ident_path, lit, lit_int, lit_null, lit_str, octets, op, placeholder, sint,
    string,
};
use xcrud::protocol::ContentType;
use xcrud::protocol::Expr;

fn table(expr: &Expr) -> Result<String, ExprError> {
    render(expr, true, &[])
}

fn doc(expr: &Expr) -> Result<String, ExprError> {
    render(expr, false, &[])
}

// Operators
#[test]
fn test_comparison_operators() {
    let cases = [
        ("==", "(`a` = 1)"),
        ("!=", "(`a` != 1)"),
        (">", "(`a` > 1)"),
        (">=", "(`a` >= 1)"),
        ("<", "(`a` < 1)"),
        ("<=", "(`a` <= 1)"),
    ];
    for (name, expected) in cases {
        let expr = op(name, vec![col("a"), lit_int(1)]);
        assert_eq!(table(&expr).unwrap(), expected, "operator {name}");
    }
}

#[test]
fn test_logical_and_arithmetic_operators() {
    assert_eq!(
        table(&op("||", vec![lit_int(1), lit_int(0)])).unwrap(),
        "(1 OR 0)"
    );
    assert_eq!(
        table(&op("xor", vec![lit_int(1), lit_int(0)])).unwrap(),
        "(1 XOR 0)"
    );
    assert_eq!(
        table(&op("div", vec![lit_int(7), lit_int(2)])).unwrap(),
        "(7 DIV 2)"
    );
    assert_eq!(
        table(&op("%", vec![lit_int(7), lit_int(2)])).unwrap(),
        "(7 % 2)"
    );
    assert_eq!(
        table(&op("<<", vec![lit_int(1), lit_int(3)])).unwrap(),
        "(1 << 3)"
    );
}

#[test]
fn test_is_and_is_not() {
    assert_eq!(
        table(&op("is", vec![col("a"), lit_null()])).unwrap(),
        "(`a` IS NULL)"
    );
    assert_eq!(
        table(&op("is_not", vec![col("a"), lit_null()])).unwrap(),
        "(`a` IS NOT NULL)"
    );
}

#[test]
fn test_unary_operators() {
    assert_eq!(table(&op("not", vec![col("a")])).unwrap(), "(NOT `a`)");
    assert_eq!(table(&op("!", vec![col("a")])).unwrap(), "(!`a`)");
    assert_eq!(table(&op("~", vec![lit_int(5)])).unwrap(), "(~5)");
    assert_eq!(table(&op("sign_minus", vec![lit_int(5)])).unwrap(), "(-5)");
    assert_eq!(table(&op("sign_plus", vec![lit_int(5)])).unwrap(), "(+5)");
}

#[test]
fn test_like_with_and_without_escape() {
    assert_eq!(
        table(&op("like", vec![col("a"), lit_str("x%")])).unwrap(),
        "(`a` LIKE 'x%')"
    );
    assert_eq!(
        table(&op("not_like", vec![col("a"), lit_str("x!%"), lit_str("!")])).unwrap(),
        "(`a` NOT LIKE 'x!%' ESCAPE '!')"
    );
}

#[test]
fn test_in_and_between() {
    assert_eq!(
        table(&op("in", vec![col("a"), lit_int(1), lit_int(2), lit_int(3)])).unwrap(),
        "(`a` IN (1,2,3))"
    );
    assert_eq!(
        table(&op("not_in", vec![col("a"), lit_int(1)])).unwrap(),
        "(`a` NOT IN (1))"
    );
    assert_eq!(
        table(&op("between", vec![col("a"), lit_int(1), lit_int(9)])).unwrap(),
        "(`a` BETWEEN 1 AND 9)"
    );
    assert_eq!(
        table(&op("not_between", vec![col("a"), lit_int(1), lit_int(9)])).unwrap(),
        "(`a` NOT BETWEEN 1 AND 9)"
    );
}

#[test]
fn test_cast() {
    let target = |t: &str| lit(octets(t.as_bytes(), ContentType::Plain));
    assert_eq!(
        table(&op("cast", vec![col("a"), target("signed")])).unwrap(),
        "CAST(`a` AS SIGNED)"
    );
    assert_eq!(
        table(&op("cast", vec![lit_str("1.5"), target("DECIMAL(10,2)")])).unwrap(),
        "CAST('1.5' AS DECIMAL(10,2))"
    );
    assert_eq!(
        table(&op("cast", vec![col("a"), target("TEXT; DROP")])).unwrap_err(),
        ExprError::BadValue {
            message: "CAST type invalid".to_string()
        }
    );
}

#[test]
fn test_date_add_and_sub() {
    assert_eq!(
        table(&op(
            "date_add",
            vec![lit_str("2024-01-31"), lit_int(1), lit_str("month")]
        ))
        .unwrap(),
        "DATE_ADD('2024-01-31', INTERVAL 1 MONTH)"
    );
    assert_eq!(
        table(&op("date_sub", vec![col("d"), lit_int(2), lit_str("DAY")])).unwrap(),
        "DATE_SUB(`d`, INTERVAL 2 DAY)"
    );
    assert!(matches!(
        table(&op("date_add", vec![col("d"), lit_int(2), lit_str("FORTNIGHT")])),
        Err(ExprError::BadValue { .. })
    ));
}

#[test]
fn test_nullary_star_and_default() {
    assert_eq!(table(&op("*", vec![])).unwrap(), "*");
    assert_eq!(table(&op("default", vec![])).unwrap(), "DEFAULT");
}

// Function calls, arrays, paths
#[test]
fn test_function_call_with_nested_args() {
    let expr = func("concat", vec![col("a"), func("upper", vec![lit_str("x")])]);
    assert_eq!(table(&expr).unwrap(), "concat(`a`,upper('x'))");
}

#[test]
fn test_array_of_placeholders() {
    let expr = array(vec![placeholder(0), placeholder(1)]);
    let args = [sint(1), string("two")];
    assert_eq!(render(&expr, false, &args).unwrap(), "JSON_ARRAY(1,'two')");
}

#[test]
fn test_document_path_comparison() {
    let expr = op("==", vec![ident_path(&["name"]), lit_str("ann")]);
    assert_eq!(
        doc(&expr).unwrap(),
        "(JSON_EXTRACT(doc,'$.name') = 'ann')"
    );
}

#[test]
fn test_json_and_geometry_octets() {
    assert_eq!(
        table(&lit(octets(b"[1]", ContentType::Json))).unwrap(),
        "CAST('[1]' AS JSON)"
    );
    assert_eq!(
        table(&lit(octets(b"wkb", ContentType::Geometry))).unwrap(),
        "ST_GEOMETRYFROMWKB('wkb')"
    );
    assert_eq!(
        table(&lit(octets(b"<a/>", ContentType::Xml))).unwrap(),
        "'<a/>'"
    );
}

// Errors
#[test]
fn test_unknown_operator() {
    let err = table(&op("frobnicate", vec![lit_int(1)])).unwrap_err();
    assert_eq!(
        err,
        ExprError::BadOperator {
            name: "frobnicate".to_string()
        }
    );
    assert_eq!(err.code(), 5150);
}

#[test]
fn test_wrong_arity() {
    let err = table(&op("==", vec![lit_int(1)])).unwrap_err();
    assert_eq!(
        err,
        ExprError::BadNumArgs {
            name: "==".to_string(),
            expected: "2".to_string(),
            got: 1,
        }
    );
    assert_eq!(err.code(), 5151);

    let err = table(&op("in", vec![col("a")])).unwrap_err();
    assert!(matches!(err, ExprError::BadNumArgs { got: 1, .. }));

    let err = table(&op("default", vec![lit_int(1)])).unwrap_err();
    assert!(matches!(err, ExprError::BadNumArgs { got: 1, .. }));
}

#[test]
fn test_error_inside_nested_operand_propagates() {
    let expr = op("+", vec![lit_int(1), op("nope", vec![])]);
    assert!(matches!(table(&expr), Err(ExprError::BadOperator { .. })));
}

#[test]
fn test_placeholder_error_code() {
    let err = render(&placeholder(0), true, &[]).unwrap_err();
    assert_eq!(err.code(), 5154);
}
