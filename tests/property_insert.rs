//! Property-based Insert compilation tests (proptest).

use proptest::prelude::*;

use xcrud::protocol::builders::{lit_int, lit_str, InsertRequestBuilder};
use xcrud::{InsertStatementBuilder, XCrudError};

fn column_names(width: usize) -> Vec<String> {
    (0..width).map(|i| format!("c{i}")).collect()
}

/// Table request with `rows` rows of `width` integer values each.
fn table_request(columns: &[String], rows: &[Vec<i64>]) -> InsertRequestBuilder {
    let mut request = InsertRequestBuilder::table("t").columns(columns.iter().map(String::as_str));
    for row in rows {
        request = request.row(row.iter().copied().map(lit_int).collect());
    }
    request
}

fn compile(request: InsertRequestBuilder) -> Result<String, XCrudError> {
    InsertStatementBuilder::new().build(&request.encode())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every value appears in row-major order, one tuple per row
    #[test]
    fn prop_values_in_row_major_order(
        width in 1usize..6,
        values in prop::collection::vec(-1000i64..1000, 1..40),
    ) {
        let rows: Vec<Vec<i64>> = values.chunks(width)
            .filter(|chunk| chunk.len() == width)
            .map(<[i64]>::to_vec)
            .collect();
        prop_assume!(!rows.is_empty());

        let columns = column_names(width);
        let sql = compile(table_request(&columns, &rows)).expect("valid request should compile");

        let projection: Vec<String> = columns.iter().map(|c| format!("`{c}`")).collect();
        let tuples: Vec<String> = rows.iter()
            .map(|row| {
                let fields: Vec<String> = row.iter().map(i64::to_string).collect();
                format!("({})", fields.join(","))
            })
            .collect();
        let expected = format!(
            "INSERT INTO `t` ({}) VALUES {}",
            projection.join(","),
            tuples.join(",")
        );
        prop_assert_eq!(sql, expected);
    }

    /// A row of the wrong width is reported with its index
    #[test]
    fn prop_width_mismatch_is_bad_insert_data(
        width in 1usize..5,
        bad_width in 0usize..8,
        good_rows in 0usize..5,
    ) {
        prop_assume!(bad_width != width);
        let mut rows = vec![vec![1i64; width]; good_rows];
        rows.push(vec![2i64; bad_width]);

        let err = compile(table_request(&column_names(width), &rows)).unwrap_err();
        prop_assert_eq!(err, XCrudError::BadInsertData {
            row: good_rows,
            fields: bad_width,
            expected: width,
        });
    }

    /// DOCUMENT requests never accept a projection
    #[test]
    fn prop_document_projection_is_rejected(width in 1usize..5, docs in 1usize..5) {
        let mut request = InsertRequestBuilder::document("coll")
            .columns(column_names(width).iter().map(String::as_str));
        for _ in 0..docs {
            request = request.row(vec![lit_str("{}")]);
        }
        let err = compile(request).unwrap_err();
        let is_bad_projection = matches!(err, XCrudError::BadProjection { .. });
        prop_assert!(is_bad_projection);
    }

    /// Strings never escape their literal, whatever they contain
    #[test]
    fn prop_string_values_stay_quoted(value in any::<String>()) {
        let sql = compile(InsertRequestBuilder::table("t").column("a").row(vec![lit_str(&value)]))
            .expect("string literal should compile");
        let literal = sql.strip_prefix("INSERT INTO `t` (`a`) VALUES (").and_then(|s| s.strip_suffix(')'));
        prop_assert!(literal.is_some());
        let literal = literal.unwrap_or_default();
        prop_assert!(literal.starts_with('\'') && literal.ends_with('\''));

        // Every quote inside the literal is escaped
        let inner = &literal[1..literal.len() - 1];
        let mut escaped = false;
        for c in inner.chars() {
            if escaped {
                escaped = false;
                continue;
            }
            match c {
                '\\' => escaped = true,
                '\'' => prop_assert!(false, "unescaped quote in {}", literal),
                _ => {}
            }
        }
        prop_assert!(!escaped);
    }

    /// Compiling the same payload twice yields identical SQL
    #[test]
    fn prop_compilation_is_deterministic(
        values in prop::collection::vec(any::<i64>(), 1..20),
    ) {
        let rows: Vec<Vec<i64>> = values.iter().map(|v| vec![*v]).collect();
        let payload = table_request(&column_names(1), &rows).encode();
        let builder = InsertStatementBuilder::new();
        prop_assert_eq!(builder.build(&payload), builder.build(&payload));
    }
}
