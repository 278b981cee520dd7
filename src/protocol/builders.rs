//! Builder Patterns for Request Construction
//!
//! Shorthand constructors for scalars and expressions, plus a fluent
//! [`InsertRequestBuilder`]. Mostly used by tests, benchmarks and tools that
//! need to produce `Insert` payloads without a full X protocol client.
//!
//! ## Example
//!
//! ```rust
//! use xcrud::protocol::builders::{lit_int, lit_str, InsertRequestBuilder};
//!
//! // INSERT INTO `shop`.`item` (`id`,`name`) VALUES (1,'pen')
//! let request = InsertRequestBuilder::table("item")
//!     .schema("shop")
//!     .columns(["id", "name"])
//!     .row(vec![lit_int(1), lit_str("pen")])
//!     .build();
//!
//! let payload = InsertRequestBuilder::document("notes")
//!     .row(vec![lit_str(r#"{"x":1}"#)])
//!     .encode();
//! assert!(!payload.is_empty());
//! # let _ = request;
//! ```

use prost::Message;

use super::wire::{
    Collection, Column, ColumnIdentifier, ContentType, DataModel, DocumentPathItem,
    DocumentPathItemType, Expr, ExprArray, ExprObject, ExprType, FunctionCall, Identifier, Insert,
    ObjectField, Operator, Scalar, ScalarOctets, ScalarString, ScalarType, TypedRow,
};

// Scalars

pub fn sint(v: i64) -> Scalar {
    Scalar {
        kind: ScalarType::Sint as i32,
        v_signed_int: Some(v),
        ..Default::default()
    }
}

pub fn uint(v: u64) -> Scalar {
    Scalar {
        kind: ScalarType::Uint as i32,
        v_unsigned_int: Some(v),
        ..Default::default()
    }
}

pub fn null() -> Scalar {
    Scalar {
        kind: ScalarType::Null as i32,
        ..Default::default()
    }
}

pub fn double(v: f64) -> Scalar {
    Scalar {
        kind: ScalarType::Double as i32,
        v_double: Some(v),
        ..Default::default()
    }
}

pub fn boolean(v: bool) -> Scalar {
    Scalar {
        kind: ScalarType::Bool as i32,
        v_bool: Some(v),
        ..Default::default()
    }
}

pub fn string(v: &str) -> Scalar {
    Scalar {
        kind: ScalarType::String as i32,
        v_string: Some(ScalarString {
            value: v.as_bytes().to_vec(),
            collation: None,
        }),
        ..Default::default()
    }
}

pub fn octets(value: &[u8], content_type: ContentType) -> Scalar {
    Scalar {
        kind: ScalarType::Octets as i32,
        v_octets: Some(ScalarOctets {
            value: value.to_vec(),
            content_type: Some(content_type.to_wire()),
        }),
        ..Default::default()
    }
}

// Expressions

pub fn lit(scalar: Scalar) -> Expr {
    Expr {
        kind: ExprType::Literal as i32,
        literal: Some(scalar),
        ..Default::default()
    }
}

pub fn lit_int(v: i64) -> Expr {
    lit(sint(v))
}

pub fn lit_str(v: &str) -> Expr {
    lit(string(v))
}

pub fn lit_null() -> Expr {
    lit(null())
}

pub fn placeholder(position: u32) -> Expr {
    Expr {
        kind: ExprType::Placeholder as i32,
        position: Some(position),
        ..Default::default()
    }
}

fn ident(id: ColumnIdentifier) -> Expr {
    Expr {
        kind: ExprType::Ident as i32,
        identifier: Some(id),
        ..Default::default()
    }
}

/// Column reference by bare name.
pub fn col(name: &str) -> Expr {
    ident(ColumnIdentifier {
        name: Some(name.to_string()),
        ..Default::default()
    })
}

/// Document path over the `doc` column, one member per element.
pub fn ident_path(members: &[&str]) -> Expr {
    ident(ColumnIdentifier {
        document_path: members.iter().map(|m| member(m)).collect(),
        ..Default::default()
    })
}

pub fn member(name: &str) -> DocumentPathItem {
    DocumentPathItem {
        kind: DocumentPathItemType::Member as i32,
        value: Some(name.to_string()),
        index: None,
    }
}

pub fn op(name: &str, param: Vec<Expr>) -> Expr {
    Expr {
        kind: ExprType::Operator as i32,
        operator: Some(Operator {
            name: name.to_string(),
            param,
        }),
        ..Default::default()
    }
}

pub fn func(name: &str, param: Vec<Expr>) -> Expr {
    Expr {
        kind: ExprType::FuncCall as i32,
        function_call: Some(FunctionCall {
            name: Some(Identifier {
                name: name.to_string(),
                schema_name: None,
            }),
            param,
        }),
        ..Default::default()
    }
}

pub fn object<'a>(fields: impl IntoIterator<Item = (&'a str, Expr)>) -> Expr {
    Expr {
        kind: ExprType::Object as i32,
        object: Some(ExprObject {
            fld: fields
                .into_iter()
                .map(|(key, value)| ObjectField {
                    key: key.to_string(),
                    value: Some(value),
                })
                .collect(),
        }),
        ..Default::default()
    }
}

pub fn array(values: Vec<Expr>) -> Expr {
    Expr {
        kind: ExprType::Array as i32,
        array: Some(ExprArray { value: values }),
        ..Default::default()
    }
}

// InsertRequestBuilder
/// Fluent builder for [`Insert`] requests.
#[derive(Clone)]
pub struct InsertRequestBuilder {
    msg: Insert,
}

impl InsertRequestBuilder {
    fn new(name: &str, model: DataModel) -> Self {
        Self {
            msg: Insert {
                collection: Some(Collection {
                    name: name.to_string(),
                    schema: None,
                }),
                data_model: Some(model as i32),
                ..Default::default()
            },
        }
    }

    /// Insert into a relational table.
    pub fn table(name: &str) -> Self {
        Self::new(name, DataModel::Table)
    }

    /// Insert into a document collection.
    pub fn document(name: &str) -> Self {
        Self::new(name, DataModel::Document)
    }

    pub fn schema(mut self, schema: &str) -> Self {
        if let Some(collection) = self.msg.collection.as_mut() {
            collection.schema = Some(schema.to_string());
        }
        self
    }

    pub fn column(mut self, name: &str) -> Self {
        self.msg.projection.push(Column {
            name: Some(name.to_string()),
            ..Default::default()
        });
        self
    }

    pub fn columns<'a>(self, names: impl IntoIterator<Item = &'a str>) -> Self {
        names.into_iter().fold(self, Self::column)
    }

    pub fn row(mut self, fields: Vec<Expr>) -> Self {
        self.msg.row.push(TypedRow { field: fields });
        self
    }

    pub fn arg(mut self, scalar: Scalar) -> Self {
        self.msg.args.push(scalar);
        self
    }

    pub fn build(self) -> Insert {
        self.msg
    }

    /// Protobuf encoding of the request.
    pub fn encode(self) -> Vec<u8> {
        self.msg.encode_to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_builder() {
        let msg = InsertRequestBuilder::table("t")
            .schema("s")
            .columns(["a", "b"])
            .row(vec![lit_int(1), placeholder(0)])
            .arg(sint(2))
            .build();
        let collection = msg.collection.as_ref().unwrap();
        assert_eq!(collection.name, "t");
        assert_eq!(collection.schema.as_deref(), Some("s"));
        assert_eq!(msg.model().unwrap(), DataModel::Table);
        assert_eq!(msg.projection.len(), 2);
        assert_eq!(msg.row[0].field.len(), 2);
        assert_eq!(msg.args.len(), 1);
    }

    #[test]
    fn test_encode_decodes_back() {
        let builder = InsertRequestBuilder::document("coll").row(vec![lit_str("{}")]);
        let expected = builder.clone().build();
        let decoded = Insert::decode(builder.encode().as_slice()).unwrap();
        assert_eq!(decoded, expected);
    }
}
