//! Wire Format Types
//!
//! Protobuf messages of the X protocol that a CRUD `Insert` request is made of:
//! `Mysqlx.Datatypes.Scalar`, the `Mysqlx.Expr` expression tree and
//! `Mysqlx.Crud.Insert` itself. Field tags follow the protocol definition so
//! payloads produced by any X protocol client decode here.

use prost::Message;

use super::error::{XCrudError, XCrudResult};

// ============================================================================
// Datatypes
// ============================================================================

/// Type tag of a [`Scalar`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ScalarType {
    Sint = 1,
    Uint = 2,
    Null = 3,
    Octets = 4,
    Double = 5,
    Float = 6,
    Bool = 7,
    String = 8,
}

/// Opaque bytes tagged with a content type (see [`ContentType`]).
#[derive(Clone, PartialEq, Message)]
pub struct ScalarOctets {
    #[prost(bytes = "vec", tag = "1")]
    pub value: Vec<u8>,

    #[prost(uint32, optional, tag = "2")]
    pub content_type: Option<u32>,
}

/// Character string with an optional collation id.
#[derive(Clone, PartialEq, Message)]
pub struct ScalarString {
    #[prost(bytes = "vec", tag = "1")]
    pub value: Vec<u8>,

    #[prost(uint64, optional, tag = "2")]
    pub collation: Option<u64>,
}

/// A literal value: used both inside expressions and as a bound argument.
#[derive(Clone, PartialEq, Message)]
pub struct Scalar {
    #[prost(enumeration = "ScalarType", tag = "1")]
    pub kind: i32,

    #[prost(sint64, optional, tag = "2")]
    pub v_signed_int: Option<i64>,

    #[prost(uint64, optional, tag = "3")]
    pub v_unsigned_int: Option<u64>,

    #[prost(message, optional, tag = "5")]
    pub v_octets: Option<ScalarOctets>,

    #[prost(double, optional, tag = "6")]
    pub v_double: Option<f64>,

    #[prost(float, optional, tag = "7")]
    pub v_float: Option<f32>,

    #[prost(bool, optional, tag = "8")]
    pub v_bool: Option<bool>,

    #[prost(message, optional, tag = "9")]
    pub v_string: Option<ScalarString>,
}

/// Content types carried by [`ScalarOctets::content_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Plain,
    Geometry,
    Json,
    Xml,
}

impl ContentType {
    pub fn from_wire(value: u32) -> Option<Self> {
        match value {
            0 => Some(ContentType::Plain),
            1 => Some(ContentType::Geometry),
            2 => Some(ContentType::Json),
            3 => Some(ContentType::Xml),
            _ => None,
        }
    }

    pub fn to_wire(self) -> u32 {
        match self {
            ContentType::Plain => 0,
            ContentType::Geometry => 1,
            ContentType::Json => 2,
            ContentType::Xml => 3,
        }
    }
}

// ============================================================================
// Expressions
// ============================================================================

/// Type tag of an [`Expr`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ExprType {
    Ident = 1,
    Literal = 2,
    Variable = 3,
    FuncCall = 4,
    Operator = 5,
    Placeholder = 6,
    Object = 7,
    Array = 8,
}

/// Step kind inside a document path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum DocumentPathItemType {
    Member = 1,
    MemberAsterisk = 2,
    ArrayIndex = 3,
    ArrayIndexAsterisk = 4,
    DoubleAsterisk = 5,
}

#[derive(Clone, PartialEq, Message)]
pub struct DocumentPathItem {
    #[prost(enumeration = "DocumentPathItemType", tag = "1")]
    pub kind: i32,

    #[prost(string, optional, tag = "2")]
    pub value: Option<String>,

    #[prost(uint32, optional, tag = "3")]
    pub index: Option<u32>,
}

/// Possibly qualified function name.
#[derive(Clone, PartialEq, Message)]
pub struct Identifier {
    #[prost(string, tag = "1")]
    pub name: String,

    #[prost(string, optional, tag = "2")]
    pub schema_name: Option<String>,
}

/// Column reference, optionally qualified and optionally descending into a
/// JSON document through `document_path`.
#[derive(Clone, PartialEq, Message)]
pub struct ColumnIdentifier {
    #[prost(message, repeated, tag = "1")]
    pub document_path: Vec<DocumentPathItem>,

    #[prost(string, optional, tag = "2")]
    pub name: Option<String>,

    #[prost(string, optional, tag = "3")]
    pub table_name: Option<String>,

    #[prost(string, optional, tag = "4")]
    pub schema_name: Option<String>,
}

#[derive(Clone, PartialEq, Message)]
pub struct FunctionCall {
    #[prost(message, optional, tag = "1")]
    pub name: Option<Identifier>,

    #[prost(message, repeated, tag = "2")]
    pub param: Vec<Expr>,
}

#[derive(Clone, PartialEq, Message)]
pub struct Operator {
    #[prost(string, tag = "1")]
    pub name: String,

    #[prost(message, repeated, tag = "2")]
    pub param: Vec<Expr>,
}

#[derive(Clone, PartialEq, Message)]
pub struct ObjectField {
    #[prost(string, tag = "1")]
    pub key: String,

    #[prost(message, optional, tag = "2")]
    pub value: Option<Expr>,
}

#[derive(Clone, PartialEq, Message)]
pub struct ExprObject {
    #[prost(message, repeated, tag = "1")]
    pub fld: Vec<ObjectField>,
}

#[derive(Clone, PartialEq, Message)]
pub struct ExprArray {
    #[prost(message, repeated, tag = "1")]
    pub value: Vec<Expr>,
}

/// Scalar expression tree. Exactly one payload field is expected to be set,
/// the one matching `kind`.
#[derive(Clone, PartialEq, Message)]
pub struct Expr {
    #[prost(enumeration = "ExprType", tag = "1")]
    pub kind: i32,

    #[prost(message, optional, tag = "2")]
    pub identifier: Option<ColumnIdentifier>,

    #[prost(string, optional, tag = "3")]
    pub variable: Option<String>,

    #[prost(message, optional, tag = "4")]
    pub literal: Option<Scalar>,

    #[prost(message, optional, tag = "5")]
    pub function_call: Option<FunctionCall>,

    #[prost(message, optional, tag = "6")]
    pub operator: Option<Operator>,

    #[prost(uint32, optional, tag = "7")]
    pub position: Option<u32>,

    #[prost(message, optional, tag = "8")]
    pub object: Option<ExprObject>,

    #[prost(message, optional, tag = "9")]
    pub array: Option<ExprArray>,
}

// ============================================================================
// Crud.Insert
// ============================================================================

/// Addressing model of a CRUD request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum DataModel {
    Document = 1,
    Table = 2,
}

/// Target table or collection.
#[derive(Clone, PartialEq, Message)]
pub struct Collection {
    #[prost(string, tag = "1")]
    pub name: String,

    #[prost(string, optional, tag = "2")]
    pub schema: Option<String>,
}

/// One entry of an insert projection.
#[derive(Clone, PartialEq, Message)]
pub struct Column {
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,

    #[prost(string, optional, tag = "2")]
    pub alias: Option<String>,

    #[prost(message, repeated, tag = "3")]
    pub document_path: Vec<DocumentPathItem>,
}

/// One row of values, positionally matching the projection.
#[derive(Clone, PartialEq, Message)]
pub struct TypedRow {
    #[prost(message, repeated, tag = "1")]
    pub field: Vec<Expr>,
}

/// `Mysqlx.Crud.Insert`
#[derive(Clone, PartialEq, Message)]
pub struct Insert {
    #[prost(message, optional, tag = "1")]
    pub collection: Option<Collection>,

    #[prost(enumeration = "DataModel", optional, tag = "2")]
    pub data_model: Option<i32>,

    #[prost(message, repeated, tag = "3")]
    pub projection: Vec<Column>,

    #[prost(message, repeated, tag = "4")]
    pub row: Vec<TypedRow>,

    #[prost(message, repeated, tag = "5")]
    pub args: Vec<Scalar>,
}

impl Insert {
    /// The target collection. A request without one cannot be compiled.
    pub fn target(&self) -> XCrudResult<&Collection> {
        match &self.collection {
            Some(collection) if !collection.name.is_empty() => Ok(collection),
            Some(_) => Err(XCrudError::malformed("collection name is empty")),
            None => Err(XCrudError::malformed("missing required field 'collection'")),
        }
    }

    /// Data model of the request, `DOCUMENT` when the field is absent.
    pub fn model(&self) -> XCrudResult<DataModel> {
        match self.data_model {
            None => Ok(DataModel::Document),
            Some(value) => DataModel::try_from(value)
                .map_err(|_| XCrudError::malformed(format!("unknown data model {value}"))),
        }
    }
}

/// Decode an `Insert` payload and check the fields every request must carry.
pub fn decode_insert(payload: &[u8]) -> XCrudResult<Insert> {
    let msg = Insert::decode(payload)?;
    msg.target()?;
    msg.model()?;
    Ok(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Insert {
        Insert {
            collection: Some(Collection {
                name: "t".to_string(),
                schema: Some("s".to_string()),
            }),
            data_model: Some(DataModel::Table as i32),
            projection: vec![Column {
                name: Some("a".to_string()),
                ..Default::default()
            }],
            row: vec![TypedRow {
                field: vec![Expr {
                    kind: ExprType::Placeholder as i32,
                    position: Some(0),
                    ..Default::default()
                }],
            }],
            args: vec![Scalar {
                kind: ScalarType::Sint as i32,
                v_signed_int: Some(-7),
                ..Default::default()
            }],
        }
    }

    #[test]
    fn test_decode_encoded_insert() {
        let msg = sample();
        let decoded = decode_insert(&msg.encode_to_vec()).unwrap();
        assert_eq!(decoded, msg);
        assert_eq!(decoded.model().unwrap(), DataModel::Table);
    }

    #[test]
    fn test_missing_data_model_defaults_to_document() {
        let mut msg = sample();
        msg.data_model = None;
        let decoded = decode_insert(&msg.encode_to_vec()).unwrap();
        assert_eq!(decoded.model().unwrap(), DataModel::Document);
    }

    #[test]
    fn test_unknown_data_model_is_malformed() {
        let mut msg = sample();
        msg.data_model = Some(9);
        let err = decode_insert(&msg.encode_to_vec()).unwrap_err();
        assert!(matches!(err, XCrudError::MalformedMessage { .. }));
    }

    #[test]
    fn test_missing_collection_is_malformed() {
        let mut msg = sample();
        msg.collection = None;
        let err = decode_insert(&msg.encode_to_vec()).unwrap_err();
        assert!(matches!(err, XCrudError::MalformedMessage { .. }));
    }

    #[test]
    fn test_garbage_bytes_are_malformed() {
        // field 1, wire type 2 (length-delimited) claiming 100 bytes that are not there
        let payload = [0x0a, 0x64, 0x01];
        let err = decode_insert(&payload).unwrap_err();
        let decode_err = Insert::decode(payload.as_slice()).unwrap_err();
        assert_eq!(err, XCrudError::malformed(decode_err.to_string()));
        assert_eq!(err.code(), 5000);
    }

    #[test]
    fn test_content_type_wire_values() {
        for ct in [
            ContentType::Plain,
            ContentType::Geometry,
            ContentType::Json,
            ContentType::Xml,
        ] {
            assert_eq!(ContentType::from_wire(ct.to_wire()), Some(ct));
        }
        assert_eq!(ContentType::from_wire(42), None);
    }
}
