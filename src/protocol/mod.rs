//! X Protocol CRUD front end
//!
//! Message model, errors and the request handler for CRUD `Insert` requests.
//!
//! # Architecture
//!
//! ```text
//! +-------------------------------------------------------------+
//! |                 Mysqlx.Crud.Insert payload                  |
//! +-------------------------------------------------------------+
//! |  wire     - prost messages (Scalar, Expr, Insert), decoding |
//! |  handler  - limits, compilation, structured logging         |
//! |  error    - XCrudError with X protocol error codes          |
//! |  builders - fluent constructors for requests and exprs      |
//! +-------------------------------------------------------------+
//! |  -> statement::InsertStatementBuilder -> SQL text           |
//! +-------------------------------------------------------------+
//! ```

pub mod builders;
pub mod error;
pub mod handler;
pub mod wire;

// Re-export error types
pub use error::{ErrorInfo, XCrudError, XCrudResult};

// Re-export wire types
pub use wire::{
    decode_insert, Collection, Column, ContentType, DataModel, Expr, ExprType, Insert, Scalar,
    ScalarType, TypedRow,
};

// Re-export handler
pub use handler::CrudHandler;

// Protocol Constants
/// Default maximum accepted message size (16 MB)
pub const MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;

/// SQLSTATE reported with every compiler error
pub const SQL_STATE_GENERAL: &str = "HY000";

/// Packet larger than the configured maximum
pub const ER_NET_PACKET_TOO_LARGE: u16 = 1153;
/// Payload could not be decoded
pub const ER_X_BAD_MESSAGE: u16 = 5000;
/// Projection invalid for the data model, or no rows
pub const ER_X_BAD_PROJECTION: u16 = 5114;
/// Row width does not match the projection
pub const ER_X_BAD_INSERT_DATA: u16 = 5115;
/// Unknown operator name
pub const ER_X_EXPR_BAD_OPERATOR: u16 = 5150;
/// Operator called with the wrong number of operands
pub const ER_X_EXPR_BAD_NUM_ARGS: u16 = 5151;
/// Required part of an expression is absent
pub const ER_X_EXPR_MISSING_ARG: u16 = 5152;
/// Value does not match its declared type
pub const ER_X_EXPR_BAD_TYPE_VALUE: u16 = 5153;
/// Value is out of range or otherwise unusable
pub const ER_X_EXPR_BAD_VALUE: u16 = 5154;
