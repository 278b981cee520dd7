//! Error types for the X protocol CRUD compiler.

use serde::{Deserialize, Serialize};

use crate::expr::ExprError;

use super::{
    ER_NET_PACKET_TOO_LARGE, ER_X_BAD_INSERT_DATA, ER_X_BAD_MESSAGE, ER_X_BAD_PROJECTION,
    SQL_STATE_GENERAL,
};

/// Error raised while turning a CRUD request into SQL.
///
/// Every variant is terminal for the request being compiled. The payload
/// carries enough context for a client-facing diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum XCrudError {
    /// The payload is not a valid `Insert` message
    #[error("Invalid message: {message}")]
    MalformedMessage { message: String },

    /// Projection does not fit the data model, or there is nothing to insert
    #[error("{message}")]
    BadProjection { message: String },

    /// A row does not supply one value per projected column
    #[error(
        "Wrong number of fields in row being inserted (row {row} has {fields}, expected {expected})"
    )]
    BadInsertData {
        row: usize,
        fields: usize,
        expected: usize,
    },

    /// A field value could not be rendered
    #[error("Invalid value in row {row}, field {field}: {source}")]
    Expression {
        row: usize,
        field: usize,
        #[source]
        source: ExprError,
    },

    /// Payload exceeds the configured message size
    #[error("Message of {size} bytes exceeds the limit of {limit} bytes")]
    PayloadTooLarge { size: usize, limit: usize },

    /// Request carries more rows than the configured maximum
    #[error("Insert of {rows} rows exceeds the limit of {limit} rows")]
    TooManyRows { rows: usize, limit: usize },
}

/// Result type for CRUD compilation
pub type XCrudResult<T> = Result<T, XCrudError>;

impl XCrudError {
    pub fn malformed(message: impl Into<String>) -> Self {
        XCrudError::MalformedMessage {
            message: message.into(),
        }
    }

    pub fn bad_projection(message: impl Into<String>) -> Self {
        XCrudError::BadProjection {
            message: message.into(),
        }
    }

    /// X protocol error number reported to the client.
    pub fn code(&self) -> u16 {
        match self {
            XCrudError::MalformedMessage { .. } => ER_X_BAD_MESSAGE,
            XCrudError::BadProjection { .. } => ER_X_BAD_PROJECTION,
            XCrudError::BadInsertData { .. } | XCrudError::TooManyRows { .. } => {
                ER_X_BAD_INSERT_DATA
            }
            XCrudError::Expression { source, .. } => source.code(),
            XCrudError::PayloadTooLarge { .. } => ER_NET_PACKET_TOO_LARGE,
        }
    }

    pub fn sql_state(&self) -> &'static str {
        SQL_STATE_GENERAL
    }

    /// Flattened form for reporting over the wire or as JSON.
    pub fn to_info(&self) -> ErrorInfo {
        ErrorInfo {
            code: self.code(),
            sql_state: self.sql_state().to_string(),
            message: self.to_string(),
        }
    }
}

/// Client-facing summary of an [`XCrudError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub code: u16,
    pub sql_state: String,
    pub message: String,
}

impl From<prost::DecodeError> for XCrudError {
    fn from(e: prost::DecodeError) -> Self {
        XCrudError::malformed(e.to_string())
    }
}
