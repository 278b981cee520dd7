//! Expression rendering errors.

use serde::{Deserialize, Serialize};

use crate::protocol::{
    ER_X_EXPR_BAD_NUM_ARGS, ER_X_EXPR_BAD_OPERATOR, ER_X_EXPR_BAD_TYPE_VALUE,
    ER_X_EXPR_BAD_VALUE, ER_X_EXPR_MISSING_ARG,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ExprError {
    /// Operator name not recognized
    #[error("Invalid operator {name}")]
    BadOperator { name: String },

    /// Operator called with the wrong number of operands
    #[error("Invalid number of arguments for operator {name}: expected {expected}, got {got}")]
    BadNumArgs {
        name: String,
        expected: String,
        got: usize,
    },

    /// A field the expression kind requires is absent
    #[error("{message}")]
    MissingArg { message: String },

    /// Value does not match its declared type
    #[error("{message}")]
    BadTypeValue { message: String },

    /// Value is present but unusable
    #[error("{message}")]
    BadValue { message: String },

    /// Expression kind the server does not implement
    #[error("{what} is not supported yet")]
    Unsupported { what: String },
}

/// Result type for expression rendering
pub type ExprResult<T> = Result<T, ExprError>;

impl ExprError {
    pub fn missing(message: impl Into<String>) -> Self {
        ExprError::MissingArg {
            message: message.into(),
        }
    }

    pub fn bad_type(message: impl Into<String>) -> Self {
        ExprError::BadTypeValue {
            message: message.into(),
        }
    }

    pub fn bad_value(message: impl Into<String>) -> Self {
        ExprError::BadValue {
            message: message.into(),
        }
    }

    /// X protocol error number reported to the client.
    pub fn code(&self) -> u16 {
        match self {
            ExprError::BadOperator { .. } => ER_X_EXPR_BAD_OPERATOR,
            ExprError::BadNumArgs { .. } => ER_X_EXPR_BAD_NUM_ARGS,
            ExprError::MissingArg { .. } => ER_X_EXPR_MISSING_ARG,
            ExprError::BadTypeValue { .. } | ExprError::Unsupported { .. } => {
                ER_X_EXPR_BAD_TYPE_VALUE
            }
            ExprError::BadValue { .. } => ER_X_EXPR_BAD_VALUE,
        }
    }
}
