//! Handler for CRUD requests
//!
//! Entry point used by the X protocol session layer: enforces the configured
//! limits, compiles the request and records the outcome. Compilation itself is
//! pure; this is the only place that logs.
//! Uses `AtomicU64` counters so one handler can be shared across connections.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::LimitsConfig;
use crate::statement::InsertStatementBuilder;
use crate::Config;

use super::error::{XCrudError, XCrudResult};
use super::wire::decode_insert;

/// Thread-safe front end for `Crud.Insert` compilation.
pub struct CrudHandler {
    limits: LimitsConfig,
    builder: InsertStatementBuilder,
    compiled_count: AtomicU64,
    rejected_count: AtomicU64,
}

impl CrudHandler {
    pub fn new(limits: LimitsConfig) -> Self {
        Self {
            limits,
            builder: InsertStatementBuilder::new(),
            compiled_count: AtomicU64::new(0),
            rejected_count: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.limits.clone())
    }

    pub fn limits(&self) -> &LimitsConfig {
        &self.limits
    }

    /// Get total inserts compiled successfully.
    pub fn total_compiled(&self) -> u64 {
        self.compiled_count.load(Ordering::Relaxed)
    }

    /// Get total inserts rejected.
    pub fn total_rejected(&self) -> u64 {
        self.rejected_count.load(Ordering::Relaxed)
    }

    /// Compile a `Crud.Insert` payload into an SQL statement.
    pub fn handle_insert(&self, payload: &[u8]) -> XCrudResult<String> {
        match self.compile_insert(payload) {
            Ok(sql) => {
                self.compiled_count.fetch_add(1, Ordering::Relaxed);
                Ok(sql)
            }
            Err(e) => {
                self.rejected_count.fetch_add(1, Ordering::Relaxed);
                match &e {
                    XCrudError::PayloadTooLarge { .. } | XCrudError::TooManyRows { .. } => {
                        tracing::warn!(code = e.code(), error = %e, "insert_limit_exceeded");
                    }
                    _ => tracing::info!(code = e.code(), error = %e, "insert_rejected"),
                }
                Err(e)
            }
        }
    }

    fn compile_insert(&self, payload: &[u8]) -> XCrudResult<String> {
        let max_payload = self.limits.max_payload_bytes;
        if max_payload > 0 && payload.len() > max_payload {
            return Err(XCrudError::PayloadTooLarge {
                size: payload.len(),
                limit: max_payload,
            });
        }

        let msg = decode_insert(payload)?;

        let max_rows = self.limits.max_insert_rows;
        if max_rows > 0 && msg.row.len() > max_rows {
            return Err(XCrudError::TooManyRows {
                rows: msg.row.len(),
                limit: max_rows,
            });
        }

        tracing::trace!(
            rows = msg.row.len(),
            columns = msg.projection.len(),
            args = msg.args.len(),
            "insert_decoded"
        );
        let sql = self.builder.build_request(&msg)?;
        tracing::debug!(rows = msg.row.len(), sql_len = sql.len(), "insert_compiled");
        Ok(sql)
    }
}
