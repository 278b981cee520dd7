//! SQL Statement Builders for CRUD Requests
//!
//! ```text
//! Insert payload
//!     ↓
//! [decode_insert]          → Insert message
//!     ↓
//! [write_target]           → INSERT INTO `schema`.`table`
//! [write_projection]       →  (`a`,`b`)  |  (doc)
//! [write_values/write_row] →  VALUES (..),(..)
//!     ↓
//! SQL text
//! ```
//!
//! All clauses are appended to one buffer. Any error aborts the build and the
//! buffer is discarded, so callers never see a partial statement.

pub mod insert;
pub mod target;

pub use insert::{projection_width, InsertStatementBuilder};
pub use target::{resolve_target, write_target};
