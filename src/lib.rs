//! # xcrud
//!
//! Compiles MySQL X protocol CRUD `Insert` requests into SQL `INSERT`
//! statements for the relational engine behind an X protocol front end.
//!
//! ## Pipeline Architecture
//!
//! ```text
//! Crud.Insert payload (protobuf)
//!     ↓
//! [protocol::wire::decode_insert]       → Insert message
//!     ↓
//! [statement::InsertStatementBuilder]
//!     ├── target      → INSERT INTO `schema`.`table`
//!     ├── projection  →  (`a`,`b`)  or  (doc)
//!     └── values      →  VALUES (..),(..)
//!             ↓
//!         [expr::ExprGenerator]         → literals, placeholders, paths, operators
//!     ↓
//! SQL text
//! ```
//!
//! Requests come in two data models. TABLE requests name their columns and
//! every row supplies one value per column. DOCUMENT requests insert a single
//! JSON value per row into the `doc` column of a collection.
//!
//! ## Usage
//!
//! ```rust
//! use xcrud::protocol::builders::{lit_int, InsertRequestBuilder};
//! use xcrud::InsertStatementBuilder;
//!
//! let payload = InsertRequestBuilder::table("t")
//!     .columns(["a", "b"])
//!     .row(vec![lit_int(1), lit_int(2)])
//!     .row(vec![lit_int(3), lit_int(4)])
//!     .encode();
//!
//! let sql = InsertStatementBuilder::new().build(&payload)?;
//! assert_eq!(sql, "INSERT INTO `t` (`a`,`b`) VALUES (1,2),(3,4)");
//! # Ok::<(), xcrud::XCrudError>(())
//! ```
//!
//! ## Module Organization
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `protocol` | Wire messages, errors, request handler |
//! | `statement` | Insert statement builder, target resolution |
//! | `expr` | Expression and literal rendering |
//! | `config` | Layered configuration |

pub mod config;
pub mod expr;
pub mod protocol;
pub mod statement;

// Re-export public types
pub use config::Config;
pub use expr::{ExprError, ExprGenerator, ExprResult};
pub use protocol::{CrudHandler, ErrorInfo, XCrudError, XCrudResult};
pub use statement::InsertStatementBuilder;
