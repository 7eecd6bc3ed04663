//! cmakeast-visitor: schema-driven traversal
//!
//! Walks a tree depth-first in pre-order and fires caller-supplied
//! handlers per node kind, threading one flat [`SymbolTable`] through the
//! walk so later-visited nodes observe definitions made at earlier ones.
//!
//! - The [`schema`] maps each node kind to its [`HandlerKey`] and the
//!   ordered single and multi child fields to visit.
//! - A node's handler fires before any handler of its descendants.
//!   Single fields are visited before multi fields, each in declared order.
//! - A node whose kind is not in the schema is skipped with its subtree.
//!
//! # Example
//!
//! ```ignore
//! use cmakeast_visitor::{recurse, HandlerKey, Handlers, SymbolTable};
//!
//! let mut root = cmakeast_parser::parse("message(hello)").unwrap();
//! let handlers = Handlers::new().on(HandlerKey::Word, |node, visit| {
//!     println!("{} word at depth {}", visit.kind, visit.depth);
//! });
//! recurse(&mut root, SymbolTable::new(), handlers);
//! ```

mod diagnostics;
mod error;
mod handlers;
pub mod schema;
mod symtab;
mod traverse;

pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::UnknownHandlerKey;
pub use handlers::{Handler, Handlers, Visit};
pub use schema::{HandlerKey, SchemaEntry};
pub use symtab::SymbolTable;
pub use traverse::{recurse, Traversal, TraversalResult};
