//! cmakeast AST - Core types for the parsed script tree
//!
//! Defines the node data model the parser produces and the traversal
//! engine walks: node payloads, the [`Kind`] discriminant, the named
//! child [`Field`]s, and spans for source locations.

mod kind;
mod node;
mod span;

pub use kind::*;
pub use node::*;
pub use span::*;
