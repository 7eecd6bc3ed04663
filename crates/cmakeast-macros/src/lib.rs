//! cmakeast-macros: minimal macro resolution
//!
//! Two handlers layered on the traversal engine:
//! - definition: `set(NAME VALUE)` with exactly two literal arguments
//!   records `NAME = VALUE` (last write wins)
//! - substitution: the first `${NAME}` in an include's filename is
//!   replaced with the current value of `NAME`, if defined
//!
//! Everything else is a silent no-op. Run with `strict` to collect a
//! [`Diagnostic`](cmakeast_visitor::Diagnostic) for each one.
//!
//! # Example
//!
//! ```ignore
//! use cmakeast_macros::MacroResolver;
//! use cmakeast_visitor::SymbolTable;
//!
//! let mut root = cmakeast_parser::parse(r#"
//! set(ProjDirPath "/repo")
//! include(${ProjDirPath}/flags.cmake)
//! "#).unwrap();
//! let result = MacroResolver::default().resolve(&mut root, SymbolTable::new(), false);
//! assert_eq!(result.symbols.lookup("ProjDirPath"), Some("/repo"));
//! ```

mod definition;
mod resolver;
mod substitution;

pub use definition::{define, record_assignment, Assignment};
pub use resolver::{MacroConfig, MacroResolver};
pub use substitution::{expand_first_macro, scan_macro, substitute, Expansion, MacroScan, MacroToken};
