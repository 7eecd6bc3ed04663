//! cmakeast - traversal and macro resolution over CMake-style script trees
//!
//! This is the root workspace crate that provides integration tests.
//! The actual implementation is in the workspace member crates.

// Re-export main crates for convenience
pub use cmakeast_ast as ast;
pub use cmakeast_macros as macros;
pub use cmakeast_parser as parser;
pub use cmakeast_visitor as visitor;
