//! Single `${name}` substitution in include filenames

use cmakeast_ast::Node;
use cmakeast_visitor::{Diagnostic, SymbolTable, Visit};

/// Location of the first `${name}` token in a string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacroToken<'a> {
    pub name: &'a str,
    /// Byte offset of `$`
    pub start: usize,
    /// Byte offset just past `}`
    pub end: usize,
}

/// Outcome of scanning for a macro token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroScan<'a> {
    None,
    /// `${` with no `}` after it
    Unterminated,
    Found(MacroToken<'a>),
}

/// Find the first `${`, and the first `}` after it.
pub fn scan_macro(text: &str) -> MacroScan<'_> {
    let Some(start) = text.find("${") else {
        return MacroScan::None;
    };
    let name_start = start + 2;
    match text[name_start..].find('}') {
        Some(len) => MacroScan::Found(MacroToken {
            name: &text[name_start..name_start + len],
            start,
            end: name_start + len + 1,
        }),
        None => MacroScan::Unterminated,
    }
}

/// Result of expanding one macro reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion {
    /// No reference in the text
    NoMacro,
    /// `${` without a closing `}`; treated like [`Expansion::NoMacro`]
    Malformed,
    /// The referenced name is not in the table
    Undefined { name: String },
    Expanded(String),
}

/// Replace the first `${name}` in `text` with its value from `symbols`.
///
/// Only one reference is ever processed: the result is not rescanned, and
/// any later references are left as written.
pub fn expand_first_macro(text: &str, symbols: &SymbolTable) -> Expansion {
    let token = match scan_macro(text) {
        MacroScan::None => return Expansion::NoMacro,
        MacroScan::Unterminated => return Expansion::Malformed,
        MacroScan::Found(token) => token,
    };

    match symbols.lookup(token.name) {
        Some(value) => {
            let mut expanded = String::with_capacity(text.len() + value.len());
            expanded.push_str(&text[..token.start]);
            expanded.push_str(value);
            expanded.push_str(&text[token.end..]);
            Expansion::Expanded(expanded)
        }
        None => Expansion::Undefined {
            name: token.name.to_string(),
        },
    }
}

/// Substitution handler body, bound to include nodes.
///
/// Rewrites the filename in place on success; otherwise leaves it untouched.
pub fn substitute(node: &mut Node, visit: &mut Visit<'_>) {
    let span = node.span;
    let Some(include) = node.as_include_mut() else {
        return;
    };

    match expand_first_macro(&include.filename, visit.symbols) {
        Expansion::NoMacro => {}
        Expansion::Expanded(filename) => {
            tracing::debug!(from = %include.filename, to = %filename, "include resolved");
            include.filename = filename;
        }
        Expansion::Malformed => visit.diagnostics.report(Diagnostic::MalformedMacro {
            text: include.filename.clone(),
            span,
        }),
        Expansion::Undefined { name } => {
            visit
                .diagnostics
                .report(Diagnostic::UndefinedMacro { name, span })
        }
    }
}
