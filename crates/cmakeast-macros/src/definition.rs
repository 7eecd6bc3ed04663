//! Recording assignments into the symbol table

use cmakeast_ast::{FunctionCall, Node};
use cmakeast_visitor::{Diagnostic, SymbolTable, Visit};

/// What an invocation did to the symbol table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    /// Not the assignment command
    NotAssignment,
    /// `name` now maps to the value; `previous` is what it replaced
    Recorded {
        name: String,
        previous: Option<String>,
    },
    /// Assignment command with other than two arguments
    WrongArity(usize),
    /// Assignment command whose name or value is not literal text
    NonLiteral,
}

/// Apply `call` to `symbols` if it is a two-argument literal assignment.
///
/// Anything else leaves the table untouched.
pub fn record_assignment(call: &FunctionCall, command: &str, symbols: &mut SymbolTable) -> Assignment {
    if !call.is_named(command) {
        return Assignment::NotAssignment;
    }

    let [name, value] = call.arguments.as_slice() else {
        return Assignment::WrongArity(call.arguments.len());
    };

    match (name.as_word(), value.as_word()) {
        (Some(name), Some(value)) if name.is_literal() && value.is_literal() => {
            let previous = symbols.define(name.contents.clone(), value.contents.clone());
            Assignment::Recorded {
                name: name.contents.clone(),
                previous,
            }
        }
        _ => Assignment::NonLiteral,
    }
}

/// Definition handler body, bound to function calls
pub fn define(command: &str, node: &mut Node, visit: &mut Visit<'_>) {
    let Some(call) = node.as_function_call() else {
        return;
    };

    match record_assignment(call, command, visit.symbols) {
        Assignment::NotAssignment => {}
        Assignment::Recorded { name, previous } => {
            tracing::debug!(%name, redefined = previous.is_some(), depth = visit.depth, "macro defined");
        }
        Assignment::WrongArity(arity) => visit.diagnostics.report(Diagnostic::IgnoredAssignment {
            command: call.name.clone(),
            arity,
            span: node.span,
        }),
        Assignment::NonLiteral => visit.diagnostics.report(Diagnostic::NonLiteralAssignment {
            command: call.name.clone(),
            span: node.span,
        }),
    }
}
