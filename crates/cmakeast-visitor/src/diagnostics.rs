//! Optional reporting channel for conditions the walk silently tolerates
//!
//! Traversal never fails. Dropped subtrees, ignored assignments and
//! unresolved macros are no-ops; in strict mode they are also recorded
//! here so callers can surface authoring mistakes.

use cmakeast_ast::Span;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum Diagnostic {
    /// A node kind this version does not model; its subtree was skipped
    #[error("unrecognized node `{tag}`: subtree skipped")]
    UnrecognizedNode { tag: String, span: Span },

    /// An assignment command with other than two arguments
    #[error("`{command}` with {arity} argument(s) ignored: expected exactly 2")]
    IgnoredAssignment {
        command: String,
        arity: usize,
        span: Span,
    },

    /// An assignment whose name or value is not literal text
    #[error("`{command}` with non-literal arguments ignored")]
    NonLiteralAssignment { command: String, span: Span },

    /// `${` without a closing `}`
    #[error("malformed macro reference in `{text}`")]
    MalformedMacro { text: String, span: Span },

    /// A reference to a macro not defined earlier in the walk
    #[error("undefined macro `{name}`")]
    UndefinedMacro { name: String, span: Span },
}

impl Diagnostic {
    pub fn span(&self) -> Span {
        match self {
            Diagnostic::UnrecognizedNode { span, .. } => *span,
            Diagnostic::IgnoredAssignment { span, .. } => *span,
            Diagnostic::NonLiteralAssignment { span, .. } => *span,
            Diagnostic::MalformedMacro { span, .. } => *span,
            Diagnostic::UndefinedMacro { span, .. } => *span,
        }
    }
}

/// Collector for [`Diagnostic`]s; discards everything unless enabled
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    enabled: bool,
    records: Vec<Diagnostic>,
}

impl Diagnostics {
    /// A channel that drops every report
    pub fn silent() -> Self {
        Self::default()
    }

    /// A channel that keeps every report
    pub fn collecting() -> Self {
        Self {
            enabled: true,
            records: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(%diagnostic, "tolerated");
        if self.enabled {
            self.records.push(diagnostic);
        }
    }

    pub fn records(&self) -> &[Diagnostic] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<Diagnostic> {
        self.records
    }
}
