//! Parser error types

use cmakeast_ast::Span;
use cmakeast_lexer::TokenKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unexpected token: expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("unexpected end of file")]
    UnexpectedEof { span: Span },

    #[error("`{opener}` block is never closed, expected `{terminator}()`")]
    UnclosedBlock {
        opener: String,
        terminator: &'static str,
        span: Span,
    },

    #[error("`{name}()` without a matching opening command")]
    UnmatchedTerminator { name: String, span: Span },

    #[error("`include()` requires a file argument")]
    EmptyInclude { span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. } => *span,
            ParseError::UnexpectedEof { span } => *span,
            ParseError::UnclosedBlock { span, .. } => *span,
            ParseError::UnmatchedTerminator { span, .. } => *span,
            ParseError::EmptyInclude { span } => *span,
        }
    }

    pub fn unexpected(expected: impl Into<String>, found: TokenKind, span: Span) -> Self {
        ParseError::UnexpectedToken {
            expected: expected.into(),
            found: found.describe().to_string(),
            span,
        }
    }
}
