//! Token definitions for CMake-style scripts

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    // === Comments ===
    #[regex(r"#[^\n]*")]
    LineComment,

    /// `#[[ ... ]]`, may span lines
    #[regex(r"#\[\[([^\]]|\][^\]])*\]\]", priority = 10)]
    BracketComment,

    // === Delimiters ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    // === Arguments ===
    #[regex(r#""([^"\\]|\\.)*""#)]
    Quoted,

    #[regex(r"\[\[([^\]]|\][^\]])*\]\]", priority = 10)]
    Bracket,

    /// Command names and unquoted arguments
    #[regex(r#"([^ \t\r\n\f()#"\\]|\\.)+"#)]
    Unquoted,

    // === Special ===
    Error,
    Eof,
}

impl TokenKind {
    pub fn is_comment(&self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BracketComment)
    }

    /// Whether this token can stand as a command argument
    pub fn is_argument(&self) -> bool {
        matches!(
            self,
            TokenKind::Quoted | TokenKind::Bracket | TokenKind::Unquoted
        )
    }

    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::LineComment | TokenKind::BracketComment => "comment",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Quoted => "quoted argument",
            TokenKind::Bracket => "bracket argument",
            TokenKind::Unquoted => "identifier",
            TokenKind::Error => "invalid token",
            TokenKind::Eof => "end of file",
        }
    }
}
