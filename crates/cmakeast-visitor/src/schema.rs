//! Dispatch table: handler key and child layout of every node kind
//!
//! Traversal order is entirely driven by this table. Supporting a new node
//! kind means adding a [`Kind`] and its entry here; the walker itself does
//! not change.

use std::fmt;
use std::str::FromStr;

use cmakeast_ast::{Field, Kind, Node};
use serde::{Deserialize, Serialize};

use crate::UnknownHandlerKey;

/// Name under which callers register a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerKey {
    Toplevel,
    WhileStmnt,
    Foreach,
    FunctionDef,
    MacroDef,
    IfBlock,
    IfStmnt,
    ElseifStmnt,
    ElseStmnt,
    FunctionCall,
    Include,
    Word,
}

impl HandlerKey {
    pub const ALL: [HandlerKey; 12] = [
        HandlerKey::Toplevel,
        HandlerKey::WhileStmnt,
        HandlerKey::Foreach,
        HandlerKey::FunctionDef,
        HandlerKey::MacroDef,
        HandlerKey::IfBlock,
        HandlerKey::IfStmnt,
        HandlerKey::ElseifStmnt,
        HandlerKey::ElseStmnt,
        HandlerKey::FunctionCall,
        HandlerKey::Include,
        HandlerKey::Word,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HandlerKey::Toplevel => "toplevel",
            HandlerKey::WhileStmnt => "while_stmnt",
            HandlerKey::Foreach => "foreach",
            HandlerKey::FunctionDef => "function_def",
            HandlerKey::MacroDef => "macro_def",
            HandlerKey::IfBlock => "if_block",
            HandlerKey::IfStmnt => "if_stmnt",
            HandlerKey::ElseifStmnt => "elseif_stmnt",
            HandlerKey::ElseStmnt => "else_stmnt",
            HandlerKey::FunctionCall => "function_call",
            HandlerKey::Include => "include",
            HandlerKey::Word => "word",
        }
    }

    /// Position in [`HandlerKey::ALL`]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for HandlerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HandlerKey {
    type Err = UnknownHandlerKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HandlerKey::ALL
            .into_iter()
            .find(|key| key.name() == s)
            .ok_or_else(|| UnknownHandlerKey {
                name: s.to_string(),
            })
    }
}

/// How one node kind is dispatched and walked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaEntry {
    pub handler: HandlerKey,
    /// Single-child fields, visited first and in this order
    pub single: &'static [Field],
    /// Multi-child fields, visited after all single fields, in this order
    pub multi: &'static [Field],
}

const fn entry(
    handler: HandlerKey,
    single: &'static [Field],
    multi: &'static [Field],
) -> SchemaEntry {
    SchemaEntry {
        handler,
        single,
        multi,
    }
}

const BLOCK_SINGLE: &[Field] = &[Field::Header, Field::Footer];
const CLAUSE_SINGLE: &[Field] = &[Field::Header];
const BODY: &[Field] = &[Field::Body];

/// Schema entry for a kind
pub fn schema(kind: Kind) -> &'static SchemaEntry {
    const TOPLEVEL: SchemaEntry = entry(HandlerKey::Toplevel, &[], &[Field::Statements]);
    const WHILE: SchemaEntry = entry(HandlerKey::WhileStmnt, BLOCK_SINGLE, BODY);
    const FOREACH: SchemaEntry = entry(HandlerKey::Foreach, BLOCK_SINGLE, BODY);
    const FUNCTION_DEF: SchemaEntry = entry(HandlerKey::FunctionDef, BLOCK_SINGLE, BODY);
    const MACRO_DEF: SchemaEntry = entry(HandlerKey::MacroDef, BLOCK_SINGLE, BODY);
    const IF_BLOCK: SchemaEntry = entry(
        HandlerKey::IfBlock,
        &[Field::IfStatement, Field::ElseStatement, Field::Footer],
        &[Field::ElseIfStatements],
    );
    const IF_STMNT: SchemaEntry = entry(HandlerKey::IfStmnt, CLAUSE_SINGLE, BODY);
    const ELSEIF_STMNT: SchemaEntry = entry(HandlerKey::ElseifStmnt, CLAUSE_SINGLE, BODY);
    const ELSE_STMNT: SchemaEntry = entry(HandlerKey::ElseStmnt, CLAUSE_SINGLE, BODY);
    const FUNCTION_CALL: SchemaEntry = entry(HandlerKey::FunctionCall, &[], &[Field::Arguments]);
    const INCLUDE: SchemaEntry = entry(HandlerKey::Include, &[], &[]);
    const WORD: SchemaEntry = entry(HandlerKey::Word, &[], &[]);

    match kind {
        Kind::ToplevelBody => &TOPLEVEL,
        Kind::WhileStatement => &WHILE,
        Kind::ForeachStatement => &FOREACH,
        Kind::FunctionDefinition => &FUNCTION_DEF,
        Kind::MacroDefinition => &MACRO_DEF,
        Kind::IfBlock => &IF_BLOCK,
        Kind::IfStatement => &IF_STMNT,
        Kind::ElseIfStatement => &ELSEIF_STMNT,
        Kind::ElseStatement => &ELSE_STMNT,
        Kind::FunctionCall => &FUNCTION_CALL,
        Kind::Include => &INCLUDE,
        Kind::Word => &WORD,
    }
}

/// Resolve a node's kind and schema entry; `None` for kinds this version
/// does not model.
pub fn lookup(node: &Node) -> Option<(Kind, &'static SchemaEntry)> {
    node.known_kind().map(|kind| (kind, schema(kind)))
}
