//! Node kind discriminants and named child fields

use serde::{Deserialize, Serialize};

use crate::{Node, NodeKind};

/// Discriminant of every node kind this version models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    ToplevelBody,
    WhileStatement,
    ForeachStatement,
    FunctionDefinition,
    MacroDefinition,
    IfBlock,
    IfStatement,
    ElseIfStatement,
    ElseStatement,
    FunctionCall,
    Include,
    Word,
}

impl Kind {
    pub const ALL: [Kind; 12] = [
        Kind::ToplevelBody,
        Kind::WhileStatement,
        Kind::ForeachStatement,
        Kind::FunctionDefinition,
        Kind::MacroDefinition,
        Kind::IfBlock,
        Kind::IfStatement,
        Kind::ElseIfStatement,
        Kind::ElseStatement,
        Kind::FunctionCall,
        Kind::Include,
        Kind::Word,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Kind::ToplevelBody => "ToplevelBody",
            Kind::WhileStatement => "WhileStatement",
            Kind::ForeachStatement => "ForeachStatement",
            Kind::FunctionDefinition => "FunctionDefinition",
            Kind::MacroDefinition => "MacroDefinition",
            Kind::IfBlock => "IfBlock",
            Kind::IfStatement => "IfStatement",
            Kind::ElseIfStatement => "ElseIfStatement",
            Kind::ElseStatement => "ElseStatement",
            Kind::FunctionCall => "FunctionCall",
            Kind::Include => "Include",
            Kind::Word => "Word",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Named child slot of a node.
///
/// Single fields hold at most one child, multi fields an ordered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Statements,
    Header,
    Body,
    Footer,
    IfStatement,
    ElseIfStatements,
    ElseStatement,
    Arguments,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Statements => "statements",
            Field::Header => "header",
            Field::Body => "body",
            Field::Footer => "footer",
            Field::IfStatement => "if_statement",
            Field::ElseIfStatements => "elseif_statements",
            Field::ElseStatement => "else_statement",
            Field::Arguments => "arguments",
        }
    }
}

impl Node {
    /// The child held in a single-valued field, if the node has one there
    pub fn child(&self, field: Field) -> Option<&Node> {
        match (&self.kind, field) {
            (
                NodeKind::WhileStatement(block)
                | NodeKind::ForeachStatement(block)
                | NodeKind::FunctionDefinition(block)
                | NodeKind::MacroDefinition(block),
                Field::Header,
            ) => Some(&*block.header),
            (
                NodeKind::WhileStatement(block)
                | NodeKind::ForeachStatement(block)
                | NodeKind::FunctionDefinition(block)
                | NodeKind::MacroDefinition(block),
                Field::Footer,
            ) => Some(&*block.footer),
            (NodeKind::IfBlock(block), Field::IfStatement) => Some(&*block.if_statement),
            (NodeKind::IfBlock(block), Field::ElseStatement) => block.else_statement.as_deref(),
            (NodeKind::IfBlock(block), Field::Footer) => Some(&*block.footer),
            (
                NodeKind::IfStatement(clause)
                | NodeKind::ElseIfStatement(clause)
                | NodeKind::ElseStatement(clause),
                Field::Header,
            ) => Some(&*clause.header),
            _ => None,
        }
    }

    pub fn child_mut(&mut self, field: Field) -> Option<&mut Node> {
        match (&mut self.kind, field) {
            (
                NodeKind::WhileStatement(block)
                | NodeKind::ForeachStatement(block)
                | NodeKind::FunctionDefinition(block)
                | NodeKind::MacroDefinition(block),
                Field::Header,
            ) => Some(&mut *block.header),
            (
                NodeKind::WhileStatement(block)
                | NodeKind::ForeachStatement(block)
                | NodeKind::FunctionDefinition(block)
                | NodeKind::MacroDefinition(block),
                Field::Footer,
            ) => Some(&mut *block.footer),
            (NodeKind::IfBlock(block), Field::IfStatement) => Some(&mut *block.if_statement),
            (NodeKind::IfBlock(block), Field::ElseStatement) => {
                block.else_statement.as_deref_mut()
            }
            (NodeKind::IfBlock(block), Field::Footer) => Some(&mut *block.footer),
            (
                NodeKind::IfStatement(clause)
                | NodeKind::ElseIfStatement(clause)
                | NodeKind::ElseStatement(clause),
                Field::Header,
            ) => Some(&mut *clause.header),
            _ => None,
        }
    }

    /// The children held in a multi-valued field; empty if the node has no such field
    pub fn children(&self, field: Field) -> &[Node] {
        match (&self.kind, field) {
            (NodeKind::ToplevelBody(body), Field::Statements) => body.statements.as_slice(),
            (
                NodeKind::WhileStatement(block)
                | NodeKind::ForeachStatement(block)
                | NodeKind::FunctionDefinition(block)
                | NodeKind::MacroDefinition(block),
                Field::Body,
            ) => block.body.as_slice(),
            (NodeKind::IfBlock(block), Field::ElseIfStatements) => block.elseif_statements.as_slice(),
            (
                NodeKind::IfStatement(clause)
                | NodeKind::ElseIfStatement(clause)
                | NodeKind::ElseStatement(clause),
                Field::Body,
            ) => clause.body.as_slice(),
            (NodeKind::FunctionCall(call), Field::Arguments) => call.arguments.as_slice(),
            _ => &[],
        }
    }

    pub fn children_mut(&mut self, field: Field) -> &mut [Node] {
        match (&mut self.kind, field) {
            (NodeKind::ToplevelBody(body), Field::Statements) => body.statements.as_mut_slice(),
            (
                NodeKind::WhileStatement(block)
                | NodeKind::ForeachStatement(block)
                | NodeKind::FunctionDefinition(block)
                | NodeKind::MacroDefinition(block),
                Field::Body,
            ) => block.body.as_mut_slice(),
            (NodeKind::IfBlock(block), Field::ElseIfStatements) => block.elseif_statements.as_mut_slice(),
            (
                NodeKind::IfStatement(clause)
                | NodeKind::ElseIfStatement(clause)
                | NodeKind::ElseStatement(clause),
                Field::Body,
            ) => clause.body.as_mut_slice(),
            (NodeKind::FunctionCall(call), Field::Arguments) => call.arguments.as_mut_slice(),
            _ => &mut [],
        }
    }
}
