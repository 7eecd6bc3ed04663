//! Tree nodes produced by the parser

use std::fmt;

use cmakeast_stack::ensure_sufficient_stack;
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::{Kind, Span};

/// A node of the parsed tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    /// 1-based line of the first token
    pub line: usize,
    /// 1-based column of the first token
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NodeKind {
    ToplevelBody(ToplevelBody),
    WhileStatement(BlockStatement),
    ForeachStatement(BlockStatement),
    FunctionDefinition(BlockStatement),
    MacroDefinition(BlockStatement),
    IfBlock(IfBlock),
    IfStatement(Clause),
    ElseIfStatement(Clause),
    ElseStatement(Clause),
    FunctionCall(FunctionCall),
    Include(Include),
    Word(Word),

    /// A node written by a newer tool that this version does not model.
    ///
    /// Only produced when deserializing a tree whose tag is not a known
    /// [`Kind`] name. The raw `{ tag: payload }` object is kept so the tree
    /// can be written back out unchanged.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}

/// Externally tagged like the derived form, except that only tags outside
/// [`Kind::ALL`] become [`NodeKind::Unrecognized`]. A known tag with a bad
/// payload is an error.
impl<'de> Deserialize<'de> for NodeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(NodeKindVisitor)
    }
}

struct NodeKindVisitor;

impl<'de> Visitor<'de> for NodeKindVisitor {
    type Value = NodeKind;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map with a single node kind key")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<NodeKind, A::Error> {
        let tag: String = map
            .next_key()?
            .ok_or_else(|| <A::Error as de::Error>::invalid_length(0, &self))?;
        // one guard per tree level
        let kind = ensure_sufficient_stack(|| payload(&tag, &mut map))?;
        if map.next_key::<IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(2, &self));
        }
        Ok(kind)
    }
}

fn payload<'de, A: MapAccess<'de>>(tag: &str, map: &mut A) -> Result<NodeKind, A::Error> {
    let Some(kind) = Kind::ALL.into_iter().find(|kind| kind.name() == tag) else {
        let payload: serde_json::Value = map.next_value()?;
        let mut object = serde_json::Map::new();
        object.insert(tag.to_string(), payload);
        return Ok(NodeKind::Unrecognized(serde_json::Value::Object(object)));
    };

    Ok(match kind {
        Kind::ToplevelBody => NodeKind::ToplevelBody(map.next_value()?),
        Kind::WhileStatement => NodeKind::WhileStatement(map.next_value()?),
        Kind::ForeachStatement => NodeKind::ForeachStatement(map.next_value()?),
        Kind::FunctionDefinition => NodeKind::FunctionDefinition(map.next_value()?),
        Kind::MacroDefinition => NodeKind::MacroDefinition(map.next_value()?),
        Kind::IfBlock => NodeKind::IfBlock(map.next_value()?),
        Kind::IfStatement => NodeKind::IfStatement(map.next_value()?),
        Kind::ElseIfStatement => NodeKind::ElseIfStatement(map.next_value()?),
        Kind::ElseStatement => NodeKind::ElseStatement(map.next_value()?),
        Kind::FunctionCall => NodeKind::FunctionCall(map.next_value()?),
        Kind::Include => NodeKind::Include(map.next_value()?),
        Kind::Word => NodeKind::Word(map.next_value()?),
    })
}

/// Root of a parsed file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ToplevelBody {
    pub statements: Vec<Node>,
}

/// `while`, `foreach`, `function` and `macro` blocks.
///
/// `header` and `footer` are the opening and closing command invocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockStatement {
    pub header: Box<Node>,
    pub body: Vec<Node>,
    pub footer: Box<Node>,
}

/// A complete `if(...) ... endif()` construct
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfBlock {
    pub if_statement: Box<Node>,
    pub elseif_statements: Vec<Node>,
    pub else_statement: Option<Box<Node>>,
    pub footer: Box<Node>,
}

/// One arm of an [`IfBlock`]: the `if`, an `elseif` or the `else`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    pub header: Box<Node>,
    pub body: Vec<Node>,
}

/// A command invocation: `name(arguments...)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: Vec<Node>,
}

impl FunctionCall {
    /// Command names are case-insensitive
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// `include(filename [options...])`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Include {
    pub filename: String,
    /// Remaining arguments, verbatim (`OPTIONAL`, `RESULT_VARIABLE var`, ...)
    pub options: Vec<String>,
}

/// A single command argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub word_type: WordType,
    /// Argument text without quote or bracket delimiters
    pub contents: String,
}

impl Word {
    /// Whether the contents can be taken as-is, without expansion
    pub fn is_literal(&self) -> bool {
        !matches!(
            self.word_type,
            WordType::VariableDereference | WordType::CompoundLiteral
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WordType {
    /// `foo`, `ON`, `src/main.c`
    Unquoted,
    /// `"quoted text"`
    Quoted,
    /// `[[bracket text]]`
    Bracket,
    /// `42`, `3.14`
    Number,
    /// Exactly one reference: `${NAME}`
    VariableDereference,
    /// Unquoted text mixing literals and references: `${ROOT}/include`
    CompoundLiteral,
}

impl WordType {
    /// Classify the text of an unquoted argument
    pub fn classify_unquoted(text: &str) -> WordType {
        if text.chars().any(|c| c.is_ascii_digit())
            && text.chars().all(|c| c.is_ascii_digit() || c == '.')
        {
            WordType::Number
        } else if text.starts_with("${")
            && text.ends_with('}')
            && text[2..].find('}') == Some(text.len() - 3)
        {
            WordType::VariableDereference
        } else if text.contains("${") {
            WordType::CompoundLiteral
        } else {
            WordType::Unquoted
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WordType::Unquoted => "Unquoted",
            WordType::Quoted => "Quoted",
            WordType::Bracket => "Bracket",
            WordType::Number => "Number",
            WordType::VariableDereference => "VariableDereference",
            WordType::CompoundLiteral => "CompoundLiteral",
        }
    }
}

impl Node {
    pub fn new(kind: NodeKind, span: Span, line: usize, col: usize) -> Self {
        Self {
            kind,
            span,
            line,
            col,
        }
    }

    /// Read a tree written by `serde_json::to_string`.
    ///
    /// Unlike `serde_json::from_str`, nesting depth is not capped.
    pub fn from_json(text: &str) -> serde_json::Result<Node> {
        let mut deserializer = serde_json::Deserializer::from_str(text);
        deserializer.disable_recursion_limit();
        let node = Node::deserialize(&mut deserializer)?;
        deserializer.end()?;
        Ok(node)
    }

    /// The node's kind, or `None` if this version does not model it
    pub fn known_kind(&self) -> Option<Kind> {
        let kind = match &self.kind {
            NodeKind::ToplevelBody(_) => Kind::ToplevelBody,
            NodeKind::WhileStatement(_) => Kind::WhileStatement,
            NodeKind::ForeachStatement(_) => Kind::ForeachStatement,
            NodeKind::FunctionDefinition(_) => Kind::FunctionDefinition,
            NodeKind::MacroDefinition(_) => Kind::MacroDefinition,
            NodeKind::IfBlock(_) => Kind::IfBlock,
            NodeKind::IfStatement(_) => Kind::IfStatement,
            NodeKind::ElseIfStatement(_) => Kind::ElseIfStatement,
            NodeKind::ElseStatement(_) => Kind::ElseStatement,
            NodeKind::FunctionCall(_) => Kind::FunctionCall,
            NodeKind::Include(_) => Kind::Include,
            NodeKind::Word(_) => Kind::Word,
            NodeKind::Unrecognized(_) => return None,
        };
        Some(kind)
    }

    /// Human-readable tag, including for unrecognized nodes
    pub fn tag(&self) -> String {
        match (&self.kind, self.known_kind()) {
            (_, Some(kind)) => kind.name().to_string(),
            (NodeKind::Unrecognized(serde_json::Value::Object(map)), None) if map.len() == 1 => {
                map.keys().next().cloned().unwrap_or_default()
            }
            _ => "<unrecognized>".to_string(),
        }
    }

    pub fn as_function_call(&self) -> Option<&FunctionCall> {
        match &self.kind {
            NodeKind::FunctionCall(call) => Some(call),
            _ => None,
        }
    }

    pub fn as_include(&self) -> Option<&Include> {
        match &self.kind {
            NodeKind::Include(include) => Some(include),
            _ => None,
        }
    }

    pub fn as_include_mut(&mut self) -> Option<&mut Include> {
        match &mut self.kind {
            NodeKind::Include(include) => Some(include),
            _ => None,
        }
    }

    pub fn as_word(&self) -> Option<&Word> {
        match &self.kind {
            NodeKind::Word(word) => Some(word),
            _ => None,
        }
    }
}
