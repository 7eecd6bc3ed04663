//! Recursive descent parser implementation

use cmakeast_ast::*;
use cmakeast_lexer::{Token, TokenKind};
use cmakeast_stack::ensure_sufficient_stack;

use crate::ParseError;

/// Every command that closes or continues a block
const TERMINATORS: &[&str] = &[
    "elseif",
    "else",
    "endif",
    "endwhile",
    "endforeach",
    "endfunction",
    "endmacro",
];

pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    lines: LineIndex,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            lines: LineIndex::new(source),
        }
    }

    // === Utilities ===

    fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or_else(|| {
            self.tokens.last().expect("tokens should have at least EOF")
        })
    }

    fn peek(&self) -> TokenKind {
        self.current().kind
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == kind
    }

    fn consume(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::unexpected(
                kind.describe(),
                self.peek(),
                self.current().span,
            ))
        }
    }

    fn span(&self) -> Span {
        self.current().span
    }

    fn node(&self, kind: NodeKind, span: Span) -> Node {
        let (line, col) = self.lines.position(span.start);
        Node::new(kind, span, line, col)
    }

    // === File ===

    pub fn parse_file(&mut self) -> Result<Node, ParseError> {
        let start = self.span();
        let mut statements = Vec::new();

        while !self.at(TokenKind::Eof) {
            let call = self.parse_call()?;
            if let Some(name) = terminator_name(&call) {
                return Err(ParseError::UnmatchedTerminator {
                    name: name.to_string(),
                    span: call.span,
                });
            }
            statements.push(self.parse_statement(call)?);
        }

        let end = self.span();
        Ok(self.node(
            NodeKind::ToplevelBody(ToplevelBody { statements }),
            start.merge(end),
        ))
    }

    // === Statements ===

    /// Turn an already-parsed command invocation into its statement node,
    /// consuming the rest of the block when the command opens one.
    fn parse_statement(&mut self, call: Node) -> Result<Node, ParseError> {
        ensure_sufficient_stack(|| self.parse_statement_inner(call))
    }

    fn parse_statement_inner(&mut self, call: Node) -> Result<Node, ParseError> {
        let name = match call.as_function_call() {
            Some(function_call) => function_call.name.to_ascii_lowercase(),
            None => return Ok(call),
        };

        match name.as_str() {
            "if" => self.parse_if_block(call),
            "while" => self.parse_block(call, "endwhile", NodeKind::WhileStatement),
            "foreach" => self.parse_block(call, "endforeach", NodeKind::ForeachStatement),
            "function" => self.parse_block(call, "endfunction", NodeKind::FunctionDefinition),
            "macro" => self.parse_block(call, "endmacro", NodeKind::MacroDefinition),
            "include" => self.make_include(call),
            _ => Ok(call),
        }
    }

    /// Parse statements up to one of `closers`, returning the body and the
    /// closing invocation.
    fn parse_body(
        &mut self,
        opener: &Node,
        closers: &[&'static str],
    ) -> Result<(Vec<Node>, Node), ParseError> {
        let mut body = Vec::new();

        loop {
            if self.at(TokenKind::Eof) {
                let opener_name = opener
                    .as_function_call()
                    .map(|c| c.name.clone())
                    .unwrap_or_default();
                return Err(ParseError::UnclosedBlock {
                    opener: opener_name,
                    terminator: closers[closers.len() - 1],
                    span: opener.span,
                });
            }

            let call = self.parse_call()?;
            match terminator_name(&call) {
                Some(name) if closers.contains(&name) => return Ok((body, call)),
                Some(name) => {
                    return Err(ParseError::UnmatchedTerminator {
                        name: name.to_string(),
                        span: call.span,
                    })
                }
                None => body.push(self.parse_statement(call)?),
            }
        }
    }

    fn parse_block(
        &mut self,
        header: Node,
        closer: &'static str,
        make: fn(BlockStatement) -> NodeKind,
    ) -> Result<Node, ParseError> {
        let (body, footer) = self.parse_body(&header, &[closer])?;
        let span = header.span.merge(footer.span);

        Ok(self.node(
            make(BlockStatement {
                header: Box::new(header),
                body,
                footer: Box::new(footer),
            }),
            span,
        ))
    }

    fn parse_if_block(&mut self, header: Node) -> Result<Node, ParseError> {
        let (body, mut next) = self.parse_body(&header, &["elseif", "else", "endif"])?;
        let if_statement = self.make_clause(header, body, NodeKind::IfStatement);

        let mut elseif_statements = Vec::new();
        while terminator_name(&next) == Some("elseif") {
            let (body, following) = self.parse_body(&next, &["elseif", "else", "endif"])?;
            elseif_statements.push(self.make_clause(next, body, NodeKind::ElseIfStatement));
            next = following;
        }

        let mut else_statement = None;
        if terminator_name(&next) == Some("else") {
            let (body, following) = self.parse_body(&next, &["endif"])?;
            else_statement = Some(Box::new(self.make_clause(
                next,
                body,
                NodeKind::ElseStatement,
            )));
            next = following;
        }

        let span = if_statement.span.merge(next.span);
        Ok(self.node(
            NodeKind::IfBlock(IfBlock {
                if_statement: Box::new(if_statement),
                elseif_statements,
                else_statement,
                footer: Box::new(next),
            }),
            span,
        ))
    }

    fn make_clause(&self, header: Node, body: Vec<Node>, make: fn(Clause) -> NodeKind) -> Node {
        let span = body
            .last()
            .map_or(header.span, |last| header.span.merge(last.span));
        self.node(
            make(Clause {
                header: Box::new(header),
                body,
            }),
            span,
        )
    }

    fn make_include(&self, call: Node) -> Result<Node, ParseError> {
        let span = call.span;
        let arguments = match call.kind {
            NodeKind::FunctionCall(function_call) => function_call.arguments,
            _ => Vec::new(),
        };

        let mut words = arguments
            .into_iter()
            .filter_map(|node| match node.kind {
                NodeKind::Word(word) => Some(word.contents),
                _ => None,
            });
        let filename = words.next().ok_or(ParseError::EmptyInclude { span })?;

        Ok(self.node(
            NodeKind::Include(Include {
                filename,
                options: words.collect(),
            }),
            span,
        ))
    }

    // === Command invocations ===

    fn parse_call(&mut self) -> Result<Node, ParseError> {
        let start = self.span();
        let name_token = self.consume(TokenKind::Unquoted)?;
        let name = name_token.text(self.source).to_string();
        self.consume(TokenKind::LParen)?;

        let mut arguments = Vec::new();
        let mut nesting = 0usize;

        loop {
            let token = self.current().clone();
            match token.kind {
                TokenKind::RParen if nesting == 0 => break,
                TokenKind::LParen | TokenKind::RParen => {
                    if token.kind == TokenKind::LParen {
                        nesting += 1;
                    } else {
                        nesting -= 1;
                    }
                    let word = Word {
                        word_type: WordType::Unquoted,
                        contents: token.text(self.source).to_string(),
                    };
                    arguments.push(self.node(NodeKind::Word(word), token.span));
                    self.advance();
                }
                kind if kind.is_argument() => {
                    arguments.push(self.parse_argument(&token));
                    self.advance();
                }
                TokenKind::Eof => return Err(ParseError::UnexpectedEof { span: token.span }),
                kind => return Err(ParseError::unexpected("argument or ')'", kind, token.span)),
            }
        }

        let end = self.consume(TokenKind::RParen)?.span;
        Ok(self.node(
            NodeKind::FunctionCall(FunctionCall { name, arguments }),
            start.merge(end),
        ))
    }

    fn parse_argument(&self, token: &Token) -> Node {
        let text = token.text(self.source);
        let word = match token.kind {
            TokenKind::Quoted => Word {
                word_type: WordType::Quoted,
                contents: text[1..text.len() - 1].to_string(),
            },
            TokenKind::Bracket => Word {
                word_type: WordType::Bracket,
                contents: text[2..text.len() - 2].to_string(),
            },
            _ => Word {
                word_type: WordType::classify_unquoted(text),
                contents: text.to_string(),
            },
        };
        self.node(NodeKind::Word(word), token.span)
    }
}

/// The lowercase terminator name if `node` is a block-closing invocation
fn terminator_name(node: &Node) -> Option<&'static str> {
    let call = node.as_function_call()?;
    TERMINATORS.iter().copied().find(|t| call.is_named(t))
}
