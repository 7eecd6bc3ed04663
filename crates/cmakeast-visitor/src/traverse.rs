//! Depth-first pre-order walk driven by the schema

use cmakeast_ast::Node;
use cmakeast_stack::ensure_sufficient_stack;

use crate::{schema, Diagnostic, Diagnostics, Handlers, SymbolTable, Visit};

/// State threaded through one walk
struct Walker<'h> {
    handlers: Handlers<'h>,
    symbols: SymbolTable,
    diagnostics: Diagnostics,
}

impl Walker<'_> {
    fn walk(&mut self, node: &mut Node, depth: usize) {
        ensure_sufficient_stack(|| self.walk_node(node, depth))
    }

    fn walk_node(&mut self, node: &mut Node, depth: usize) {
        // Unknown kinds hide their whole subtree, registered descendants included.
        let Some((kind, entry)) = schema::lookup(node) else {
            self.diagnostics.report(Diagnostic::UnrecognizedNode {
                tag: node.tag(),
                span: node.span,
            });
            return;
        };

        let mut visit = Visit {
            kind,
            depth,
            symbols: &mut self.symbols,
            diagnostics: &mut self.diagnostics,
        };
        self.handlers.dispatch(entry.handler, node, &mut visit);

        for &field in entry.single {
            if let Some(child) = node.child_mut(field) {
                self.walk(child, depth + 1);
            }
        }

        for &field in entry.multi {
            for child in node.children_mut(field) {
                self.walk(child, depth + 1);
            }
        }
    }
}

/// Result of a completed walk
#[derive(Debug, Clone, Default)]
pub struct TraversalResult {
    /// The symbol table as left by the last handler
    pub symbols: SymbolTable,
    /// Empty unless the traversal was strict
    pub diagnostics: Vec<Diagnostic>,
}

/// A configured walk over one tree
pub struct Traversal<'h> {
    handlers: Handlers<'h>,
    symbols: SymbolTable,
    strict: bool,
}

impl<'h> Traversal<'h> {
    pub fn new(handlers: Handlers<'h>) -> Self {
        Self {
            handlers,
            symbols: SymbolTable::new(),
            strict: false,
        }
    }

    /// Seed the symbol table the walk starts from
    pub fn with_symbols(mut self, symbols: SymbolTable) -> Self {
        self.symbols = symbols;
        self
    }

    /// Record tolerated conditions instead of discarding them.
    /// Does not change what the walk does.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Walk `root` at depth 0
    pub fn run(self, root: &mut Node) -> TraversalResult {
        let diagnostics = if self.strict {
            Diagnostics::collecting()
        } else {
            Diagnostics::silent()
        };
        let mut walker = Walker {
            handlers: self.handlers,
            symbols: self.symbols,
            diagnostics,
        };

        walker.walk(root, 0);

        TraversalResult {
            symbols: walker.symbols,
            diagnostics: walker.diagnostics.into_records(),
        }
    }
}

/// Walk `root` with `handlers`, starting from `symbols`, and return the
/// final symbol table.
pub fn recurse(root: &mut Node, symbols: SymbolTable, handlers: Handlers<'_>) -> SymbolTable {
    Traversal::new(handlers).with_symbols(symbols).run(root).symbols
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HandlerKey;
    use cmakeast_ast::{FunctionCall, Kind, NodeKind, Span, ToplevelBody, Word, WordType};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    fn node(kind: NodeKind) -> Node {
        Node::new(kind, Span::dummy(), 1, 1)
    }

    fn word(text: &str) -> Node {
        node(NodeKind::Word(Word {
            word_type: WordType::Unquoted,
            contents: text.to_string(),
        }))
    }

    fn call(name: &str, arguments: Vec<Node>) -> Node {
        node(NodeKind::FunctionCall(FunctionCall {
            name: name.to_string(),
            arguments,
        }))
    }

    fn toplevel(statements: Vec<Node>) -> Node {
        node(NodeKind::ToplevelBody(ToplevelBody { statements }))
    }

    #[test]
    fn test_depths() {
        let depths = RefCell::new(Vec::new());
        let handlers = Handlers::new()
            .on(HandlerKey::Toplevel, |_, v| depths.borrow_mut().push((v.kind, v.depth)))
            .on(HandlerKey::FunctionCall, |_, v| depths.borrow_mut().push((v.kind, v.depth)))
            .on(HandlerKey::Word, |_, v| depths.borrow_mut().push((v.kind, v.depth)));

        let mut root = toplevel(vec![call("message", vec![word("hi")])]);
        recurse(&mut root, SymbolTable::new(), handlers);

        assert_eq!(
            depths.into_inner(),
            vec![
                (Kind::ToplevelBody, 0),
                (Kind::FunctionCall, 1),
                (Kind::Word, 2),
            ]
        );
    }

    #[test]
    fn test_handler_sees_table_left_by_previous_handler() {
        let seen = RefCell::new(Vec::new());
        let handlers = Handlers::new()
            .on(HandlerKey::FunctionCall, |node, v| {
                if let Some(call) = node.as_function_call() {
                    v.symbols.define(call.name.clone(), "seen");
                }
            })
            .on(HandlerKey::Word, |node, v| {
                let name = &node.as_word().unwrap().contents;
                seen.borrow_mut().push(v.symbols.lookup(name).map(str::to_string));
            });

        let mut root = toplevel(vec![
            call("first", vec![word("second")]),
            call("second", vec![word("second")]),
        ]);
        let symbols = recurse(&mut root, SymbolTable::new(), handlers);

        assert_eq!(seen.into_inner(), vec![None, Some("seen".to_string())]);
        assert_eq!(symbols.len(), 2);
    }

    #[test]
    fn test_seeded_symbols_are_visible() {
        let seen = RefCell::new(None);
        let handlers = Handlers::new().on(HandlerKey::Toplevel, |_, v| {
            *seen.borrow_mut() = v.symbols.lookup("ROOT").map(str::to_string);
        });

        let seed: SymbolTable = [("ROOT", "/src")].into_iter().collect();
        let mut root = toplevel(Vec::new());
        recurse(&mut root, seed, handlers);

        assert_eq!(seen.into_inner(), Some("/src".to_string()));
    }

    #[test]
    fn test_handler_mutation_changes_walked_children() {
        let words = RefCell::new(0);
        let handlers = Handlers::new()
            .on(HandlerKey::FunctionCall, |node, _| {
                if let NodeKind::FunctionCall(call) = &mut node.kind {
                    call.arguments.clear();
                }
            })
            .on(HandlerKey::Word, |_, _| *words.borrow_mut() += 1);

        let mut root = toplevel(vec![call("message", vec![word("a"), word("b")])]);
        recurse(&mut root, SymbolTable::new(), handlers);

        assert_eq!(words.into_inner(), 0);
    }

    #[test]
    fn test_unrecognized_node_silent_by_default() {
        let unknown = node(NodeKind::Unrecognized(serde_json::json!({ "BlockScope": {} })));
        let mut root = toplevel(vec![unknown]);

        let result = Traversal::new(Handlers::new()).run(&mut root);
        assert!(result.diagnostics.is_empty());

        let result = Traversal::new(Handlers::new()).strict(true).run(&mut root);
        assert_eq!(
            result.diagnostics,
            vec![Diagnostic::UnrecognizedNode {
                tag: "BlockScope".to_string(),
                span: Span::dummy(),
            }]
        );
    }
}
