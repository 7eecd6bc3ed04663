//! Traversal order and dispatch tests

use std::cell::RefCell;
use std::collections::HashMap;

use cmakeast_ast::{Field, FunctionCall, Kind, Node, NodeKind, Span, ToplevelBody};
use cmakeast_parser::parse;
use cmakeast_visitor::{recurse, schema, HandlerKey, Handlers, SymbolTable, Traversal};
use pretty_assertions::assert_eq;

/// Handlers that log `(kind, label)` for every node kind
fn recording<'h>(log: &'h RefCell<Vec<(Kind, String)>>) -> Handlers<'h> {
    let mut handlers = Handlers::new();
    for key in HandlerKey::ALL {
        handlers.set(key, move |node, visit| {
            log.borrow_mut().push((visit.kind, label(node)));
        });
    }
    handlers
}

fn label(node: &Node) -> String {
    match &node.kind {
        NodeKind::FunctionCall(call) => call.name.clone(),
        NodeKind::Word(word) => word.contents.clone(),
        NodeKind::Include(include) => include.filename.clone(),
        _ => String::new(),
    }
}

fn walk_labels(source: &str) -> Vec<(Kind, String)> {
    let log = RefCell::new(Vec::new());
    let mut root = parse(source).expect("fixture should parse");
    recurse(&mut root, SymbolTable::new(), recording(&log));
    log.into_inner()
}

/// Occurrences of each kind reachable through the schema
fn count_kinds(node: &Node, counts: &mut HashMap<Kind, usize>) {
    let Some((kind, entry)) = schema::lookup(node) else {
        return;
    };
    *counts.entry(kind).or_default() += 1;
    for &field in entry.single {
        if let Some(child) = node.child(field) {
            count_kinds(child, counts);
        }
    }
    for &field in entry.multi {
        for child in node.children(field) {
            count_kinds(child, counts);
        }
    }
}

#[test]
fn every_node_dispatched_once_to_its_own_kind() {
    let source = r#"
set(A 1)
include(a.cmake)
if(A)
  message(yes)
elseif(B)
  message(maybe)
else()
  message(no)
endif()
while(x)
  message(loop)
endwhile()
foreach(i a b)
endforeach()
function(f)
endfunction()
macro(m)
endmacro()
"#;
    let mut root = parse(source).unwrap();

    let mut expected = HashMap::new();
    count_kinds(&root, &mut expected);
    for kind in Kind::ALL {
        assert!(expected.contains_key(&kind), "fixture lacks {}", kind);
    }

    let fired = RefCell::new(Vec::new());
    let mut handlers = Handlers::new();
    for key in HandlerKey::ALL {
        let fired = &fired;
        handlers.set(key, move |_, visit| fired.borrow_mut().push((key, visit.kind)));
    }
    recurse(&mut root, SymbolTable::new(), handlers);

    let mut actual: HashMap<Kind, usize> = HashMap::new();
    for (key, kind) in fired.into_inner() {
        assert_eq!(schema::schema(kind).handler, key, "{} fired under {}", kind, key);
        *actual.entry(kind).or_default() += 1;
    }
    assert_eq!(actual, expected);
}

#[test]
fn only_registered_kind_fires() {
    let calls = RefCell::new(Vec::new());
    let handlers = Handlers::new().on(HandlerKey::FunctionCall, |node, visit| {
        assert_eq!(visit.kind, Kind::FunctionCall);
        calls.borrow_mut().push(label(node));
    });

    let mut root = parse("set(A 1)\nwhile(x)\n  message(m)\nendwhile()\n").unwrap();
    recurse(&mut root, SymbolTable::new(), handlers);

    assert_eq!(calls.into_inner(), vec!["set", "while", "endwhile", "message"]);
}

#[test]
fn block_visits_header_and_footer_before_body() {
    let visited = walk_labels("foreach(x a)\n  message(m)\nendforeach()\n");
    let calls: Vec<_> = visited
        .iter()
        .filter(|(k, _)| *k == Kind::FunctionCall)
        .map(|(_, l)| l.as_str())
        .collect();

    assert_eq!(calls, vec!["foreach", "endforeach", "message"]);
}

#[test]
fn if_block_field_order() {
    let source = r#"
if(c1)
  in_if()
elseif(c2)
  in_elseif1()
elseif(c3)
  in_elseif2()
else()
  in_else()
endif()
"#;
    let visited = walk_labels(source);
    let calls: Vec<_> = visited
        .iter()
        .filter(|(k, _)| *k == Kind::FunctionCall)
        .map(|(_, l)| l.as_str())
        .collect();

    // single fields (if, else, footer) first, then the elseif sequence
    assert_eq!(
        calls,
        vec![
            "if",
            "in_if",
            "else",
            "in_else",
            "endif",
            "elseif",
            "in_elseif1",
            "elseif",
            "in_elseif2",
        ]
    );
}

#[test]
fn missing_else_is_skipped() {
    let visited = walk_labels("if(c)\nendif()\n");
    let kinds: Vec<_> = visited.iter().map(|(k, _)| *k).collect();

    assert!(!kinds.contains(&Kind::ElseStatement));
    assert_eq!(
        kinds,
        vec![
            Kind::ToplevelBody,
            Kind::IfBlock,
            Kind::IfStatement,
            Kind::FunctionCall,
            Kind::Word,
            Kind::FunctionCall,
        ]
    );
}

#[test]
fn handler_fires_before_descendants() {
    let visited = walk_labels("function(f)\n  if(x)\n    set(A 1)\n  endif()\nendfunction()\n");
    let position = |kind: Kind| visited.iter().position(|(k, _)| *k == kind).unwrap();

    assert_eq!(position(Kind::ToplevelBody), 0);
    assert!(position(Kind::FunctionDefinition) < position(Kind::IfBlock));
    assert!(position(Kind::IfBlock) < position(Kind::IfStatement));
    let set_index = visited.iter().position(|(_, l)| l == "set").unwrap();
    assert!(position(Kind::IfStatement) < set_index);
    let one_index = visited.iter().position(|(_, l)| l == "1").unwrap();
    assert!(set_index < one_index);
}

#[test]
fn unrecognized_kind_hides_registered_descendants() {
    let include = parse("include(hidden.cmake)").unwrap();
    let hidden = include.children(Field::Statements)[0].clone();
    let unknown = Node::new(
        NodeKind::Unrecognized(serde_json::json!({
            "BlockScope": { "body": [serde_json::to_value(&hidden).unwrap()] }
        })),
        Span::dummy(),
        1,
        1,
    );
    let visible = Node::new(
        NodeKind::FunctionCall(FunctionCall {
            name: "message".to_string(),
            arguments: Vec::new(),
        }),
        Span::dummy(),
        2,
        1,
    );
    let mut root = Node::new(
        NodeKind::ToplevelBody(ToplevelBody {
            statements: vec![unknown, visible],
        }),
        Span::dummy(),
        1,
        1,
    );

    let log = RefCell::new(Vec::new());
    let result = Traversal::new(recording(&log)).strict(true).run(&mut root);

    assert_eq!(
        log.into_inner(),
        vec![
            (Kind::ToplevelBody, String::new()),
            (Kind::FunctionCall, "message".to_string()),
        ]
    );
    assert_eq!(result.diagnostics.len(), 1);
}

#[test]
fn unrecognized_root_fires_nothing() {
    let mut root = Node::new(
        NodeKind::Unrecognized(serde_json::json!({ "Future": {} })),
        Span::dummy(),
        1,
        1,
    );
    let log = RefCell::new(Vec::new());
    recurse(&mut root, SymbolTable::new(), recording(&log));
    assert!(log.into_inner().is_empty());
}

#[test]
fn deeply_nested_tree_does_not_overflow() {
    let depth = 1_000;
    let mut source = String::new();
    for _ in 0..depth {
        source.push_str("if(x)\n");
    }
    source.push_str("set(DEEP yes)\n");
    for _ in 0..depth {
        source.push_str("endif()\n");
    }

    let max_depth = RefCell::new(0);
    let handlers = Handlers::new().on(HandlerKey::Word, |_, visit| {
        let mut max = max_depth.borrow_mut();
        *max = (*max).max(visit.depth);
    });

    let mut root = parse(&source).unwrap();
    recurse(&mut root, SymbolTable::new(), handlers);

    // toplevel -> (IfBlock -> IfStatement) * depth -> call -> word
    assert_eq!(max_depth.into_inner(), 2 * depth + 2);
}
