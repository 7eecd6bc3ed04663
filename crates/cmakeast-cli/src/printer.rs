//! Tree dump: one line per visited node

use std::cell::RefCell;

use cmakeast_ast::{Kind, Node, NodeKind};
use cmakeast_visitor::{HandlerKey, Handlers};

/// `"{depth}{indent} {Kind} ({line}:{col})"`, plus ` [detail]` for calls,
/// includes and words
pub fn format_node(kind: Kind, node: &Node, depth: usize) -> String {
    let mut line = format!(
        "{}{} {} ({}:{})",
        depth,
        " ".repeat(depth),
        kind,
        node.line,
        node.col
    );
    if let Some(detail) = detail(node) {
        line.push_str(&format!(" [{}]", detail));
    }
    line
}

fn detail(node: &Node) -> Option<String> {
    match &node.kind {
        NodeKind::FunctionCall(call) => Some(call.name.clone()),
        NodeKind::Include(include) => Some(include.filename.clone()),
        NodeKind::Word(word) => Some(format!("{} {}", word.word_type.name(), word.contents)),
        _ => None,
    }
}

/// Handlers appending a formatted line to `lines` for each key in `keys`
pub fn dump_handlers<'h>(lines: &'h RefCell<Vec<String>>, keys: &[HandlerKey]) -> Handlers<'h> {
    let mut handlers = Handlers::new();
    for &key in keys {
        handlers.set(key, move |node, visit| {
            lines
                .borrow_mut()
                .push(format_node(visit.kind, node, visit.depth));
        });
    }
    handlers
}

/// Every key except the root's, matching the classic dump
pub fn default_keys() -> Vec<HandlerKey> {
    HandlerKey::ALL
        .into_iter()
        .filter(|key| *key != HandlerKey::Toplevel)
        .collect()
}
