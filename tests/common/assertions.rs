use std::cell::RefCell;

use cmakeast::ast::Node;
use cmakeast::visitor::{recurse, HandlerKey, Handlers, SymbolTable};

/// Include filenames in traversal order
pub fn include_filenames(root: &mut Node) -> Vec<String> {
    let filenames = RefCell::new(Vec::new());
    let handlers = Handlers::new().on(HandlerKey::Include, |node, _| {
        if let Some(include) = node.as_include() {
            filenames.borrow_mut().push(include.filename.clone());
        }
    });
    recurse(root, SymbolTable::new(), handlers);
    filenames.into_inner()
}

/// Assert the table holds exactly `expected`, in insertion order
pub fn assert_symbols(symbols: &SymbolTable, expected: &[(&str, &str)]) {
    let actual: Vec<(&str, &str)> = symbols.iter().collect();
    assert_eq!(actual, expected);
}
