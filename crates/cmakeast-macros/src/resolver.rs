//! Macro resolution as one traversal

use cmakeast_ast::Node;
use cmakeast_visitor::{HandlerKey, Handlers, SymbolTable, Traversal, TraversalResult};

use crate::{define, substitute};

/// Settings for macro resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroConfig {
    /// Command whose two-argument form defines a macro, matched case-insensitively
    pub assignment_command: String,
}

impl Default for MacroConfig {
    fn default() -> Self {
        Self {
            assignment_command: "set".to_string(),
        }
    }
}

/// Resolves `${name}` in include filenames against assignments visited
/// earlier in the same walk.
///
/// A reference resolves only if its assignment comes first in traversal
/// order. Block structure gives no scoping.
#[derive(Debug, Clone, Default)]
pub struct MacroResolver {
    config: MacroConfig,
}

impl MacroResolver {
    pub fn new(config: MacroConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MacroConfig {
        &self.config
    }

    /// Handler table with definition on function calls and substitution on includes
    pub fn handlers(&self) -> Handlers<'_> {
        let command = self.config.assignment_command.as_str();
        Handlers::new()
            .on(HandlerKey::FunctionCall, move |node, visit| {
                define(command, node, visit)
            })
            .on(HandlerKey::Include, substitute)
    }

    /// Resolve macros in `root` in place, starting from `seed`
    pub fn resolve(&self, root: &mut Node, seed: SymbolTable, strict: bool) -> TraversalResult {
        Traversal::new(self.handlers())
            .with_symbols(seed)
            .strict(strict)
            .run(root)
    }
}
