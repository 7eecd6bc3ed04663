//! Handler table: one optional callback per handler key

use cmakeast_ast::{Kind, Node};

use crate::{Diagnostics, HandlerKey, SymbolTable, UnknownHandlerKey};

/// Everything a handler sees besides the node itself
pub struct Visit<'a> {
    pub kind: Kind,
    /// Distance from the traversal root (root is 0)
    pub depth: usize,
    pub symbols: &'a mut SymbolTable,
    pub diagnostics: &'a mut Diagnostics,
}

/// A callback fired when the walk reaches a node of its kind.
///
/// The node may be mutated in place; the walk continues into whatever
/// children the node holds after the handler returns.
pub type Handler<'h> = Box<dyn FnMut(&mut Node, &mut Visit<'_>) + 'h>;

/// Callbacks keyed by [`HandlerKey`]. Keys with no callback are no-ops.
pub struct Handlers<'h> {
    table: [Option<Handler<'h>>; HandlerKey::ALL.len()],
}

impl<'h> Handlers<'h> {
    /// A table where every key is a no-op
    pub fn new() -> Self {
        Self {
            table: std::array::from_fn(|_| None),
        }
    }

    /// Register `handler` for `key`, replacing any previous one
    pub fn on<F>(mut self, key: HandlerKey, handler: F) -> Self
    where
        F: FnMut(&mut Node, &mut Visit<'_>) + 'h,
    {
        self.set(key, handler);
        self
    }

    /// Register `handler` under a handler key name such as `"include"`
    pub fn on_named<F>(mut self, name: &str, handler: F) -> Result<Self, UnknownHandlerKey>
    where
        F: FnMut(&mut Node, &mut Visit<'_>) + 'h,
    {
        let key = name.parse::<HandlerKey>()?;
        self.set(key, handler);
        Ok(self)
    }

    pub fn set<F>(&mut self, key: HandlerKey, handler: F)
    where
        F: FnMut(&mut Node, &mut Visit<'_>) + 'h,
    {
        self.table[key.index()] = Some(Box::new(handler));
    }

    pub fn is_registered(&self, key: HandlerKey) -> bool {
        self.table[key.index()].is_some()
    }

    /// Invoke the handler for `key`, if any. Returns whether one ran.
    pub(crate) fn dispatch(&mut self, key: HandlerKey, node: &mut Node, visit: &mut Visit<'_>) -> bool {
        match &mut self.table[key.index()] {
            Some(handler) => {
                tracing::trace!(handler = %key, kind = %visit.kind, depth = visit.depth, "dispatch");
                handler(node, visit);
                true
            }
            None => false,
        }
    }
}

impl Default for Handlers<'_> {
    fn default() -> Self {
        Self::new()
    }
}
