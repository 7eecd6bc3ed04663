//! Flat macro symbol table threaded through one traversal

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Macro name to current value.
///
/// No scoping: every definition is visible to all nodes visited after it.
/// Redefinition overwrites the value in place, so iteration order is the
/// order of first definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTable {
    symbols: IndexMap<String, String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`, returning the value it replaced
    pub fn define(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.symbols.insert(name.into(), value.into())
    }

    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.symbols.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.symbols.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SymbolTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = SymbolTable::new();
        for (name, value) in iter {
            table.define(name, value);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let mut table = SymbolTable::new();
        assert_eq!(table.define("A", "1"), None);
        assert_eq!(table.define("A", "2"), Some("1".to_string()));
        table.define("B", "3");

        assert_eq!(table.lookup("A"), Some("2"));
        assert_eq!(table.lookup("B"), Some("3"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_redefinition_keeps_position() {
        let mut table: SymbolTable = [("A", "1"), ("B", "2")].into_iter().collect();
        table.define("A", "3");

        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![("A", "3"), ("B", "2")]);
    }

    #[test]
    fn test_undefined() {
        let table = SymbolTable::new();
        assert!(table.is_empty());
        assert_eq!(table.lookup("A"), None);
        assert!(!table.contains("A"));
    }
}
