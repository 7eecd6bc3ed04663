//! Error types for handler registration

use thiserror::Error;

/// A handler was registered under a name no schema entry uses
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown handler key: `{name}`")]
pub struct UnknownHandlerKey {
    pub name: String,
}
