use thiserror::Error;

use crate::domain::RuleId;

#[derive(Debug, Error)]
pub enum MappingError {
    #[error("malformed mapping json: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("unknown mapping rule '{0}'")]
    UnknownRule(RuleId),
    #[error("duplicate mapping rule id '{0}'")]
    DuplicateRule(RuleId),
    #[error("invalid rule document: {0}")]
    InvalidDocument(String),
}

impl MappingError {
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument(message.into())
    }
}
