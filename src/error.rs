// src/error.rs

use thiserror::Error;

use crate::entity::EntityType;

/// Rejections a simulated provider call can return. These mirror how the
/// provider itself rejects a request and are recoverable by the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    #[error("No such token: {0}")]
    NoSuchToken(String),

    #[error("Invalid {param}: {reason}")]
    InvalidParam { param: String, reason: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("no resident {0} resource; call configure() first")]
    NotConfigured(EntityType),
}

impl ProviderError {
    pub fn invalid_param(param: &str, reason: impl Into<String>) -> Self {
        ProviderError::InvalidParam {
            param: param.to_string(),
            reason: reason.into(),
        }
    }
}

/// Harness misconfiguration. Not meant to be recovered from: a test that hits
/// one of these is set up wrong.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HarnessError {
    #[error("BAD MOCK: no trim fields set for {0}")]
    MissingTrimFields(EntityType),

    #[error("{0} is not registered with the harness")]
    Unregistered(EntityType),

    #[error("special handler `{field}` belongs to {owner}, cannot register it on {entity}")]
    HandlerMismatch {
        field: &'static str,
        owner: EntityType,
        entity: EntityType,
    },

    #[error("special handler `{field}` registered twice on {entity}")]
    DuplicateHandler { field: &'static str, entity: EntityType },
}
