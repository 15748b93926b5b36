use thiserror::Error;

use super::models::DiseaseId;

/// Errors that can occur while serving disease operations.
#[derive(Debug, Error)]
pub enum DiseaseError {
    #[error("invalid arguments: {0}")]
    Validation(String),
    #[error("disease not found: {0}")]
    NotFound(DiseaseId),
    #[error("unknown function: {0}")]
    UnknownFunction(String),
    #[error("{0} is a mutation and cannot be called as a query")]
    QueryCannotMutate(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl DiseaseError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

