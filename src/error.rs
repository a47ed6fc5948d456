use thiserror::Error;

use crate::model::TypeId;

/// Failure while converting an entity to text: the semantic model handed
/// over something no declaration header exists for.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmbienceError {
    #[error("internal inconsistency: {0}")]
    InternalInconsistency(String),
}

/// Failure while loading a semantic-model snapshot.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid model JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("declaring type {0:?} is not part of this project")]
    UnknownDeclaringType(TypeId),

    #[error("duplicate type definition: {0}")]
    DuplicateType(String),

    #[error("invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown conversion flag: {0}")]
pub struct ParseFlagsError(pub String);

pub type Result<T> = std::result::Result<T, AmbienceError>;
