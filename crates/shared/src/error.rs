use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown propagation model: {0}")]
pub struct UnknownModel(pub String);
