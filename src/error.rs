use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("cluster resource carries no shoot manifest")]
    MissingShoot,

    #[error("unexpected resource kind: {0}")]
    UnexpectedKind(String),
}

/// Short alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
