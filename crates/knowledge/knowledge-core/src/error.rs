use thiserror::Error;

#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Property '{0}' is not a scalar or list of scalars")]
    InvalidProperty(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, KnowledgeError>;
