use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShopError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("{operation} timed out after {secs}s")]
    Timeout { operation: &'static str, secs: u64 },
}
