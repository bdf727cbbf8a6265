use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwitchError {
    #[error("configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("hook error: {0}")]
    Hook(String),

    #[error("window query failed: {0}")]
    WindowQuery(String),

    #[error("activation step failed: {0}")]
    Activation(String),

    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, SwitchError>;
