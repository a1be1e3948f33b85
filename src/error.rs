use thiserror::Error;

use crate::llm::LlmError;
use crate::output::OutputError;

#[derive(Error, Debug)]
pub enum AssessError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Language model error: {0}")]
    Llm(#[from] LlmError),

    #[error("{0}")]
    Output(#[from] OutputError),

    #[error("Stopped by user")]
    Stopped,
}

pub type Result<T> = std::result::Result<T, AssessError>;
