use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Input schema error: {0}")]
    InputSchema(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
