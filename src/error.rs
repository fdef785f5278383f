use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvolverError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Worker pool error: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, EvolverError>;
