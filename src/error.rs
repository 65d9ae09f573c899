use thiserror::Error;

pub type Result<T> = std::result::Result<T, PayrollError>;

#[derive(Error, Debug)]
pub enum PayrollError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
    /// A refused administrative action. The targeted pay run is unchanged.
    #[error("{0}")]
    Action(String),
    #[error("Not found: {0}")]
    NotFound(String),
}
