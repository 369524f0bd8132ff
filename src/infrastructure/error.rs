//! Infrastructure-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;

#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Writing a rendered document or draw list to its sink failed.
    #[error("cannot write {target}")]
    Output {
        target: String,
        #[source]
        source: std::io::Error,
    },
}

impl InfraError {
    pub fn output(target: impl Into<String>, source: std::io::Error) -> Self {
        Self::Output {
            target: target.into(),
            source,
        }
    }
}

pub type InfraResult<T> = Result<T, InfraError>;
