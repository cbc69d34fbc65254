//! Errors raised at the pipeline boundary.

use thiserror::Error;

/// Errors from pipeline operations.
///
/// Every pipeline function is total for well-formed input, so the only
/// failure is an argument that would otherwise produce garbage output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl PipelineError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
