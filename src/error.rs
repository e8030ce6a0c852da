use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MatrixError>;

/// Errors raised while validating storage or resolving index expressions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    #[error("invalid shape type: '{found}'")]
    TypeShape { found: String },

    #[error("invalid storage type: '{found}'")]
    TypeStorage { found: String },

    #[error("invalid dimension: {reason}")]
    InvalidDimension { reason: String },

    #[error("invalid index type: {reason}")]
    InvalidIndexType { reason: String },

    #[error("matrix index out of range: {index} not in [-{bound}, {bound})")]
    IndexRange { index: isize, bound: usize },

    #[error("flat index out of range: {index} not in [0, {len})")]
    FlatIndexRange { index: usize, len: usize },

    #[error("slice step cannot be zero")]
    ZeroStep,
}

/// Coarse classification of [`MatrixError`], one entry per failure family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    TypeShape,
    TypeStorage,
    InvalidDimension,
    InvalidIndexType,
    IndexRange,
    ZeroStep,
}

impl MatrixError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatrixError::TypeShape { .. } => ErrorKind::TypeShape,
            MatrixError::TypeStorage { .. } => ErrorKind::TypeStorage,
            MatrixError::InvalidDimension { .. } => ErrorKind::InvalidDimension,
            MatrixError::InvalidIndexType { .. } => ErrorKind::InvalidIndexType,
            MatrixError::IndexRange { .. } | MatrixError::FlatIndexRange { .. } => {
                ErrorKind::IndexRange
            }
            MatrixError::ZeroStep => ErrorKind::ZeroStep,
        }
    }

    pub(crate) fn dimension(reason: impl fmt::Display) -> Self {
        MatrixError::InvalidDimension {
            reason: reason.to_string(),
        }
    }

    pub(crate) fn index_type(reason: impl fmt::Display) -> Self {
        MatrixError::InvalidIndexType {
            reason: reason.to_string(),
        }
    }
}
