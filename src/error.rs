// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::ErrorCode;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database is unavailable: {0}")]
    StoreUnavailable(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, ExchangeError>;

/// Body returned to callers for any failed operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEnvelope {
    pub message: String,
}

impl ExchangeError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        ExchangeError::InvalidInput(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ExchangeError::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        ExchangeError::Conflict(msg.into())
    }

    /// HTTP status carrying the error kind.
    pub fn status(&self) -> u16 {
        match self {
            ExchangeError::InvalidInput(_) => 400,
            ExchangeError::NotFound(_) => 404,
            ExchangeError::Conflict(_) => 409,
            ExchangeError::StoreUnavailable(_) => 500,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            ExchangeError::InvalidInput(_) => 2,
            ExchangeError::NotFound(_) => 3,
            ExchangeError::Conflict(_) => 4,
            ExchangeError::StoreUnavailable(_) => 5,
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            message: self.to_string(),
        }
    }

    /// Maps a failed insert, turning unique-constraint violations into `Conflict`.
    pub fn from_insert(err: rusqlite::Error, conflict_msg: impl Into<String>) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
                ExchangeError::Conflict(conflict_msg.into())
            }
            other => ExchangeError::StoreUnavailable(other),
        }
    }
}

/// Turns an expected `NotFound` into `None`, leaving every other error in place.
pub trait NotFoundExt<T> {
    fn found(self) -> Result<Option<T>>;
}

impl<T> NotFoundExt<T> for Result<T> {
    fn found(self) -> Result<Option<T>> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(ExchangeError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
