//! Error types for the AIS/camera correlation library

use thiserror::Error;

/// Result type alias for the correlation library
pub type Result<T> = std::result::Result<T, MatchError>;

/// Errors that can occur when setting up a correlator
#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Invalid camera intrinsics: {0}")]
    InvalidIntrinsics(String),

    #[error("Invalid correlation configuration: {0}")]
    InvalidConfig(String),
}

impl MatchError {
    pub fn intrinsics<S: Into<String>>(msg: S) -> Self {
        Self::InvalidIntrinsics(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
