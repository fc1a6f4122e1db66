// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScanError {
    #[error("request throttled: {0}")]
    Throttled(String),
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("api error: {0}")]
    Api(String),
    #[error("max retry attempts reached ({attempts}): {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },
    #[error("configuration error: {0}")]
    ConfigError(String),
    #[error("validation error: {0}")]
    ValidationError(String),
    #[error("io error: {0}")]
    IoError(String),
    #[error("report error: {0}")]
    ReportError(String),
}

impl ScanError {
    /// Only rate limiting is worth retrying; everything else fails the call chain.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Throttled(_))
    }
}

impl From<std::io::Error> for ScanError {
    fn from(source: std::io::Error) -> Self {
        tracing::error!("{:?}", source);
        ScanError::IoError(source.to_string())
    }
}

impl From<csv::Error> for ScanError {
    fn from(source: csv::Error) -> Self {
        tracing::error!("{:?}", source);
        ScanError::ReportError(source.to_string())
    }
}
