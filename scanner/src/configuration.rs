// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use std::path::PathBuf;
use std::str::FromStr;

use clap::{ArgAction, Parser, ValueEnum};

use crate::constants::{DEFAULT_MAX_ATTEMPTS, MAX_CONCURRENCY, MAX_REGION_LENGTH, RETRY_BASE_DELAY};
use crate::errors::ScanError;
use crate::pagination::RetryPolicy;
use crate::scanner::ScanSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanType {
    Instances,
    Clusters,
    Both,
}

impl ScanType {
    pub fn includes_instances(&self) -> bool {
        matches!(self, Self::Instances | Self::Both)
    }

    pub fn includes_clusters(&self) -> bool {
        matches!(self, Self::Clusters | Self::Both)
    }
}

impl FromStr for ScanType {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::Instances),
            "2" => Ok(Self::Clusters),
            "3" => Ok(Self::Both),
            other => Err(ScanError::ValidationError(format!(
                "invalid scan type {other:?}, expected 1, 2 or 3"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct ScannerOptions {
    #[arg(long, env("AWS_ACCESS_KEY_ID"), hide_env_values = true)]
    pub access_key_id: Option<String>,
    #[arg(long, env("AWS_SECRET_ACCESS_KEY"), hide_env_values = true)]
    pub secret_access_key: Option<String>,
    #[arg(long, env("AWS_SESSION_TOKEN"), hide_env_values = true)]
    pub session_token: Option<String>,
    #[arg(long, env("AWS_REGION"))]
    pub region: Option<String>,
    /// 1 = DB instances, 2 = DB clusters, 3 = both
    #[arg(long, env("SCANNER_SCAN_TYPE"))]
    pub scan_type: Option<String>,
    #[arg(long, default_value = ".", env("SCANNER_OUTPUT_DIR"))]
    pub output_dir: PathBuf,
    #[arg(long, default_value = "1", env("SCANNER_CONCURRENCY"))]
    pub concurrency: usize,
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS, env("SCANNER_MAX_ATTEMPTS"))]
    pub max_attempts: u32,
    /// Use the default AWS credential chain instead of prompting for keys
    #[arg(long, default_value = "false", env("SCANNER_USE_DEFAULT_CREDENTIALS"), action = ArgAction::SetTrue)]
    pub use_default_credentials: bool,
    #[arg(long, value_enum, default_value_t = LogFormat::Text, env("SCANNER_LOG_FORMAT"))]
    pub log_format: LogFormat,
}

// Custom Debug implementation to prevent accidental logging of sensitive data
impl std::fmt::Debug for ScannerOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("ScannerOptions")
            .field("access_key_id", &redact(&self.access_key_id))
            .field("secret_access_key", &redact(&self.secret_access_key))
            .field("session_token", &redact(&self.session_token))
            .field("region", &self.region)
            .field("scan_type", &self.scan_type)
            .field("output_dir", &self.output_dir)
            .field("concurrency", &self.concurrency)
            .field("max_attempts", &self.max_attempts)
            .field("use_default_credentials", &self.use_default_credentials)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl Default for ScannerOptions {
    fn default() -> Self {
        ScannerOptions {
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
            region: None,
            scan_type: None,
            output_dir: PathBuf::from("."),
            concurrency: 1,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            use_default_credentials: false,
            log_format: LogFormat::Text,
        }
    }
}

impl ScannerOptions {
    /// Validates the tuning knobs and turns them into [`ScanSettings`].
    pub fn scan_settings(&self) -> Result<ScanSettings, ScanError> {
        if self.concurrency == 0 || self.concurrency > MAX_CONCURRENCY {
            return Err(ScanError::ValidationError(format!(
                "concurrency must be between 1 and {MAX_CONCURRENCY}"
            )));
        }
        if self.max_attempts == 0 {
            return Err(ScanError::ValidationError(
                "max attempts must be at least 1".to_string(),
            ));
        }

        Ok(ScanSettings {
            retry: RetryPolicy::new(self.max_attempts, RETRY_BASE_DELAY),
            concurrency: self.concurrency,
        })
    }
}

/// Validates AWS region format (e.g., "us-east-1", "eu-west-2", "us-gov-west-1")
/// Pattern: two lowercase letters, hyphen, lowercase letters, hyphen, digits
pub fn validate_aws_region(region: &str) -> Result<(), ScanError> {
    let invalid = || ScanError::ValidationError(format!("invalid AWS region {region:?}"));

    if region.is_empty() || region.len() > MAX_REGION_LENGTH {
        return Err(invalid());
    }

    let parts: Vec<&str> = region.split('-').collect();
    if parts.len() < 3 {
        return Err(invalid());
    }

    // First part: exactly 2 lowercase letters (e.g., "us", "eu", "ap")
    let first = parts[0];
    if first.len() != 2 || !first.chars().all(|c| c.is_ascii_lowercase()) {
        return Err(invalid());
    }

    // Middle parts: lowercase letters (e.g., "east", "west", "southeast")
    for part in &parts[1..parts.len() - 1] {
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(invalid());
        }
    }

    // Last part: digits (e.g., "1", "2")
    let last = parts[parts.len() - 1];
    if last.is_empty() || !last.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    Ok(())
}
