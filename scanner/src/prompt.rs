// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Interactive collection of whatever the command line did not supply.
//!
//! Prompts follow the order access key, secret key, session token, region,
//! scan type. The secret key is read without echo.

use std::io::{self, BufRead, Write};

use crate::configuration::{ScanType, ScannerOptions, validate_aws_region};
use crate::errors::ScanError;
use crate::models::StaticCredentials;

pub const SCAN_TYPE_PROMPT: &str = "Select Scan Type:\n1. DB Instances\n2. DB Clusters\n3. Both\nEnter your choice (1, 2, or 3):";

/// Everything needed to start a scan.
#[derive(Debug)]
pub struct ScanInputs {
    /// `None` means the default AWS credential chain.
    pub credentials: Option<StaticCredentials>,
    pub region: String,
    pub scan_type: ScanType,
}

/// Prints `prompt` and reads one line from `input`, without the line ending.
pub fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<String, ScanError> {
    write!(output, "{prompt} ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Fills the gaps in `options` from the terminal.
///
/// `read_secret` is called for the secret access key so it can be read
/// without echo.
pub fn collect_inputs<R, W, S>(
    options: &ScannerOptions,
    input: &mut R,
    output: &mut W,
    mut read_secret: S,
) -> Result<ScanInputs, ScanError>
where
    R: BufRead,
    W: Write,
    S: FnMut(&str) -> io::Result<String>,
{
    let credentials = if options.use_default_credentials {
        None
    } else {
        let prompted = options.access_key_id.is_none();

        let access_key_id = match &options.access_key_id {
            Some(key) => key.clone(),
            None => prompt_line(input, output, "Enter AWS Access Key ID:")?,
        };
        let secret_access_key = match &options.secret_access_key {
            Some(secret) => secret.clone(),
            None => read_secret("Enter AWS Secret Access Key: ")?,
        };
        let session_token = match &options.session_token {
            Some(token) => Some(token.clone()),
            None if prompted => Some(prompt_line(
                input,
                output,
                "Enter AWS Session Token (press Enter if not applicable):",
            )?),
            None => None,
        };

        if access_key_id.trim().is_empty() || secret_access_key.trim().is_empty() {
            return Err(ScanError::ValidationError(
                "access key id and secret access key are required".to_string(),
            ));
        }

        Some(StaticCredentials {
            access_key_id: access_key_id.trim().to_string(),
            secret_access_key: secret_access_key.trim().to_string(),
            session_token: session_token
                .map(|token| token.trim().to_string())
                .filter(|token| !token.is_empty()),
        })
    };

    let region = match &options.region {
        Some(region) => region.clone(),
        None => prompt_line(input, output, "Enter AWS Region:")?,
    };
    let region = region.trim().to_string();
    validate_aws_region(&region)?;

    let scan_type = match &options.scan_type {
        Some(scan_type) => scan_type.parse()?,
        None => prompt_line(input, output, SCAN_TYPE_PROMPT)?.parse()?,
    };

    Ok(ScanInputs {
        credentials,
        region,
        scan_type,
    })
}
