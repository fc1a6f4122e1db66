// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use rds_encryption_scanner::client::RdsClient;
use rds_encryption_scanner::configuration::{LogFormat, ScannerOptions};
use rds_encryption_scanner::pacing::RequestPacer;
use rds_encryption_scanner::prompt::collect_inputs;
use rds_encryption_scanner::scanner::Scanner;
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| "info,aws_config=warn".into()));

    // stdout belongs to the prompts and the result lines
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        // remove the name of the function from every log entry
        .with_target(false);

    match format {
        LogFormat::Json => builder
            .json()
            // this needs to be set to remove duplicated information in the log.
            .with_current_span(false)
            .with_ansi(false)
            .init(),
        LogFormat::Text => builder.init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let options = ScannerOptions::parse();

    init_tracing(options.log_format);

    tracing::debug!("[scanner] {:?}", &options);

    let settings = options.scan_settings()?;

    let inputs = collect_inputs(
        &options,
        &mut io::stdin().lock(),
        &mut io::stdout(),
        |prompt: &str| rpassword::prompt_password(prompt),
    )
    .context("Invalid choice. Exiting")?;

    tracing::info!(
        "[scanner] scanning {:?} in {} with concurrency {}",
        inputs.scan_type,
        inputs.region,
        settings.concurrency
    );

    let client = RdsClient::new(&inputs.region, inputs.credentials.as_ref()).await;
    let scanner = Scanner::new(&client, settings, RequestPacer::default());

    let timestamp = chrono::Local::now();
    let written = scanner
        .run(inputs.scan_type, &options.output_dir, &timestamp)
        .await
        .context("Error scanning RDS resources")?;

    for path in written {
        println!("Results written to {}", path.display());
    }

    Ok(())
}
