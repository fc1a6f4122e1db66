// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! # RDS Encryption Scanner
//!
//! Audits the Amazon RDS, Aurora and Neptune resources of one account and
//! region for encryption at rest and encryption in transit, and writes the
//! results as CSV reports.
//!
//! ## Architecture
//!
//! ```text
//! CLI / prompts -> Scanner -> inventory  -> RdsApi (DescribeDBInstances / DescribeDBClusters)
//!                     |
//!                     +-----> resolver   -> policy table
//!                     |           |
//!                     |           +-----> RdsApi (DescribeDBParameters / DescribeDBClusterParameters)
//!                     |
//!                     +-----> report     -> DBInstances_<ts>.csv / DBClusters_<ts>.csv
//! ```
//!
//! Storage encryption comes straight from the describe calls. Encryption in
//! transit depends on the engine: the [`policy`] table names the parameter
//! that enforces TLS (if any), and the [`resolver`] looks it up in the
//! resource's parameter group(s).
//!
//! ## Modules
//!
//! - [`client`]: the [`client::RdsApi`] seam and its `aws-sdk-rds` implementation
//! - [`configuration`]: CLI argument parsing with clap
//! - [`constants`]: page size, retry and pacing constants
//! - [`errors`]: the scanner's error taxonomy
//! - [`inventory`]: full listings of DB instances and clusters
//! - [`models`]: resources, parameters, pages and verdicts
//! - [`pacing`]: global spacing of parameter group requests
//! - [`pagination`]: marker-based pagination with retry and backoff
//! - [`policy`]: engine to transit-encryption parameter rules
//! - [`prompt`]: interactive input for anything not given on the command line
//! - [`report`]: CSV rows and report files
//! - [`resolver`]: per-resource encryption-in-transit resolution
//! - [`scanner`]: orchestration of a whole scan
//!
//! ## Usage
//!
//! ```bash
//! rds-encryption-scanner --region us-east-1 --scan-type 3 --use-default-credentials
//! ```
//!
//! The scanner is read-only: it only calls `Describe*` APIs.

pub mod client;
pub mod configuration;
pub mod constants;
pub mod errors;
pub mod inventory;
pub mod models;
pub mod pacing;
pub mod pagination;
pub mod policy;
pub mod prompt;
pub mod report;
pub mod resolver;
pub mod scanner;

#[cfg(test)]
pub(crate) mod fake;
