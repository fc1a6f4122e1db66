// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! The RDS API surface used by the scanner.
//!
//! [`RdsApi`] exposes one page of each of the four listings the scan needs.
//! [`RdsClient`] implements it over `aws-sdk-rds`, converting SDK shapes into
//! [`crate::models`] types and SDK failures into [`ScanError`] so the
//! paginator can tell throttling apart from fatal errors.
//!
//! The SDK's own retry layer is disabled: retries are owned by
//! [`crate::pagination::RetryPolicy`] alone.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_config::retry::RetryConfig;
use aws_credential_types::Credentials;
use aws_sdk_rds::config::Region;
use aws_sdk_rds::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_rds::types;
use aws_smithy_runtime_api::client::result::SdkError;

use crate::constants::{NOT_FOUND_ERROR_CODES, PAGE_SIZE, THROTTLING_ERROR_CODES};
use crate::errors::ScanError;
use crate::models::{DbCluster, DbInstance, Page, Parameter, StaticCredentials};

#[async_trait]
pub trait RdsApi: Send + Sync {
    /// One page of `DescribeDBInstances`.
    async fn list_instances(&self, marker: Option<String>) -> Result<Page<DbInstance>, ScanError>;

    /// One page of `DescribeDBClusters`.
    async fn list_clusters(&self, marker: Option<String>) -> Result<Page<DbCluster>, ScanError>;

    /// One page of `DescribeDBParameters` for an instance-level group.
    async fn list_instance_parameters(
        &self,
        group: &str,
        marker: Option<String>,
    ) -> Result<Page<Parameter>, ScanError>;

    /// One page of `DescribeDBClusterParameters` for a cluster-level group.
    async fn list_cluster_parameters(
        &self,
        group: &str,
        marker: Option<String>,
    ) -> Result<Page<Parameter>, ScanError>;
}

pub struct RdsClient {
    client: aws_sdk_rds::Client,
}

impl RdsClient {
    /// Builds a client for `region`.
    ///
    /// With `credentials` the static keys are used as-is; without them the
    /// default AWS provider chain (environment, profile, IMDS) is loaded.
    pub async fn new(region: &str, credentials: Option<&StaticCredentials>) -> Self {
        let region = Region::new(region.to_string());

        let client = match credentials {
            Some(credentials) => {
                let config = aws_sdk_rds::Config::builder()
                    .region(region)
                    .behavior_version(BehaviorVersion::latest())
                    .credentials_provider(Credentials::from(credentials))
                    .retry_config(RetryConfig::disabled())
                    .build();
                aws_sdk_rds::Client::from_conf(config)
            }
            None => {
                let shared = aws_config::defaults(BehaviorVersion::latest())
                    .region(region)
                    .retry_config(RetryConfig::disabled())
                    .load()
                    .await;
                aws_sdk_rds::Client::new(&shared)
            }
        };

        Self { client }
    }
}

#[async_trait]
impl RdsApi for RdsClient {
    #[tracing::instrument(skip(self))]
    async fn list_instances(&self, marker: Option<String>) -> Result<Page<DbInstance>, ScanError> {
        let output = self
            .client
            .describe_db_instances()
            .max_records(PAGE_SIZE)
            .set_marker(marker)
            .send()
            .await
            .map_err(|err| classify("DescribeDBInstances", err))?;

        let items = output.db_instances().iter().map(instance_from_sdk).collect();
        Ok(Page::new(items, output.marker().map(str::to_string)))
    }

    #[tracing::instrument(skip(self))]
    async fn list_clusters(&self, marker: Option<String>) -> Result<Page<DbCluster>, ScanError> {
        let output = self
            .client
            .describe_db_clusters()
            .max_records(PAGE_SIZE)
            .set_marker(marker)
            .send()
            .await
            .map_err(|err| classify("DescribeDBClusters", err))?;

        let items = output.db_clusters().iter().map(cluster_from_sdk).collect();
        Ok(Page::new(items, output.marker().map(str::to_string)))
    }

    #[tracing::instrument(skip(self))]
    async fn list_instance_parameters(
        &self,
        group: &str,
        marker: Option<String>,
    ) -> Result<Page<Parameter>, ScanError> {
        let output = self
            .client
            .describe_db_parameters()
            .db_parameter_group_name(group)
            .max_records(PAGE_SIZE)
            .set_marker(marker)
            .send()
            .await
            .map_err(|err| classify("DescribeDBParameters", err))?;

        let items = output.parameters().iter().map(parameter_from_sdk).collect();
        Ok(Page::new(items, output.marker().map(str::to_string)))
    }

    #[tracing::instrument(skip(self))]
    async fn list_cluster_parameters(
        &self,
        group: &str,
        marker: Option<String>,
    ) -> Result<Page<Parameter>, ScanError> {
        let output = self
            .client
            .describe_db_cluster_parameters()
            .db_cluster_parameter_group_name(group)
            .max_records(PAGE_SIZE)
            .set_marker(marker)
            .send()
            .await
            .map_err(|err| classify("DescribeDBClusterParameters", err))?;

        let items = output.parameters().iter().map(parameter_from_sdk).collect();
        Ok(Page::new(items, output.marker().map(str::to_string)))
    }
}

/// Maps an SDK failure onto the scanner's error taxonomy.
fn classify<E, R>(operation: &str, err: SdkError<E, R>) -> ScanError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    if matches!(err, SdkError::TimeoutError(_)) {
        return ScanError::Throttled(format!("{operation}: request timed out"));
    }

    let code = err.code().map(str::to_string);
    let message = format!("{operation}: {}", DisplayErrorContext(&err));
    classify_code(code.as_deref(), message)
}

fn classify_code(code: Option<&str>, message: String) -> ScanError {
    match code {
        Some(code) if THROTTLING_ERROR_CODES.contains(&code) => ScanError::Throttled(message),
        Some(code) if NOT_FOUND_ERROR_CODES.contains(&code) => ScanError::NotFound(message),
        _ => ScanError::Api(message),
    }
}

fn instance_from_sdk(instance: &types::DbInstance) -> DbInstance {
    DbInstance {
        identifier: instance.db_instance_identifier().unwrap_or_default().to_string(),
        engine: instance.engine().unwrap_or_default().to_string(),
        storage_encrypted: instance.storage_encrypted(),
        availability_zone: instance.availability_zone().map(str::to_string),
        parameter_groups: instance
            .db_parameter_groups()
            .iter()
            .filter_map(|group| group.db_parameter_group_name())
            .map(str::to_string)
            .collect(),
    }
}

fn cluster_from_sdk(cluster: &types::DbCluster) -> DbCluster {
    DbCluster {
        identifier: cluster.db_cluster_identifier().unwrap_or_default().to_string(),
        engine: cluster.engine().unwrap_or_default().to_string(),
        storage_encrypted: cluster.storage_encrypted(),
        availability_zones: cluster.availability_zones().to_vec(),
        parameter_group: cluster.db_cluster_parameter_group().map(str::to_string),
    }
}

fn parameter_from_sdk(parameter: &types::Parameter) -> Parameter {
    Parameter::new(
        parameter.parameter_name().unwrap_or_default(),
        parameter.parameter_value(),
    )
}
