// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Encryption-in-transit resolution.
//!
//! For each resource the [`TransitResolver`]:
//!
//! 1. classifies the engine with [`crate::policy::classify`]
//! 2. when a parameter governs transit encryption, searches the resource's
//!    parameter groups in order, stopping at the first page of the first
//!    group that holds it
//! 3. normalizes the outcome into one [`EncryptionVerdict`]
//!
//! Resolution never fails: API errors become [`EncryptionVerdict::Error`] so
//! one broken resource cannot abort the rest of the scan.

use crate::client::RdsApi;
use crate::errors::ScanError;
use crate::models::{DatabaseResource, EncryptionVerdict, Parameter, ParameterGroupRef, ResourceKind};
use crate::pacing::RequestPacer;
use crate::pagination::{RetryPolicy, find_first};
use crate::policy::{TransitCheck, classify};

/// Parameter values that mean encryption in transit is enforced.
const ENABLED_VALUES: &[&str] = &["1", "on", "true"];

pub struct TransitResolver<'a, A: RdsApi + ?Sized> {
    api: &'a A,
    policy: RetryPolicy,
    pacer: &'a RequestPacer,
}

impl<'a, A: RdsApi + ?Sized> TransitResolver<'a, A> {
    pub fn new(api: &'a A, policy: RetryPolicy, pacer: &'a RequestPacer) -> Self {
        Self { api, policy, pacer }
    }

    #[tracing::instrument(skip(self, resource), fields(id = resource.identifier(), engine = resource.engine()))]
    pub async fn resolve(&self, resource: &DatabaseResource) -> EncryptionVerdict {
        match classify(resource.kind(), resource.engine()) {
            TransitCheck::AlwaysEnabled(text) => EncryptionVerdict::Enabled(text.to_string()),
            TransitCheck::NotApplicable(reason) => {
                EncryptionVerdict::NotApplicable(reason.to_string())
            }
            TransitCheck::Parameter(name) => self.lookup(resource, name).await,
        }
    }

    async fn lookup(&self, resource: &DatabaseResource, parameter: &str) -> EncryptionVerdict {
        for group in resource.parameter_groups() {
            match self.find_parameter(&group, parameter).await {
                Ok(Some(found)) => {
                    tracing::debug!(
                        "[scanner] {} found {} in {}",
                        resource.identifier(),
                        parameter,
                        group.name
                    );
                    return normalize(found);
                }
                Ok(None) => continue,
                Err(err) => {
                    tracing::warn!(
                        "[scanner] {} lookup of {} in {} failed: {}",
                        resource.identifier(),
                        parameter,
                        group.name,
                        err
                    );
                    return EncryptionVerdict::Error(err.to_string());
                }
            }
        }

        EncryptionVerdict::NotFound {
            parameter: parameter.to_string(),
        }
    }

    /// Searches one parameter group for `name`, page by page.
    pub async fn find_parameter(
        &self,
        group: &ParameterGroupRef,
        name: &str,
    ) -> Result<Option<Parameter>, ScanError> {
        let api = self.api;
        let group_name = group.name.as_str();
        let matches_name = |parameter: &Parameter| parameter.name == name;

        match group.scope {
            ResourceKind::Instance => {
                find_first(
                    &self.policy,
                    self.pacer,
                    move |marker| api.list_instance_parameters(group_name, marker),
                    matches_name,
                )
                .await
            }
            ResourceKind::Cluster => {
                find_first(
                    &self.policy,
                    self.pacer,
                    move |marker| api.list_cluster_parameters(group_name, marker),
                    matches_name,
                )
                .await
            }
        }
    }
}

/// Turns a located parameter into a verdict, keeping the raw value.
pub fn normalize(parameter: Parameter) -> EncryptionVerdict {
    match parameter.value {
        Some(value) if is_enabled_value(&value) => EncryptionVerdict::Enabled(value),
        Some(value) => EncryptionVerdict::Disabled(value),
        None => EncryptionVerdict::Unset {
            parameter: parameter.name,
        },
    }
}

fn is_enabled_value(value: &str) -> bool {
    let value = value.trim();
    ENABLED_VALUES
        .iter()
        .any(|enabled| value.eq_ignore_ascii_case(enabled))
}
