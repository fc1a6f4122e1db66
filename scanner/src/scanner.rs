// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Scan orchestration.
//!
//! A scan enumerates one resource type, resolves encryption in transit for
//! every resource and turns the results into report rows:
//!
//! ```text
//! inventory (paginated) -> resolver (per resource) -> report rows -> CSV
//! ```
//!
//! Resources are independent, so resolution may fan out up to
//! `concurrency` at a time. Rows always come back in listing order, and the
//! shared [`RequestPacer`] keeps the combined request rate toward the
//! parameter APIs bounded.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use futures::stream::{self, StreamExt};

use crate::client::RdsApi;
use crate::configuration::ScanType;
use crate::errors::ScanError;
use crate::inventory::{list_clusters, list_instances};
use crate::models::{DatabaseResource, EncryptionVerdict, ResourceKind};
use crate::pacing::RequestPacer;
use crate::pagination::RetryPolicy;
use crate::report::{ClusterRow, InstanceRow, write_report};
use crate::resolver::TransitResolver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSettings {
    pub retry: RetryPolicy,
    /// Resources resolved at the same time; 1 resolves them one by one.
    pub concurrency: usize,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            concurrency: 1,
        }
    }
}

pub struct Scanner<'a, A: RdsApi + ?Sized> {
    api: &'a A,
    settings: ScanSettings,
    pacer: RequestPacer,
}

impl<'a, A: RdsApi + ?Sized> Scanner<'a, A> {
    pub fn new(api: &'a A, settings: ScanSettings, pacer: RequestPacer) -> Self {
        Self {
            api,
            settings,
            pacer,
        }
    }

    /// Lists all instances and resolves each one.
    ///
    /// # Errors
    ///
    /// Only the listing can fail; per-instance problems are reported in the
    /// instance's row.
    #[tracing::instrument(skip(self))]
    pub async fn scan_instances(&self) -> Result<Vec<InstanceRow>, ScanError> {
        let instances = list_instances(self.api, &self.settings.retry).await?;
        let resources: Vec<DatabaseResource> =
            instances.iter().cloned().map(DatabaseResource::from).collect();

        let verdicts = self.resolve_all(&resources).await;
        log_summary(ResourceKind::Instance, &verdicts);

        Ok(instances
            .iter()
            .zip(&verdicts)
            .map(|(instance, verdict)| InstanceRow::new(instance, verdict))
            .collect())
    }

    /// Lists all clusters and resolves each one.
    #[tracing::instrument(skip(self))]
    pub async fn scan_clusters(&self) -> Result<Vec<ClusterRow>, ScanError> {
        let clusters = list_clusters(self.api, &self.settings.retry).await?;
        let resources: Vec<DatabaseResource> =
            clusters.iter().cloned().map(DatabaseResource::from).collect();

        let verdicts = self.resolve_all(&resources).await;
        log_summary(ResourceKind::Cluster, &verdicts);

        Ok(clusters
            .iter()
            .zip(&verdicts)
            .map(|(cluster, verdict)| ClusterRow::new(cluster, verdict))
            .collect())
    }

    /// One verdict per resource, in the order given.
    pub async fn resolve_all(&self, resources: &[DatabaseResource]) -> Vec<EncryptionVerdict> {
        let resolver = TransitResolver::new(self.api, self.settings.retry, &self.pacer);
        let resolver = &resolver;

        stream::iter(resources)
            .map(|resource| resolver.resolve(resource))
            .buffered(self.settings.concurrency.max(1))
            .collect()
            .await
    }

    /// Scans the selected resource types and writes one report per type.
    ///
    /// Instances are scanned before clusters. A listing failure stops the
    /// run, so no cluster report is written after a failed instance scan.
    pub async fn run<Tz>(
        &self,
        scan_type: ScanType,
        output_dir: &Path,
        timestamp: &DateTime<Tz>,
    ) -> Result<Vec<PathBuf>, ScanError>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let mut written = Vec::with_capacity(2);

        if scan_type.includes_instances() {
            let rows = self.scan_instances().await?;
            written.push(write_report(output_dir, timestamp, &rows)?);
        }

        if scan_type.includes_clusters() {
            let rows = self.scan_clusters().await?;
            written.push(write_report(output_dir, timestamp, &rows)?);
        }

        Ok(written)
    }
}

fn log_summary(kind: ResourceKind, verdicts: &[EncryptionVerdict]) {
    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    for verdict in verdicts {
        *counts.entry(verdict.label()).or_default() += 1;
    }

    tracing::info!(
        "[scanner] resolved {} {} resources: {:?}",
        verdicts.len(),
        kind,
        counts
    );
}
