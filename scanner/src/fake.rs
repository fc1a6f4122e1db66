// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! In-memory [`RdsApi`] used by unit tests.
//!
//! Pages are addressed by their index, so the marker of page `n` is `"n"`.
//! Every call is recorded as `"<listing>@<marker>"`, with `-` for no marker.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::RdsApi;
use crate::errors::ScanError;
use crate::models::{DbCluster, DbInstance, Page, Parameter};

#[derive(Default)]
pub(crate) struct FakeRds {
    instance_pages: Vec<Vec<DbInstance>>,
    cluster_pages: Vec<Vec<DbCluster>>,
    parameter_pages: HashMap<String, Vec<Vec<Parameter>>>,
    failures: HashMap<String, ScanError>,
    throttles: Mutex<HashMap<String, u32>>,
    calls: Mutex<Vec<String>>,
}

impl FakeRds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_instances(mut self, pages: Vec<Vec<DbInstance>>) -> Self {
        self.instance_pages = pages;
        self
    }

    pub fn with_clusters(mut self, pages: Vec<Vec<DbCluster>>) -> Self {
        self.cluster_pages = pages;
        self
    }

    pub fn with_instance_parameters(mut self, group: &str, pages: Vec<Vec<Parameter>>) -> Self {
        self.parameter_pages.insert(instance_key(group), pages);
        self
    }

    pub fn with_cluster_parameters(mut self, group: &str, pages: Vec<Vec<Parameter>>) -> Self {
        self.parameter_pages.insert(cluster_key(group), pages);
        self
    }

    /// Every call to `listing` fails with `err`.
    pub fn failing(mut self, listing: &str, err: ScanError) -> Self {
        self.failures.insert(listing.to_string(), err);
        self
    }

    /// The first `times` calls to `listing` are throttled.
    pub fn throttled(self, listing: &str, times: u32) -> Self {
        self.throttles
            .lock()
            .unwrap()
            .insert(listing.to_string(), times);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn parameter_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| call.contains("-params:"))
            .collect()
    }

    fn record(&self, listing: &str, marker: &Option<String>) -> Result<(), ScanError> {
        self.calls.lock().unwrap().push(format!(
            "{listing}@{}",
            marker.as_deref().unwrap_or("-")
        ));

        if let Some(err) = self.failures.get(listing) {
            return Err(err.clone());
        }

        let mut throttles = self.throttles.lock().unwrap();
        if let Some(remaining) = throttles.get_mut(listing)
            && *remaining > 0
        {
            *remaining -= 1;
            return Err(ScanError::Throttled(format!("{listing}: Rate exceeded")));
        }

        Ok(())
    }
}

pub(crate) fn instance_key(group: &str) -> String {
    format!("instance-params:{group}")
}

pub(crate) fn cluster_key(group: &str) -> String {
    format!("cluster-params:{group}")
}

fn page<T: Clone>(pages: &[Vec<T>], marker: Option<String>) -> Result<Page<T>, ScanError> {
    let index = match marker {
        Some(marker) => marker
            .parse::<usize>()
            .map_err(|_| ScanError::Api(format!("invalid marker {marker}")))?,
        None => 0,
    };
    let items = pages.get(index).cloned().unwrap_or_default();
    let next = (index + 1 < pages.len()).then(|| (index + 1).to_string());
    Ok(Page::new(items, next))
}

#[async_trait]
impl RdsApi for FakeRds {
    async fn list_instances(&self, marker: Option<String>) -> Result<Page<DbInstance>, ScanError> {
        self.record("instances", &marker)?;
        page(&self.instance_pages, marker)
    }

    async fn list_clusters(&self, marker: Option<String>) -> Result<Page<DbCluster>, ScanError> {
        self.record("clusters", &marker)?;
        page(&self.cluster_pages, marker)
    }

    async fn list_instance_parameters(
        &self,
        group: &str,
        marker: Option<String>,
    ) -> Result<Page<Parameter>, ScanError> {
        let key = instance_key(group);
        self.record(&key, &marker)?;
        match self.parameter_pages.get(&key) {
            Some(pages) => page(pages, marker),
            None => Err(ScanError::NotFound(format!("DBParameterGroupNotFound: {group}"))),
        }
    }

    async fn list_cluster_parameters(
        &self,
        group: &str,
        marker: Option<String>,
    ) -> Result<Page<Parameter>, ScanError> {
        let key = cluster_key(group);
        self.record(&key, &marker)?;
        match self.parameter_pages.get(&key) {
            Some(pages) => page(pages, marker),
            None => Err(ScanError::NotFound(format!(
                "DBClusterParameterGroupNotFound: {group}"
            ))),
        }
    }
}
