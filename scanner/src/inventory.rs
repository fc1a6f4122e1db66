// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use crate::client::RdsApi;
use crate::errors::ScanError;
use crate::models::{DbCluster, DbInstance};
use crate::pagination::{RetryPolicy, fetch_all};

/// Lists every DB instance in the region.
#[tracing::instrument(skip(api))]
pub async fn list_instances<A: RdsApi + ?Sized>(
    api: &A,
    policy: &RetryPolicy,
) -> Result<Vec<DbInstance>, ScanError> {
    let instances = fetch_all(policy, |marker| api.list_instances(marker)).await?;
    tracing::info!("[scanner] found {} DB instances", instances.len());
    Ok(instances)
}

/// Lists every DB cluster in the region.
#[tracing::instrument(skip(api))]
pub async fn list_clusters<A: RdsApi + ?Sized>(
    api: &A,
    policy: &RetryPolicy,
) -> Result<Vec<DbCluster>, ScanError> {
    let clusters = fetch_all(policy, |marker| api.list_clusters(marker)).await?;
    tracing::info!("[scanner] found {} DB clusters", clusters.len());
    Ok(clusters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeRds;

    fn instance(id: &str) -> DbInstance {
        DbInstance {
            identifier: id.to_string(),
            engine: "mysql".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_list_instances_across_pages() {
        let api = FakeRds::new().with_instances(vec![
            vec![instance("a"), instance("b")],
            vec![instance("c")],
        ]);

        let instances = list_instances(&api, &RetryPolicy::default()).await.unwrap();
        let ids: Vec<_> = instances.iter().map(|i| i.identifier.as_str()).collect();

        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(api.calls(), vec!["instances@-", "instances@1"]);
    }

    #[tokio::test]
    async fn test_empty_fleet_is_not_a_failure() {
        let api = FakeRds::new();
        assert_eq!(list_clusters(&api, &RetryPolicy::default()).await, Ok(vec![]));
        assert_eq!(list_instances(&api, &RetryPolicy::default()).await, Ok(vec![]));
    }

    #[tokio::test]
    async fn test_listing_error_is_surfaced() {
        let api = FakeRds::new().failing("clusters", ScanError::Api("AccessDenied".into()));
        let err = list_clusters(&api, &RetryPolicy::default()).await.unwrap_err();
        assert_eq!(err, ScanError::Api("AccessDenied".into()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_throttled_listing_gives_up() {
        let api = FakeRds::new()
            .with_instances(vec![vec![instance("a")]])
            .throttled("instances", 5);

        let err = list_instances(&api, &RetryPolicy::default()).await.unwrap_err();
        assert!(matches!(err, ScanError::RetriesExhausted { attempts: 3, .. }));
    }
}
