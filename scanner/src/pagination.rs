// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Marker-based pagination with bounded retry.
//!
//! Every RDS `Describe*` call used by the scanner returns at most
//! [`PAGE_SIZE`] items plus an optional `Marker`. This module walks those
//! markers to completion ([`fetch_all`]) or until a matching item turns up
//! ([`find_first`]).
//!
//! # Retry Policy
//!
//! A throttled page request is retried with the *same* marker. After failed
//! attempt `n` (1-based) the request sleeps `base_delay * 2^n` before trying
//! again, up to [`RetryPolicy::max_attempts`] attempts per page. Any other
//! error aborts the listing immediately.
//!
//! Running out of attempts is reported as [`ScanError::RetriesExhausted`], so
//! an empty account (`Ok(vec![])`) can never be confused with a listing that
//! could not be fetched.
//!
//! [`PAGE_SIZE`]: crate::constants::PAGE_SIZE

use std::future::Future;
use std::time::Duration;

use crate::constants::{DEFAULT_MAX_ATTEMPTS, RETRY_BASE_DELAY};
use crate::errors::ScanError;
use crate::models::Page;
use crate::pacing::RequestPacer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per page, including the first one.
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Delay to sleep after failed attempt `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, RETRY_BASE_DELAY)
    }
}

/// Fetches a single page, retrying throttled requests per `policy`.
#[tracing::instrument(skip(policy, fetch))]
pub async fn fetch_page<T, F, Fut>(
    policy: &RetryPolicy,
    marker: Option<&str>,
    fetch: &mut F,
) -> Result<Page<T>, ScanError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, ScanError>>,
{
    let mut attempt = 1;
    loop {
        match fetch(marker.map(str::to_string)).await {
            Ok(page) => return Ok(page),
            Err(err) if err.is_transient() => {
                if attempt >= policy.max_attempts {
                    tracing::error!(
                        "[scanner] giving up after {} attempts: {}",
                        attempt,
                        err
                    );
                    return Err(ScanError::RetriesExhausted {
                        attempts: attempt,
                        last_error: err.to_string(),
                    });
                }

                let delay = policy.backoff(attempt);
                tracing::warn!(
                    "[scanner] attempt {} throttled, retrying in {:?}: {}",
                    attempt,
                    delay,
                    err
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Collects every item of a marker-based listing, in marker order.
///
/// # Errors
///
/// Returns the first non-transient error, or
/// [`ScanError::RetriesExhausted`] if a page stayed throttled. A partially
/// accumulated listing is never returned.
pub async fn fetch_all<T, F, Fut>(policy: &RetryPolicy, mut fetch: F) -> Result<Vec<T>, ScanError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, ScanError>>,
{
    let mut items = Vec::new();
    let mut marker: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = fetch_page(policy, marker.as_deref(), &mut fetch).await?;
        pages += 1;
        items.extend(page.items);

        match next_marker(page.marker) {
            Some(next) => marker = Some(next),
            None => break,
        }
    }

    tracing::debug!("[scanner] fetched {} items in {} pages", items.len(), pages);

    Ok(items)
}

/// Walks the listing until `predicate` matches, without requesting any page
/// after the one holding the match. Each page request first waits on `pacer`.
///
/// Returns `Ok(None)` once every page has been seen without a match.
pub async fn find_first<T, F, Fut, P>(
    policy: &RetryPolicy,
    pacer: &RequestPacer,
    mut fetch: F,
    mut predicate: P,
) -> Result<Option<T>, ScanError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, ScanError>>,
    P: FnMut(&T) -> bool,
{
    let mut marker: Option<String> = None;

    loop {
        pacer.wait().await;
        let page = fetch_page(policy, marker.as_deref(), &mut fetch).await?;

        if let Some(found) = page.items.into_iter().find(|item| predicate(item)) {
            return Ok(Some(found));
        }

        match next_marker(page.marker) {
            Some(next) => marker = Some(next),
            None => return Ok(None),
        }
    }
}

// an empty marker is as good as none
fn next_marker(marker: Option<String>) -> Option<String> {
    marker.filter(|m| !m.is_empty())
}
