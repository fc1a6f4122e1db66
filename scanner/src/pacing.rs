// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Global request pacing for parameter group lookups.
//!
//! Every resolution shares one [`RequestPacer`], so the minimum spacing
//! between parameter page requests holds whether resources are resolved one
//! at a time or fanned out.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{Instant, sleep_until};

pub struct RequestPacer {
    interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RequestPacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(None),
        }
    }

    /// A pacer that never waits.
    pub fn unpaced() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Waits until the caller may issue its next request.
    ///
    /// The first request goes out immediately; each later one is scheduled
    /// at least `interval` after the previously granted slot.
    pub async fn wait(&self) {
        if self.interval.is_zero() {
            return;
        }

        let slot = {
            let mut next_slot = self.next_slot.lock().await;
            let now = Instant::now();
            let slot = match *next_slot {
                Some(scheduled) if scheduled > now => scheduled,
                _ => now,
            };
            *next_slot = Some(slot + self.interval);
            slot
        };

        sleep_until(slot).await;
    }
}

impl Default for RequestPacer {
    fn default() -> Self {
        Self::new(crate::constants::PARAMETER_PAGE_INTERVAL)
    }
}
