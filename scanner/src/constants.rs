// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use std::time::Duration;

/// Upper bound on `MaxRecords` for every RDS describe call.
pub const PAGE_SIZE: i32 = 100;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// Backoff before retry n+1 is `RETRY_BASE_DELAY * 2^n`, so 2s then 4s.
pub const RETRY_BASE_DELAY: Duration = Duration::from_secs(1);
/// Minimum spacing between parameter group page requests across the whole scan.
pub const PARAMETER_PAGE_INTERVAL: Duration = Duration::from_millis(50);

pub const INSTANCE_REPORT_PREFIX: &str = "DBInstances";
pub const CLUSTER_REPORT_PREFIX: &str = "DBClusters";
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Rendered in place of a parameter that exists but carries no value.
pub const NULL_PARAMETER_MARKER: &str = "nil";
pub const ZONE_SEPARATOR: &str = ", ";

// RDS error codes treated as rate limiting
pub const THROTTLING_ERROR_CODES: &[&str] = &[
    "Throttling",
    "ThrottlingException",
    "RequestLimitExceeded",
    "TooManyRequestsException",
];

// RDS error codes for missing resources
pub const NOT_FOUND_ERROR_CODES: &[&str] = &[
    "DBInstanceNotFound",
    "DBInstanceNotFoundFault",
    "DBClusterNotFoundFault",
    "DBParameterGroupNotFound",
    "DBParameterGroupNotFoundFault",
    "DBClusterParameterGroupNotFound",
    "DBClusterParameterGroupNotFoundFault",
];

pub const MAX_REGION_LENGTH: usize = 64;
pub const MAX_CONCURRENCY: usize = 32;
