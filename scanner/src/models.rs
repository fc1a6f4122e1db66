// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use std::fmt;

use aws_credential_types::Credentials;
use zeroize::ZeroizeOnDrop;

use crate::constants::NULL_PARAMETER_MARKER;

/// Whether a resource (and the parameter group attached to it) lives at the
/// instance or the cluster level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Instance,
    Cluster,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance => write!(f, "instance"),
            Self::Cluster => write!(f, "cluster"),
        }
    }
}

/// A single managed database server, as returned by `DescribeDBInstances`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DbInstance {
    pub identifier: String,
    pub engine: String,
    /// `None` when the API omitted the flag.
    pub storage_encrypted: Option<bool>,
    pub availability_zone: Option<String>,
    /// Attached DB parameter groups, in the order the API lists them.
    pub parameter_groups: Vec<String>,
}

/// A cluster of instances sharing storage, as returned by `DescribeDBClusters`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DbCluster {
    pub identifier: String,
    pub engine: String,
    pub storage_encrypted: Option<bool>,
    pub availability_zones: Vec<String>,
    pub parameter_group: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseResource {
    Instance(DbInstance),
    Cluster(DbCluster),
}

impl DatabaseResource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Instance(_) => ResourceKind::Instance,
            Self::Cluster(_) => ResourceKind::Cluster,
        }
    }

    pub fn identifier(&self) -> &str {
        match self {
            Self::Instance(i) => &i.identifier,
            Self::Cluster(c) => &c.identifier,
        }
    }

    pub fn engine(&self) -> &str {
        match self {
            Self::Instance(i) => &i.engine,
            Self::Cluster(c) => &c.engine,
        }
    }

    /// Storage encryption flag, `false` when the API did not report one.
    pub fn storage_encrypted(&self) -> bool {
        match self {
            Self::Instance(i) => i.storage_encrypted,
            Self::Cluster(c) => c.storage_encrypted,
        }
        .unwrap_or(false)
    }

    /// Parameter groups to search, in lookup order.
    pub fn parameter_groups(&self) -> Vec<ParameterGroupRef> {
        match self {
            Self::Instance(i) => i
                .parameter_groups
                .iter()
                .map(|name| ParameterGroupRef::new(name, ResourceKind::Instance))
                .collect(),
            Self::Cluster(c) => c
                .parameter_group
                .iter()
                .map(|name| ParameterGroupRef::new(name, ResourceKind::Cluster))
                .collect(),
        }
    }
}

impl From<DbInstance> for DatabaseResource {
    fn from(instance: DbInstance) -> Self {
        Self::Instance(instance)
    }
}

impl From<DbCluster> for DatabaseResource {
    fn from(cluster: DbCluster) -> Self {
        Self::Cluster(cluster)
    }
}

/// Name of a parameter group plus the level it was attached at, which
/// decides between `DescribeDBParameters` and `DescribeDBClusterParameters`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterGroupRef {
    pub name: String,
    pub scope: ResourceKind,
}

impl ParameterGroupRef {
    pub fn new(name: impl Into<String>, scope: ResourceKind) -> Self {
        Self {
            name: name.into(),
            scope,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub value: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            name: name.into(),
            value: value.map(str::to_string),
        }
    }
}

/// One page of a marker-based listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// `None` on the last page.
    pub marker: Option<String>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, marker: Option<String>) -> Self {
        Self { items, marker }
    }

    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, None)
    }
}

/// Transit encryption outcome for one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncryptionVerdict {
    /// Parameter is on, or the engine always encrypts connections.
    Enabled(String),
    Disabled(String),
    /// Parameter exists but has no value.
    Unset { parameter: String },
    NotApplicable(String),
    NotFound { parameter: String },
    Error(String),
}

impl EncryptionVerdict {
    /// Short label used for the scan summary.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Enabled(_) => "enabled",
            Self::Disabled(_) => "disabled",
            Self::Unset { .. } => "unset",
            Self::NotApplicable(_) => "not_applicable",
            Self::NotFound { .. } => "not_found",
            Self::Error(_) => "error",
        }
    }
}

impl fmt::Display for EncryptionVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enabled(value) | Self::Disabled(value) | Self::NotApplicable(value) => {
                write!(f, "{value}")
            }
            Self::Unset { .. } => write!(f, "{NULL_PARAMETER_MARKER}"),
            Self::NotFound { parameter } => write!(f, "Parameter {parameter} not found"),
            Self::Error(message) => write!(f, "Error: {message}"),
        }
    }
}

/// Static keys supplied on the command line or at the prompt.
#[derive(Clone, ZeroizeOnDrop)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

// Custom Debug implementation to prevent accidental logging of sensitive data
impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &"[REDACTED]")
            .field("secret_access_key", &"[REDACTED]")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl From<&StaticCredentials> for Credentials {
    fn from(credential: &StaticCredentials) -> Self {
        let token = credential
            .session_token
            .clone()
            .filter(|token| !token.is_empty());

        Credentials::new(
            credential.access_key_id.clone(),
            credential.secret_access_key.clone(),
            token,
            None,
            "rds-encryption-scanner-static",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(storage_encrypted: Option<bool>) -> DbInstance {
        DbInstance {
            identifier: "db-1".into(),
            engine: "mysql".into(),
            storage_encrypted,
            availability_zone: Some("us-east-1a".into()),
            parameter_groups: vec!["default.mysql8.0".into(), "custom-mysql".into()],
        }
    }

    #[test]
    fn test_storage_encrypted_defaults_to_false() {
        let resource = DatabaseResource::from(instance(None));
        assert!(!resource.storage_encrypted());

        let cluster = DatabaseResource::from(DbCluster::default());
        assert!(!cluster.storage_encrypted());
    }

    #[test]
    fn test_storage_encrypted_reported() {
        assert!(DatabaseResource::from(instance(Some(true))).storage_encrypted());
        assert!(!DatabaseResource::from(instance(Some(false))).storage_encrypted());
    }

    #[test]
    fn test_instance_parameter_groups_keep_order() {
        let groups = DatabaseResource::from(instance(None)).parameter_groups();
        assert_eq!(
            groups,
            vec![
                ParameterGroupRef::new("default.mysql8.0", ResourceKind::Instance),
                ParameterGroupRef::new("custom-mysql", ResourceKind::Instance),
            ]
        );
    }

    #[test]
    fn test_cluster_without_parameter_group() {
        let cluster = DatabaseResource::from(DbCluster {
            identifier: "c-1".into(),
            engine: "aurora-mysql".into(),
            ..Default::default()
        });
        assert!(cluster.parameter_groups().is_empty());
        assert_eq!(cluster.kind(), ResourceKind::Cluster);
    }

    #[test]
    fn test_verdict_rendering() {
        assert_eq!(EncryptionVerdict::Enabled("ON".into()).to_string(), "ON");
        assert_eq!(EncryptionVerdict::Disabled("0".into()).to_string(), "0");
        assert_eq!(
            EncryptionVerdict::Unset {
                parameter: "ssl".into()
            }
            .to_string(),
            "nil"
        );
        assert_eq!(
            EncryptionVerdict::NotFound {
                parameter: "rds.force_ssl".into()
            }
            .to_string(),
            "Parameter rds.force_ssl not found"
        );
        assert_eq!(
            EncryptionVerdict::Error("access denied".into()).to_string(),
            "Error: access denied"
        );
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let creds = StaticCredentials {
            access_key_id: "AKIAEXAMPLE".into(),
            secret_access_key: "very-secret".into(),
            session_token: Some("sess-tok-123".into()),
        };
        let debug = format!("{creds:?}");
        assert!(!debug.contains("AKIAEXAMPLE"));
        assert!(!debug.contains("very-secret"));
        assert!(!debug.contains("sess-tok-123"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_empty_session_token_is_dropped() {
        let creds = StaticCredentials {
            access_key_id: "AKIAEXAMPLE".into(),
            secret_access_key: "very-secret".into(),
            session_token: Some(String::new()),
        };
        let sdk: Credentials = (&creds).into();
        assert_eq!(sdk.access_key_id(), "AKIAEXAMPLE");
        assert!(sdk.session_token().is_none());
    }
}
