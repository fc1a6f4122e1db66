// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Which parameter governs encryption in transit for each engine.
//!
//! | Kind | Engine | Check |
//! |------|--------|-------|
//! | cluster | contains `neptune` | always enabled |
//! | cluster | contains `aurora-postgresql` | `ssl` |
//! | cluster | contains `aurora-mysql` | `require_secure_transport` |
//! | instance | `mysql` | `require_secure_transport` |
//! | instance | `postgres` | `rds.force_ssl` |
//! | instance | contains `aurora` | not applicable (cluster level) |
//! | instance | contains `neptune` | not applicable (cluster level) |
//! | any | anything else | not applicable |
//!
//! Rules are evaluated in order and the first match wins. Matching is
//! case-sensitive, like the engine names RDS returns.

use crate::models::ResourceKind;

pub const NEPTUNE_ALWAYS_ENCRYPTED: &str =
    "Enabled by default (Neptune requires TLS for all connections)";
pub const MANAGED_AT_CLUSTER_LEVEL: &str = "Managed at cluster level";
pub const NOT_YET_APPLICABLE: &str = "Check not yet applicable for this engine";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineMatch {
    Equals(&'static str),
    Contains(&'static str),
}

impl EngineMatch {
    pub fn matches(&self, engine: &str) -> bool {
        match self {
            Self::Equals(name) => engine == *name,
            Self::Contains(fragment) => engine.contains(*fragment),
        }
    }
}

/// What the resolver has to do for a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitCheck {
    /// No lookup, the engine always encrypts connections.
    AlwaysEnabled(&'static str),
    /// Look up this parameter in the resource's parameter group(s).
    Parameter(&'static str),
    NotApplicable(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineRule {
    pub kind: ResourceKind,
    pub engine: EngineMatch,
    pub check: TransitCheck,
}

impl EngineRule {
    const fn new(kind: ResourceKind, engine: EngineMatch, check: TransitCheck) -> Self {
        Self {
            kind,
            engine,
            check,
        }
    }

    pub fn applies(&self, kind: ResourceKind, engine: &str) -> bool {
        self.kind == kind && self.engine.matches(engine)
    }
}

pub const TRANSIT_RULES: &[EngineRule] = &[
    EngineRule::new(
        ResourceKind::Cluster,
        EngineMatch::Contains("neptune"),
        TransitCheck::AlwaysEnabled(NEPTUNE_ALWAYS_ENCRYPTED),
    ),
    EngineRule::new(
        ResourceKind::Cluster,
        EngineMatch::Contains("aurora-postgresql"),
        TransitCheck::Parameter("ssl"),
    ),
    EngineRule::new(
        ResourceKind::Cluster,
        EngineMatch::Contains("aurora-mysql"),
        TransitCheck::Parameter("require_secure_transport"),
    ),
    EngineRule::new(
        ResourceKind::Instance,
        EngineMatch::Equals("mysql"),
        TransitCheck::Parameter("require_secure_transport"),
    ),
    EngineRule::new(
        ResourceKind::Instance,
        EngineMatch::Equals("postgres"),
        TransitCheck::Parameter("rds.force_ssl"),
    ),
    EngineRule::new(
        ResourceKind::Instance,
        EngineMatch::Contains("aurora"),
        TransitCheck::NotApplicable(MANAGED_AT_CLUSTER_LEVEL),
    ),
    EngineRule::new(
        ResourceKind::Instance,
        EngineMatch::Contains("neptune"),
        TransitCheck::NotApplicable(MANAGED_AT_CLUSTER_LEVEL),
    ),
];

/// First matching rule for `engine`, or [`NOT_YET_APPLICABLE`].
pub fn classify(kind: ResourceKind, engine: &str) -> TransitCheck {
    TRANSIT_RULES
        .iter()
        .find(|rule| rule.applies(kind, engine))
        .map(|rule| rule.check)
        .unwrap_or(TransitCheck::NotApplicable(NOT_YET_APPLICABLE))
}
