// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! CSV report rows and files.
//!
//! One file per scanned resource type, named `<Prefix>_<YYYYMMDD_HHMMSS>.csv`.
//! The header row is always written, even when the fleet is empty.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::constants::{
    CLUSTER_REPORT_PREFIX, INSTANCE_REPORT_PREFIX, REPORT_TIMESTAMP_FORMAT, ZONE_SEPARATOR,
};
use crate::errors::ScanError;
use crate::models::{DbCluster, DbInstance, EncryptionVerdict};

pub trait ReportRow: Serialize {
    const PREFIX: &'static str;
    const HEADERS: &'static [&'static str];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceRow {
    #[serde(rename = "DB Instance")]
    pub identifier: String,
    #[serde(rename = "StorageEncryption")]
    pub storage_encrypted: bool,
    #[serde(rename = "EncryptionInTransit")]
    pub encryption_in_transit: String,
    #[serde(rename = "Engine")]
    pub engine: String,
    #[serde(rename = "Availability Zone")]
    pub availability_zone: String,
}

impl InstanceRow {
    pub fn new(instance: &DbInstance, verdict: &EncryptionVerdict) -> Self {
        Self {
            identifier: instance.identifier.clone(),
            storage_encrypted: instance.storage_encrypted.unwrap_or(false),
            encryption_in_transit: verdict.to_string(),
            engine: instance.engine.clone(),
            availability_zone: instance.availability_zone.clone().unwrap_or_default(),
        }
    }
}

impl ReportRow for InstanceRow {
    const PREFIX: &'static str = INSTANCE_REPORT_PREFIX;
    const HEADERS: &'static [&'static str] = &[
        "DB Instance",
        "StorageEncryption",
        "EncryptionInTransit",
        "Engine",
        "Availability Zone",
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterRow {
    #[serde(rename = "DB Cluster")]
    pub identifier: String,
    #[serde(rename = "StorageEncrypted")]
    pub storage_encrypted: bool,
    #[serde(rename = "EncryptionInTransit")]
    pub encryption_in_transit: String,
    #[serde(rename = "Engine")]
    pub engine: String,
    #[serde(rename = "Availability Zones")]
    pub availability_zones: String,
}

impl ClusterRow {
    pub fn new(cluster: &DbCluster, verdict: &EncryptionVerdict) -> Self {
        Self {
            identifier: cluster.identifier.clone(),
            storage_encrypted: cluster.storage_encrypted.unwrap_or(false),
            encryption_in_transit: verdict.to_string(),
            engine: cluster.engine.clone(),
            availability_zones: cluster.availability_zones.join(ZONE_SEPARATOR),
        }
    }
}

impl ReportRow for ClusterRow {
    const PREFIX: &'static str = CLUSTER_REPORT_PREFIX;
    const HEADERS: &'static [&'static str] = &[
        "DB Cluster",
        "StorageEncrypted",
        "EncryptionInTransit",
        "Engine",
        "Availability Zones",
    ];
}

pub fn report_path<Tz>(dir: &Path, prefix: &str, timestamp: &DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    dir.join(format!(
        "{}_{}.csv",
        prefix,
        timestamp.format(REPORT_TIMESTAMP_FORMAT)
    ))
}

/// Writes the header and `rows` as CSV to `writer`.
pub fn write_rows<W: Write, R: ReportRow>(writer: W, rows: &[R]) -> Result<(), ScanError> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv.write_record(R::HEADERS)?;
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;

    Ok(())
}

/// Writes `rows` to `<dir>/<Prefix>_<timestamp>.csv` and returns the path.
#[tracing::instrument(skip(rows, timestamp))]
pub fn write_report<R, Tz>(
    dir: &Path,
    timestamp: &DateTime<Tz>,
    rows: &[R],
) -> Result<PathBuf, ScanError>
where
    R: ReportRow,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let path = report_path(dir, R::PREFIX, timestamp);
    let file = std::fs::File::create(&path)?;
    write_rows(file, rows)?;

    tracing::info!("[scanner] wrote {} rows to {}", rows.len(), path.display());

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn render<R: ReportRow>(rows: &[R]) -> String {
        let mut buffer = Vec::new();
        write_rows(&mut buffer, rows).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_instance_row_defaults() {
        let instance = DbInstance {
            identifier: "db-1".into(),
            engine: "postgres".into(),
            ..Default::default()
        };
        let row = InstanceRow::new(&instance, &EncryptionVerdict::Enabled("1".into()));

        assert!(!row.storage_encrypted);
        assert_eq!(row.availability_zone, "");
        assert_eq!(row.encryption_in_transit, "1");
    }

    #[test]
    fn test_instance_csv() {
        let instance = DbInstance {
            identifier: "orders".into(),
            engine: "mysql".into(),
            storage_encrypted: None,
            availability_zone: Some("us-east-1a".into()),
            parameter_groups: vec![],
        };
        let rows = vec![InstanceRow::new(
            &instance,
            &EncryptionVerdict::Disabled("OFF".into()),
        )];

        assert_eq!(
            render(&rows),
            "DB Instance,StorageEncryption,EncryptionInTransit,Engine,Availability Zone\n\
             orders,false,OFF,mysql,us-east-1a\n"
        );
    }

    #[test]
    fn test_cluster_csv_joins_zones() {
        let cluster = DbCluster {
            identifier: "analytics".into(),
            engine: "aurora-postgresql".into(),
            storage_encrypted: Some(true),
            availability_zones: vec!["eu-west-1a".into(), "eu-west-1b".into()],
            parameter_group: Some("aurora-pg".into()),
        };
        let rows = vec![ClusterRow::new(
            &cluster,
            &EncryptionVerdict::Unset {
                parameter: "ssl".into(),
            },
        )];

        assert_eq!(
            render(&rows),
            "DB Cluster,StorageEncrypted,EncryptionInTransit,Engine,Availability Zones\n\
             analytics,true,nil,aurora-postgresql,\"eu-west-1a, eu-west-1b\"\n"
        );
    }

    #[test]
    fn test_empty_report_still_has_header() {
        let rows: Vec<ClusterRow> = Vec::new();
        assert_eq!(
            render(&rows),
            "DB Cluster,StorageEncrypted,EncryptionInTransit,Engine,Availability Zones\n"
        );
    }

    #[test]
    fn test_report_path() {
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let path = report_path(Path::new("/tmp/out"), INSTANCE_REPORT_PREFIX, &timestamp);
        assert_eq!(path, PathBuf::from("/tmp/out/DBInstances_20240309_140507.csv"));
    }

    #[test]
    fn test_write_report_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let rows: Vec<InstanceRow> = Vec::new();

        let path = write_report(dir.path(), &timestamp, &rows).unwrap();

        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("DBInstances_20240309_140507.csv")
        );
        assert!(std::fs::read_to_string(path).unwrap().starts_with("DB Instance,"));
    }

    #[test]
    fn test_write_report_missing_directory() {
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let rows: Vec<ClusterRow> = Vec::new();
        let err = write_report(Path::new("/nonexistent/dir"), &timestamp, &rows).unwrap_err();
        assert!(matches!(err, ScanError::IoError(_)));
    }
}
