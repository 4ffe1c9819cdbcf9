//! Wire model for the grades payload.
//!
//! Field names on the wire follow the upstream Dutch API; every field is
//! optional so a single malformed item never rejects the whole document.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level document returned by the grades endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GradesResponse {
    #[serde(default)]
    pub items: Vec<GradeRecord>,
}

/// The course a grade belongs to. `name` is the grouping key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(rename = "naam", default)]
    pub name: String,
    #[serde(rename = "afkorting", default)]
    pub short_code: String,
}

/// Student identity, only used for the greeting line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    #[serde(rename = "UUID", default)]
    pub uuid: String,
    #[serde(rename = "roepnaam", default)]
    pub given_name: String,
    #[serde(rename = "achternaam", default)]
    pub surname: String,
    #[serde(rename = "leerlingnummer", default)]
    pub student_number: i64,
}

/// One observed result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    #[serde(rename = "vak", default)]
    pub subject: Subject,
    #[serde(rename = "resultaat", default)]
    pub result: String,
    #[serde(rename = "geldendResultaat", default)]
    pub final_result: String,
    #[serde(rename = "datumInvoer", default)]
    pub entry_date: String,
    #[serde(rename = "teltNietmee", default)]
    pub excluded_from_final: bool,
    #[serde(rename = "toetsNietGemaakt", default)]
    pub test_not_taken: bool,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(rename = "$type", default, skip_serializing_if = "String::is_empty")]
    pub type_tag: String,
    #[serde(rename = "leerling", default)]
    pub owner: Student,
}

impl GradeRecord {
    /// Parses `entry_date` leniently.
    ///
    /// Accepts RFC 3339, a naive date-time (taken as UTC) or a bare date
    /// (midnight UTC). Anything else yields `None`.
    pub fn entry_time(&self) -> Option<DateTime<Utc>> {
        let raw = self.entry_date.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }

        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(naive.and_utc());
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

/// Name used in the greeting: the first record's given name, or `"Student"`.
pub fn student_name(records: &[GradeRecord]) -> &str {
    records
        .first()
        .map(|r| r.owner.given_name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("Student")
}
