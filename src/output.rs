//! Output formatting for analytics results.
//!
//! Supports JSON serialization and CSV export of record lists.

use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use tracing::debug;

use crate::analytics::validate::is_countable;
use crate::models::GradeRecord;

/// Writes a value to stdout as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)?;
    debug!(bytes = rendered.len(), "Printing JSON");
    println!("{rendered}");
    Ok(())
}

/// Flattened CSV shape of a [`GradeRecord`].
#[derive(Debug, Serialize)]
struct GradeRow<'a> {
    subject: &'a str,
    short_code: &'a str,
    result: &'a str,
    final_result: &'a str,
    entry_date: &'a str,
    kind: &'a str,
    countable: bool,
    excluded_from_final: bool,
    test_not_taken: bool,
}

impl<'a> From<&'a GradeRecord> for GradeRow<'a> {
    fn from(r: &'a GradeRecord) -> Self {
        GradeRow {
            subject: &r.subject.name,
            short_code: &r.subject.short_code,
            result: &r.result,
            final_result: &r.final_result,
            entry_date: &r.entry_date,
            kind: &r.kind,
            countable: is_countable(r),
            excluded_from_final: r.excluded_from_final,
            test_not_taken: r.test_not_taken,
        }
    }
}

/// Writes `records` to a CSV file at `path`, replacing any existing file.
pub fn write_records_csv(path: &str, records: &[&GradeRecord]) -> Result<()> {
    debug!(path, rows = records.len(), "Writing CSV export");

    let mut writer = WriterBuilder::new().has_headers(true).from_path(path)?;
    for record in records {
        writer.serialize(GradeRow::from(*record))?;
    }
    writer.flush()?;

    Ok(())
}
