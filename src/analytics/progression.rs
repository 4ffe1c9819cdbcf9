use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use tracing::debug;

use crate::analytics::types::{ProgressionPoint, SubjectPoint};
use crate::analytics::utility::{max, mean};
use crate::analytics::validate::countable;
use crate::models::GradeRecord;

const MONTHS_NL: [&str; 12] = [
    "jan", "feb", "mrt", "apr", "mei", "jun", "jul", "aug", "sep", "okt", "nov", "dec",
];

/// `"feb 2024"`
pub fn month_label(month: NaiveDate) -> String {
    format!("{} {}", MONTHS_NL[month.month0() as usize], month.year())
}

/// `"5 feb"`
pub fn day_label(date: NaiveDate) -> String {
    format!("{} {}", date.day(), MONTHS_NL[date.month0() as usize])
}

fn month_start(t: DateTime<Utc>) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(t.year(), t.month(), 1)
}

/// Buckets countable records per calendar month with a running average.
///
/// Months without countable records are omitted. `cumulative_average` of a
/// point includes every dated countable result up to the end of that month.
/// Records whose entry date cannot be parsed cannot be bucketed and are
/// skipped; [`OverallStats::undated_count`] reports how many. The last point
/// matches the overall average only when that count is zero.
///
/// [`OverallStats::undated_count`]: crate::analytics::types::OverallStats::undated_count
pub fn build_monthly_progression(records: &[GradeRecord]) -> Vec<ProgressionPoint> {
    let mut dated: Vec<(DateTime<Utc>, f64)> = countable(records)
        .filter_map(|(r, v)| r.entry_time().map(|t| (t, v)))
        .collect();
    dated.sort_by_key(|(t, _)| *t);

    let mut buckets: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for (t, value) in dated {
        if let Some(month) = month_start(t) {
            buckets.entry(month).or_default().push(value);
        }
    }

    let mut running_sum = 0.0;
    let mut running_count = 0usize;

    let points: Vec<ProgressionPoint> = buckets
        .into_iter()
        .filter_map(|(month, values)| {
            let month_average = mean(&values)?;
            let month_highest = max(&values)?;

            running_sum += values.iter().sum::<f64>();
            running_count += values.len();

            Some(ProgressionPoint {
                month,
                month_label: month_label(month),
                month_average,
                cumulative_average: running_sum / running_count as f64,
                count: values.len(),
                month_highest,
            })
        })
        .collect();

    debug!(months = points.len(), "Built monthly progression");
    points
}

/// Chronological series of one subject's countable grades.
pub fn build_subject_progression(records: &[GradeRecord], subject: &str) -> Vec<SubjectPoint> {
    let mut dated: Vec<(DateTime<Utc>, &GradeRecord, f64)> =
        countable(records.iter().filter(|r| r.subject.name == subject))
            .filter_map(|(r, v)| r.entry_time().map(|t| (t, r, v)))
            .collect();
    dated.sort_by_key(|(t, _, _)| *t);

    dated
        .into_iter()
        .map(|(t, record, value)| SubjectPoint {
            day_label: day_label(t.date_naive()),
            value,
            kind: record.kind.clone(),
        })
        .collect()
}
