use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::analytics::grade::is_passing;
use crate::analytics::types::{OverallStats, SubjectAggregate, Trend};
use crate::analytics::utility::{max, mean};
use crate::analytics::validate::countable;
use crate::models::GradeRecord;

/// Minimum change between the last two results before a trend is reported.
const TREND_DELTA: f64 = 0.2;

/// Computes [`OverallStats`] over the countable subset of `records`.
pub fn aggregate_overall(records: &[GradeRecord]) -> OverallStats {
    let scored: Vec<(&GradeRecord, f64)> = countable(records).collect();
    let values: Vec<f64> = scored.iter().map(|(_, v)| *v).collect();
    let undated_count = scored
        .iter()
        .filter(|(r, _)| r.entry_time().is_none())
        .count();

    let subject_count = records
        .iter()
        .map(|r| r.subject.name.as_str())
        .collect::<HashSet<_>>()
        .len();

    let stats = OverallStats {
        average: mean(&values),
        passed_count: values.iter().filter(|v| is_passing(**v)).count(),
        countable_total: values.len(),
        highest: max(&values),
        subject_count,
        undated_count,
    };

    debug!(
        records = records.len(),
        countable = stats.countable_total,
        subjects = stats.subject_count,
        undated = stats.undated_count,
        "Aggregated overall stats"
    );

    stats
}

/// Groups `records` by subject name in first-seen order and aggregates each group.
///
/// The per-subject `count` values always sum to `records.len()`.
pub fn aggregate_by_subject(records: &[GradeRecord]) -> Vec<SubjectAggregate> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&GradeRecord>> = HashMap::new();

    for record in records {
        let name = record.subject.name.as_str();
        groups
            .entry(name)
            .or_insert_with(|| {
                order.push(name);
                Vec::new()
            })
            .push(record);
    }

    order
        .into_iter()
        .filter_map(|name| groups.remove(name))
        .filter_map(|group| summarize(&group))
        .collect()
}

/// Aggregate for a single subject, or `None` if it has no records.
pub fn subject_aggregate(records: &[GradeRecord], subject: &str) -> Option<SubjectAggregate> {
    let group: Vec<&GradeRecord> = records
        .iter()
        .filter(|r| r.subject.name == subject)
        .collect();
    summarize(&group)
}

fn summarize(group: &[&GradeRecord]) -> Option<SubjectAggregate> {
    let first = group.first()?;

    let scored: Vec<(&GradeRecord, f64)> = countable(group.iter().copied()).collect();
    let values: Vec<f64> = scored.iter().map(|(_, v)| *v).collect();

    // Most recent entry date wins; on ties the earlier record in input order is kept.
    let mut latest: Option<(&GradeRecord, f64)> = None;
    for &(record, value) in &scored {
        match latest {
            Some((best, _)) if record.entry_time() <= best.entry_time() => {}
            _ => latest = Some((record, value)),
        }
    }

    Some(SubjectAggregate {
        name: first.subject.name.clone(),
        short_code: first.subject.short_code.clone(),
        count: group.len(),
        countable_count: values.len(),
        average: mean(&values),
        highest: max(&values),
        latest: latest.map(|(_, v)| v),
        trend: trend(&scored),
    })
}

/// Trend of the last two countable results in chronological order.
fn trend(scored: &[(&GradeRecord, f64)]) -> Trend {
    let mut chronological: Vec<_> = scored.iter().map(|(r, v)| (r.entry_time(), *v)).collect();
    chronological.sort_by(|a, b| a.0.cmp(&b.0));

    let [.., (_, previous), (_, last)] = chronological.as_slice() else {
        return Trend::Stable;
    };

    let delta = last - previous;
    if delta > TREND_DELTA {
        Trend::Improving
    } else if delta < -TREND_DELTA {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

/// Orders subjects by average, best first. Subjects without data go last.
pub fn sort_by_average_desc(subjects: &mut [SubjectAggregate]) {
    subjects.sort_by(|a, b| match (a.average, b.average) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Orders subjects alphabetically, ignoring case.
pub fn sort_by_name(subjects: &mut [SubjectAggregate]) {
    subjects.sort_by_key(|s| s.name.to_lowercase());
}
