//! Filtering and ordering of the full record list.
//!
//! Unlike aggregation, this works on every record: the grade band predicate
//! looks at the parsed result regardless of countability.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::analytics::grade::GradeBand;
use crate::analytics::validate::numeric_result;
use crate::models::GradeRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Newest first.
    #[default]
    DateDesc,
    /// Oldest first.
    DateOld,
    SubjectAz,
    GradeDesc,
    GradeAsc,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "date-desc" => Ok(SortKey::DateDesc),
            "date-old" => Ok(SortKey::DateOld),
            "subject-az" => Ok(SortKey::SubjectAz),
            "grade-desc" => Ok(SortKey::GradeDesc),
            "grade-asc" => Ok(SortKey::GradeAsc),
            other => Err(format!(
                "unknown sort key '{other}' (expected date-desc, date-old, subject-az, grade-desc or grade-asc)"
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortKey::DateDesc => "date-desc",
            SortKey::DateOld => "date-old",
            SortKey::SubjectAz => "subject-az",
            SortKey::GradeDesc => "grade-desc",
            SortKey::GradeAsc => "grade-asc",
        };
        f.write_str(s)
    }
}

/// Keyword that disables the subject or band filter.
pub const ALL: &str = "all";

/// Subject filter from user input; `"all"` (any case) means no filter.
pub fn subject_choice(value: &str) -> Option<String> {
    let value = value.trim();
    if value.eq_ignore_ascii_case(ALL) {
        None
    } else {
        Some(value.to_string())
    }
}

/// Grade band filter from user input; `"all"` (any case) means no filter.
pub fn band_choice(value: &str) -> Result<Option<GradeBand>, String> {
    if value.trim().eq_ignore_ascii_case(ALL) {
        return Ok(None);
    }
    value.parse().map(Some)
}

/// Filter and sort parameters. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterCriteria {
    pub subject: Option<String>,
    pub band: Option<GradeBand>,
    pub sort: SortKey,
    /// Case-insensitive substring of the subject name or short code.
    pub search: Option<String>,
}

impl FilterCriteria {
    pub fn matches(&self, record: &GradeRecord) -> bool {
        if let Some(subject) = &self.subject {
            if &record.subject.name != subject {
                return false;
            }
        }

        if let Some(band) = self.band {
            match numeric_result(record) {
                Some(value) if band.contains(value) => {}
                _ => return false,
            }
        }

        if let Some(query) = self.search.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let query = query.to_lowercase();
            let in_name = record.subject.name.to_lowercase().contains(&query);
            let in_code = record.subject.short_code.to_lowercase().contains(&query);
            if !in_name && !in_code {
                return false;
            }
        }

        true
    }
}

/// Orders two optional keys, placing missing keys last regardless of direction.
fn missing_last<T: PartialOrd>(a: Option<T>, b: Option<T>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => {
            let ord = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            if descending { ord.reverse() } else { ord }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare(key: SortKey, a: &GradeRecord, b: &GradeRecord) -> Ordering {
    match key {
        SortKey::DateDesc => missing_last(a.entry_time(), b.entry_time(), true),
        SortKey::DateOld => missing_last(a.entry_time(), b.entry_time(), false),
        SortKey::SubjectAz => a
            .subject
            .name
            .to_lowercase()
            .cmp(&b.subject.name.to_lowercase()),
        SortKey::GradeDesc => missing_last(numeric_result(a), numeric_result(b), true),
        SortKey::GradeAsc => missing_last(numeric_result(a), numeric_result(b), false),
    }
}

/// Filters `records` by `criteria`, then sorts the survivors.
///
/// The sort is stable and the input is left untouched. Records with an
/// unparseable date or result sort after all others for date and grade keys.
pub fn filter_and_sort<'a>(
    records: &'a [GradeRecord],
    criteria: &FilterCriteria,
) -> Vec<&'a GradeRecord> {
    let mut view: Vec<&GradeRecord> = records.iter().filter(|r| criteria.matches(r)).collect();
    view.sort_by(|a, b| compare(criteria.sort, a, b));
    view
}

/// The `n` most recently entered records.
pub fn recent(records: &[GradeRecord], n: usize) -> Vec<&GradeRecord> {
    let mut view = filter_and_sort(records, &FilterCriteria::default());
    view.truncate(n);
    view
}
