//! Record classification: which grades count toward statistics.

use serde::Serialize;

use crate::models::GradeRecord;

/// Why a record was left out of averages, pass counts and progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    TestNotTaken,
    ExcludedFromFinal,
    NonNumeric,
}

/// Result of classifying a single record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Classification {
    Countable { value: f64 },
    Excluded { reason: ExclusionReason },
}

impl Classification {
    pub fn value(&self) -> Option<f64> {
        match self {
            Classification::Countable { value } => Some(*value),
            Classification::Excluded { .. } => None,
        }
    }
}

/// Parses `result` as a locale-invariant decimal.
///
/// The whole trimmed string must be a finite number with `.` as the decimal
/// separator; anything else (empty, `"—"`, `"7,5"`, `"NaN"`) is `None`.
pub fn numeric_result(record: &GradeRecord) -> Option<f64> {
    parse_decimal(&record.result)
}

pub(crate) fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Classifies a record. Flags are checked before the numeric value.
pub fn classify(record: &GradeRecord) -> Classification {
    if record.test_not_taken {
        return Classification::Excluded {
            reason: ExclusionReason::TestNotTaken,
        };
    }

    if record.excluded_from_final {
        return Classification::Excluded {
            reason: ExclusionReason::ExcludedFromFinal,
        };
    }

    match numeric_result(record) {
        Some(value) => Classification::Countable { value },
        None => Classification::Excluded {
            reason: ExclusionReason::NonNumeric,
        },
    }
}

pub fn is_countable(record: &GradeRecord) -> bool {
    matches!(classify(record), Classification::Countable { .. })
}

/// Yields every countable record together with its parsed value, in input order.
pub fn countable<'a, I>(records: I) -> impl Iterator<Item = (&'a GradeRecord, f64)>
where
    I: IntoIterator<Item = &'a GradeRecord>,
{
    records
        .into_iter()
        .filter_map(|r| classify(r).value().map(|v| (r, v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(result: &str, excluded: bool, not_taken: bool) -> GradeRecord {
        GradeRecord {
            result: result.to_string(),
            excluded_from_final: excluded,
            test_not_taken: not_taken,
            ..Default::default()
        }
    }

    #[test]
    fn test_numeric_result_parsing() {
        assert_eq!(numeric_result(&record("8.5", false, false)), Some(8.5));
        assert_eq!(numeric_result(&record(" 6 ", false, false)), Some(6.0));
        assert_eq!(numeric_result(&record("", false, false)), None);
        assert_eq!(numeric_result(&record("—", false, false)), None);
        assert_eq!(numeric_result(&record("7,5", false, false)), None);
        assert_eq!(numeric_result(&record("NaN", false, false)), None);
        assert_eq!(numeric_result(&record("inf", false, false)), None);
    }

    #[test]
    fn test_classify_flags_win_over_value() {
        assert_eq!(
            classify(&record("8.0", false, true)),
            Classification::Excluded {
                reason: ExclusionReason::TestNotTaken
            }
        );
        assert_eq!(
            classify(&record("8.0", true, false)),
            Classification::Excluded {
                reason: ExclusionReason::ExcludedFromFinal
            }
        );
        assert_eq!(
            classify(&record("abc", false, false)),
            Classification::Excluded {
                reason: ExclusionReason::NonNumeric
            }
        );
        assert_eq!(
            classify(&record("5.9", false, false)),
            Classification::Countable { value: 5.9 }
        );
    }

    #[test]
    fn test_excluded_with_numeric_result_still_parses() {
        let r = record("5.9", true, false);
        assert!(!is_countable(&r));
        assert_eq!(numeric_result(&r), Some(5.9));
    }

    #[test]
    fn test_countable_preserves_order() {
        let records = vec![
            record("7.0", false, false),
            record("x", false, false),
            record("9.0", false, false),
        ];
        let values: Vec<f64> = countable(&records).map(|(_, v)| v).collect();
        assert_eq!(values, vec![7.0, 9.0]);
    }
}
