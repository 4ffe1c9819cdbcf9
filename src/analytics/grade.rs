use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::analytics::PASSING_GRADE;

/// Numeric band used by the grade filter.
///
/// | Range        | Band         |
/// |--------------|--------------|
/// | >= 8.0       | Excellent    |
/// | [7.0, 8.0)   | Good         |
/// | [6.0, 7.0)   | Sufficient   |
/// | < 6.0        | Insufficient |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeBand {
    Excellent,
    Good,
    Sufficient,
    Insufficient,
}

impl GradeBand {
    pub fn of(value: f64) -> Self {
        match value {
            v if v >= 8.0 => GradeBand::Excellent,
            v if v >= 7.0 => GradeBand::Good,
            v if v >= 6.0 => GradeBand::Sufficient,
            _ => GradeBand::Insufficient,
        }
    }

    pub fn contains(self, value: f64) -> bool {
        GradeBand::of(value) == self
    }
}

impl FromStr for GradeBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "excellent" => Ok(GradeBand::Excellent),
            "good" => Ok(GradeBand::Good),
            "sufficient" => Ok(GradeBand::Sufficient),
            "insufficient" => Ok(GradeBand::Insufficient),
            other => Err(format!("unknown grade band '{other}'")),
        }
    }
}

impl fmt::Display for GradeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GradeBand::Excellent => "excellent",
            GradeBand::Good => "good",
            GradeBand::Sufficient => "sufficient",
            GradeBand::Insufficient => "insufficient",
        };
        f.write_str(s)
    }
}

/// Display status shown next to a single grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeStatus {
    Good,
    Sufficient,
    Insufficient,
}

impl GradeStatus {
    pub fn of(value: f64) -> Self {
        match value {
            v if v >= 7.5 => GradeStatus::Good,
            v if v >= PASSING_GRADE => GradeStatus::Sufficient,
            _ => GradeStatus::Insufficient,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GradeStatus::Good => "Goed",
            GradeStatus::Sufficient => "Voldoende",
            GradeStatus::Insufficient => "Onvoldoende",
        }
    }
}

pub fn is_passing(value: f64) -> bool {
    value >= PASSING_GRADE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(GradeBand::of(10.0), GradeBand::Excellent);
        assert_eq!(GradeBand::of(8.0), GradeBand::Excellent);
        assert_eq!(GradeBand::of(7.99), GradeBand::Good);
        assert_eq!(GradeBand::of(7.0), GradeBand::Good);
        assert_eq!(GradeBand::of(6.99), GradeBand::Sufficient);
        assert_eq!(GradeBand::of(6.0), GradeBand::Sufficient);
        assert_eq!(GradeBand::of(5.99), GradeBand::Insufficient);
        assert_eq!(GradeBand::of(1.0), GradeBand::Insufficient);
    }

    #[test]
    fn test_band_from_str() {
        assert_eq!("Excellent".parse::<GradeBand>(), Ok(GradeBand::Excellent));
        assert_eq!("insufficient".parse::<GradeBand>(), Ok(GradeBand::Insufficient));
        assert!("great".parse::<GradeBand>().is_err());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(GradeStatus::of(7.5).label(), "Goed");
        assert_eq!(GradeStatus::of(7.4).label(), "Voldoende");
        assert_eq!(GradeStatus::of(6.0).label(), "Voldoende");
        assert_eq!(GradeStatus::of(5.5).label(), "Onvoldoende");
    }

    #[test]
    fn test_passing_uses_canonical_threshold() {
        assert!(is_passing(6.0));
        assert!(!is_passing(5.5));
    }
}
