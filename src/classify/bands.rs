// Severity bands.
//
// Every threshold is a strict "greater than". The values are fixed: reports
// and exported matrices from different runs have to be comparable.

use serde::{Deserialize, Serialize};

/// Pairs above this score are kept in the run's pair list.
pub const REPORT_THRESHOLD: f64 = 20.0;
/// Matrix cell highlight, moderate.
pub const MATRIX_MODERATE: f64 = 35.0;
/// Matrix cell highlight, severe.
pub const MATRIX_SEVERE: f64 = 50.0;
/// Documents whose highest similarity is above this are flagged.
pub const FLAG_THRESHOLD: f64 = 30.0;
/// Assignments table row highlight, moderate.
pub const ROW_MODERATE: f64 = 50.0;
/// Assignments table row highlight, severe.
pub const ROW_SEVERE: f64 = 70.0;
/// Class-average warning.
pub const CLASS_AVERAGE_WARNING: f64 = 50.0;

pub fn is_report_worthy(score: f64) -> bool {
    score > REPORT_THRESHOLD
}

pub fn is_flagged(similarity: f64) -> bool {
    similarity > FLAG_THRESHOLD
}

pub fn class_average_warning(mean: f64) -> bool {
    mean > CLASS_AVERAGE_WARNING
}

/// Highlight band for a single cell of the comparison matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairBand {
    Low,
    Moderate,
    Severe,
}

impl PairBand {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s > MATRIX_SEVERE => PairBand::Severe,
            s if s > MATRIX_MODERATE => PairBand::Moderate,
            _ => PairBand::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PairBand::Low => "Low",
            PairBand::Moderate => "Moderate",
            PairBand::Severe => "Severe",
        }
    }
}

impl std::fmt::Display for PairBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Highlight band for a row of the assignments table (per-document aggregate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowBand {
    Normal,
    Moderate,
    Severe,
}

impl RowBand {
    pub fn from_score(similarity: f64) -> Self {
        match similarity {
            s if s > ROW_SEVERE => RowBand::Severe,
            s if s > ROW_MODERATE => RowBand::Moderate,
            _ => RowBand::Normal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RowBand::Normal => "Normal",
            RowBand::Moderate => "Moderate",
            RowBand::Severe => "Severe",
        }
    }
}

impl std::fmt::Display for RowBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_band_boundaries() {
        assert_eq!(PairBand::from_score(35.0), PairBand::Low);
        assert_eq!(PairBand::from_score(35.01), PairBand::Moderate);
        assert_eq!(PairBand::from_score(50.0), PairBand::Moderate);
        assert_eq!(PairBand::from_score(50.01), PairBand::Severe);
    }

    #[test]
    fn test_row_band_boundaries() {
        assert_eq!(RowBand::from_score(50.0), RowBand::Normal);
        assert_eq!(RowBand::from_score(50.5), RowBand::Moderate);
        assert_eq!(RowBand::from_score(70.0), RowBand::Moderate);
        assert_eq!(RowBand::from_score(70.5), RowBand::Severe);
    }

    #[test]
    fn test_thresholds_are_strict() {
        assert!(!is_report_worthy(20.0));
        assert!(is_report_worthy(20.001));
        assert!(!is_flagged(30.0));
        assert!(is_flagged(30.001));
        assert!(!class_average_warning(50.0));
        assert!(class_average_warning(50.001));
    }
}
