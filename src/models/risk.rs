//! Risk index records and the final panel

use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;

use crate::error::IrsError;

/// Alert level of a district-year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertLevel {
    /// No alert, or no previous year to compare with
    Ok,
    /// The index rose by more than the alert threshold
    Red,
}

impl AlertLevel {
    /// Classify a year-over-year variation
    ///
    /// RED only when a variation exists and is strictly above `threshold`.
    #[must_use]
    pub fn classify(variation: Option<f64>, threshold: f64) -> Self {
        match variation {
            Some(v) if v > threshold => Self::Red,
            _ => Self::Ok,
        }
    }

    /// Label used in tables and exports
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Red => "RED",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Social risk index of one district in one year
#[derive(Debug, Clone, PartialEq)]
pub struct RiskIndexRecord {
    /// District label as found in the income source
    pub district: String,
    /// Reference year
    pub year: i32,
    /// Weighted index in [0, 1]
    pub irs: f64,
    /// Index of the district's previous available year
    pub irs_prev: Option<f64>,
    /// `irs / irs_prev - 1`
    pub irs_var_pct: Option<f64>,
    /// Alert classification of `irs_var_pct`
    pub alert_level: AlertLevel,
}

/// Income row left out of the index because its year had no unemployment value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncompleteJoin {
    pub district: String,
    pub year: i32,
}

impl IncompleteJoin {
    /// Create a new incomplete join entry
    #[must_use]
    pub fn new(district: impl Into<String>, year: i32) -> Self {
        Self {
            district: district.into(),
            year,
        }
    }

    /// The error this row stands for
    #[must_use]
    pub fn to_error(&self) -> IrsError {
        IrsError::IncompleteJoin {
            district: self.district.clone(),
            year: self.year,
        }
    }
}

impl fmt::Display for IncompleteJoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.district, self.year)
    }
}

/// Final panel of the pipeline, ordered by district then year
#[derive(Debug, Clone, Default)]
pub struct RiskPanel {
    /// Index records
    pub records: Vec<RiskIndexRecord>,
    /// Rows excluded because their year had no unemployment value
    pub incomplete_joins: Vec<IncompleteJoin>,
}

impl RiskPanel {
    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the panel is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of one year, in district order
    pub fn for_year(&self, year: i32) -> impl Iterator<Item = &RiskIndexRecord> {
        self.records.iter().filter(move |r| r.year == year)
    }

    /// Records of one district, in year order
    pub fn for_district<'a>(
        &'a self,
        district: &'a str,
    ) -> impl Iterator<Item = &'a RiskIndexRecord> + 'a {
        self.records.iter().filter(move |r| r.district == district)
    }

    /// Distinct district labels, sorted
    #[must_use]
    pub fn districts(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|r| r.district.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct years, sorted
    #[must_use]
    pub fn years(&self) -> Vec<i32> {
        self.records
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// RED rows sorted by year ascending, then variation descending
    #[must_use]
    pub fn red_alerts(&self) -> Vec<&RiskIndexRecord> {
        self.records
            .iter()
            .filter(|r| r.alert_level == AlertLevel::Red)
            .sorted_by(|a, b| {
                a.year.cmp(&b.year).then_with(|| {
                    let av = a.irs_var_pct.unwrap_or(f64::NEG_INFINITY);
                    let bv = b.irs_var_pct.unwrap_or(f64::NEG_INFINITY);
                    bv.total_cmp(&av)
                })
            })
            .collect()
    }
}
