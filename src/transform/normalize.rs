//! Min-max normalization over a finished panel
//!
//! Bounds are computed once over the whole panel and then mapped over every
//! value, so the result does not depend on row order.

use crate::error::{IrsError, Result};

/// Values rescaled to [0, 1] together with the bounds used
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Smallest input value
    pub min: f64,
    /// Largest input value
    pub max: f64,
    /// Rescaled values, same order as the input
    pub values: Vec<f64>,
}

/// Rescale `values` linearly so the panel minimum maps to 0 and the maximum to 1
///
/// # Arguments
/// * `panel` - Name of the panel, used in errors
/// * `values` - Panel values
///
/// # Errors
/// `NoData` for an empty panel, `DegenerateRange` when every value is equal.
pub fn min_max(panel: &str, values: &[f64]) -> Result<Normalized> {
    let (min, max) = values
        .iter()
        .fold(None, |bounds: Option<(f64, f64)>, &v| match bounds {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .ok_or_else(|| IrsError::no_data(format!("{panel} panel is empty")))?;

    let width = max - min;
    if width == 0.0 {
        return Err(IrsError::DegenerateRange {
            panel: panel.to_string(),
            value: min,
        });
    }

    Ok(Normalized {
        min,
        max,
        values: values.iter().map(|v| (v - min) / width).collect(),
    })
}
