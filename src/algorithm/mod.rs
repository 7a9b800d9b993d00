//! Algorithms over the cleaned panels

pub mod risk_index;

pub use risk_index::{build_risk_panel, join_on_year, score_rows};
