//! Cleaning and normalization of the raw sources into panels

pub mod income;
pub mod normalize;
pub mod numeric;
pub mod unemployment;

pub use income::load_income_panel;
pub use normalize::{Normalized, min_max};
pub use numeric::parse_locale_decimal;
pub use unemployment::{derive_year, load_unemployment_panel};
