//! Record types flowing through the pipeline
//!
//! Every record is created once by the stage that owns it and is never
//! mutated afterwards; stages hand each other whole panels.

pub mod district;
pub mod income;
pub mod risk;
pub mod unemployment;

pub use district::District;
pub use income::{IncomePanel, IncomeRecord, IncomeRiskRecord};
pub use risk::{AlertLevel, IncompleteJoin, RiskIndexRecord, RiskPanel};
pub use unemployment::{UnemploymentPanel, UnemploymentRecord};
