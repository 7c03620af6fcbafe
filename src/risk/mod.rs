//! Risk classification
//!
//! A [`RiskClassifier`] walks an ordered list of [`RiskRule`]s and returns
//! the category of the first match:
//!
//! | Rule | Matches | Category |
//! |------|---------|----------|
//! | [`LowRiskRule`] | value < 1,000,000 | `LOW` |
//! | [`MediumRiskRule`] | value ≥ 1,000,000 and sector `Public` | `MEDIUM` |
//! | [`HighRiskRule`] | value ≥ 1,000,000 and sector `Private` | `HIGH` |
//!
//! A trade no rule matches is an error ([`NoCategoryMatched`]).
//!
//! [`NoCategoryMatched`]: crate::common::errors::AnalysisError::NoCategoryMatched

mod classifier;
mod rules;
mod summary;
mod traits;

pub use classifier::RiskClassifier;
pub use rules::{
    default_rules, HighRiskRule, LowRiskRule, MediumRiskRule, LARGE_TRADE_THRESHOLD,
    PRIVATE_SECTOR, PUBLIC_SECTOR,
};
pub use summary::RiskSummaryService;
pub use traits::{BoxedRiskRule, RiskRule};
