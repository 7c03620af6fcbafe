use crate::common::types::{RiskCategory, Trade};

/// A single classification rule
///
/// Rules are evaluated in order by the [`RiskClassifier`](super::RiskClassifier);
/// the first rule whose predicate matches decides the category.
///
/// # Implementation Notes
///
/// - `is_match` must be pure: no I/O, no interior state
/// - Rules do not need to be mutually exclusive, ordering resolves overlaps
pub trait RiskRule: Send + Sync {
    /// Category assigned when this rule matches
    fn category(&self) -> RiskCategory;

    /// Whether the trade falls under this rule
    fn is_match(&self, trade: &Trade) -> bool;
}

/// Boxed rule for dynamic dispatch
pub type BoxedRiskRule = Box<dyn RiskRule>;
