use super::rules::default_rules;
use super::traits::BoxedRiskRule;
use crate::common::errors::{AnalysisError, Result};
use crate::common::types::{RiskCategory, Trade};

/// Ordered first-match classifier
///
/// Pure and side-effect free, so it can be shared between the synchronous
/// endpoints and the batch workers behind an `Arc`.
pub struct RiskClassifier {
    rules: Vec<BoxedRiskRule>,
}

impl RiskClassifier {
    /// Create a classifier evaluating `rules` in the given order
    pub fn new(rules: Vec<BoxedRiskRule>) -> Self {
        Self { rules }
    }

    /// Classifier with the standard low/medium/high rules
    pub fn with_default_rules() -> Self {
        Self::new(default_rules())
    }

    /// Category of the first matching rule
    ///
    /// Fails with [`AnalysisError::NoCategoryMatched`] when no rule applies,
    /// e.g. a large trade from a sector that is neither public nor private.
    pub fn classify(&self, trade: &Trade) -> Result<RiskCategory> {
        self.rules
            .iter()
            .find(|rule| rule.is_match(trade))
            .map(|rule| rule.category())
            .ok_or_else(|| AnalysisError::NoCategoryMatched {
                value: trade.value,
                sector: trade.client_sector.clone(),
            })
    }

    /// Classify every trade, preserving order
    pub fn classify_many(&self, trades: &[Trade]) -> Result<Vec<RiskCategory>> {
        trades.iter().map(|trade| self.classify(trade)).collect()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl Default for RiskClassifier {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

impl std::fmt::Debug for RiskClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let categories: Vec<_> = self.rules.iter().map(|r| r.category()).collect();
        f.debug_struct("RiskClassifier")
            .field("rules", &categories)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::traits::RiskRule;
    use rust_decimal_macros::dec;

    struct FixedRule {
        category: RiskCategory,
        matches: bool,
    }

    impl RiskRule for FixedRule {
        fn category(&self) -> RiskCategory {
            self.category
        }

        fn is_match(&self, _trade: &Trade) -> bool {
            self.matches
        }
    }

    #[test]
    fn test_returns_first_matching_category() {
        let classifier = RiskClassifier::new(vec![
            Box::new(FixedRule {
                category: RiskCategory::Low,
                matches: false,
            }),
            Box::new(FixedRule {
                category: RiskCategory::High,
                matches: true,
            }),
            Box::new(FixedRule {
                category: RiskCategory::Medium,
                matches: true,
            }),
        ]);

        let category = classifier.classify(&Trade::new(dec!(2000000), "Private")).unwrap();
        assert_eq!(category, RiskCategory::High);
    }

    #[test]
    fn test_fails_when_no_rule_matches() {
        let classifier = RiskClassifier::new(vec![Box::new(FixedRule {
            category: RiskCategory::Low,
            matches: false,
        })]);

        let result = classifier.classify(&Trade::new(dec!(1), "Any"));
        assert!(matches!(result, Err(AnalysisError::NoCategoryMatched { .. })));
    }

    #[test]
    fn test_default_rules_thresholds() {
        let classifier = RiskClassifier::default();
        assert_eq!(classifier.rule_count(), 3);

        let trades = vec![
            Trade::new(dec!(500), "Public"),
            Trade::new(dec!(1000000), "Public"),
            Trade::new(dec!(2000000), "Private"),
            Trade::new(dec!(999999), "Private"),
        ];
        let categories = classifier.classify_many(&trades).unwrap();
        assert_eq!(
            categories,
            vec![
                RiskCategory::Low,
                RiskCategory::Medium,
                RiskCategory::High,
                RiskCategory::Low,
            ]
        );
    }

    #[test]
    fn test_large_trade_from_unknown_sector_is_unclassifiable() {
        let classifier = RiskClassifier::default();
        let err = classifier
            .classify(&Trade::new(dec!(3000000), "Government"))
            .unwrap_err();
        assert!(err.to_string().contains("Government"));
    }

    #[test]
    fn test_classify_many_stops_at_first_failure() {
        let classifier = RiskClassifier::default();
        let trades = vec![
            Trade::new(dec!(10), "Public"),
            Trade::new(dec!(3000000), "Other"),
        ];
        assert!(classifier.classify_many(&trades).is_err());
    }
}
