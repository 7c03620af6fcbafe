use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::traits::{BoxedRiskRule, RiskRule};
use crate::common::types::{RiskCategory, Trade};

/// Trades at or above this value are never low risk
pub const LARGE_TRADE_THRESHOLD: Decimal = dec!(1000000);

pub const PUBLIC_SECTOR: &str = "Public";
pub const PRIVATE_SECTOR: &str = "Private";

/// Value below the large-trade threshold, any sector
#[derive(Debug, Clone, Copy, Default)]
pub struct LowRiskRule;

impl RiskRule for LowRiskRule {
    fn category(&self) -> RiskCategory {
        RiskCategory::Low
    }

    fn is_match(&self, trade: &Trade) -> bool {
        trade.value < LARGE_TRADE_THRESHOLD
    }
}

/// Large trade from a public sector client
#[derive(Debug, Clone, Copy, Default)]
pub struct MediumRiskRule;

impl RiskRule for MediumRiskRule {
    fn category(&self) -> RiskCategory {
        RiskCategory::Medium
    }

    fn is_match(&self, trade: &Trade) -> bool {
        trade.value >= LARGE_TRADE_THRESHOLD
            && trade.client_sector.eq_ignore_ascii_case(PUBLIC_SECTOR)
    }
}

/// Large trade from a private sector client
#[derive(Debug, Clone, Copy, Default)]
pub struct HighRiskRule;

impl RiskRule for HighRiskRule {
    fn category(&self) -> RiskCategory {
        RiskCategory::High
    }

    fn is_match(&self, trade: &Trade) -> bool {
        trade.value >= LARGE_TRADE_THRESHOLD
            && trade.client_sector.eq_ignore_ascii_case(PRIVATE_SECTOR)
    }
}

/// Standard rule set: low, medium, high
pub fn default_rules() -> Vec<BoxedRiskRule> {
    vec![
        Box::new(LowRiskRule),
        Box::new(MediumRiskRule),
        Box::new(HighRiskRule),
    ]
}
