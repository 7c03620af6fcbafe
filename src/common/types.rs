//! Domain types shared across the classifier, the job pipeline and the HTTP layer

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Risk tier assigned to a trade
///
/// Rendered upper-case (`LOW`, `MEDIUM`, `HIGH`) in every external payload,
/// including when used as a map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl RiskCategory {
    /// All categories, lowest risk first
    pub const ALL: [RiskCategory; 3] = [
        RiskCategory::Low,
        RiskCategory::Medium,
        RiskCategory::High,
    ];

    /// Upper-case name used in payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "LOW",
            RiskCategory::Medium => "MEDIUM",
            RiskCategory::High => "HIGH",
        }
    }

    /// Human-readable rule behind the category
    pub fn description(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Trades with value below 1,000,000",
            RiskCategory::Medium => {
                "Trades with value of at least 1,000,000 from a Public sector client"
            }
            RiskCategory::High => {
                "Trades with value of at least 1,000,000 from a Private sector client"
            }
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single trade submitted for risk analysis
///
/// Built once from validated input and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Trade {
    /// Notional value of the trade
    pub value: Decimal,
    /// Sector of the client (e.g. "Public", "Private")
    pub client_sector: String,
    /// Optional client identifier
    pub client_id: Option<String>,
}

impl Trade {
    /// Create a trade without a client id
    pub fn new(value: Decimal, client_sector: impl Into<String>) -> Self {
        Self {
            value,
            client_sector: client_sector.into(),
            client_id: None,
        }
    }

    /// Attach a client id
    pub fn with_client(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }
}

/// Unit of work moved through the work queue
#[derive(Debug, Clone, PartialEq)]
pub struct QueueItem {
    pub job_id: String,
    pub trade: Trade,
}

impl QueueItem {
    pub fn new(job_id: impl Into<String>, trade: Trade) -> Self {
        Self {
            job_id: job_id.into(),
            trade,
        }
    }
}

/// Structured validation error
///
/// `index` is the item position in the submitted batch, or -1 for errors
/// about the payload as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub index: i64,
    pub field: String,
    pub message: String,
}

impl FieldError {
    /// Index used for payload-level errors
    pub const PAYLOAD_INDEX: i64 = -1;

    pub fn new(index: usize, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            index: index as i64,
            field: field.into(),
            message: message.into(),
        }
    }

    /// Error about the whole payload rather than a single item
    pub fn payload(message: impl Into<String>) -> Self {
        Self {
            index: Self::PAYLOAD_INDEX,
            field: "payload".to_string(),
            message: message.into(),
        }
    }

    pub fn is_payload_error(&self) -> bool {
        self.index == Self::PAYLOAD_INDEX && self.field == "payload"
    }
}

/// Running statistics for one risk category
///
/// `top_value`/`top_client` follow the single highest-value trade seen so
/// far. Only `top_client` is ever exposed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategorySummary {
    pub count: u64,
    pub total_value: Decimal,
    pub top_client: Option<String>,
    pub top_value: Decimal,
}

impl CategorySummary {
    /// Empty summary whose top trade is `trade`
    pub fn seeded(trade: &Trade) -> Self {
        Self {
            count: 0,
            total_value: Decimal::ZERO,
            top_client: trade.client_id.clone(),
            top_value: trade.value,
        }
    }

    /// Fold a trade into the summary; ties keep the existing top
    pub fn observe(&mut self, trade: &Trade) {
        if trade.value > self.top_value {
            self.top_value = trade.value;
            self.top_client = trade.client_id.clone();
        }
        self.count += 1;
        self.total_value += trade.value;
    }
}

/// Per-category aggregation of a set of classified trades
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RiskSummary {
    pub by_category: BTreeMap<RiskCategory, CategorySummary>,
    pub processing_time_ms: u64,
}

impl RiskSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one classified trade
    pub fn record(&mut self, category: RiskCategory, trade: &Trade) {
        self.by_category
            .entry(category)
            .or_insert_with(|| CategorySummary::seeded(trade))
            .observe(trade);
    }

    /// Total number of trades recorded across categories
    pub fn total_count(&self) -> u64 {
        self.by_category.values().map(|s| s.count).sum()
    }

    pub fn get(&self, category: RiskCategory) -> Option<&CategorySummary> {
        self.by_category.get(&category)
    }
}
