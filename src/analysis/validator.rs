//! Input validation for submitted trade batches

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::errors::{AnalysisError, Result, EMPTY_PAYLOAD_MESSAGE};
use crate::common::types::{FieldError, Trade};

pub const MAX_SECTOR_LEN: usize = 100;
pub const MAX_CLIENT_ID_LEN: usize = 50;

/// Trade as submitted by a caller, before validation
///
/// Missing fields deserialize to empty values so that they surface as
/// validation errors rather than parse failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeInput {
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub value: Decimal,
    #[serde(default)]
    pub client_sector: String,
    #[serde(default)]
    pub client_id: Option<String>,
}

impl TradeInput {
    pub fn new(value: Decimal, client_sector: impl Into<String>) -> Self {
        Self {
            value,
            client_sector: client_sector.into(),
            client_id: None,
        }
    }

    pub fn with_client(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }
}

/// Result of validating a whole batch
#[derive(Debug, Default)]
pub struct ValidationOutcome {
    pub errors: Vec<FieldError>,
    pub trades: Vec<Trade>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// All-or-nothing: the trades only if no item failed
    pub fn into_result(self) -> Result<Vec<Trade>> {
        if self.errors.is_empty() {
            return Ok(self.trades);
        }
        if self.errors.iter().any(FieldError::is_payload_error) {
            return Err(AnalysisError::PayloadEmpty);
        }
        Err(AnalysisError::ValidationFailed(self.errors))
    }
}

/// Field-level rules applied to every submitted trade
#[derive(Debug, Clone)]
pub struct InputValidator {
    allowed_sectors: Vec<String>,
}

impl InputValidator {
    pub fn new<I, S>(allowed_sectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed_sectors: allowed_sectors
                .into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    /// Validate every item against the full rule set, collecting indexed errors
    pub fn validate(&self, items: &[TradeInput]) -> ValidationOutcome {
        self.validate_with(items, true)
    }

    /// Validate value and sector only; `clientId` is carried through unchecked
    pub fn validate_classification(&self, items: &[TradeInput]) -> ValidationOutcome {
        self.validate_with(items, false)
    }

    /// Shorthand for `validate(items).into_result()`
    pub fn validate_trades(&self, items: &[TradeInput]) -> Result<Vec<Trade>> {
        self.validate(items).into_result()
    }

    /// Shorthand for `validate_classification(items).into_result()`
    pub fn validate_classification_trades(&self, items: &[TradeInput]) -> Result<Vec<Trade>> {
        self.validate_classification(items).into_result()
    }

    fn validate_with(&self, items: &[TradeInput], check_client_id: bool) -> ValidationOutcome {
        if items.is_empty() {
            return ValidationOutcome {
                errors: vec![FieldError::payload(EMPTY_PAYLOAD_MESSAGE)],
                trades: Vec::new(),
            };
        }

        let mut outcome = ValidationOutcome {
            errors: Vec::new(),
            trades: Vec::with_capacity(items.len()),
        };

        for (index, item) in items.iter().enumerate() {
            let before = outcome.errors.len();
            self.check_value(index, item, &mut outcome.errors);
            self.check_sector(index, item, &mut outcome.errors);
            if check_client_id {
                self.check_client_id(index, item, &mut outcome.errors);
            }

            if outcome.errors.len() == before {
                outcome.trades.push(to_trade(item));
            }
        }

        outcome
    }

    fn check_value(&self, index: usize, item: &TradeInput, errors: &mut Vec<FieldError>) {
        if item.value <= Decimal::ZERO {
            errors.push(FieldError::new(
                index,
                "value",
                format!("value {} is invalid, must be greater than 0", item.value),
            ));
        }
    }

    /// Required, then allowed, then length; stops at the first failure
    fn check_sector(&self, index: usize, item: &TradeInput, errors: &mut Vec<FieldError>) {
        let sector = item.client_sector.as_str();
        let message = if sector.trim().is_empty() {
            "clientSector is required".to_string()
        } else if !self.allowed_sectors.contains(&sector.to_lowercase()) {
            format!("clientSector '{}' is not an allowed sector", sector)
        } else if sector.chars().count() > MAX_SECTOR_LEN {
            format!("clientSector must be at most {} characters", MAX_SECTOR_LEN)
        } else {
            return;
        };
        errors.push(FieldError::new(index, "clientSector", message));
    }

    fn check_client_id(&self, index: usize, item: &TradeInput, errors: &mut Vec<FieldError>) {
        let Some(client_id) = non_blank(item.client_id.as_deref()) else {
            return;
        };
        let message = if client_id.chars().count() > MAX_CLIENT_ID_LEN {
            format!("clientId must be at most {} characters", MAX_CLIENT_ID_LEN)
        } else if !client_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            "clientId may only contain letters, digits and hyphens".to_string()
        } else {
            return;
        };
        errors.push(FieldError::new(index, "clientId", message));
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn to_trade(item: &TradeInput) -> Trade {
    Trade {
        value: item.value,
        client_sector: item.client_sector.clone(),
        client_id: non_blank(item.client_id.as_deref()).map(str::to_string),
    }
}
