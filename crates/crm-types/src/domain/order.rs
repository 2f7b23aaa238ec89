use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId};

/// Days between placing an order and its due date.
pub const PAYMENT_TERM_DAYS: i64 = 14;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: EntityId,
    /// Not checked against existing clients.
    pub client_id: EntityId,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub due_date: DateTime<Utc>,
}

impl Order {
    pub fn new(
        id: EntityId,
        client_id: EntityId,
        description: String,
        amount: Decimal,
        placed_at: DateTime<Utc>,
    ) -> anyhow::Result<Self> {
        if description.trim().is_empty() {
            anyhow::bail!("order description empty");
        }
        if amount < Decimal::ZERO {
            anyhow::bail!("order amount must not be negative");
        }
        Ok(Self {
            id,
            client_id,
            description,
            amount,
            due_date: placed_at + Duration::days(PAYMENT_TERM_DAYS),
        })
    }
}

impl Entity for Order {
    fn id(&self) -> EntityId {
        self.id
    }
}
