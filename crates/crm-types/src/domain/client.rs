use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl Client {
    pub fn new(
        id: EntityId,
        name: String,
        email: String,
        created_at: DateTime<Utc>,
    ) -> anyhow::Result<Self> {
        if name.trim().is_empty() {
            anyhow::bail!("client name empty");
        }
        if !email.contains('@') {
            anyhow::bail!("invalid email");
        }
        Ok(Self {
            id,
            name,
            email,
            created_at,
        })
    }

    /// Domain part of the email address (everything after the last `@`).
    pub fn email_domain(&self) -> &str {
        self.email
            .rsplit_once('@')
            .map(|(_, domain)| domain)
            .unwrap_or_default()
    }
}

impl Entity for Client {
    fn id(&self) -> EntityId {
        self.id
    }
}
