//! Actor - Market Participant Data

use crate::domain::market_role::MarketRole;
use serde::{Deserialize, Serialize};

/// Lifecycle status of an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorStatus {
    New,
    Active,
    Inactive,
    Passive,
    Discontinued,
    #[serde(other)]
    Unknown,
}

/// A market participant registered in DataHub
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    /// Unique ID
    pub id: String,
    /// GLN or EIC number
    pub actor_number: String,
    /// Display name
    pub name: String,
    /// Market role
    pub market_role: MarketRole,
    /// Lifecycle status
    pub status: ActorStatus,
}

impl Actor {
    pub fn is_active(&self) -> bool {
        self.status == ActorStatus::Active
    }
}
