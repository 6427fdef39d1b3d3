//! User - Portal User Data

use crate::domain::market_role::MarketRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account status of a portal user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserStatus {
    Active,
    Inactive,
    Invited,
    InviteExpired,
    #[serde(other)]
    Unknown,
}

/// Row of the user overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOverviewItem {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub status: UserStatus,
    pub created_date: DateTime<Utc>,
}

impl UserOverviewItem {
    /// "First Last", or the e-mail when no name is registered
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }
}

/// An actor a user is associated with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserActor {
    pub id: String,
    pub actor_number: String,
    pub name: String,
    pub market_role: MarketRole,
}
