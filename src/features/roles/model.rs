//! UserRole - Permission Bundle Assignable to Users

use crate::domain::market_role::MarketRole;
use serde::{Deserialize, Serialize};

/// Whether a role can still be assigned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleStatus {
    Active,
    Inactive,
    #[serde(other)]
    Unknown,
}

/// A user role scoped to one market role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRole {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub market_role: MarketRole,
    pub status: RoleStatus,
}
