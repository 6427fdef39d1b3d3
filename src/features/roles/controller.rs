//! Roles Controller
//!
//! Loads user roles and derives the role picker, grouped by market role.

use super::model::{RoleStatus, UserRole};
use crate::domain::config::QueryConfig;
use crate::domain::market_role::MarketRole;
use crate::error::Result;
use crate::features::list_controller::ListController;
use crate::services::{ApiClient, RemoteOperation};
use crate::state::QueryParameters;
use crate::view::{DropdownItem, DropdownOption, Selector, sorted_dropdown_options};
use std::collections::BTreeMap;

/// REST path of the role list
pub const ROLES_PATH: &str = "user-roles";

impl DropdownItem for UserRole {
    fn option_value(&self) -> String {
        self.id.clone()
    }

    fn option_label(&self) -> String {
        self.name.clone()
    }
}

/// Options for roles that can still be assigned
pub fn assignable_role_options(roles: &[UserRole]) -> Vec<DropdownOption> {
    let active: Vec<UserRole> = roles
        .iter()
        .filter(|r| r.status == RoleStatus::Active)
        .cloned()
        .collect();
    sorted_dropdown_options(&active)
}

/// Assignable role options grouped by market role
pub fn roles_by_market_role(roles: &[UserRole]) -> BTreeMap<MarketRole, Vec<DropdownOption>> {
    let mut grouped: BTreeMap<MarketRole, Vec<UserRole>> = BTreeMap::new();
    for role in roles.iter().filter(|r| r.status == RoleStatus::Active) {
        grouped.entry(role.market_role).or_default().push(role.clone());
    }
    grouped
        .into_iter()
        .map(|(market_role, roles)| (market_role, sorted_dropdown_options(&roles)))
        .collect()
}

/// Roles page controller
#[derive(Debug)]
pub struct RolesController {
    list: ListController<UserRole>,
}

impl RolesController {
    pub fn new(client: &ApiClient, config: &QueryConfig) -> Self {
        Self::with_operation(client.resource::<UserRole>(ROLES_PATH), config)
    }

    pub fn with_operation(
        operation: impl RemoteOperation<QueryParameters, UserRole>,
        config: &QueryConfig,
    ) -> Self {
        Self {
            list: ListController::new("user-roles", operation, config),
        }
    }

    pub fn list(&self) -> &ListController<UserRole> {
        &self.list
    }

    pub fn load(&self) {
        self.list.load();
    }

    /// Restrict to one market role
    pub fn filter_market_role(&self, market_role: MarketRole) -> Result<()> {
        self.list.query().set_filter("marketRole", market_role.as_str())
    }

    pub fn role_options(&self) -> Selector<UserRole, Vec<DropdownOption>> {
        self.list.store().select(|s| assignable_role_options(s.records()))
    }

    pub fn grouped_options(&self) -> Selector<UserRole, BTreeMap<MarketRole, Vec<DropdownOption>>> {
        self.list.store().select(|s| roles_by_market_role(s.records()))
    }
}
