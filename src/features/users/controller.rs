//! Users Controller
//!
//! User overview list plus the per-user actor lookup used by the user
//! details drawer.

use super::model::{UserActor, UserOverviewItem, UserStatus};
use crate::domain::config::QueryConfig;
use crate::features::list_controller::ListController;
use crate::services::{ApiClient, RemoteOperation, operation_fn};
use crate::state::{QueryParameters, RequestStore};
use crate::view::{DropdownItem, DropdownOption, Selector, code_name_label, dropdown_options};

/// REST path of the user overview
pub const USERS_PATH: &str = "users";

/// REST path segments of one user's actors
pub fn user_actors_segments(user_id: &str) -> [&str; 3] {
    [USERS_PATH, user_id, "actors"]
}

impl DropdownItem for UserActor {
    fn option_value(&self) -> String {
        self.id.clone()
    }

    fn option_label(&self) -> String {
        code_name_label(&self.actor_number, &self.name)
    }
}

/// Number of users with an active account
pub fn active_user_count(users: &[UserOverviewItem]) -> usize {
    users.iter().filter(|u| u.status == UserStatus::Active).count()
}

/// Users page controller
#[derive(Debug)]
pub struct UsersController {
    list: ListController<UserOverviewItem>,
    user_actors: RequestStore<String, UserActor>,
}

impl UsersController {
    /// Create a controller backed by the REST API
    pub fn new(client: &ApiClient, config: &QueryConfig) -> Self {
        let actors_client = client.clone();
        Self::with_operations(
            client.resource::<UserOverviewItem>(USERS_PATH),
            operation_fn(move |user_id: String| {
                let client = actors_client.clone();
                async move {
                    client
                        .get_list::<UserActor>(&user_actors_segments(&user_id), &[])
                        .await
                }
            }),
            config,
        )
    }

    /// Create a controller over arbitrary remote operations
    pub fn with_operations(
        users: impl RemoteOperation<QueryParameters, UserOverviewItem>,
        user_actors: impl RemoteOperation<String, UserActor>,
        config: &QueryConfig,
    ) -> Self {
        Self {
            list: ListController::new("users", users, config),
            user_actors: RequestStore::new("user-actors", user_actors),
        }
    }

    pub fn list(&self) -> &ListController<UserOverviewItem> {
        &self.list
    }

    pub fn user_actors(&self) -> &RequestStore<String, UserActor> {
        &self.user_actors
    }

    /// Start loading the overview
    pub fn load(&self) {
        self.list.load();
    }

    /// Open the details drawer for a user
    pub fn open_user(&self, user_id: impl Into<String>) {
        self.user_actors.trigger(user_id.into());
    }

    /// Close the details drawer
    pub fn close_user(&self) {
        self.user_actors.reset();
    }

    // ==================== Selectors ====================

    pub fn display_names(&self) -> Selector<UserOverviewItem, Vec<String>> {
        self.list
            .store()
            .select(|s| s.records().iter().map(UserOverviewItem::display_name).collect())
    }

    pub fn active_count(&self) -> Selector<UserOverviewItem, usize> {
        self.list.store().select(|s| active_user_count(s.records()))
    }

    pub fn user_actor_options(&self) -> Selector<UserActor, Vec<DropdownOption>> {
        self.user_actors.select(|s| dropdown_options(s.records()))
    }
}
