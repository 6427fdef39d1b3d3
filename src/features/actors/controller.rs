//! Actors Controller
//!
//! Loads the actor list and derives the actor picker options.

use super::model::Actor;
use crate::domain::config::QueryConfig;
use crate::error::Result;
use crate::features::list_controller::ListController;
use crate::services::{ApiClient, RemoteOperation};
use crate::state::QueryParameters;
use crate::view::{
    DropdownItem, DropdownOption, Selector, code_name_label, has_multiple_choices,
    sorted_dropdown_options,
};

/// REST path of the actor list
pub const ACTORS_PATH: &str = "actors";

impl DropdownItem for Actor {
    fn option_value(&self) -> String {
        self.id.clone()
    }

    fn option_label(&self) -> String {
        code_name_label(&self.actor_number, &self.name)
    }
}

/// Picker options, "<actor number> • <name>", sorted by label
pub fn actor_options(actors: &[Actor]) -> Vec<DropdownOption> {
    sorted_dropdown_options(actors)
}

/// Actors page controller
#[derive(Debug)]
pub struct ActorsController {
    list: ListController<Actor>,
}

impl ActorsController {
    /// Create a controller backed by the REST API
    pub fn new(client: &ApiClient, config: &QueryConfig) -> Self {
        Self::with_operation(client.resource::<Actor>(ACTORS_PATH), config)
    }

    /// Create a controller over any remote operation
    pub fn with_operation(
        operation: impl RemoteOperation<QueryParameters, Actor>,
        config: &QueryConfig,
    ) -> Self {
        Self {
            list: ListController::new("actors", operation, config),
        }
    }

    pub fn list(&self) -> &ListController<Actor> {
        &self.list
    }

    /// Start loading
    pub fn load(&self) {
        self.list.load();
    }

    /// Filter by free text (debounced)
    pub fn search(&self, text: impl Into<String>) {
        self.list.query().set_search(text);
    }

    /// Only actors with the given status
    pub fn filter_status(&self, status: &str) -> Result<()> {
        self.list.query().set_filter("status", status)
    }

    // ==================== Selectors ====================

    pub fn actor_options(&self) -> Selector<Actor, Vec<DropdownOption>> {
        self.list.store().select(|s| actor_options(s.records()))
    }

    pub fn has_multiple_actors(&self) -> Selector<Actor, bool> {
        self.list.store().select(|s| has_multiple_choices(s.records()))
    }

    pub fn active_actors(&self) -> Selector<Actor, Vec<Actor>> {
        self.list
            .store()
            .select(|s| s.records().iter().filter(|a| a.is_active()).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market_role::MarketRole;
    use crate::features::actors::model::ActorStatus;
    use crate::services::{RemoteResult, operation_fn};
    use crate::state::RequestState;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn actor(id: &str, number: &str, name: &str, status: ActorStatus) -> Actor {
        Actor {
            id: id.into(),
            actor_number: number.into(),
            name: name.into(),
            market_role: MarketRole::EnergySupplier,
            status,
        }
    }

    fn sample() -> Vec<Actor> {
        vec![
            actor("b", "5790000000002", "Nordlys", ActorStatus::Active),
            actor("a", "5790000000001", "Energi Fyn", ActorStatus::Inactive),
        ]
    }

    async fn loaded(controller: &ActorsController) {
        let mut rx = controller.list().store().subscribe();
        tokio::time::timeout(
            Duration::from_secs(1),
            rx.wait_for(|s| !s.state.is_init() && !s.state.is_loading()),
        )
        .await
        .expect("loaded in time")
        .expect("store alive");
    }

    #[test]
    fn test_actor_options_labels() {
        let options = actor_options(&sample());
        assert_eq!(
            options,
            vec![
                DropdownOption::new("a", "5790000000001 • Energi Fyn"),
                DropdownOption::new("b", "5790000000002 • Nordlys"),
            ]
        );
        assert!(actor_options(&[]).is_empty());
    }

    #[tokio::test]
    async fn test_load_derives_views() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();
        let controller = ActorsController::with_operation(
            operation_fn(move |params: QueryParameters| {
                if let Ok(mut log) = log.lock() {
                    log.push(params);
                }
                let result: RemoteResult<Actor> = Ok(sample());
                async move { result }
            }),
            &QueryConfig::default(),
        );

        let options = controller.actor_options();
        assert!(options.get().is_empty());

        controller.load();
        loaded(&controller).await;

        assert_eq!(controller.list().store().state(), RequestState::Loaded);
        assert_eq!(options.get().len(), 2);
        assert!(controller.has_multiple_actors().get());
        assert_eq!(controller.active_actors().get().len(), 1);
        assert_eq!(seen.lock().map(|l| l.len()).unwrap_or(0), 1);
    }

    #[tokio::test]
    async fn test_empty_list_is_not_found() {
        let controller = ActorsController::with_operation(
            operation_fn(|_params: QueryParameters| async { RemoteResult::<Actor>::Ok(Vec::new()) }),
            &QueryConfig::default(),
        );
        controller.load();
        loaded(&controller).await;

        assert_eq!(controller.list().store().state(), RequestState::NotFoundError);
        assert!(!controller.has_multiple_actors().get());
        assert!(controller.actor_options().get().is_empty());
    }
}
