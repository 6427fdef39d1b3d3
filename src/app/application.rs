//! Application - Composition Root
//!
//! Builds the session, API client and feature controllers from the loaded
//! configuration. Every dependency is passed explicitly; nothing is global.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::domain::config::AppConfig;
use crate::error::Result;
use crate::features::actors::ActorsController;
use crate::features::grid_areas::GridAreasController;
use crate::features::roles::RolesController;
use crate::features::users::UsersController;
use crate::services::{AccessToken, ApiClient, Session};
use crate::state::{Feedback, RequestState};

/// Environment variable holding an access token for the demo run
pub const TOKEN_ENV: &str = "DATAHUB_TOKEN";

/// Application context, alive from bootstrap until sign-out
#[derive(Debug)]
pub struct App {
    config: AppConfig,
    session: Arc<Session>,
    client: ApiClient,
}

impl App {
    /// Wire the application from configuration
    pub fn bootstrap(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let session = Arc::new(Session::new());
        let client = ApiClient::new(&config.api, session.clone())?;
        Ok(Self {
            config,
            session,
            client,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Store a token for the signed-in user
    pub fn sign_in(&self, token: AccessToken) {
        self.session.sign_in(token);
    }

    /// Tear the session down
    pub fn sign_out(self) {
        self.session.sign_out();
        info!(session = %self.session.id(), "Application context closed");
    }

    // ==================== Feature Factories ====================

    pub fn actors(&self) -> ActorsController {
        ActorsController::new(&self.client, &self.config.query)
    }

    pub fn users(&self) -> UsersController {
        UsersController::new(&self.client, &self.config.query)
    }

    pub fn roles(&self) -> RolesController {
        RolesController::new(&self.client, &self.config.query)
    }

    pub fn grid_areas(&self) -> GridAreasController {
        GridAreasController::new(&self.client, &self.config.query)
    }
}

/// Load actors once and report the outcome
///
/// Returns the final request state.
pub async fn run_app(app: &App) -> RequestState {
    let actors = app.actors();
    let mut states = actors.list().store().select(|s| s.state);
    let options = actors.actor_options();

    actors.load();

    let timeout = app.config().api.timeout() + Duration::from_secs(1);
    let outcome = tokio::time::timeout(timeout, async {
        while let Some(state) = states.changed().await {
            info!(%state, "Actors store changed");
            if !state.is_loading() && !state.is_init() {
                return state;
            }
        }
        RequestState::Init
    })
    .await
    .unwrap_or_else(|_| {
        tracing::warn!("Timed out waiting for actors");
        actors.list().store().state()
    });

    match Feedback::from(outcome) {
        Feedback::Content => {
            for option in options.get() {
                info!("{}", option.display_value);
            }
        }
        Feedback::EmptyState => info!("No actors found"),
        Feedback::RetryAffordance => tracing::warn!("Loading actors failed"),
        Feedback::None | Feedback::Spinner => {}
    }

    outcome
}
