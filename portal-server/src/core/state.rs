use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::{Config, Result, ServerError};
use crate::services::{GeminiInsightClient, HttpsService, InsightProvider, InsightService};
use crate::store::PortalStore;

/// Server state - shared handles to every service
///
/// Cloning is cheap; all heavy members sit behind `Arc`.
///
/// | field | purpose |
/// |-------|---------|
/// | config | immutable configuration |
/// | store | in-memory portal records |
/// | jwt_service | session token signing / validation |
/// | insight | AI executive summary (single-flight) |
/// | https | router + listener |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub store: Arc<PortalStore>,
    pub jwt_service: Arc<JwtService>,
    pub insight: InsightService,
    pub https: HttpsService,
}

impl ServerState {
    /// Assemble a state from prepared parts and bind the router to it
    pub fn with_parts(
        config: Config,
        store: Arc<PortalStore>,
        provider: Arc<dyn InsightProvider>,
    ) -> Self {
        let https = HttpsService::new(config.clone());
        let state = Self {
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            config,
            store,
            insight: InsightService::new(provider),
            https: https.clone(),
        };

        // Router needs the finished state
        https.initialize(state.clone());
        state
    }

    /// Initialize the server state
    ///
    /// 1. Work directory structure (uploads, logs)
    /// 2. Store, seeded with demo records when enabled
    /// 3. AI client, JWT service, HTTP router
    pub fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let store = if config.seed_demo_data {
            tracing::info!("Loading demo records");
            PortalStore::seeded()
        } else {
            PortalStore::new()
        };

        if !config.ai.is_configured() {
            tracing::warn!("AI_API_KEY not set, executive summaries are disabled");
        }
        let client = GeminiInsightClient::new(config.ai.clone())
            .map_err(|e| ServerError::Config(format!("AI client: {}", e)))?;

        Ok(Self::with_parts(
            config.clone(),
            Arc::new(store),
            Arc::new(client),
        ))
    }

    pub fn store(&self) -> &PortalStore {
        &self.store
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
