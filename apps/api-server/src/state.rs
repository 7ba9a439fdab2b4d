//! Application state - shared across all handlers.

use std::sync::Arc;

use phez_core::PostService;
use phez_core::domain::Subphez;
use phez_infra::database::DatabaseConfig;
use phez_infra::{ComrakRenderer, HtmlStripper, InMemoryStore};

#[cfg(feature = "postgres")]
use phez_infra::{
    DatabaseConnections, PostgresCommentStore, PostgresCommunityService, PostgresPostRepository,
    PostgresVoteLedger,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
}

impl AppState {
    /// Build the state against Postgres when configured, otherwise against
    /// the in-memory store.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        if let Some(state) = Self::connect(db_config).await {
            return state;
        }

        tracing::warn!("Running without database (in-memory mode). Data is lost on restart.");
        let store = Arc::new(InMemoryStore::new());
        let general = store.add_subphez(Subphez::new("General", "general")).await;
        tracing::info!(subphez_id = %general.id, path = %general.path, "Seeded default subphez");

        Self::in_memory(store)
    }

    #[cfg(feature = "postgres")]
    async fn connect(db_config: Option<&DatabaseConfig>) -> Option<Self> {
        let config = db_config?;
        match DatabaseConnections::init(config).await {
            Ok(connections) => {
                tracing::info!("Application state initialized (postgres)");
                Some(Self::postgres(connections))
            }
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                None
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn connect(db_config: Option<&DatabaseConfig>) -> Option<Self> {
        if db_config.is_some() {
            tracing::warn!("DATABASE_URL is set but the postgres feature is disabled");
        }
        None
    }

    /// Every port backed by one in-memory store.
    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self {
            posts: PostService::new(
                store.clone(),
                store.clone(),
                store.clone(),
                store,
                Arc::new(HtmlStripper::new()),
                Arc::new(ComrakRenderer::new()),
            ),
        }
    }

    #[cfg(feature = "postgres")]
    fn postgres(connections: DatabaseConnections) -> Self {
        let db = connections.main;
        Self {
            posts: PostService::new(
                Arc::new(PostgresPostRepository::new(db.clone())),
                Arc::new(PostgresVoteLedger::new(db.clone())),
                Arc::new(PostgresCommentStore::new(db.clone())),
                Arc::new(PostgresCommunityService::new(db)),
                Arc::new(HtmlStripper::new()),
                Arc::new(ComrakRenderer::new()),
            ),
        }
    }
}
