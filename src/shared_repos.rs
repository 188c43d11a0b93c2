use std::{fmt, sync::Arc};

use crate::{
    db::postgres::{create_pool, run_migrations},
    repositories::{
        contact::ContactRepository,
        memory::{MemoryContactRepo, MemoryProjectRepo},
        project::ProjectRepository,
        sqlx_repo::{SqlxContactRepo, SqlxProjectRepo},
    },
    settings::AppConfig,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Postgres => write!(f, "postgres"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Clone)]
pub struct SharedRepositories {
    pub contact_repo: Arc<dyn ContactRepository>,
    pub project_repo: Arc<dyn ProjectRepository>,
    pub backend: StoreBackend,
}

impl SharedRepositories {
    pub fn postgres(pool: sqlx::PgPool) -> Self {
        SharedRepositories {
            contact_repo: Arc::new(SqlxContactRepo::new(pool.clone())),
            project_repo: Arc::new(SqlxProjectRepo::new(pool)),
            backend: StoreBackend::Postgres,
        }
    }

    pub fn in_memory() -> Self {
        SharedRepositories {
            contact_repo: Arc::new(MemoryContactRepo::new()),
            project_repo: Arc::new(MemoryProjectRepo::new()),
            backend: StoreBackend::Memory,
        }
    }

    /// Connects to Postgres and migrates when a database URL is configured,
    /// otherwise falls back to the process-local store.
    pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        match config.database_url.as_deref() {
            Some(url) => {
                let pool = create_pool(url).await?;
                run_migrations(&pool).await?;
                Ok(Self::postgres(pool))
            }
            None => {
                tracing::warn!("No database URL configured; records are kept in memory only");
                Ok(Self::in_memory())
            }
        }
    }
}
