//! Application state - shared across all handlers.

use std::sync::Arc;

use noticias_core::NoticiaService;
use noticias_core::ports::{ImageStore, NoticiaRepository, TokenService};
use noticias_infra::{InMemoryNoticiaRepository, JwtTokenService, LocalImageStore};

#[cfg(feature = "postgres")]
use noticias_infra::PostgresNoticiaRepository;

use crate::config::{AppConfig, UploadConfig};

/// Which repository backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    InMemory,
}

impl StorageBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            StorageBackend::Postgres => "postgres",
            StorageBackend::InMemory => "memory",
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub noticias: NoticiaService,
    pub images: Arc<dyn ImageStore>,
    pub tokens: Arc<dyn TokenService>,
    pub uploads: UploadConfig,
    pub login_provider_url: Option<String>,
    pub backend: StorageBackend,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let (repo, backend) = Self::repository(config).await;

        let images: Arc<dyn ImageStore> = Arc::new(LocalImageStore::new(
            config.uploads.dir.clone(),
            config.uploads.public_prefix.clone(),
        ));
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.session.clone()));

        tracing::info!(
            storage = backend.as_str(),
            upload_dir = %config.uploads.dir.display(),
            "Application state initialized"
        );

        Self::from_parts(
            repo,
            images,
            tokens,
            config.uploads.clone(),
            config.login_provider_url.clone(),
            backend,
        )
    }

    /// Assemble state from already-built adapters.
    pub fn from_parts(
        repo: Arc<dyn NoticiaRepository>,
        images: Arc<dyn ImageStore>,
        tokens: Arc<dyn TokenService>,
        uploads: UploadConfig,
        login_provider_url: Option<String>,
        backend: StorageBackend,
    ) -> Self {
        Self {
            noticias: NoticiaService::new(repo, images.clone()),
            images,
            tokens,
            uploads,
            login_provider_url,
            backend,
        }
    }

    #[cfg(feature = "postgres")]
    async fn repository(config: &AppConfig) -> (Arc<dyn NoticiaRepository>, StorageBackend) {
        let Some(db_config) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return (Arc::new(InMemoryNoticiaRepository::new()), StorageBackend::InMemory);
        };

        match noticias_infra::database::connect(db_config).await {
            Ok(conn) => (
                Arc::new(PostgresNoticiaRepository::new(conn)),
                StorageBackend::Postgres,
            ),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                (Arc::new(InMemoryNoticiaRepository::new()), StorageBackend::InMemory)
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn repository(_config: &AppConfig) -> (Arc<dyn NoticiaRepository>, StorageBackend) {
        tracing::info!("Running without postgres feature - using in-memory repository");
        (Arc::new(InMemoryNoticiaRepository::new()), StorageBackend::InMemory)
    }
}
