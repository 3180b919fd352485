use crate::middleware::SessionManager;
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynEmailService, DynHashing, DynJwtService, DynSessionStore},
    cache::SessionStore,
    config::{Config, ConnectionPool, Hashing, JwtConfig, RedisClient},
    di::{DependenciesInject, DependenciesInjectDeps},
    service::EmailService,
};
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub jwt_config: DynJwtService,
    pub session: SessionManager,
    pub registry: Arc<Mutex<Registry>>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("jwt_config", &"<dyn JwtService>")
            .field("session", &"<SessionManager>")
            .finish()
    }
}

impl AppState {
    pub async fn new(pool: ConnectionPool, config: &Config) -> Result<Self> {
        let jwt_config = Arc::new(JwtConfig::new(&config.jwt_secret)) as DynJwtService;
        let hashing = Arc::new(Hashing::new()) as DynHashing;
        let registry = Arc::new(Mutex::new(Registry::default()));

        info!("Initializing Redis connection for storefront sessions");
        let redis = RedisClient::new(&config.redis).context("Failed to connect to Redis")?;
        redis
            .ping()
            .await
            .context("Failed to ping Redis server")?;

        let store = Arc::new(SessionStore::new(redis.pool.clone())) as DynSessionStore;
        let session = SessionManager::new(
            store,
            chrono::Duration::minutes(config.session_ttl_minutes),
        );

        let mailer = Arc::new(
            EmailService::new(&config.email_config).context("Failed to configure SMTP mailer")?,
        ) as DynEmailService;

        let di_container = DependenciesInject::new(DependenciesInjectDeps {
            pool,
            hash: hashing,
            jwt_config: jwt_config.clone(),
            mailer,
            site: config.site.clone(),
            registry: registry.clone(),
        })
        .await;

        Ok(Self {
            di_container,
            jwt_config,
            session,
            registry,
        })
    }
}
