use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;

/// Shared handles passed to every handler
///
/// Cloning is cheap: the pool and the JWT service are reference counted.
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, db: DbService) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            pool: db.pool,
            jwt_service,
        }
    }

    /// Open the database, run migrations and seed the bootstrap admin
    pub async fn initialize(config: &Config) -> Result<Self, crate::core::BoxError> {
        let db = DbService::new(&config.database_url).await?;
        let state = Self::new(config.clone(), db);
        state.seed_bootstrap_admin().await?;
        Ok(state)
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    async fn seed_bootstrap_admin(&self) -> Result<(), crate::core::BoxError> {
        let Some((username, password)) = &self.config.bootstrap_admin else {
            return Ok(());
        };
        if crate::db::repository::user::find_by_username(&self.pool, username)
            .await?
            .is_some()
        {
            return Ok(());
        }
        let hash = crate::auth::hash_password_blocking(password.clone()).await?;
        let user = crate::db::repository::user::create(
            &self.pool,
            username,
            &hash,
            shared::models::Role::Admin,
        )
        .await?;
        tracing::info!(user_id = user.id, username = %user.username, "Bootstrap admin created");
        Ok(())
    }
}
