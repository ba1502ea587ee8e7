//! PMP Auth Service
//!
//! Email and password authentication issuing signed tokens:
//! - Registration with Argon2 password hashing
//! - Login with uniform credential failures
//! - Current-user lookup from a token header
//! - In-memory or PostgreSQL credential store

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use crate::config::{AuthSettings, StorageBackend};
use domain::user::UserRepository;
use infrastructure::{
    auth::{AuthService, JwtConfig, JwtGenerator, JwtService},
    user::{Argon2Hasher, InMemoryUserRepository, PostgresUserRepository},
};
use rand::Rng;
use tracing::info;

/// Create the application state with all services initialized
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    info!("Storage backend: {:?}", config.storage.backend);

    let tokens = create_jwt_service(&config.auth)?;

    let state = match config.storage.backend {
        StorageBackend::Memory => {
            let repository = Arc::new(InMemoryUserRepository::new());
            AppState::new(Arc::new(create_auth_service(repository, tokens, &config.auth)?))
        }
        StorageBackend::Postgres => {
            let pool = connect_postgres(config).await?;
            let repository = PostgresUserRepository::new(pool);
            repository.ensure_schema().await?;
            AppState::new(Arc::new(create_auth_service(
                Arc::new(repository),
                tokens,
                &config.auth,
            )?))
        }
    };

    Ok(state)
}

/// Open a PostgreSQL pool from `storage.database_url` or `DATABASE_URL`
pub async fn connect_postgres(config: &AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let database_url = config
        .storage
        .database_url
        .clone()
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

    info!("Connecting to PostgreSQL...");
    let pool = sqlx::PgPool::connect(&database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
    info!("PostgreSQL connection established");

    Ok(pool)
}

fn create_auth_service<R: UserRepository + 'static>(
    repository: Arc<R>,
    tokens: Arc<dyn JwtGenerator>,
    settings: &AuthSettings,
) -> anyhow::Result<AuthService<R, Argon2Hasher>> {
    let hasher = Argon2Hasher::with_params(settings.hash_params())?;

    Ok(AuthService::new(repository, Arc::new(hasher), tokens)
        .with_secure_cookies(settings.environment.is_production()))
}

/// Create JWT service from secret (config, env var, or random)
fn create_jwt_service(settings: &AuthSettings) -> anyhow::Result<Arc<dyn JwtGenerator>> {
    let secret = resolve_jwt_secret(settings);
    let service = JwtService::new(JwtConfig::new(secret, settings.token_expire_days))?;

    Ok(Arc::new(service))
}

fn resolve_jwt_secret(settings: &AuthSettings) -> String {
    settings
        .jwt_secret
        .clone()
        .filter(|secret| !secret.is_empty())
        .or_else(|| std::env::var("JWT_SECRET").ok().filter(|s| !s.is_empty()))
        .unwrap_or_else(|| {
            tracing::warn!(
                "No JWT_SECRET configured. Generating random secret. \
                Tokens will NOT survive a restart."
            );
            generate_random_secret()
        })
}

fn generate_random_secret() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::auth::RegisterRequest;

    fn cheap_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = Some("configured-secret".to_string());
        config.auth.hash_memory_kib = 64;
        config.auth.hash_iterations = 1;
        config
    }

    #[test]
    fn test_configured_secret_wins() {
        let settings = cheap_config().auth;
        assert_eq!(resolve_jwt_secret(&settings), "configured-secret");
    }

    #[test]
    fn test_random_secret_shape() {
        let secret = generate_random_secret();

        assert_eq!(secret.len(), 64);
        assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(secret, generate_random_secret());
    }

    #[test]
    fn test_invalid_hash_params_rejected() {
        let mut settings = cheap_config().auth;
        settings.hash_iterations = 0;

        let result = create_auth_service(
            Arc::new(InMemoryUserRepository::new()),
            create_jwt_service(&settings).unwrap(),
            &settings,
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_out_of_range_token_lifetime_rejected() {
        for days in [0, 200_000_000] {
            let mut config = cheap_config();
            config.auth.token_expire_days = days;

            assert!(create_app_state(&config).await.is_err());
        }
    }

    #[tokio::test]
    async fn test_memory_state_serves_registration() {
        let state = create_app_state(&cheap_config()).await.unwrap();

        let session = state
            .auth_service
            .register(RegisterRequest {
                name: Some("A".to_string()),
                email: Some("a@x.com".to_string()),
                password: Some("secret123".to_string()),
                role: None,
            })
            .await
            .unwrap();

        let user = state
            .auth_service
            .current_user(Some(&session.token))
            .await
            .unwrap();
        assert_eq!(user.email(), "a@x.com");
        assert_eq!(state.auth_service.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_production_sets_secure_cookie() {
        let mut config = cheap_config();
        config.auth.environment = crate::config::DeploymentEnvironment::Production;
        let state = create_app_state(&config).await.unwrap();

        let session = state
            .auth_service
            .register(RegisterRequest {
                name: Some("A".to_string()),
                email: Some("a@x.com".to_string()),
                password: Some("secret123".to_string()),
                role: None,
            })
            .await
            .unwrap();

        assert!(session.cookie.secure);
    }
}
