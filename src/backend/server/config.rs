/**
 * Server Configuration
 *
 * Loads server configuration from environment variables, with development
 * defaults where they are safe. Optional services follow the same rule
 * throughout: a missing or failing service is logged and set to `None`,
 * and the server starts without it rather than refusing to boot.
 *
 * # Variables
 *
 * - `SERVER_PORT` - listening port (default 3001)
 * - `DATABASE_URL` - PostgreSQL connection string; CRUD routes and the
 *   relay's change subscriptions are disabled without it
 * - `AUTH_URL` - base URL of the hosted auth provider's API
 * - `AUTH_JWT_SECRET` - shared secret for verifying provider tokens
 * - `AUTH_SERVICE_KEY` - privileged provider key for admin user creation
 * - `ADMIN_API_KEY` - key expected in `x-admin-api-key` on admin routes
 * - `RELAY_REQUIRE_AUTH` - require a bearer token on the relay socket
 * - `RELAY_CHANNEL_CAPACITY` - broadcast channel depth (default 1000)
 */
use crate::backend::relay::broadcaster::DEFAULT_CHANNEL_CAPACITY;
use sqlx::PgPool;

/// Immutable server configuration, loaded once at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: Option<String>,
    pub auth_url: Option<String>,
    pub auth_jwt_secret: Option<String>,
    pub auth_service_key: Option<String>,
    pub admin_api_key: Option<String>,
    pub relay_require_auth: bool,
    pub relay_channel_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            database_url: None,
            auth_url: None,
            auth_jwt_secret: None,
            auth_service_key: None,
            admin_api_key: None,
            relay_require_auth: false,
            relay_channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the environment
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.port),
            database_url: std::env::var("DATABASE_URL").ok(),
            auth_url: std::env::var("AUTH_URL").ok(),
            auth_jwt_secret: std::env::var("AUTH_JWT_SECRET").ok(),
            auth_service_key: std::env::var("AUTH_SERVICE_KEY").ok(),
            admin_api_key: std::env::var("ADMIN_API_KEY").ok(),
            relay_require_auth: std::env::var("RELAY_REQUIRE_AUTH")
                .map(|value| parse_bool(&value))
                .unwrap_or(defaults.relay_require_auth),
            relay_channel_capacity: std::env::var("RELAY_CHANNEL_CAPACITY")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.relay_channel_capacity),
        }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

/// Load and initialize the database connection pool
///
/// Connects, runs migrations, and returns the pool. Returns `None` when
/// `DATABASE_URL` is unset or the connection fails; the server then runs
/// without the CRUD routes or change subscriptions.
pub async fn load_database(config: &ServerConfig) -> Option<PgPool> {
    let database_url = match &config.database_url {
        Some(url) => url,
        None => {
            tracing::warn!("DATABASE_URL not set. Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Connecting to database...");
    let pool = match PgPool::connect(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            // Continue anyway - migrations might have already been run
            tracing::error!("Failed to run database migrations: {:?}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true"));
        assert!(parse_bool("1"));
        assert!(parse_bool(" YES "));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool(""));
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3001);
        assert!(!config.relay_require_auth);
        assert!(config.database_url.is_none());
    }
}
