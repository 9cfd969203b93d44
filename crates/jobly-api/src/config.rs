//! API configuration.

/// API server configuration. Built once in `main` and injected through
/// [`crate::state::AppState`]; nothing reads these values from globals.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Per-IP rate limit, requests per second
    pub rate_limit_rps: u32,
    /// Max request body size
    pub max_body_size: usize,
    /// Environment (development/production)
    pub environment: String,
    /// PostgreSQL connection URL
    pub database_url: String,
    /// Connection pool size
    pub db_pool_size: usize,
    /// Shared secret for signing bearer tokens
    pub secret_key: String,
    /// Token lifetime in hours
    pub token_ttl_hours: i64,
    /// bcrypt work factor for password hashing
    pub bcrypt_cost: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            cors_origins: vec!["*".to_string()],
            rate_limit_rps: 10,
            max_body_size: 1024 * 1024, // 1MB
            environment: "development".to_string(),
            database_url: "postgres://localhost/jobly".to_string(),
            db_pool_size: 16,
            secret_key: "secret-dev".to_string(),
            token_ttl_hours: 24,
            bcrypt_cost: 12,
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(defaults.cors_origins),
            rate_limit_rps: std::env::var("RATE_LIMIT_RPS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.rate_limit_rps),
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_body_size),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            db_pool_size: std::env::var("DB_POOL_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.db_pool_size),
            secret_key: std::env::var("SECRET_KEY").unwrap_or(defaults.secret_key),
            token_ttl_hours: std::env::var("TOKEN_TTL_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.token_ttl_hours),
            bcrypt_cost: std::env::var("BCRYPT_COST")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.bcrypt_cost),
        }
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_development() {
        let config = ApiConfig::default();
        assert!(!config.is_production());
        assert_eq!(config.port, 3001);
        assert_eq!(config.secret_key, "secret-dev");
    }
}
