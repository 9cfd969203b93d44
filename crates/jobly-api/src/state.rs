//! Application state.

use jobly_db::{create_pool, ApplicationStore, CompanyStore, DbError, JobStore, Pool, UserStore};

use crate::auth::TokenSigner;
use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub signer: TokenSigner,
    pub pool: Pool,
    pub companies: CompanyStore,
    pub jobs: JobStore,
    pub applications: ApplicationStore,
    pub users: UserStore,
}

impl AppState {
    /// Create new application state. Database connections open lazily, so
    /// this succeeds without a reachable database.
    pub fn new(config: ApiConfig) -> Result<Self, DbError> {
        let pool = create_pool(&config.database_url, config.db_pool_size)?;
        let signer = TokenSigner::new(
            &config.secret_key,
            chrono::Duration::hours(config.token_ttl_hours),
        );

        Ok(Self {
            signer,
            companies: CompanyStore::new(pool.clone()),
            jobs: JobStore::new(pool.clone()),
            applications: ApplicationStore::new(pool.clone()),
            users: UserStore::new(pool.clone()),
            pool,
            config,
        })
    }
}
