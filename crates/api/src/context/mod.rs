//! Application context - dependency injection container

use std::sync::Arc;

use bonuspool_core::{
    BonusService, EmployeeDirectory, MonthlyPoolRepository, PoolAdministrationService,
    SignedContractRepository,
};
use bonuspool_domain::{Config, CurrencyTable, Result, Taxonomy};
use bonuspool_infra::errors::map_join_error;
use bonuspool_infra::{
    config, CachedMonthlyPoolRepository, DbManager, PoolCacheConfig, SqliteEmployeeDirectory,
    SqliteMonthlyPoolRepository, SqliteSignedContractRepository,
};

/// Type alias for signed contract repository port trait object
type DynSignedContractPort = dyn SignedContractRepository;

/// Type alias for monthly pool repository port trait object
type DynMonthlyPoolPort = dyn MonthlyPoolRepository;

/// Type alias for employee directory port trait object
type DynEmployeeDirectoryPort = dyn EmployeeDirectory;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub taxonomy: Arc<Taxonomy>,
    pub currency: Arc<CurrencyTable>,

    // Ports
    pub contracts: Arc<DynSignedContractPort>,
    pub pools: Arc<CachedMonthlyPoolRepository>,
    pub directory: Arc<DynEmployeeDirectoryPort>,

    // Services
    pub bonus_service: Arc<BonusService>,
    pub pool_admin: Arc<PoolAdministrationService>,
}

impl AppContext {
    /// Create a new application context from the environment or a probed
    /// config file.
    pub async fn new() -> Result<Self> {
        Self::new_with_config(config::load()?).await
    }

    /// Create a new application context with custom configuration
    ///
    /// Tests use this to point at a temporary database.
    pub async fn new_with_config(config: Config) -> Result<Self> {
        let taxonomy = Arc::new(Taxonomy::standard());
        let summary = taxonomy.validate()?;
        if !summary.is_fully_allocated() {
            tracing::warn!(
                total_pool_share = %summary.total_pool_share,
                "group pool shares sum below 100, part of each pool stays unallocated"
            );
        }

        let currency = Arc::new(CurrencyTable::from_config(&config.currency)?);

        // Opening the pool and migrating touch the filesystem
        let db_config = config.database.clone();
        let db = tokio::task::spawn_blocking(move || -> Result<DbManager> {
            let db = DbManager::new(&db_config.path, db_config.pool_size)?;
            db.run_migrations()?;
            Ok(db)
        })
        .await
        .map_err(map_join_error)?
        .map(Arc::new)
        .map_err(|err| {
            tracing::error!(error = %err, db_path = %config.database.path, "failed to open database");
            err
        })?;

        let contracts: Arc<DynSignedContractPort> =
            Arc::new(SqliteSignedContractRepository::new(Arc::clone(&db)));
        let directory: Arc<DynEmployeeDirectoryPort> =
            Arc::new(SqliteEmployeeDirectory::new(Arc::clone(&db)));

        let cache_config = PoolCacheConfig::from_bonus_config(&config.bonus);
        let store: Arc<DynMonthlyPoolPort> =
            Arc::new(SqliteMonthlyPoolRepository::new(Arc::clone(&db)));
        let pools = Arc::new(CachedMonthlyPoolRepository::new(store, cache_config));

        let bonus_service = Arc::new(
            BonusService::new(
                Arc::clone(&contracts),
                pools.clone(),
                Arc::clone(&directory),
                Arc::clone(&taxonomy),
                Arc::clone(&currency),
            )
            .with_fetch_timeout(config.bonus.fetch_timeout())
            .with_max_concurrency(config.bonus.max_concurrency),
        );
        let pool_admin = Arc::new(
            PoolAdministrationService::new(
                pools.clone(),
                Arc::clone(&contracts),
                Arc::clone(&currency),
            )
            .with_fetch_timeout(config.bonus.fetch_timeout()),
        );

        tracing::info!(
            db_path = %db.path().display(),
            base_currency = currency.base_currency(),
            fetch_timeout_secs = config.bonus.fetch_timeout_seconds,
            max_concurrency = config.bonus.max_concurrency,
            "application context initialised"
        );

        Ok(Self {
            config,
            db,
            taxonomy,
            currency,
            contracts,
            pools,
            directory,
            bonus_service,
            pool_admin,
        })
    }

    /// Verify the database is reachable.
    pub async fn health_check(&self) -> Result<()> {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || db.health_check()).await.map_err(map_join_error)?
    }

    /// Drop every cached pool so the next lookups read the store.
    pub fn clear_pool_cache(&self) {
        self.pools.clear();
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}
