//! Application context - dependency injection container

use std::sync::Arc;

use glasline_common::auth::SessionSigner;
use glasline_core::availability::AvailabilityService;
use glasline_core::ordering::ports::{CatalogStore, RateLimitGate};
use glasline_core::ordering::{OrderService, QuoteService};
use glasline_core::promotions::PromotionService;
use glasline_domain::{Config, Result};
use glasline_infra::{
    DbManager, RateLimitClient, SqliteBuildingRepository, SqliteCatalogRepository,
    SqliteOrderRepository, SqlitePromotionRepository,
};

/// Type alias for the rate-limit gate trait object
type DynRateLimitGate = dyn RateLimitGate + 'static;

/// Type alias for the catalog store trait object
type DynCatalogStore = dyn CatalogStore + 'static;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub availability: AvailabilityService,
    pub catalog: Arc<DynCatalogStore>,
    pub promotions: Arc<PromotionService>,
    pub quotes: Arc<QuoteService>,
    pub orders: OrderService,
    pub sessions: SessionSigner,
    pub rate_limiter: Arc<DynRateLimitGate>,
}

impl AppContext {
    /// Wire the full application from its configuration.
    ///
    /// Opens the database, applies migrations, and connects every service to
    /// its repository. Fails fast: a broken database path or schema surfaces
    /// here, not on the first request.
    pub fn new(config: Config) -> Result<Self> {
        let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
        db.run_migrations()?;

        let catalog: Arc<DynCatalogStore> = Arc::new(SqliteCatalogRepository::new(db.clone()));
        let buildings = Arc::new(SqliteBuildingRepository::new(db.clone()));
        let order_store = Arc::new(SqliteOrderRepository::new(db.clone()));
        let promotion_store = Arc::new(SqlitePromotionRepository::new(db.clone()));

        let promotions = Arc::new(PromotionService::new(promotion_store));
        let quotes = Arc::new(QuoteService::new(catalog.clone(), promotions.clone()));
        let orders = OrderService::new(quotes.clone(), order_store);
        let availability = AvailabilityService::new(buildings, catalog.clone());

        let sessions = SessionSigner::new(
            &config.session.secret,
            config.session.generation,
            config.session.ttl_seconds,
        );
        let rate_limiter: Arc<DynRateLimitGate> =
            Arc::new(RateLimitClient::new(config.rate_limit.endpoint.clone()));

        Ok(Self {
            config,
            db,
            availability,
            catalog,
            promotions,
            quotes,
            orders,
            sessions,
            rate_limiter,
        })
    }
}
