//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::models::{Jersey, Pack};
use crate::services::checkout::CheckoutService;
use crate::services::discounts::DiscountService;

/// How long catalog reads are served from the in-process cache.
const CATALOG_CACHE_TTL: Duration = Duration::from_secs(60);

/// Maximum cached catalog entries.
const CATALOG_CACHE_CAPACITY: u64 = 1_000;

/// Cache key for catalog lookups.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CatalogCacheKey {
    Jerseys { league: Option<String> },
    Jersey(i64),
    Packs,
    Pack(i64),
}

/// Cached catalog values.
#[derive(Debug, Clone)]
pub enum CatalogCacheValue {
    Jerseys(Vec<Jersey>),
    Jersey(Box<Jersey>),
    Packs(Vec<Pack>),
    Pack(Box<Pack>),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    discounts: DiscountService,
    checkout: CheckoutService,
    catalog_cache: Cache<CatalogCacheKey, CatalogCacheValue>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `pool` - `PostgreSQL` connection pool
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Self {
        let discounts = DiscountService::new(pool.clone());
        let checkout = CheckoutService::new(pool.clone(), config.shop.clone());
        let catalog_cache = Cache::builder()
            .max_capacity(CATALOG_CACHE_CAPACITY)
            .time_to_live(CATALOG_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                discounts,
                checkout,
                catalog_cache,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the discount code registry.
    #[must_use]
    pub fn discounts(&self) -> &DiscountService {
        &self.inner.discounts
    }

    /// Get a reference to the checkout orchestrator.
    #[must_use]
    pub fn checkout(&self) -> &CheckoutService {
        &self.inner.checkout
    }

    /// Get a reference to the catalog read cache.
    #[must_use]
    pub fn catalog_cache(&self) -> &Cache<CatalogCacheKey, CatalogCacheValue> {
        &self.inner.catalog_cache
    }
}
