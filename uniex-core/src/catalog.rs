//! Market and currency catalog.
//!
//! The catalog holds one immutable [`CatalogSnapshot`] behind a read lock.
//! Refreshes build a complete replacement snapshot off-lock and swap it in
//! atomically, so readers always see either the previous catalog or the new
//! one, never a half-loaded mix. A separate loading mutex serializes
//! concurrent refresh attempts; the second caller finds the catalog loaded
//! and returns the fresh snapshot without hitting the venue again.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::{Currency, Market};

/// One immutable, fully-indexed view of a venue's listings.
#[derive(Debug, Default)]
pub struct CatalogSnapshot {
    markets: HashMap<String, Arc<Market>>,
    markets_by_id: HashMap<String, Arc<Market>>,
    currencies: HashMap<String, Arc<Currency>>,
    currencies_by_id: HashMap<String, Arc<Currency>>,
    symbols: Vec<String>,
    ids: Vec<String>,
    codes: Vec<String>,
    loaded: bool,
}

impl CatalogSnapshot {
    /// Builds a snapshot from parsed markets and currencies.
    ///
    /// Listing vectors are sorted so iteration order is stable across
    /// refreshes regardless of venue response order.
    pub fn new(markets: Vec<Market>, currencies: Vec<Currency>) -> Self {
        let mut markets_map = HashMap::with_capacity(markets.len());
        let mut markets_by_id = HashMap::with_capacity(markets.len());
        let mut symbols = Vec::with_capacity(markets.len());
        let mut ids = Vec::with_capacity(markets.len());

        for market in markets {
            symbols.push(market.symbol.clone());
            ids.push(market.id.clone());
            let market = Arc::new(market);
            markets_by_id.insert(market.id.clone(), Arc::clone(&market));
            markets_map.insert(market.symbol.clone(), market);
        }

        let mut currencies_map = HashMap::with_capacity(currencies.len());
        let mut currencies_by_id = HashMap::with_capacity(currencies.len());
        let mut codes = Vec::with_capacity(currencies.len());

        for currency in currencies {
            codes.push(currency.code.clone());
            let currency = Arc::new(currency);
            currencies_by_id.insert(currency.id.clone(), Arc::clone(&currency));
            currencies_map.insert(currency.code.clone(), currency);
        }

        symbols.sort();
        ids.sort();
        codes.sort();

        Self {
            markets: markets_map,
            markets_by_id,
            currencies: currencies_map,
            currencies_by_id,
            symbols,
            ids,
            codes,
            loaded: true,
        }
    }

    /// Whether this snapshot came from a completed load.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Looks up a market by unified symbol.
    pub fn market(&self, symbol: &str) -> Option<Arc<Market>> {
        self.markets.get(symbol).cloned()
    }

    /// Looks up a market by venue-native id.
    pub fn market_by_id(&self, id: &str) -> Option<Arc<Market>> {
        self.markets_by_id.get(id).cloned()
    }

    /// Looks up a currency by unified code.
    pub fn currency(&self, code: &str) -> Option<Arc<Currency>> {
        self.currencies.get(code).cloned()
    }

    /// Looks up a currency by venue-native id.
    pub fn currency_by_id(&self, id: &str) -> Option<Arc<Currency>> {
        self.currencies_by_id.get(id).cloned()
    }

    /// All unified symbols, sorted.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// All venue-native market ids, sorted.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// All unified currency codes, sorted.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Number of markets in this snapshot.
    pub fn market_count(&self) -> usize {
        self.markets.len()
    }

    /// Number of currencies in this snapshot.
    pub fn currency_count(&self) -> usize {
        self.currencies.len()
    }
}

/// Shared, refreshable catalog handle.
#[derive(Debug)]
pub struct MarketCatalog {
    snapshot: RwLock<Arc<CatalogSnapshot>>,
    loading: Mutex<()>,
}

impl Default for MarketCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketCatalog {
    /// Creates an empty, unloaded catalog.
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(CatalogSnapshot::default())),
            loading: Mutex::new(()),
        }
    }

    /// Current snapshot handle. Cheap; the snapshot itself is shared.
    pub async fn snapshot(&self) -> Arc<CatalogSnapshot> {
        Arc::clone(&*self.snapshot.read().await)
    }

    /// Whether a load has completed.
    pub async fn is_loaded(&self) -> bool {
        self.snapshot.read().await.is_loaded()
    }

    /// Loads (or reloads) the catalog through `loader`.
    ///
    /// The loader fetches and parses every segment; any error aborts the
    /// refresh and the previous snapshot stays in place. Without
    /// `force_refresh`, an already-loaded catalog is returned as-is, so
    /// repeated calls resolve from cache.
    pub async fn load_with<F, Fut>(
        &self,
        force_refresh: bool,
        exchange_id: &str,
        loader: F,
    ) -> Result<Arc<CatalogSnapshot>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(Vec<Market>, Vec<Currency>)>>,
    {
        let _loading_guard = self.loading.lock().await;

        {
            let current = self.snapshot.read().await;
            if current.is_loaded() && !force_refresh {
                debug!(
                    exchange = exchange_id,
                    markets = current.market_count(),
                    "returning cached market catalog"
                );
                return Ok(Arc::clone(&current));
            }
        }

        let (markets, currencies) = loader().await?;
        let next = Arc::new(CatalogSnapshot::new(markets, currencies));

        {
            let mut slot = self.snapshot.write().await;
            *slot = Arc::clone(&next);
        }

        info!(
            exchange = exchange_id,
            markets = next.market_count(),
            currencies = next.currency_count(),
            "market catalog loaded"
        );
        Ok(next)
    }

    /// Market by unified symbol. `BadSymbol` when absent; a never-loaded
    /// catalog reports that the caller must load markets first.
    pub async fn market(&self, symbol: &str) -> Result<Arc<Market>> {
        let snapshot = self.snapshot.read().await;
        if !snapshot.is_loaded() {
            return Err(Error::bad_request(
                "markets not loaded, call load_markets() first",
            ));
        }
        snapshot
            .market(symbol)
            .ok_or_else(|| Error::bad_symbol(format!("market {symbol} not found")))
    }

    /// Market by venue-native id.
    pub async fn market_by_id(&self, id: &str) -> Result<Arc<Market>> {
        self.snapshot
            .read()
            .await
            .market_by_id(id)
            .ok_or_else(|| Error::bad_symbol(format!("market with id {id} not found")))
    }

    /// Currency by unified code.
    pub async fn currency(&self, code: &str) -> Result<Arc<Currency>> {
        self.snapshot
            .read()
            .await
            .currency(code)
            .ok_or_else(|| Error::bad_symbol(format!("currency {code} not found")))
    }

    /// All unified symbols in the current snapshot.
    pub async fn symbols(&self) -> Vec<String> {
        self.snapshot.read().await.symbols().to_vec()
    }
}
