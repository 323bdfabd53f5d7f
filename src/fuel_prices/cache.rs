use crate::error::AppError;
use crate::fuel_prices::source::FuelPriceSource;
use crate::fuel_prices::table::FuelPriceTable;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Time-bounded cache in front of another [`FuelPriceSource`], keyed by URL
///
/// Only successful fetches are cached. Concurrent misses for the same URL
/// each go upstream; there is no request coalescing.
pub struct CachedPriceSource {
    inner: Arc<dyn FuelPriceSource>,
    ttl: Duration,
    entries: DashMap<String, (Instant, FuelPriceTable)>,
}

impl CachedPriceSource {
    pub fn new(inner: Arc<dyn FuelPriceSource>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: DashMap::new(),
        }
    }

    fn lookup(&self, url: &str) -> Option<FuelPriceTable> {
        let entry = self.entries.get(url)?;
        let (fetched_at, table) = entry.value();
        (fetched_at.elapsed() < self.ttl).then(|| table.clone())
    }
}

#[async_trait]
impl FuelPriceSource for CachedPriceSource {
    async fn fetch_prices(&self, url: &str) -> Result<FuelPriceTable, AppError> {
        if let Some(table) = self.lookup(url) {
            debug!(url, "[CACHE HIT] fuel price table");
            return Ok(table);
        }

        let table = self.inner.fetch_prices(url).await?;
        self.entries
            .insert(url.to_string(), (Instant::now(), table.clone()));
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FuelType;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl FuelPriceSource for CountingSource {
        async fn fetch_prices(&self, _url: &str) -> Result<FuelPriceTable, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::Fetch("offline".to_string()));
            }
            Ok(FuelPriceTable::from_labels([("Diesel prices", "11,50")]))
        }
    }

    fn counting(fail: bool) -> Arc<CountingSource> {
        Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
            fail,
        })
    }

    #[tokio::test]
    async fn test_second_fetch_is_served_from_cache() {
        let inner = counting(false);
        let cache = CachedPriceSource::new(inner.clone(), Duration::from_secs(60));

        let first = cache.fetch_prices("https://prices.test/").await.unwrap();
        let second = cache.fetch_prices("https://prices.test/").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(second.get(FuelType::Diesel), Some("11,50"));
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_entries_are_keyed_by_url() {
        let inner = counting(false);
        let cache = CachedPriceSource::new(inner.clone(), Duration::from_secs(60));

        cache.fetch_prices("https://a.test/").await.unwrap();
        cache.fetch_prices("https://b.test/").await.unwrap();

        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_expired_entry_is_refetched() {
        let inner = counting(false);
        let cache = CachedPriceSource::new(inner.clone(), Duration::ZERO);

        cache.fetch_prices("https://prices.test/").await.unwrap();
        cache.fetch_prices("https://prices.test/").await.unwrap();

        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let inner = counting(true);
        let cache = CachedPriceSource::new(inner.clone(), Duration::from_secs(60));

        assert!(matches!(
            cache.fetch_prices("https://prices.test/").await,
            Err(AppError::Fetch(_))
        ));
        assert!(cache.fetch_prices("https://prices.test/").await.is_err());
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }
}
