pub mod coerce;
pub mod metrics;
pub mod normalize;
pub mod radar;
pub mod rank;
pub mod universe;

pub use radar::{RadarAxis, RadarProfile};
pub use universe::TickerUniverse;

use chrono::{DateTime, Utc};
use dashboard_core::{
    DashboardError, DashboardTable, DerivedRecord, NormalizedRow, RawSnapshot, SnapshotProvider,
};
use dashmap::DashMap;
use std::sync::Arc;

/// Internal cache entry with timestamp
struct CacheEntry<T> {
    data: T,
    cached_at: DateTime<Utc>,
}

const DEFAULT_CACHE_TTL_SECS: i64 = 300; // 5 minutes

pub const DEFAULT_TOP_N: usize = 10;

/// Pipeline driver: turns a ticker universe into the final dashboard table.
///
/// Snapshots are fetched through a read-through cache keyed by ticker so
/// repeated runs within the TTL (dashboard refreshes) don't hammer the
/// provider.
pub struct DashboardPipeline {
    provider: Arc<dyn SnapshotProvider>,
    /// Cache raw snapshots per ticker (read-through, TTL)
    snapshot_cache: DashMap<String, CacheEntry<RawSnapshot>>,
    cache_ttl_secs: i64,
}

impl DashboardPipeline {
    pub fn new(provider: Arc<dyn SnapshotProvider>) -> Self {
        Self::with_cache_ttl(provider, DEFAULT_CACHE_TTL_SECS)
    }

    pub fn with_cache_ttl(provider: Arc<dyn SnapshotProvider>, cache_ttl_secs: i64) -> Self {
        Self {
            provider,
            snapshot_cache: DashMap::new(),
            cache_ttl_secs,
        }
    }

    /// Get the provider snapshot for one symbol (cached). Failures are not
    /// cached; the next run retries the symbol.
    pub async fn get_snapshot(&self, symbol: &str) -> Result<RawSnapshot, DashboardError> {
        let cache_key = symbol.to_uppercase();
        if let Some(entry) = self.snapshot_cache.get(&cache_key) {
            let age = (Utc::now() - entry.cached_at).num_seconds();
            if age < self.cache_ttl_secs {
                return Ok(entry.data.clone());
            }
        }

        let snapshot = self.provider.company_snapshot(symbol).await?;

        self.snapshot_cache.insert(
            cache_key,
            CacheEntry {
                data: snapshot.clone(),
                cached_at: Utc::now(),
            },
        );

        Ok(snapshot)
    }

    /// Fetch every symbol once, in order, isolating per-symbol failures so
    /// one bad symbol never aborts the batch.
    pub async fn fetch_snapshots(
        &self,
        symbols: &[String],
    ) -> Vec<(String, Result<RawSnapshot, DashboardError>)> {
        let mut results = Vec::with_capacity(symbols.len());

        for symbol in symbols {
            let result = self.get_snapshot(symbol).await;
            if let Err(e) = &result {
                tracing::warn!("Failed to fetch snapshot for {}: {}", symbol, e);
            }
            results.push((symbol.clone(), result));
        }

        results
    }

    /// Run the full pipeline: fetch -> normalize -> completeness filter ->
    /// rank/truncate -> coerce -> derive.
    ///
    /// Zero complete rows surfaces `DashboardError::EmptyResult` before any
    /// ranking or coercion happens. Coercion failures on retained rows
    /// propagate; they mean the provider broke the field contract.
    pub async fn run(
        &self,
        universe: &TickerUniverse,
        top_n: usize,
    ) -> Result<DashboardTable, DashboardError> {
        let symbols = universe.symbols();
        tracing::info!("Building dashboard table from {} symbols", symbols.len());

        let snapshots = self.fetch_snapshots(&symbols).await;
        let fetched = snapshots.iter().filter(|(_, r)| r.is_ok()).count();

        let rows: Vec<NormalizedRow> = snapshots
            .iter()
            .filter_map(|(_, result)| result.as_ref().ok())
            .map(normalize::normalize)
            .collect();

        let complete_rows = normalize::retain_complete(rows);
        if complete_rows.is_empty() {
            return Err(DashboardError::EmptyResult);
        }
        let complete = complete_rows.len();

        let ranked = rank::rank_by_market_cap(complete_rows, top_n);

        let mut table_rows: Vec<DerivedRecord> = Vec::with_capacity(ranked.len());
        for row in &ranked {
            let record = coerce::coerce_row(row)?;
            table_rows.push(metrics::derive(record));
        }

        tracing::info!(
            "Dashboard table ready: {}/{} symbols complete, returning top {}",
            complete,
            symbols.len(),
            table_rows.len()
        );

        Ok(DashboardTable {
            rows: table_rows,
            fetched,
            complete,
            generated_at: Utc::now(),
        })
    }
}
