use async_trait::async_trait;
use crate::{DashboardError, RawSnapshot};

/// Trait for market-data snapshot providers
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    /// Fetch the current metadata snapshot for one symbol. One attempt,
    /// no retries; callers decide how to handle per-symbol failures.
    async fn company_snapshot(&self, symbol: &str) -> Result<RawSnapshot, DashboardError>;
}
