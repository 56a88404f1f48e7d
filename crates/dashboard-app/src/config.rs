use anyhow::Result;
use dashboard_pipeline::DEFAULT_TOP_N;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// How many companies the final table keeps.
    pub top_n: usize,
    /// Snapshot cache TTL in seconds.
    pub cache_ttl_secs: i64,
    /// Optional comma-separated ticker override for the built-in universe.
    pub tickers: Option<Vec<String>>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            top_n: env::var("DASHBOARD_TOP_N")
                .unwrap_or_else(|_| DEFAULT_TOP_N.to_string())
                .parse()?,
            cache_ttl_secs: env::var("SNAPSHOT_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()?,
            tickers: env::var("DASHBOARD_TICKERS")
                .ok()
                .map(|raw| parse_ticker_list(&raw)),
        };

        Ok(config)
    }
}

fn parse_ticker_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
        .collect()
}
