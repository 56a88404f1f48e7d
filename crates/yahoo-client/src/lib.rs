use async_trait::async_trait;
use dashboard_core::{DashboardError, RawSnapshot, SnapshotProvider};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

const BASE_URL: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";

/// quoteSummary modules that together cover the dashboard columns:
/// assetProfile (sector, industry, employees, risk), price (shortName,
/// marketCap), summaryDetail (payoutRatio, dividendYield),
/// defaultKeyStatistics (earningsQuarterlyGrowth).
const MODULES: &str = "assetProfile,price,summaryDetail,defaultKeyStatistics";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct YahooClient {
    client: Client,
}

impl YahooClient {
    pub fn new() -> Self {
        // Yahoo's failure modes are untrusted; a per-request timeout bounds
        // worst-case latency. Override with YAHOO_TIMEOUT_SECS.
        let timeout_secs: u64 = std::env::var("YAHOO_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self::with_timeout(Duration::from_secs(timeout_secs))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    /// Fetch the metadata snapshot for one symbol.
    ///
    /// Network failures, non-2xx statuses, and payloads without a
    /// quoteSummary result all map to `DashboardError::Fetch` for that
    /// symbol only.
    pub async fn company_snapshot(&self, symbol: &str) -> Result<RawSnapshot, DashboardError> {
        let url = format!("{}/{}", BASE_URL, symbol);

        let response = self
            .client
            .get(&url)
            .query(&[("modules", MODULES)])
            .send()
            .await
            .map_err(|e| DashboardError::Fetch(format!("{}: {}", symbol, e)))?;

        if !response.status().is_success() {
            return Err(DashboardError::Fetch(format!(
                "{}: HTTP {}",
                symbol,
                response.status()
            )));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| DashboardError::Fetch(format!("{}: {}", symbol, e)))?;

        let result = json
            .get("quoteSummary")
            .and_then(|v| v.get("result"))
            .and_then(|v| v.as_array())
            .and_then(|arr| arr.first())
            .ok_or_else(|| {
                DashboardError::Fetch(format!("no quoteSummary result for {}", symbol))
            })?;

        tracing::debug!("Fetched snapshot for {}", symbol);

        Ok(RawSnapshot::new(
            symbol.to_uppercase(),
            flatten_modules(result),
        ))
    }
}

#[async_trait]
impl SnapshotProvider for YahooClient {
    async fn company_snapshot(&self, symbol: &str) -> Result<RawSnapshot, DashboardError> {
        YahooClient::company_snapshot(self, symbol).await
    }
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge all quoteSummary modules into one flat field map so downstream
/// lookups address provider fields by name (marketCap, shortName, ...)
/// without caring which module carried them.
fn flatten_modules(result: &Value) -> serde_json::Map<String, Value> {
    let mut fields = serde_json::Map::new();

    if let Some(modules) = result.as_object() {
        for module in modules.values() {
            if let Some(obj) = module.as_object() {
                for (key, value) in obj {
                    fields.insert(key.clone(), unwrap_raw(value));
                }
            }
        }
    }

    fields
}

/// Yahoo wraps numbers as {"raw": 3.0e12, "fmt": "3T"}; keep the raw value.
fn unwrap_raw(value: &Value) -> Value {
    match value.as_object().and_then(|o| o.get("raw")) {
        Some(raw) => raw.clone(),
        None => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_raw_number_object() {
        let wrapped = json!({"raw": 3000000000000.0_f64, "fmt": "3T"});
        assert_eq!(unwrap_raw(&wrapped), json!(3000000000000.0_f64));

        // Plain values pass through untouched
        assert_eq!(unwrap_raw(&json!("Technology")), json!("Technology"));
        assert_eq!(unwrap_raw(&json!(7)), json!(7));
    }

    #[test]
    fn test_flatten_merges_modules_and_unwraps() {
        let result = json!({
            "assetProfile": {
                "sector": "Technology",
                "industry": "Consumer Electronics",
                "fullTimeEmployees": 164000,
                "overallRisk": 1
            },
            "price": {
                "shortName": "Apple Inc.",
                "marketCap": {"raw": 3.0e12, "fmt": "3T"}
            },
            "summaryDetail": {
                "payoutRatio": {"raw": 0.15, "fmt": "15.00%"},
                "dividendYield": {"raw": 0.0044, "fmt": "0.44%"}
            }
        });

        let fields = flatten_modules(&result);

        assert_eq!(fields.get("sector"), Some(&json!("Technology")));
        assert_eq!(fields.get("shortName"), Some(&json!("Apple Inc.")));
        assert_eq!(fields.get("marketCap"), Some(&json!(3.0e12)));
        assert_eq!(fields.get("payoutRatio"), Some(&json!(0.15)));
        assert_eq!(fields.get("fullTimeEmployees"), Some(&json!(164000)));
    }

    #[test]
    fn test_flatten_skips_null_modules() {
        // Modules Yahoo has nothing for come back as null
        let result = json!({
            "assetProfile": null,
            "price": {"shortName": "Apple Inc."}
        });

        let fields = flatten_modules(&result);

        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("shortName"), Some(&json!("Apple Inc.")));
    }
}
