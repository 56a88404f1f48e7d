use dashboard_core::{NormalizedRow, RawSnapshot};

/// Shape a provider snapshot into the fixed dashboard row. Values stay
/// exactly as the provider sent them; type coercion happens after ranking.
pub fn normalize(snapshot: &RawSnapshot) -> NormalizedRow {
    let f = |name: &str| snapshot.field(name).cloned();

    NormalizedRow {
        ticker: snapshot.symbol.clone(),
        display_name: f("shortName"),
        sector: f("sector"),
        industry: f("industry"),
        market_cap: f("marketCap"),
        employees: f("fullTimeEmployees"),
        overall_risk: f("overallRisk"),
        earnings_quarterly_growth: f("earningsQuarterlyGrowth"),
        payout_ratio: f("payoutRatio"),
        dividend_yield: f("dividendYield"),
    }
}

/// Keep only rows with every field present, preserving fetch order.
/// A single missing field disqualifies the whole row.
pub fn retain_complete(rows: Vec<NormalizedRow>) -> Vec<NormalizedRow> {
    rows.into_iter()
        .filter(|row| {
            if row.is_complete() {
                true
            } else {
                tracing::debug!(
                    "Dropping {}: missing {}",
                    row.ticker,
                    row.missing_fields().join(", ")
                );
                false
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(symbol: &str, with_sector: bool) -> RawSnapshot {
        let mut fields = serde_json::Map::new();
        fields.insert("shortName".to_string(), json!(format!("{} Inc", symbol)));
        if with_sector {
            fields.insert("sector".to_string(), json!("Technology"));
        }
        fields.insert("industry".to_string(), json!("Software"));
        fields.insert("marketCap".to_string(), json!(1.0e12));
        fields.insert("fullTimeEmployees".to_string(), json!(50000));
        fields.insert("overallRisk".to_string(), json!(3));
        fields.insert("earningsQuarterlyGrowth".to_string(), json!(0.12));
        fields.insert("payoutRatio".to_string(), json!(0.2));
        fields.insert("dividendYield".to_string(), json!(0.01));
        RawSnapshot::new(symbol.to_string(), fields)
    }

    #[test]
    fn test_normalize_maps_provider_fields() {
        let row = normalize(&snapshot("MSFT", true));

        assert_eq!(row.ticker, "MSFT");
        assert_eq!(row.display_name, Some(json!("MSFT Inc")));
        assert_eq!(row.market_cap, Some(json!(1.0e12)));
        assert!(row.is_complete());
    }

    #[test]
    fn test_normalize_marks_absent_and_null_fields() {
        let mut raw = snapshot("TSLA", true);
        raw.fields.remove("dividendYield");
        raw.fields
            .insert("payoutRatio".to_string(), serde_json::Value::Null);

        let row = normalize(&raw);

        assert_eq!(row.dividend_yield, None);
        assert_eq!(row.payout_ratio, None);
        assert!(!row.is_complete());
    }

    #[test]
    fn test_retain_complete_drops_and_preserves_order() {
        let rows = vec![
            normalize(&snapshot("AAPL", true)),
            normalize(&snapshot("GOOGL", false)), // missing sector
            normalize(&snapshot("MSFT", true)),
        ];

        let kept = retain_complete(rows);

        let tickers: Vec<&str> = kept.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn test_retain_complete_is_idempotent() {
        let rows = vec![
            normalize(&snapshot("AAPL", true)),
            normalize(&snapshot("GOOGL", false)),
        ];

        let once = retain_complete(rows);
        let twice = retain_complete(once.clone());

        assert_eq!(once.len(), twice.len());
        assert_eq!(once[0].ticker, twice[0].ticker);
    }
}
