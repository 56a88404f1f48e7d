use dashboard_core::{CompanyRecord, DashboardError, NormalizedRow};
use serde_json::Value;

fn as_string(value: &Value) -> Option<String> {
    value.as_str().map(|s| s.to_string())
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_u64(value: &Value) -> Option<u64> {
    match value {
        // Providers sometimes send whole counts as floats (50000.0)
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn require<T>(
    ticker: &str,
    field: &str,
    value: Option<&Value>,
    parse: fn(&Value) -> Option<T>,
) -> Result<T, DashboardError> {
    // A None here means the completeness filter was bypassed: a defect,
    // not a data condition.
    let value = value.ok_or_else(|| {
        DashboardError::Coercion(format!(
            "{}: {} missing after completeness filter",
            ticker, field
        ))
    })?;

    parse(value).ok_or_else(|| {
        DashboardError::Coercion(format!("{}: cannot parse {} from {}", ticker, field, value))
    })
}

/// Cast every retained column to its semantic type. Market cap is rescaled
/// to billions for display. Fails loudly on any present-but-malformed
/// value; missing data never reaches this stage.
pub fn coerce_row(row: &NormalizedRow) -> Result<CompanyRecord, DashboardError> {
    let t = &row.ticker;

    Ok(CompanyRecord {
        ticker: row.ticker.clone(),
        display_name: require(t, "display_name", row.display_name.as_ref(), as_string)?,
        sector: require(t, "sector", row.sector.as_ref(), as_string)?,
        industry: require(t, "industry", row.industry.as_ref(), as_string)?,
        market_cap_bn: require(t, "market_cap", row.market_cap.as_ref(), as_f64)? / 1e9,
        employees: require(t, "employees", row.employees.as_ref(), as_u64)?,
        overall_risk: require(t, "overall_risk", row.overall_risk.as_ref(), as_i64)?,
        earnings_quarterly_growth: require(
            t,
            "earnings_quarterly_growth",
            row.earnings_quarterly_growth.as_ref(),
            as_f64,
        )?,
        payout_ratio: require(t, "payout_ratio", row.payout_ratio.as_ref(), as_f64)?,
        dividend_yield: require(t, "dividend_yield", row.dividend_yield.as_ref(), as_f64)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row() -> NormalizedRow {
        NormalizedRow {
            ticker: "AAPL".to_string(),
            display_name: Some(json!("Apple Inc.")),
            sector: Some(json!("Technology")),
            industry: Some(json!("Consumer Electronics")),
            market_cap: Some(json!(3.0e12)),
            employees: Some(json!(164000)),
            overall_risk: Some(json!(1)),
            earnings_quarterly_growth: Some(json!(-0.07)),
            payout_ratio: Some(json!(0.15)),
            dividend_yield: Some(json!(0.0044)),
        }
    }

    #[test]
    fn test_coerce_rescales_market_cap_to_billions() {
        let record = coerce_row(&row()).unwrap();

        assert_eq!(record.market_cap_bn, 3000.0);
        assert_eq!(record.employees, 164000);
        assert_eq!(record.overall_risk, 1);
        assert_eq!(record.earnings_quarterly_growth, -0.07);
    }

    #[test]
    fn test_coerce_accepts_numeric_strings() {
        let mut r = row();
        r.market_cap = Some(json!("2500000000000"));
        r.employees = Some(json!("9001"));

        let record = coerce_row(&r).unwrap();

        assert_eq!(record.market_cap_bn, 2500.0);
        assert_eq!(record.employees, 9001);
    }

    #[test]
    fn test_coerce_accepts_whole_floats_for_counts() {
        let mut r = row();
        r.employees = Some(json!(164000.0));

        assert_eq!(coerce_row(&r).unwrap().employees, 164000);
    }

    #[test]
    fn test_malformed_value_is_an_error() {
        let mut r = row();
        r.overall_risk = Some(json!("not a number"));

        let err = coerce_row(&r).unwrap_err();
        assert!(matches!(err, DashboardError::Coercion(_)));
        assert!(err.to_string().contains("overall_risk"));
    }

    #[test]
    fn test_missing_field_is_a_contract_violation() {
        let mut r = row();
        r.sector = None;

        let err = coerce_row(&r).unwrap_err();
        assert!(matches!(err, DashboardError::Coercion(_)));
        assert!(err.to_string().contains("completeness filter"));
    }
}
