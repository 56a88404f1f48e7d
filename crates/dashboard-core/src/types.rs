use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Provider response for one symbol: an open-ended field name -> value map.
/// Shape varies by symbol and by what the provider happens to know.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSnapshot {
    pub symbol: String,
    pub fields: serde_json::Map<String, Value>,
}

impl RawSnapshot {
    pub fn new(symbol: String, fields: serde_json::Map<String, Value>) -> Self {
        Self { symbol, fields }
    }

    /// Field lookup that treats JSON null the same as an absent key.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).filter(|v| !v.is_null())
    }
}

/// One symbol's row after field lookup but before any type coercion.
/// Values are carried through exactly as the provider sent them (string or
/// number); `None` is the missing marker the completeness filter checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedRow {
    pub ticker: String,
    pub display_name: Option<Value>,
    pub sector: Option<Value>,
    pub industry: Option<Value>,
    pub market_cap: Option<Value>,
    pub employees: Option<Value>,
    pub overall_risk: Option<Value>,
    pub earnings_quarterly_growth: Option<Value>,
    pub payout_ratio: Option<Value>,
    pub dividend_yield: Option<Value>,
}

impl NormalizedRow {
    /// Strict AND across every tracked field. The ticker comes from the
    /// request side and is always present.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Names of the fields the provider left blank, in column order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let checks: [(&'static str, &Option<Value>); 9] = [
            ("display_name", &self.display_name),
            ("sector", &self.sector),
            ("industry", &self.industry),
            ("market_cap", &self.market_cap),
            ("employees", &self.employees),
            ("overall_risk", &self.overall_risk),
            ("earnings_quarterly_growth", &self.earnings_quarterly_growth),
            ("payout_ratio", &self.payout_ratio),
            ("dividend_yield", &self.dividend_yield),
        ];

        checks
            .into_iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| name)
            .collect()
    }
}

/// Fully coerced company row. Every field is guaranteed present; the
/// completeness filter runs before coercion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub ticker: String,
    pub display_name: String,
    pub sector: String,
    pub industry: String,
    /// Market capitalization in billions of the raw currency unit.
    pub market_cap_bn: f64,
    pub employees: u64,
    /// Provider-supplied ordinal risk score.
    pub overall_risk: i64,
    pub earnings_quarterly_growth: f64,
    pub payout_ratio: f64,
    pub dividend_yield: f64,
}

/// A company row extended with the derived ratio columns.
///
/// Both metrics are `None` when their denominator is zero: the documented
/// "not computable" sentinel. Consumers render it as n/a instead of seeing
/// an infinity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivedRecord {
    pub company: CompanyRecord,
    /// dividend_yield / overall_risk
    pub risk_adjusted_dividend: Option<f64>,
    /// (earnings_quarterly_growth + dividend_yield) / (overall_risk * payout_ratio)
    pub value_index: Option<f64>,
}

/// Final pipeline output: rows sorted by market cap descending, at most
/// top-N of them, plus batch counters for the consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardTable {
    pub rows: Vec<DerivedRecord>,
    /// Symbols whose snapshot fetch succeeded.
    pub fetched: usize,
    /// Rows that survived the completeness filter (before truncation).
    pub complete: usize,
    pub generated_at: DateTime<Utc>,
}

impl DashboardTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up a row by ticker symbol.
    pub fn get(&self, ticker: &str) -> Option<&DerivedRecord> {
        self.rows.iter().find(|r| r.company.ticker == ticker)
    }
}
