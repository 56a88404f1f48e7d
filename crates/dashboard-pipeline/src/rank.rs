use dashboard_core::NormalizedRow;
use serde_json::Value;
use std::cmp::Ordering;

/// Lenient numeric read used only for ordering. The type coercer enforces
/// the real contract on whatever survives truncation; a row whose market
/// cap fails even this lenient parse sorts last.
fn market_cap_key(row: &NormalizedRow) -> Option<f64> {
    match row.market_cap.as_ref()? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Sort rows by market cap descending and keep the first `top_n`.
/// The sort is stable, so equal market caps keep fetch order. Fewer than
/// `top_n` rows is fine; no padding.
pub fn rank_by_market_cap(mut rows: Vec<NormalizedRow>, top_n: usize) -> Vec<NormalizedRow> {
    rows.sort_by(|a, b| match (market_cap_key(a), market_cap_key(b)) {
        (Some(ka), Some(kb)) => kb.partial_cmp(&ka).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    rows.truncate(top_n);
    rows
}
