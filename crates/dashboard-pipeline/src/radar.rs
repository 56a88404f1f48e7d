//! Radar profile: one company's attributes normalized against each
//! column's maximum across the table, for shape comparison in a
//! radar-style chart. Chart drawing itself is the consumer's job.

use dashboard_core::{CompanyRecord, DashboardTable};
use serde::{Deserialize, Serialize};

/// One normalized axis of the profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadarAxis {
    pub label: String,
    /// value / column max. Negative when the underlying value is negative
    /// (earnings growth), matching the source dashboard's normalization.
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadarProfile {
    pub ticker: String,
    pub display_name: String,
    pub axes: Vec<RadarAxis>,
}

impl RadarProfile {
    /// Axis labels in chart order.
    pub fn axis_labels() -> Vec<&'static str> {
        vec![
            "Market Cap",
            "Employees",
            "Dividend Yield",
            "Earnings Growth",
            "Payout Ratio",
        ]
    }

    /// Build the profile for one table row. None when the ticker isn't in
    /// the table.
    pub fn for_company(table: &DashboardTable, ticker: &str) -> Option<RadarProfile> {
        let row = table.get(ticker)?;
        let company = &row.company;

        let axes = vec![
            axis("Market Cap", company.market_cap_bn, column_max(table, |c| c.market_cap_bn)),
            axis(
                "Employees",
                company.employees as f64,
                column_max(table, |c| c.employees as f64),
            ),
            axis(
                "Dividend Yield",
                company.dividend_yield,
                column_max(table, |c| c.dividend_yield),
            ),
            axis(
                "Earnings Growth",
                company.earnings_quarterly_growth,
                column_max(table, |c| c.earnings_quarterly_growth),
            ),
            axis(
                "Payout Ratio",
                company.payout_ratio,
                column_max(table, |c| c.payout_ratio),
            ),
        ];

        Some(RadarProfile {
            ticker: company.ticker.clone(),
            display_name: company.display_name.clone(),
            axes,
        })
    }
}

fn column_max(table: &DashboardTable, f: fn(&CompanyRecord) -> f64) -> f64 {
    table
        .rows
        .iter()
        .map(|r| f(&r.company))
        .fold(f64::NEG_INFINITY, f64::max)
}

fn axis(label: &str, value: f64, max: f64) -> RadarAxis {
    // A zero column maximum would divide to NaN; show a flat axis instead.
    let normalized = if max == 0.0 || !max.is_finite() {
        0.0
    } else {
        value / max
    };

    RadarAxis {
        label: label.to_string(),
        value: normalized,
    }
}
