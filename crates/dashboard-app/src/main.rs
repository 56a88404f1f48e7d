use std::sync::Arc;

use anyhow::Result;
use dashboard_core::{DashboardError, DashboardTable};
use dashboard_pipeline::{DashboardPipeline, RadarProfile, TickerUniverse};
use yahoo_client::YahooClient;

mod config;

use config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(
        "Dashboard config: top_n={}, cache_ttl={}s",
        config.top_n,
        config.cache_ttl_secs
    );

    let universe = match &config.tickers {
        Some(tickers) => TickerUniverse::Custom(tickers.clone()),
        None => TickerUniverse::LargeCaps,
    };

    let pipeline =
        DashboardPipeline::with_cache_ttl(Arc::new(YahooClient::new()), config.cache_ttl_secs);

    let table = match pipeline.run(&universe, config.top_n).await {
        Ok(table) => table,
        Err(DashboardError::EmptyResult) => {
            eprintln!("No data available: no symbol returned a complete snapshot.");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    print_table(&table);

    // Radar view of the table leader, normalized against column maxima
    if let Some(top) = table.rows.first() {
        if let Some(profile) = RadarProfile::for_company(&table, &top.company.ticker) {
            print_radar(&profile);
        }
    }

    Ok(())
}

fn print_table(table: &DashboardTable) {
    println!(
        "{:<6} {:<26} {:>12} {:>10} {:>6} {:>8} {:>8} {:>8} {:>10} {:>10}",
        "Ticker",
        "Company",
        "MktCap($B)",
        "Employees",
        "Risk",
        "EQG",
        "Payout",
        "DivYld",
        "RiskAdjDiv",
        "ValueIdx"
    );

    for row in &table.rows {
        let c = &row.company;
        println!(
            "{:<6} {:<26} {:>12.1} {:>10} {:>6} {:>8.3} {:>8.3} {:>8.4} {:>10} {:>10}",
            c.ticker,
            truncate(&c.display_name, 26),
            c.market_cap_bn,
            c.employees,
            c.overall_risk,
            c.earnings_quarterly_growth,
            c.payout_ratio,
            c.dividend_yield,
            format_metric(row.risk_adjusted_dividend),
            format_metric(row.value_index),
        );
    }

    println!(
        "\n{} of {} fetched symbols had complete data; showing top {}.",
        table.complete,
        table.fetched,
        table.len()
    );
}

fn print_radar(profile: &RadarProfile) {
    println!("\nProfile radar: {} ({})", profile.display_name, profile.ticker);
    for axis in &profile.axes {
        println!("  {:<16} {:>7.3}", axis.label, axis.value);
    }
}

fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.4}", v),
        None => "n/a".to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max - 1).collect::<String>() + "…"
    }
}
