/// The set of tickers a dashboard run queries. Declaration order is fetch
/// order, which also breaks ranking ties.
#[derive(Debug, Clone)]
pub enum TickerUniverse {
    Custom(Vec<String>),
    LargeCaps,
}

impl TickerUniverse {
    pub fn symbols(&self) -> Vec<String> {
        match self {
            TickerUniverse::Custom(symbols) => symbols.clone(),
            TickerUniverse::LargeCaps => vec![
                "AAPL", "MSFT", "NVDA", "AMZN", "GOOGL", "META", "AVGO", "TSLA", "NFLX",
                "ORCL", "CRM", "CSCO", "IBM", "PLTR", "INTU", "V", "MA",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_large_caps_order_is_stable() {
        let symbols = TickerUniverse::LargeCaps.symbols();
        assert_eq!(symbols.len(), 17);
        assert_eq!(symbols[0], "AAPL");
        assert_eq!(symbols[16], "MA");
        // Same order every call; this is the fetch/tie-break order.
        assert_eq!(symbols, TickerUniverse::LargeCaps.symbols());
    }

    #[test]
    fn test_custom_universe_passthrough() {
        let universe = TickerUniverse::Custom(vec!["KO".to_string(), "PEP".to_string()]);
        assert_eq!(universe.symbols(), vec!["KO", "PEP"]);
    }
}
