use dashboard_core::{CompanyRecord, DerivedRecord};

/// Dividend yield per unit of the provider's risk score.
/// None when the risk score is zero.
pub fn risk_adjusted_dividend(record: &CompanyRecord) -> Option<f64> {
    if record.overall_risk == 0 {
        return None;
    }
    Some(record.dividend_yield / record.overall_risk as f64)
}

/// Composite value score: income plus growth, discounted by risk and how
/// much of earnings is already paid out. None when the denominator is zero.
pub fn value_index(record: &CompanyRecord) -> Option<f64> {
    let denominator = record.overall_risk as f64 * record.payout_ratio;
    if denominator == 0.0 {
        return None;
    }
    Some((record.earnings_quarterly_growth + record.dividend_yield) / denominator)
}

/// Extend a coerced record with both derived columns.
pub fn derive(company: CompanyRecord) -> DerivedRecord {
    let risk_adjusted_dividend = risk_adjusted_dividend(&company);
    let value_index = value_index(&company);

    DerivedRecord {
        company,
        risk_adjusted_dividend,
        value_index,
    }
}
