use crate::models::Financial;

/// Outcome of evaluating one ratio against one financial record.
///
/// Unavailability is a value, not an error: callers decide whether to skip
/// the record (rankings) or render a placeholder (reports).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RatioValue {
    /// Computed ratio, rounded to two decimal places.
    Value(f64),
    /// At least one required figure is absent from the record.
    MissingData,
    /// Both figures are present but the denominator is exactly zero.
    Undefined,
}

impl RatioValue {
    /// The computed value, if there is one.
    pub fn available(self) -> Option<f64> {
        match self {
            RatioValue::Value(value) => Some(value),
            RatioValue::MissingData | RatioValue::Undefined => None,
        }
    }
}

/// The seven ratios derivable from a financial record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatioKind {
    PriceToEarnings,
    PriceToSales,
    PriceToBook,
    NetDebtToEbitda,
    ReturnOnEquity,
    ReturnOnAssets,
    LiabilitiesToAssets,
}

impl RatioKind {
    /// All ratios in report display order.
    pub const ALL: [RatioKind; 7] = [
        RatioKind::PriceToEarnings,
        RatioKind::PriceToSales,
        RatioKind::PriceToBook,
        RatioKind::NetDebtToEbitda,
        RatioKind::ReturnOnEquity,
        RatioKind::ReturnOnAssets,
        RatioKind::LiabilitiesToAssets,
    ];

    /// Short label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            RatioKind::PriceToEarnings => "P/E",
            RatioKind::PriceToSales => "P/S",
            RatioKind::PriceToBook => "P/B",
            RatioKind::NetDebtToEbitda => "ND/EBITDA",
            RatioKind::ReturnOnEquity => "ROE",
            RatioKind::ReturnOnAssets => "ROA",
            RatioKind::LiabilitiesToAssets => "L/A",
        }
    }

    /// Numerator and denominator for this ratio.
    fn operands(self, financial: &Financial) -> (Option<f64>, Option<f64>) {
        match self {
            RatioKind::PriceToEarnings => (financial.market_price, financial.net_profit),
            RatioKind::PriceToSales => (financial.market_price, financial.sales),
            RatioKind::PriceToBook => (financial.market_price, financial.assets),
            RatioKind::NetDebtToEbitda => (financial.net_debt, financial.ebitda),
            RatioKind::ReturnOnEquity => (financial.net_profit, financial.equity),
            RatioKind::ReturnOnAssets => (financial.net_profit, financial.assets),
            RatioKind::LiabilitiesToAssets => (financial.liabilities, financial.assets),
        }
    }

    /// Evaluate this ratio for a record.
    ///
    /// Missing figures yield `MissingData` and a zero denominator yields
    /// `Undefined`; the computation itself never faults. A present zero in
    /// a numerator is an ordinary value.
    pub fn evaluate(self, financial: &Financial) -> RatioValue {
        match self.operands(financial) {
            (Some(_), Some(denominator)) if denominator == 0.0 => RatioValue::Undefined,
            (Some(numerator), Some(denominator)) => {
                RatioValue::Value(round2(numerator / denominator))
            }
            _ => RatioValue::MissingData,
        }
    }
}

/// Round to two decimal places, half away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
