use serde::{Deserialize, Serialize};

/// A publicly listed company tracked by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub ticker: String,
    pub name: String,
    pub sector: String,
}

/// Financial statement figures for one company, keyed by ticker.
///
/// Every figure is optional: a missing cell stays missing rather than
/// becoming zero, and figures may legitimately be negative (e.g. a loss
/// in `net_profit`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Financial {
    pub ticker: String,
    pub ebitda: Option<f64>,
    pub sales: Option<f64>,
    pub net_profit: Option<f64>,
    pub market_price: Option<f64>,
    pub net_debt: Option<f64>,
    pub assets: Option<f64>,
    pub equity: Option<f64>,
    pub cash_equivalents: Option<f64>,
    pub liabilities: Option<f64>,
}

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub companies_csv: String,
    pub financial_csv: String,
    pub top_list_size: usize,
}

impl Config {
    /// Load configuration from environment variables, falling back to the
    /// built-in defaults when a variable is unset.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Config {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "investor.db".to_string()),
            companies_csv: std::env::var("COMPANIES_CSV")
                .unwrap_or_else(|_| "test/companies.csv".to_string()),
            financial_csv: std::env::var("FINANCIAL_CSV")
                .unwrap_or_else(|_| "test/financial.csv".to_string()),
            top_list_size: std::env::var("TOP_LIST_SIZE")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
        }
    }
}
