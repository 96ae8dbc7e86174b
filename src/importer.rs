use std::path::Path;

use csv::ReaderBuilder;
use tracing::info;

use crate::database::DatabaseManager;
use crate::error::ImportError;
use crate::models::{Company, Financial};

/// Counters reported by a completed bulk load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub companies_loaded: usize,
    pub financials_loaded: usize,
}

/// Load both CSV sources and replace the store contents with them.
///
/// Both files are parsed to completion before the store is touched, and
/// the swap itself is transactional, so a malformed row anywhere leaves
/// the existing data exactly as it was.
pub async fn load_csv_data(
    database: &DatabaseManager,
    companies_csv: &str,
    financial_csv: &str,
) -> Result<ImportStats, ImportError> {
    let companies = read_company_rows(companies_csv)?;
    let financials = read_financial_rows(financial_csv)?;

    database.replace_all(&companies, &financials).await?;

    let stats = ImportStats {
        companies_loaded: companies.len(),
        financials_loaded: financials.len(),
    };
    info!(
        "CSV import complete: {} companies, {} financial records",
        stats.companies_loaded, stats.financials_loaded
    );
    Ok(stats)
}

/// Parse the company CSV (header line: `ticker,name,sector`).
pub fn read_company_rows(path: impl AsRef<Path>) -> Result<Vec<Company>, ImportError> {
    let file = path.as_ref().display().to_string();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path.as_ref())
        .map_err(|e| ImportError::Source {
            file: file.clone(),
            source: e,
        })?;

    let mut rows = Vec::new();
    for (index, record) in reader.deserialize::<Company>().enumerate() {
        // Data starts on line 2; line 1 is the header.
        let row = record.map_err(|e| ImportError::MalformedRow {
            file: file.clone(),
            line: index + 2,
            message: e.to_string(),
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// Parse the financial CSV (ticker plus nine numeric columns).
///
/// An empty numeric cell deserializes to `None`; a cell that is present
/// but not a number is a malformed row and aborts the load.
pub fn read_financial_rows(path: impl AsRef<Path>) -> Result<Vec<Financial>, ImportError> {
    let file = path.as_ref().display().to_string();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path.as_ref())
        .map_err(|e| ImportError::Source {
            file: file.clone(),
            source: e,
        })?;

    let mut rows = Vec::new();
    for (index, record) in reader.deserialize::<Financial>().enumerate() {
        let row = record.map_err(|e| ImportError::MalformedRow {
            file: file.clone(),
            line: index + 2,
            message: e.to_string(),
        })?;
        rows.push(row);
    }
    Ok(rows)
}
