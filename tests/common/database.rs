//! Test database fixtures built on DatabaseManager

use anyhow::Result;
use tempfile::TempDir;

use rust_investor::database::DatabaseManager;

use crate::common::test_data;

/// A store over a fresh database file in its own temporary directory.
///
/// Dropping the fixture removes the directory and the database with it,
/// so every test starts empty and leaves nothing behind.
pub struct TestDb {
    pub database: DatabaseManager,
    _dir: TempDir,
}

impl TestDb {
    pub async fn new() -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let db_path = dir.path().join("test.db");
        let database = DatabaseManager::new(&db_path.to_string_lossy()).await?;
        Ok(Self {
            database,
            _dir: dir,
        })
    }
}

/// Insert five sample companies with identical complete financial records
pub async fn insert_sample_companies(database: &DatabaseManager) -> Result<()> {
    let sample_companies = [
        ("AAPL", "Apple Inc."),
        ("AMZN", "Amazon.com Inc."),
        ("GOOGL", "Alphabet Inc."),
        ("MSFT", "Microsoft Corporation"),
        ("TSLA", "Tesla Inc."),
    ];

    for (ticker, name) in sample_companies {
        database
            .upsert_company(&test_data::create_test_company(ticker, name))
            .await?;
        database
            .upsert_financial(&test_data::create_test_financial(ticker))
            .await?;
    }

    Ok(())
}
