use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::info;

use crate::error::StoreError;
use crate::models::{Company, Financial};

/// Row counts for both tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub companies: i64,
    pub financials: i64,
}

/// SQLite-backed store of companies and their financial records.
///
/// The two tables are linked one-to-one by ticker. The pairing is not a
/// schema-level constraint; `delete_company` and `replace_all` keep it
/// intact by writing both tables inside a single transaction.
#[derive(Clone)]
pub struct DatabaseManager {
    pool: SqlitePool,
}

impl DatabaseManager {
    /// Open (or create) the database file and ensure the schema exists.
    pub async fn new(database_path: &str) -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(
                SqliteConnectOptions::new()
                    .filename(database_path)
                    .create_if_missing(true),
            )
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS companies (
                ticker TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                sector TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS financial (
                ticker TEXT PRIMARY KEY,
                ebitda REAL,
                sales REAL,
                net_profit REAL,
                market_price REAL,
                net_debt REAL,
                assets REAL,
                equity REAL,
                cash_equivalents REAL,
                liabilities REAL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        info!("database ready at {}", database_path);
        Ok(Self { pool })
    }

    /// Insert or replace a company by ticker.
    pub async fn upsert_company(&self, company: &Company) -> Result<(), StoreError> {
        require_ticker(&company.ticker)?;

        sqlx::query(
            r#"
            INSERT INTO companies (ticker, name, sector)
            VALUES (?, ?, ?)
            ON CONFLICT(ticker) DO UPDATE SET
                name = excluded.name,
                sector = excluded.sector
            "#,
        )
        .bind(&company.ticker)
        .bind(&company.name)
        .bind(&company.sector)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert or replace a financial record by ticker.
    pub async fn upsert_financial(&self, financial: &Financial) -> Result<(), StoreError> {
        require_ticker(&financial.ticker)?;

        sqlx::query(
            r#"
            INSERT INTO financial (ticker, ebitda, sales, net_profit, market_price,
                                   net_debt, assets, equity, cash_equivalents, liabilities)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(ticker) DO UPDATE SET
                ebitda = excluded.ebitda,
                sales = excluded.sales,
                net_profit = excluded.net_profit,
                market_price = excluded.market_price,
                net_debt = excluded.net_debt,
                assets = excluded.assets,
                equity = excluded.equity,
                cash_equivalents = excluded.cash_equivalents,
                liabilities = excluded.liabilities
            "#,
        )
        .bind(&financial.ticker)
        .bind(financial.ebitda)
        .bind(financial.sales)
        .bind(financial.net_profit)
        .bind(financial.market_price)
        .bind(financial.net_debt)
        .bind(financial.assets)
        .bind(financial.equity)
        .bind(financial.cash_equivalents)
        .bind(financial.liabilities)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Look up a single company by exact ticker.
    pub async fn get_company(&self, ticker: &str) -> Result<Option<Company>, StoreError> {
        let row = sqlx::query("SELECT ticker, name, sector FROM companies WHERE ticker = ?")
            .bind(ticker)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| company_from_row(&r)))
    }

    /// Companies whose name contains `pattern`, case-sensitively.
    ///
    /// `instr` treats the pattern as a literal, so `%` and `_` have no
    /// wildcard meaning. Rows come back in storage (insertion) order.
    pub async fn find_companies_by_name(&self, pattern: &str) -> Result<Vec<Company>, StoreError> {
        let rows =
            sqlx::query("SELECT ticker, name, sector FROM companies WHERE instr(name, ?) > 0")
                .bind(pattern)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.iter().map(company_from_row).collect())
    }

    /// The financial record for `ticker`, or `NotFound`.
    pub async fn get_financial(&self, ticker: &str) -> Result<Financial, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT ticker, ebitda, sales, net_profit, market_price,
                   net_debt, assets, equity, cash_equivalents, liabilities
            FROM financial
            WHERE ticker = ?
            "#,
        )
        .bind(ticker)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| financial_from_row(&r))
            .ok_or_else(|| StoreError::NotFound(ticker.to_string()))
    }

    /// All companies in ascending ticker order.
    pub async fn list_companies(&self) -> Result<Vec<Company>, StoreError> {
        let rows = sqlx::query("SELECT ticker, name, sector FROM companies ORDER BY ticker")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(company_from_row).collect())
    }

    /// All financial records in ascending ticker order.
    pub async fn list_financials(&self) -> Result<Vec<Financial>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT ticker, ebitda, sales, net_profit, market_price,
                   net_debt, assets, equity, cash_equivalents, liabilities
            FROM financial
            ORDER BY ticker
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(financial_from_row).collect())
    }

    /// Delete a company and its financial record in one transaction.
    ///
    /// No-op when the ticker is absent.
    pub async fn delete_company(&self, ticker: &str) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM financial WHERE ticker = ?")
            .bind(ticker)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM companies WHERE ticker = ?")
            .bind(ticker)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Delete a financial record on its own. No-op when absent.
    pub async fn delete_financial(&self, ticker: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM financial WHERE ticker = ?")
            .bind(ticker)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Clear both tables and repopulate them from the given rows.
    ///
    /// Runs inside a single transaction: any failure (including an invalid
    /// ticker in the input) rolls everything back and the prior contents
    /// survive untouched. Duplicate tickers keep the last occurrence.
    pub async fn replace_all(
        &self,
        companies: &[Company],
        financials: &[Financial],
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM financial").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM companies").execute(&mut *tx).await?;

        for company in companies {
            require_ticker(&company.ticker)?;
            sqlx::query(
                r#"
                INSERT INTO companies (ticker, name, sector)
                VALUES (?, ?, ?)
                ON CONFLICT(ticker) DO UPDATE SET
                    name = excluded.name,
                    sector = excluded.sector
                "#,
            )
            .bind(&company.ticker)
            .bind(&company.name)
            .bind(&company.sector)
            .execute(&mut *tx)
            .await?;
        }

        for financial in financials {
            require_ticker(&financial.ticker)?;
            sqlx::query(
                r#"
                INSERT INTO financial (ticker, ebitda, sales, net_profit, market_price,
                                       net_debt, assets, equity, cash_equivalents, liabilities)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(ticker) DO UPDATE SET
                    ebitda = excluded.ebitda,
                    sales = excluded.sales,
                    net_profit = excluded.net_profit,
                    market_price = excluded.market_price,
                    net_debt = excluded.net_debt,
                    assets = excluded.assets,
                    equity = excluded.equity,
                    cash_equivalents = excluded.cash_equivalents,
                    liabilities = excluded.liabilities
                "#,
            )
            .bind(&financial.ticker)
            .bind(financial.ebitda)
            .bind(financial.sales)
            .bind(financial.net_profit)
            .bind(financial.market_price)
            .bind(financial.net_debt)
            .bind(financial.assets)
            .bind(financial.equity)
            .bind(financial.cash_equivalents)
            .bind(financial.liabilities)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        info!(
            "store contents replaced: {} companies, {} financial records",
            companies.len(),
            financials.len()
        );
        Ok(())
    }

    /// Row counts for both tables.
    pub async fn get_stats(&self) -> Result<StoreStats, StoreError> {
        let companies = sqlx::query("SELECT COUNT(*) as count FROM companies")
            .fetch_one(&self.pool)
            .await?;
        let financials = sqlx::query("SELECT COUNT(*) as count FROM financial")
            .fetch_one(&self.pool)
            .await?;

        Ok(StoreStats {
            companies: companies.get("count"),
            financials: financials.get("count"),
        })
    }
}

fn require_ticker(ticker: &str) -> Result<(), StoreError> {
    if ticker.trim().is_empty() {
        return Err(StoreError::InvalidKey);
    }
    Ok(())
}

fn company_from_row(row: &SqliteRow) -> Company {
    Company {
        ticker: row.get("ticker"),
        name: row.get("name"),
        sector: row.get("sector"),
    }
}

fn financial_from_row(row: &SqliteRow) -> Financial {
    Financial {
        ticker: row.get("ticker"),
        ebitda: row.get("ebitda"),
        sales: row.get("sales"),
        net_profit: row.get("net_profit"),
        market_price: row.get("market_price"),
        net_debt: row.get("net_debt"),
        assets: row.get("assets"),
        equity: row.get("equity"),
        cash_equivalents: row.get("cash_equivalents"),
        liabilities: row.get("liabilities"),
    }
}
