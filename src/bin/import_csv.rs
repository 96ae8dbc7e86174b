use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::{self, FmtSubscriber};

use rust_investor::database::DatabaseManager;
use rust_investor::importer;
use rust_investor::models::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter("rust_investor=info")
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    info!("📥 Starting CSV import");

    let config = Config::from_env();
    info!("📋 Configuration loaded");

    let database = DatabaseManager::new(&config.database_path).await?;
    info!("💾 Database initialized at: {}", config.database_path);

    let stats =
        importer::load_csv_data(&database, &config.companies_csv, &config.financial_csv).await?;
    info!("✅ Import completed:");
    info!("   - Companies loaded: {}", stats.companies_loaded);
    info!("   - Financial records loaded: {}", stats.financials_loaded);

    let store = database.get_stats().await?;
    info!("📊 Final database state:");
    info!("   - Companies: {}", store.companies);
    info!("   - Financial records: {}", store.financials);

    Ok(())
}
