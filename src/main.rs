use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use rust_investor::database::DatabaseManager;
use rust_investor::importer;
use rust_investor::models::Config;
use rust_investor::ui::MenuSession;

#[tokio::main]
async fn main() -> Result<()> {
    // Keep diagnostics off the menu transcript unless RUST_LOG asks for them.
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rust_investor=warn")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    let config = Config::from_env();

    let database = match DatabaseManager::new(&config.database_path).await {
        Ok(db) => db,
        Err(e) => {
            error!("failed to open database at {}: {}", config.database_path, e);
            eprintln!("Database error: {}", e);
            std::process::exit(1);
        }
    };

    // A failed import is not fatal: the swap is transactional, so the store
    // still holds whatever it held before and the menu remains usable.
    match importer::load_csv_data(&database, &config.companies_csv, &config.financial_csv).await {
        Ok(stats) => info!(
            "imported {} companies and {} financial records",
            stats.companies_loaded, stats.financials_loaded
        ),
        Err(e) => eprintln!("Import skipped: {}", e),
    }

    println!("Welcome to the Investor Program!");
    let mut session = MenuSession::new(database, config.top_list_size);
    session.run().await?;

    Ok(())
}
