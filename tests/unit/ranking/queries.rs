//! Ranking queries over a real store

use pretty_assertions::assert_eq;

use rust_investor::models::Financial;
use rust_investor::ranking::RankingEngine;
use rust_investor::ratios::RatioKind;

use crate::common::{logging, TestDb};

fn debt_record(ticker: &str, net_debt: Option<f64>, ebitda: Option<f64>) -> Financial {
    Financial {
        ticker: ticker.to_string(),
        net_debt,
        ebitda,
        ..Financial::default()
    }
}

#[tokio::test]
async fn test_top_n_orders_descending_and_truncates() {
    logging::init_test_logging();
    logging::log_test_step("Testing top-N ordering");

    let db = TestDb::new().await.expect("Failed to create test database");
    for record in [
        debt_record("AAA", Some(300.0), Some(100.0)),
        debt_record("BBB", Some(500.0), Some(100.0)),
        debt_record("CCC", Some(100.0), Some(100.0)),
    ] {
        db.database
            .upsert_financial(&record)
            .await
            .expect("Failed to insert financial record");
    }

    let engine = RankingEngine::new(db.database.clone());
    let top = engine
        .top_n(RatioKind::NetDebtToEbitda, 2)
        .await
        .expect("Failed to rank companies");

    assert_eq!(top.len(), 2);
    assert_eq!(top[0].ticker, "BBB");
    assert_eq!(top[0].value, 5.0);
    assert_eq!(top[1].ticker, "AAA");
    assert_eq!(top[1].value, 3.0);

    logging::log_test_step("Top-N ordering completed");
}

#[tokio::test]
async fn test_top_n_excludes_unavailable_ratios() {
    logging::init_test_logging();

    let db = TestDb::new().await.expect("Failed to create test database");
    for record in [
        debt_record("FULL", Some(300.0), Some(100.0)),
        // Missing denominator figure
        debt_record("GAPPY", Some(300.0), None),
        // Present but zero denominator
        debt_record("FLAT", Some(300.0), Some(0.0)),
    ] {
        db.database
            .upsert_financial(&record)
            .await
            .expect("Failed to insert financial record");
    }

    let engine = RankingEngine::new(db.database.clone());
    let top = engine
        .top_n(RatioKind::NetDebtToEbitda, 10)
        .await
        .expect("Failed to rank companies");

    let tickers: Vec<&str> = top.iter().map(|e| e.ticker.as_str()).collect();
    assert_eq!(tickers, ["FULL"]);
}

#[tokio::test]
async fn test_top_n_on_empty_store_is_empty() {
    logging::init_test_logging();

    let db = TestDb::new().await.expect("Failed to create test database");
    let engine = RankingEngine::new(db.database.clone());

    // Fewer rankable rows than requested is a short list, never a fault
    let top = engine
        .top_n(RatioKind::ReturnOnEquity, 10)
        .await
        .expect("Ranking an empty store should succeed");
    assert!(top.is_empty());
}
