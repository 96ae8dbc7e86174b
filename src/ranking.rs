use crate::database::DatabaseManager;
use crate::error::StoreError;
use crate::models::Financial;
use crate::ratios::RatioKind;

/// One line of a top-N report.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingEntry {
    pub ticker: String,
    pub value: f64,
}

/// Ranks stored companies by a chosen ratio.
pub struct RankingEngine {
    database: DatabaseManager,
}

impl RankingEngine {
    pub fn new(database: DatabaseManager) -> Self {
        Self { database }
    }

    /// The top `n` companies by `kind`, best first.
    ///
    /// Companies whose ratio is unavailable (missing figures or a zero
    /// denominator) are left out rather than ranked as zero. Fewer than
    /// `n` rankable companies yields a shorter list, never an error.
    pub async fn top_n(&self, kind: RatioKind, n: usize) -> Result<Vec<RankingEntry>, StoreError> {
        let records = self.database.list_financials().await?;
        Ok(rank(&records, kind, n))
    }
}

fn rank(records: &[Financial], kind: RatioKind, n: usize) -> Vec<RankingEntry> {
    let mut entries: Vec<RankingEntry> = records
        .iter()
        .filter_map(|financial| {
            kind.evaluate(financial).available().map(|value| RankingEntry {
                ticker: financial.ticker.clone(),
                value,
            })
        })
        .collect();

    // Highest value first; equal values fall back to ticker order so the
    // report is deterministic.
    entries.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| a.ticker.cmp(&b.ticker))
    });
    entries.truncate(n);
    entries
}
