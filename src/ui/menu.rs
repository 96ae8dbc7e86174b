use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use anyhow::Result;

use crate::database::DatabaseManager;
use crate::error::StoreError;
use crate::models::{Company, Financial};
use crate::ranking::RankingEngine;
use crate::ratios::{RatioKind, RatioValue};

const FIGURE_PROMPTS: [&str; 9] = [
    "Enter ebitda (in the format '987654321'):",
    "Enter sales (in the format '987654321'):",
    "Enter net profit (in the format '987654321'):",
    "Enter market price (in the format '987654321'):",
    "Enter net debt (in the format '987654321'):",
    "Enter assets (in the format '987654321'):",
    "Enter equity (in the format '987654321'):",
    "Enter cash equivalents (in the format '987654321'):",
    "Enter liabilities (in the format '987654321'):",
];

/// Interactive menu loop over a pair of I/O streams.
///
/// Each submenu handles a single choice and control falls back to the main
/// menu, so the session is one flat loop rather than a stack of nested
/// prompts. End of input closes the session quietly.
pub struct MenuSession<R, W> {
    database: DatabaseManager,
    ranking: RankingEngine,
    top_list_size: usize,
    input: R,
    output: W,
}

impl MenuSession<BufReader<Stdin>, Stdout> {
    /// Session over the process stdin/stdout.
    pub fn new(database: DatabaseManager, top_list_size: usize) -> Self {
        Self::with_io(
            database,
            top_list_size,
            BufReader::new(io::stdin()),
            io::stdout(),
        )
    }
}

impl<R: BufRead, W: Write> MenuSession<R, W> {
    /// Session over arbitrary streams; tests drive it with scripted input.
    pub fn with_io(database: DatabaseManager, top_list_size: usize, input: R, output: W) -> Self {
        let ranking = RankingEngine::new(database.clone());
        Self {
            database,
            ranking,
            top_list_size,
            input,
            output,
        }
    }

    /// Run the main menu until the user exits or input ends.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            writeln!(
                self.output,
                "MAIN MENU\n0 Exit\n1 CRUD operations\n2 Show top ten companies by criteria"
            )?;
            let Some(choice) = self.prompt("Enter an option:")? else {
                break;
            };
            match choice.parse::<usize>() {
                Ok(0) => {
                    writeln!(self.output, "Have a nice day!")?;
                    break;
                }
                Ok(1) => self.crud_menu().await?,
                Ok(2) => self.top_ten_menu().await?,
                _ => writeln!(self.output, "Invalid option!")?,
            }
        }
        Ok(())
    }

    async fn crud_menu(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "CRUD MENU\n0 Back\n1 Create a company\n2 Read a company\n3 Update a company\n4 Delete a company\n5 List all companies"
        )?;
        let Some(choice) = self.prompt("Enter an option:")? else {
            return Ok(());
        };
        match choice.parse::<usize>() {
            Ok(0) => Ok(()),
            Ok(1) => self.create_company().await,
            Ok(2) => self.read_company().await,
            Ok(3) => self.update_company().await,
            Ok(4) => self.delete_company().await,
            Ok(5) => self.list_companies().await,
            _ => {
                writeln!(self.output, "Invalid option!")?;
                Ok(())
            }
        }
    }

    async fn top_ten_menu(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "TOP TEN MENU\n0 Back\n1 List by ND/EBITDA\n2 List by ROE\n3 List by ROA"
        )?;
        let Some(choice) = self.prompt("Enter an option:")? else {
            return Ok(());
        };
        match choice.parse::<usize>() {
            Ok(0) => Ok(()),
            Ok(1) => self.print_top_list(RatioKind::NetDebtToEbitda).await,
            Ok(2) => self.print_top_list(RatioKind::ReturnOnEquity).await,
            Ok(3) => self.print_top_list(RatioKind::ReturnOnAssets).await,
            _ => {
                writeln!(self.output, "Invalid option!")?;
                Ok(())
            }
        }
    }

    async fn create_company(&mut self) -> Result<()> {
        let Some(ticker) = self.prompt("Enter ticker (in the format 'MOON'):")? else {
            return Ok(());
        };
        if ticker.is_empty() {
            writeln!(self.output, "Invalid ticker!")?;
            return Ok(());
        }
        let Some(name) = self.prompt("Enter company (in the format 'Moon Corp'):")? else {
            return Ok(());
        };
        let Some(sector) = self.prompt("Enter industries (in the format 'Technology'):")? else {
            return Ok(());
        };
        let Some(financial) = self.read_figures(&ticker)? else {
            return Ok(());
        };

        let company = Company {
            ticker,
            name,
            sector,
        };
        self.database.upsert_company(&company).await?;
        self.database.upsert_financial(&financial).await?;
        writeln!(self.output, "Company created successfully!")?;
        Ok(())
    }

    async fn read_company(&mut self) -> Result<()> {
        let Some(company) = self.select_company().await? else {
            return Ok(());
        };
        writeln!(self.output, "{} {}", company.ticker, company.name)?;

        let financial = match self.database.get_financial(&company.ticker).await {
            Ok(financial) => financial,
            // A company without figures reads as all ratios unavailable.
            Err(StoreError::NotFound(_)) => Financial {
                ticker: company.ticker.clone(),
                ..Financial::default()
            },
            Err(e) => return Err(e.into()),
        };

        for kind in RatioKind::ALL {
            match kind.evaluate(&financial) {
                RatioValue::Value(value) => {
                    writeln!(self.output, "{} = {:.2}", kind.label(), value)?
                }
                RatioValue::MissingData => writeln!(self.output, "{} = N/A", kind.label())?,
                RatioValue::Undefined => writeln!(self.output, "{} = undefined", kind.label())?,
            }
        }
        Ok(())
    }

    async fn update_company(&mut self) -> Result<()> {
        let Some(company) = self.select_company().await? else {
            return Ok(());
        };
        let Some(financial) = self.read_figures(&company.ticker)? else {
            return Ok(());
        };

        self.database.upsert_financial(&financial).await?;
        writeln!(self.output, "Company updated successfully!")?;
        Ok(())
    }

    async fn delete_company(&mut self) -> Result<()> {
        let Some(company) = self.select_company().await? else {
            return Ok(());
        };

        self.database.delete_company(&company.ticker).await?;
        writeln!(self.output, "Company deleted successfully!")?;
        Ok(())
    }

    async fn list_companies(&mut self) -> Result<()> {
        writeln!(self.output, "COMPANY LIST")?;
        for company in self.database.list_companies().await? {
            writeln!(
                self.output,
                "{} {} {}",
                company.ticker, company.name, company.sector
            )?;
        }
        Ok(())
    }

    async fn print_top_list(&mut self, kind: RatioKind) -> Result<()> {
        writeln!(self.output, "TICKER {}", kind.label())?;
        for entry in self.ranking.top_n(kind, self.top_list_size).await? {
            writeln!(self.output, "{} {:.2}", entry.ticker, entry.value)?;
        }
        Ok(())
    }

    /// Ask for a company by name substring, then by list number.
    ///
    /// `None` covers every way out without a selection: no match, a bad
    /// number, or end of input.
    async fn select_company(&mut self) -> Result<Option<Company>> {
        let Some(name) = self.prompt("Enter company name:")? else {
            return Ok(None);
        };
        let matches = self.database.find_companies_by_name(&name).await?;
        if matches.is_empty() {
            writeln!(self.output, "Company not found!")?;
            return Ok(None);
        }
        for (index, company) in matches.iter().enumerate() {
            writeln!(self.output, "{} {}", index, company.name)?;
        }

        let Some(number) = self.prompt("Enter company number:")? else {
            return Ok(None);
        };
        match number.parse::<usize>().ok().and_then(|n| matches.get(n)) {
            Some(company) => Ok(Some(company.clone())),
            None => {
                writeln!(self.output, "Invalid option!")?;
                Ok(None)
            }
        }
    }

    /// Prompt the nine financial figures in report order.
    ///
    /// Empty or unparseable input stores the figure as missing.
    fn read_figures(&mut self, ticker: &str) -> Result<Option<Financial>> {
        let mut figures = [None; 9];
        for (slot, text) in figures.iter_mut().zip(FIGURE_PROMPTS) {
            let Some(line) = self.prompt(text)? else {
                return Ok(None);
            };
            *slot = line.parse::<f64>().ok();
        }

        let [ebitda, sales, net_profit, market_price, net_debt, assets, equity, cash_equivalents, liabilities] =
            figures;
        Ok(Some(Financial {
            ticker: ticker.to_string(),
            ebitda,
            sales,
            net_profit,
            market_price,
            net_debt,
            assets,
            equity,
            cash_equivalents,
            liabilities,
        }))
    }

    /// Print a prompt (no trailing newline) and read one trimmed line.
    /// `None` means the input stream is exhausted.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
