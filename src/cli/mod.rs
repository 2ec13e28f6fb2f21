pub mod accounts;
pub mod aux;
pub mod demo;
pub mod init;
pub mod journal;
pub mod products;
pub mod rate;
pub mod report;
pub mod status;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::error::{BalanzaError, Result};

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| BalanzaError::InvalidDate(s.to_string()))
}

/// Parse `YYYY-MM` into the first and last day of that month.
pub(crate) fn parse_month(s: &str) -> Result<(NaiveDate, NaiveDate)> {
    let invalid = || BalanzaError::InvalidDate(format!("{s} (expected YYYY-MM)"));
    let (y, m) = s.split_once('-').ok_or_else(invalid)?;
    let year: i32 = y.parse().map_err(|_| invalid())?;
    let month: u32 = m.parse().map_err(|_| invalid())?;
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last = next.and_then(|d| d.pred_opt()).ok_or_else(invalid)?;
    Ok((first, last))
}

#[derive(Parser)]
#[command(name = "balanza", about = "Double-entry back-office CLI for small electronics retailers.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up balanza: choose a data directory and initialize the database.
    Init {
        /// Path for balanza data (default: ~/Documents/balanza)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
        /// Store name shown on report headers
        #[arg(long = "store-name")]
        store_name: Option<String>,
    },
    /// Manage the chart of accounts.
    Accounts {
        #[command(subcommand)]
        command: AccountsCommands,
    },
    /// Post and inspect journal entries.
    Entry {
        #[command(subcommand)]
        command: EntryCommands,
    },
    /// Manage the product catalog.
    Products {
        #[command(subcommand)]
        command: ProductsCommands,
    },
    /// Manage auxiliary ledgers and reconcile them.
    Aux {
        #[command(subcommand)]
        command: AuxCommands,
    },
    /// Generate reports.
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Record and show the USD exchange rate.
    Rate {
        #[command(subcommand)]
        command: RateCommands,
    },
    /// Load sample data (chart, entries, products, rate) to explore balanza.
    Demo,
    /// Show current database and summary statistics.
    Status,
}

#[derive(Subcommand)]
pub enum AccountsCommands {
    /// Add an account to the chart.
    Add {
        /// Sortable account code, e.g. '1.1.06'
        code: String,
        /// Account name
        name: String,
        /// Nature: asset, liability, equity, income, expense, negative_result
        #[arg(long)]
        nature: String,
    },
    /// List the chart of accounts.
    List,
}

#[derive(Subcommand)]
pub enum EntryCommands {
    /// Post a journal entry. Debits must equal credits.
    Add {
        /// Entry date: YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Free-form memo
        #[arg(long)]
        memo: Option<String>,
        /// Debit posting as CODE=AMOUNT (repeatable)
        #[arg(long = "debit")]
        debits: Vec<String>,
        /// Credit posting as CODE=AMOUNT (repeatable)
        #[arg(long = "credit")]
        credits: Vec<String>,
    },
    /// List journal entries.
    List {
        /// Restrict to one month: YYYY-MM
        #[arg(long)]
        month: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ProductsCommands {
    /// Add a product. The naming field depends on --category.
    Add {
        /// Stock-keeping unit, e.g. 'PH-MG84'
        sku: String,
        /// Category: device, accessory, service
        #[arg(long)]
        category: String,
        /// Manufacturer model (required for device)
        #[arg(long)]
        model: Option<String>,
        /// Item title (required for accessory)
        #[arg(long)]
        title: Option<String>,
        /// Service description (required for service)
        #[arg(long)]
        detail: Option<String>,
        /// Landed import cost in USD
        #[arg(long = "cost-usd")]
        cost_usd: Option<f64>,
        /// Sale price in local currency
        #[arg(long, default_value = "0")]
        price: f64,
        /// Units on hand
        #[arg(long, default_value = "0")]
        stock: i64,
    },
    /// List the product catalog.
    List,
}

#[derive(Subcommand)]
pub enum AuxCommands {
    /// Create an auxiliary ledger linked to a chart account.
    Add {
        /// Chart account code, e.g. '1.1.01'
        account: String,
        /// Auxiliary ledger name, e.g. 'Caja chica'
        name: String,
    },
    /// Record a manual income/expense line on an auxiliary ledger.
    Line {
        /// Auxiliary ledger name
        name: String,
        /// Line kind: income or expense
        #[arg(long)]
        kind: String,
        /// Amount (non-negative)
        #[arg(long)]
        amount: f64,
        /// Line date: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Description
        #[arg(long)]
        description: Option<String>,
    },
    /// Compare an auxiliary ledger against its account's books.
    Reconcile {
        /// Auxiliary ledger name
        name: String,
    },
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Trial balance (Balance de Sumas y Saldos) over a date range.
    Balance {
        /// Range start: YYYY-MM-DD (default: first day of current month)
        #[arg(long = "from")]
        from_date: Option<String>,
        /// Range end: YYYY-MM-DD (default: last day of current month)
        #[arg(long = "to")]
        to_date: Option<String>,
        /// Shorthand for a whole month: YYYY-MM
        #[arg(long, conflicts_with_all = ["from_date", "to_date"])]
        month: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum RateCommands {
    /// Record today's exchange rate (pesos per USD).
    Set {
        /// Rate value, e.g. 1325.50
        value: f64,
    },
    /// Show the most recent recorded rate.
    Show,
}
