use thiserror::Error;

#[derive(Error, Debug)]
pub enum BalanzaError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown account: {0}")]
    UnknownAccount(String),

    #[error("Unknown auxiliary account: {0}")]
    UnknownAuxAccount(String),

    #[error("Unknown account nature: {0}")]
    UnknownNature(String),

    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Unbalanced entry: debits {debit:.2} != credits {credit:.2}")]
    UnbalancedEntry { debit: f64, credit: f64 },

    #[error("No exchange rate recorded. Run `balanza rate set <value>` first.")]
    NoRate,

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, BalanzaError>;
