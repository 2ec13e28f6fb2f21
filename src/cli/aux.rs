use chrono::Local;
use colored::Colorize;

use crate::cli::parse_date;
use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::money;
use crate::ledger;
use crate::models::AuxKind;
use crate::reconciler;
use crate::settings::get_data_dir;

pub fn add(account_code: &str, name: &str) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("balanza.db"))?;
    let account = ledger::find_account_by_code(&conn, account_code)?;
    conn.execute(
        "INSERT INTO aux_accounts (account_id, name) VALUES (?1, ?2)",
        rusqlite::params![account.id, name],
    )?;
    println!("Added auxiliary ledger '{name}' on {account_code} {}", account.name);
    Ok(())
}

pub fn line(
    name: &str,
    kind: &str,
    amount: f64,
    date: Option<&str>,
    description: Option<&str>,
) -> Result<()> {
    let kind = AuxKind::parse(kind)?;
    if amount < 0.0 {
        return Err(crate::error::BalanzaError::Other(
            "amount must be non-negative".to_string(),
        ));
    }
    let date = match date {
        Some(d) => parse_date(d)?,
        None => Local::now().date_naive(),
    };

    let conn = get_connection(&get_data_dir().join("balanza.db"))?;
    let aux_id: i64 = conn
        .query_row("SELECT id FROM aux_accounts WHERE name = ?1", [name], |r| r.get(0))
        .map_err(|_| crate::error::BalanzaError::UnknownAuxAccount(name.to_string()))?;
    conn.execute(
        "INSERT INTO aux_lines (aux_account_id, kind, amount, line_date, description) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![aux_id, kind.as_str(), amount, date.to_string(), description],
    )?;
    println!("Recorded {} of {} on '{name}'", kind.as_str(), money(amount));
    Ok(())
}

pub fn reconcile(name: &str) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("balanza.db"))?;
    let result = reconciler::reconcile(&conn, name)?;

    println!("Auxiliary ledger:    {} (account {})", result.aux_name, result.account_code);
    println!("Manual income:       {}", money(result.total_income));
    println!("Manual expense:      {}", money(result.total_expense));
    println!("Auxiliary balance:   {}", money(result.aux_balance));
    println!("Accounting balance:  {}", money(result.accounting_balance));
    if result.balanced {
        println!("{} ledgers agree", "BALANCED".green().bold());
    } else {
        println!(
            "{} difference of {}",
            "UNBALANCED".red().bold(),
            money(result.difference)
        );
    }
    Ok(())
}
