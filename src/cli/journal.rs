use comfy_table::{Cell, Table};
use rusqlite::Connection;

use crate::balance::TOLERANCE;
use crate::cli::{parse_date, parse_month};
use crate::db::get_connection;
use crate::error::{BalanzaError, Result};
use crate::fmt::money;
use crate::ledger;
use crate::settings::get_data_dir;

/// Parse a `CODE=AMOUNT` posting argument.
fn parse_posting(s: &str) -> Result<(String, f64)> {
    let invalid = || BalanzaError::Other(format!("invalid posting '{s}' (expected CODE=AMOUNT)"));
    let (code, amount) = s.split_once('=').ok_or_else(invalid)?;
    let amount: f64 = amount.parse().map_err(|_| invalid())?;
    if amount < 0.0 {
        return Err(BalanzaError::Other(format!(
            "posting '{s}': amounts must be non-negative"
        )));
    }
    Ok((code.to_string(), amount))
}

pub fn add(
    date: &str,
    memo: Option<&str>,
    debits: &[String],
    credits: &[String],
) -> Result<()> {
    let date = parse_date(date)?;
    if debits.is_empty() && credits.is_empty() {
        return Err(BalanzaError::Other("entry has no postings".to_string()));
    }

    let mut conn = get_connection(&get_data_dir().join("balanza.db"))?;
    let debits = resolve_postings(&conn, debits)?;
    let credits = resolve_postings(&conn, credits)?;

    let debit_total: f64 = debits.iter().map(|(_, amt)| amt).sum();
    let credit_total: f64 = credits.iter().map(|(_, amt)| amt).sum();
    if (debit_total - credit_total).abs() >= TOLERANCE {
        return Err(BalanzaError::UnbalancedEntry {
            debit: debit_total,
            credit: credit_total,
        });
    }

    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO journal_entries (entry_date, memo) VALUES (?1, ?2)",
        rusqlite::params![date.to_string(), memo],
    )?;
    let entry_id = tx.last_insert_rowid();
    for (account_id, amount) in &debits {
        tx.execute(
            "INSERT INTO entry_lines (entry_id, account_id, debit, credit) VALUES (?1, ?2, ?3, 0)",
            rusqlite::params![entry_id, account_id, amount],
        )?;
    }
    for (account_id, amount) in &credits {
        tx.execute(
            "INSERT INTO entry_lines (entry_id, account_id, debit, credit) VALUES (?1, ?2, 0, ?3)",
            rusqlite::params![entry_id, account_id, amount],
        )?;
    }
    tx.commit()?;

    println!(
        "Posted entry {entry_id} on {date}: {} ({} lines)",
        money(debit_total),
        debits.len() + credits.len()
    );
    Ok(())
}

fn resolve_postings(conn: &Connection, raw: &[String]) -> Result<Vec<(i64, f64)>> {
    raw.iter()
        .map(|s| {
            let (code, amount) = parse_posting(s)?;
            let account = ledger::find_account_by_code(conn, &code)?;
            Ok((account.id, amount))
        })
        .collect()
}

pub fn list(month: Option<&str>) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("balanza.db"))?;

    let (clause, params): (&str, Vec<String>) = match month {
        Some(m) => {
            let (from, to) = parse_month(m)?;
            ("WHERE e.entry_date BETWEEN ?1 AND ?2", vec![from.to_string(), to.to_string()])
        }
        None => ("", Vec::new()),
    };

    let sql = format!(
        "SELECT e.id, e.entry_date, e.memo, COUNT(l.id), COALESCE(SUM(l.debit), 0) \
         FROM journal_entries e LEFT JOIN entry_lines l ON l.entry_id = e.id \
         {clause} GROUP BY e.id ORDER BY e.entry_date, e.id"
    );
    let mut stmt = conn.prepare(&sql)?;
    let param_values: Vec<&dyn rusqlite::types::ToSql> = params
        .iter()
        .map(|p| p as &dyn rusqlite::types::ToSql)
        .collect();
    let rows: Vec<(i64, String, Option<String>, i64, f64)> = stmt
        .query_map(param_values.as_slice(), |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Memo", "Lines", "Debit Total"]);
    for (id, date, memo, lines, total) in rows {
        table.add_row(vec![
            Cell::new(id),
            Cell::new(date),
            Cell::new(memo.unwrap_or_default()),
            Cell::new(lines),
            Cell::new(money(total)),
        ]);
    }
    println!("Journal\n{table}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_posting() {
        assert_eq!(parse_posting("1.1.01=100.50").unwrap(), ("1.1.01".to_string(), 100.5));
        assert!(parse_posting("1.1.01").is_err());
        assert!(parse_posting("1.1.01=abc").is_err());
        assert!(parse_posting("1.1.01=-5").is_err());
    }
}
