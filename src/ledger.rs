use chrono::NaiveDate;
use rusqlite::Connection;

use crate::error::{BalanzaError, Result};
use crate::models::{Account, AccountNature};

/// One entry line joined with its account's denormalized fields, as the
/// balance engine consumes it.
#[derive(Debug, Clone)]
pub struct LedgerLine {
    pub account_id: i64,
    pub code: String,
    pub name: String,
    pub nature: AccountNature,
    pub debit: f64,
    pub credit: f64,
}

/// Per-account debit/credit sums over some date window.
#[derive(Debug, Clone)]
pub struct AccountSums {
    pub account_id: i64,
    pub code: String,
    pub name: String,
    pub nature: AccountNature,
    pub debit: f64,
    pub credit: f64,
}

pub fn list_accounts(conn: &Connection) -> Result<Vec<Account>> {
    let mut stmt = conn.prepare(
        "SELECT id, code, name, nature, is_active FROM accounts ORDER BY code",
    )?;
    let raw: Vec<(i64, String, String, String, bool)> = stmt
        .query_map([], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    raw.into_iter()
        .map(|(id, code, name, nature, is_active)| {
            Ok(Account {
                id,
                code,
                name,
                nature: AccountNature::parse(&nature)?,
                is_active,
            })
        })
        .collect()
}

pub fn find_account_by_code(conn: &Connection, code: &str) -> Result<Account> {
    let raw: (i64, String, String, bool) = conn
        .query_row(
            "SELECT id, name, nature, is_active FROM accounts WHERE code = ?1",
            [code],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )
        .map_err(|_| BalanzaError::UnknownAccount(code.to_string()))?;
    Ok(Account {
        id: raw.0,
        code: code.to_string(),
        name: raw.1,
        nature: AccountNature::parse(&raw.2)?,
        is_active: raw.3,
    })
}

/// Entry lines whose parent entry date falls in `[from, to]` inclusive.
pub fn lines_in_range(conn: &Connection, from: NaiveDate, to: NaiveDate) -> Result<Vec<LedgerLine>> {
    let mut stmt = conn.prepare(
        "SELECT l.account_id, a.code, a.name, a.nature, l.debit, l.credit \
         FROM entry_lines l \
         JOIN journal_entries e ON l.entry_id = e.id \
         JOIN accounts a ON l.account_id = a.id \
         WHERE e.entry_date BETWEEN ?1 AND ?2 \
         ORDER BY e.entry_date, l.id",
    )?;
    let raw: Vec<(i64, String, String, String, f64, f64)> = stmt
        .query_map(
            rusqlite::params![from.to_string(), to.to_string()],
            |row| {
                Ok((
                    row.get(0)?, row.get(1)?, row.get(2)?,
                    row.get(3)?, row.get(4)?, row.get(5)?,
                ))
            },
        )?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    raw.into_iter()
        .map(|(account_id, code, name, nature, debit, credit)| {
            Ok(LedgerLine {
                account_id,
                code,
                name,
                nature: AccountNature::parse(&nature)?,
                debit,
                credit,
            })
        })
        .collect()
}

/// Per-account sums over all lines dated strictly before `before`. Feeds the
/// opening-balance column of the trial balance.
pub fn opening_sums(conn: &Connection, before: NaiveDate) -> Result<Vec<AccountSums>> {
    let mut stmt = conn.prepare(
        "SELECT l.account_id, a.code, a.name, a.nature, \
                COALESCE(SUM(l.debit), 0), COALESCE(SUM(l.credit), 0) \
         FROM entry_lines l \
         JOIN journal_entries e ON l.entry_id = e.id \
         JOIN accounts a ON l.account_id = a.id \
         WHERE e.entry_date < ?1 \
         GROUP BY l.account_id",
    )?;
    let raw: Vec<(i64, String, String, String, f64, f64)> = stmt
        .query_map([before.to_string()], |row| {
            Ok((
                row.get(0)?, row.get(1)?, row.get(2)?,
                row.get(3)?, row.get(4)?, row.get(5)?,
            ))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    raw.into_iter()
        .map(|(account_id, code, name, nature, debit, credit)| {
            Ok(AccountSums {
                account_id,
                code,
                name,
                nature: AccountNature::parse(&nature)?,
                debit,
                credit,
            })
        })
        .collect()
}

/// All-time net movement (debits minus credits) for one account. Used by the
/// auxiliary-ledger reconciliation.
pub fn account_net(conn: &Connection, account_id: i64) -> Result<f64> {
    let net: f64 = conn.query_row(
        "SELECT COALESCE(SUM(debit - credit), 0) FROM entry_lines WHERE account_id = ?1",
        [account_id],
        |row| row.get(0),
    )?;
    Ok(net)
}
