use rusqlite::Connection;

use crate::balance::TOLERANCE;
use crate::error::{BalanzaError, Result};
use crate::ledger;

/// Outcome of comparing an auxiliary ledger against the linked account's
/// accounting balance.
#[derive(Debug, Clone, PartialEq)]
pub struct AuxReconciliation {
    pub aux_name: String,
    pub account_code: String,
    pub total_income: f64,
    pub total_expense: f64,
    pub aux_balance: f64,
    pub accounting_balance: f64,
    pub difference: f64,
    pub balanced: bool,
}

pub fn reconcile(conn: &Connection, aux_name: &str) -> Result<AuxReconciliation> {
    let (aux_id, account_id, account_code): (i64, i64, String) = conn
        .query_row(
            "SELECT x.id, x.account_id, a.code \
             FROM aux_accounts x JOIN accounts a ON x.account_id = a.id \
             WHERE x.name = ?1",
            [aux_name],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .map_err(|_| BalanzaError::UnknownAuxAccount(aux_name.to_string()))?;

    let sum_kind = |kind: &str| -> Result<f64> {
        let total: f64 = conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM aux_lines \
             WHERE aux_account_id = ?1 AND kind = ?2",
            rusqlite::params![aux_id, kind],
            |row| row.get(0),
        )?;
        Ok(total)
    };

    let total_income = sum_kind("income")?;
    let total_expense = sum_kind("expense")?;
    let aux_balance = total_income - total_expense;

    let accounting_balance = ledger::account_net(conn, account_id)?;
    let difference = accounting_balance - aux_balance;

    Ok(AuxReconciliation {
        aux_name: aux_name.to_string(),
        account_code,
        total_income,
        total_expense,
        aux_balance,
        accounting_balance,
        difference,
        balanced: difference.abs() < TOLERANCE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{get_connection, init_db};

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    fn setup_aux(conn: &Connection, name: &str, code: &str) -> i64 {
        let account_id: i64 = conn
            .query_row("SELECT id FROM accounts WHERE code = ?1", [code], |r| r.get(0))
            .unwrap();
        conn.execute(
            "INSERT INTO aux_accounts (account_id, name) VALUES (?1, ?2)",
            rusqlite::params![account_id, name],
        )
        .unwrap();
        conn.last_insert_rowid()
    }

    fn aux_line(conn: &Connection, aux_id: i64, kind: &str, amount: f64) {
        conn.execute(
            "INSERT INTO aux_lines (aux_account_id, kind, amount, line_date) \
             VALUES (?1, ?2, ?3, '2025-03-01')",
            rusqlite::params![aux_id, kind, amount],
        )
        .unwrap();
    }

    fn ledger_movement(conn: &Connection, code: &str, debit: f64, credit: f64) {
        conn.execute(
            "INSERT INTO journal_entries (entry_date) VALUES ('2025-03-01')",
            [],
        )
        .unwrap();
        let entry_id = conn.last_insert_rowid();
        let account_id: i64 = conn
            .query_row("SELECT id FROM accounts WHERE code = ?1", [code], |r| r.get(0))
            .unwrap();
        conn.execute(
            "INSERT INTO entry_lines (entry_id, account_id, debit, credit) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![entry_id, account_id, debit, credit],
        )
        .unwrap();
    }

    #[test]
    fn test_balanced_aux_ledger() {
        let (_dir, conn) = test_db();
        let aux = setup_aux(&conn, "Caja chica", "1.1.01");
        aux_line(&conn, aux, "income", 200.0);
        aux_line(&conn, aux, "expense", 120.0);
        ledger_movement(&conn, "1.1.01", 300.0, 0.0);
        ledger_movement(&conn, "1.1.01", 0.0, 220.0);

        let result = reconcile(&conn, "Caja chica").unwrap();
        assert_eq!(result.aux_balance, 80.0);
        assert_eq!(result.accounting_balance, 80.0);
        assert_eq!(result.difference, 0.0);
        assert!(result.balanced);
        assert_eq!(result.account_code, "1.1.01");
    }

    #[test]
    fn test_unbalanced_aux_ledger() {
        let (_dir, conn) = test_db();
        let aux = setup_aux(&conn, "Caja chica", "1.1.01");
        aux_line(&conn, aux, "income", 200.0);
        ledger_movement(&conn, "1.1.01", 150.0, 0.0);

        let result = reconcile(&conn, "Caja chica").unwrap();
        assert_eq!(result.aux_balance, 200.0);
        assert_eq!(result.accounting_balance, 150.0);
        assert_eq!(result.difference, -50.0);
        assert!(!result.balanced);
    }

    #[test]
    fn test_empty_aux_ledger_against_quiet_account() {
        let (_dir, conn) = test_db();
        setup_aux(&conn, "Caja chica", "1.1.01");
        let result = reconcile(&conn, "Caja chica").unwrap();
        assert_eq!(result.total_income, 0.0);
        assert_eq!(result.total_expense, 0.0);
        assert!(result.balanced);
    }

    #[test]
    fn test_unknown_aux_account() {
        let (_dir, conn) = test_db();
        let err = reconcile(&conn, "Nope").unwrap_err();
        assert!(matches!(err, BalanzaError::UnknownAuxAccount(_)));
    }
}
