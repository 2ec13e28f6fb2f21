use std::collections::HashMap;

use chrono::{Datelike, Local, NaiveDate};
use rusqlite::Connection;

use crate::error::Result;
use crate::ledger;
use crate::models::AccountNature;

/// Amounts closer than this are considered equal everywhere the books are
/// compared: the trial-balance checks, entry posting, and reconciliation.
pub const TOLERANCE: f64 = 0.01;

/// One account's position over the queried period (Balance de Sumas y Saldos
/// row). Built fresh on every call; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountBalanceRow {
    pub account_id: i64,
    pub code: String,
    pub name: String,
    pub nature: AccountNature,
    pub opening_debit: f64,
    pub opening_credit: f64,
    pub opening_balance: f64,
    pub period_debit: f64,
    pub period_credit: f64,
    pub closing_debit: f64,
    pub closing_credit: f64,
    pub closing_balance: f64,
    pub is_debtor: bool,
    pub is_creditor: bool,
    pub movement_count: i64,
}

/// Verification of the accounting identity over the period.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceCheck {
    pub debit_credit_matches: bool,
    pub balances_match: bool,
    pub debit_credit_difference: f64,
    pub balances_difference: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodSummary {
    pub total_debit: f64,
    pub total_credit: f64,
    pub total_opening_debit: f64,
    pub total_opening_credit: f64,
    pub total_debtor_balances: f64,
    pub total_creditor_balances: f64,
    pub check: BalanceCheck,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BalanceReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub rows: Vec<AccountBalanceRow>,
    pub summary: PeriodSummary,
}

/// First and last calendar day of the current local month.
pub fn current_month_bounds() -> (NaiveDate, NaiveDate) {
    let today = Local::now().date_naive();
    let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
        .unwrap_or(today);
    let next_month = if today.month() == 12 {
        NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
    };
    let last = next_month
        .and_then(|d| d.pred_opt())
        .unwrap_or(today);
    (first, last)
}

/// Compute the trial balance over `[from, to]` inclusive. Missing bounds
/// default to the current month. Callers are responsible for `from <= to`;
/// an inverted range simply matches no lines.
pub fn compute_balance(
    conn: &Connection,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<BalanceReport> {
    let (month_start, month_end) = current_month_bounds();
    let from = from.unwrap_or(month_start);
    let to = to.unwrap_or(month_end);

    // Opening data is supplementary context: if this query fails the period
    // totals are still worth producing, so degrade to "no opening balances".
    let opening = match ledger::opening_sums(conn, from) {
        Ok(sums) => sums,
        Err(e) => {
            eprintln!("warning: opening balance query failed ({e}); reporting period totals only");
            Vec::new()
        }
    };

    let period_lines = ledger::lines_in_range(conn, from, to)?;

    let mut summary = PeriodSummary::default();
    let mut by_account: HashMap<i64, AccountBalanceRow> = HashMap::new();

    let blank_row = |account_id: i64, code: &str, name: &str, nature: AccountNature| {
        AccountBalanceRow {
            account_id,
            code: code.to_string(),
            name: name.to_string(),
            nature,
            opening_debit: 0.0,
            opening_credit: 0.0,
            opening_balance: 0.0,
            period_debit: 0.0,
            period_credit: 0.0,
            closing_debit: 0.0,
            closing_credit: 0.0,
            closing_balance: 0.0,
            is_debtor: false,
            is_creditor: false,
            movement_count: 0,
        }
    };

    for line in &period_lines {
        let row = by_account
            .entry(line.account_id)
            .or_insert_with(|| blank_row(line.account_id, &line.code, &line.name, line.nature));
        row.period_debit += line.debit;
        row.period_credit += line.credit;
        row.movement_count += 1;
        summary.total_debit += line.debit;
        summary.total_credit += line.credit;
    }

    // Accounts carrying a balance forward appear even without period
    // movements, so opening totals never lose them.
    for sums in &opening {
        let row = by_account
            .entry(sums.account_id)
            .or_insert_with(|| blank_row(sums.account_id, &sums.code, &sums.name, sums.nature));
        row.opening_debit = sums.debit;
        row.opening_credit = sums.credit;
        row.opening_balance = sums
            .nature
            .balance_group()
            .signed_balance(sums.debit, sums.credit);
    }

    for row in by_account.values_mut() {
        row.closing_debit = row.opening_debit + row.period_debit;
        row.closing_credit = row.opening_credit + row.period_credit;
        let group = row.nature.balance_group();
        row.closing_balance = group.signed_balance(row.closing_debit, row.closing_credit);

        // Positive closing balance keeps the account on its own side;
        // negative flips it; zero is neither debtor nor creditor.
        use crate::models::BalanceGroup::{Credit, Debit};
        if row.closing_balance > 0.0 {
            match group {
                Debit => row.is_debtor = true,
                Credit => row.is_creditor = true,
            }
        } else if row.closing_balance < 0.0 {
            match group {
                Debit => row.is_creditor = true,
                Credit => row.is_debtor = true,
            }
        }

        if row.is_debtor {
            summary.total_debtor_balances += row.closing_balance.abs();
        } else if row.is_creditor {
            summary.total_creditor_balances += row.closing_balance.abs();
        }
        summary.total_opening_debit += row.opening_debit;
        summary.total_opening_credit += row.opening_credit;
    }

    let mut rows: Vec<AccountBalanceRow> = by_account
        .into_values()
        .filter(|r| {
            r.opening_debit != 0.0
                || r.opening_credit != 0.0
                || r.period_debit != 0.0
                || r.period_credit != 0.0
                || r.closing_balance.abs() > TOLERANCE
        })
        .collect();
    rows.sort_by(|a, b| a.code.cmp(&b.code));

    summary.check.debit_credit_difference = (summary.total_debit - summary.total_credit).abs();
    summary.check.debit_credit_matches = summary.check.debit_credit_difference < TOLERANCE;
    summary.check.balances_difference =
        (summary.total_debtor_balances - summary.total_creditor_balances).abs();
    summary.check.balances_match = summary.check.balances_difference < TOLERANCE;

    Ok(BalanceReport { from, to, rows, summary })
}
