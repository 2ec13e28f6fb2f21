use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use crate::balance::{self, BalanceReport};
use crate::cli::{parse_date, parse_month};
use crate::db::{get_connection, get_metadata};
use crate::error::Result;
use crate::fmt::money;
use crate::settings::get_data_dir;

pub fn balance(
    from_date: Option<&str>,
    to_date: Option<&str>,
    month: Option<&str>,
) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("balanza.db"))?;
    let store = get_metadata(&conn, "store_name").unwrap_or_default();

    let (from, to) = match month {
        Some(m) => {
            let (f, t) = parse_month(m)?;
            (Some(f), Some(t))
        }
        None => (
            from_date.map(parse_date).transpose()?,
            to_date.map(parse_date).transpose()?,
        ),
    };

    let report = balance::compute_balance(&conn, from, to)?;
    println!("{}", format_balance(&report, &store));
    Ok(())
}

fn amount_cell(val: f64) -> Cell {
    Cell::new(money(val)).set_alignment(CellAlignment::Right)
}

pub fn format_balance(report: &BalanceReport, store: &str) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        "Code", "Account",
        "Opening Dr", "Opening Cr",
        "Period Dr", "Period Cr",
        "Closing Dr", "Closing Cr",
        "Balance", "Side", "Moves",
    ]);

    for row in &report.rows {
        let side = if row.is_debtor {
            "debtor"
        } else if row.is_creditor {
            "creditor"
        } else {
            ""
        };
        table.add_row(vec![
            Cell::new(&row.code),
            Cell::new(&row.name),
            amount_cell(row.opening_debit),
            amount_cell(row.opening_credit),
            amount_cell(row.period_debit),
            amount_cell(row.period_credit),
            amount_cell(row.closing_debit),
            amount_cell(row.closing_credit),
            amount_cell(row.closing_balance),
            Cell::new(side),
            Cell::new(row.movement_count),
        ]);
    }

    let s = &report.summary;
    table.add_row(vec![
        Cell::new("TOTAL".bold()),
        Cell::new(""),
        amount_cell(s.total_opening_debit),
        amount_cell(s.total_opening_credit),
        amount_cell(s.total_debit),
        amount_cell(s.total_credit),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
    ]);

    let debit_check = if s.check.debit_credit_matches {
        format!("{} debits equal credits", "OK".green().bold())
    } else {
        format!(
            "{} debits differ from credits by {}",
            "MISMATCH".red().bold(),
            money(s.check.debit_credit_difference)
        )
    };
    let balances_check = if s.check.balances_match {
        format!("{} debtor balances equal creditor balances", "OK".green().bold())
    } else {
        format!(
            "{} debtor/creditor balances differ by {}",
            "MISMATCH".red().bold(),
            money(s.check.balances_difference)
        )
    };

    let title = format!("Trial Balance {} to {}", report.from, report.to);
    let header = if store.is_empty() {
        title
    } else {
        format!("{store}\n{title}")
    };
    format!(
        "{header}\n{table}\nDebtor balances:   {}\nCreditor balances: {}\n{debit_check}\n{balances_check}",
        money(s.total_debtor_balances),
        money(s.total_creditor_balances),
    )
}
