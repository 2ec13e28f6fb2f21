use chrono::{Datelike, Local, NaiveDate};
use rusqlite::Connection;

use crate::db::{get_connection, init_db, set_metadata};
use crate::error::Result;
use crate::rates::record_rate;
use crate::settings::get_data_dir;

const STORE_NAME: &str = "Electro Tigre";

/// (code, debit, credit)
type Posting<'a> = (&'a str, f64, f64);

fn prev_month(today: NaiveDate) -> (i32, u32) {
    if today.month() == 1 {
        (today.year() - 1, 12)
    } else {
        (today.year(), today.month() - 1)
    }
}

fn date(year: i32, month: u32, day: u32) -> String {
    // Day 28 is the highest day the fixtures use, valid in every month.
    format!("{year:04}-{month:02}-{day:02}")
}

fn post(conn: &Connection, date: &str, memo: &str, lines: &[Posting<'_>]) -> Result<()> {
    conn.execute(
        "INSERT INTO journal_entries (entry_date, memo) VALUES (?1, ?2)",
        rusqlite::params![date, memo],
    )?;
    let entry_id = conn.last_insert_rowid();
    for (code, debit, credit) in lines {
        let account_id: i64 = conn.query_row(
            "SELECT id FROM accounts WHERE code = ?1",
            [code],
            |r| r.get(0),
        )?;
        conn.execute(
            "INSERT INTO entry_lines (entry_id, account_id, debit, credit) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![entry_id, account_id, debit, credit],
        )?;
    }
    Ok(())
}

pub fn run() -> Result<()> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let conn = get_connection(&data_dir.join("balanza.db"))?;
    init_db(&conn)?;
    set_metadata(&conn, "store_name", STORE_NAME)?;

    let today = Local::now().date_naive();
    let (py, pm) = prev_month(today);
    let (cy, cm) = (today.year(), today.month());

    // Last month: capital contribution and an import purchase.
    post(&conn, &date(py, pm, 5), "Aporte de capital", &[
        ("1.1.02", 5_000_000.0, 0.0),
        ("3.1.01", 0.0, 5_000_000.0),
    ])?;
    post(&conn, &date(py, pm, 12), "Compra de mercadería importada", &[
        ("1.1.03", 2_400_000.0, 0.0),
        ("2.1.01", 0.0, 2_400_000.0),
    ])?;
    post(&conn, &date(py, pm, 20), "Gastos de despacho", &[
        ("5.1.02", 180_000.0, 0.0),
        ("1.1.02", 0.0, 180_000.0),
    ])?;

    // Current month: sales and running costs.
    post(&conn, &date(cy, cm, 3), "Venta de contado", &[
        ("1.1.01", 390_000.0, 0.0),
        ("4.1.01", 0.0, 390_000.0),
    ])?;
    post(&conn, &date(cy, cm, 3), "Costo de venta", &[
        ("5.1.01", 260_000.0, 0.0),
        ("1.1.03", 0.0, 260_000.0),
    ])?;
    post(&conn, &date(cy, cm, 8), "Servicio técnico", &[
        ("1.1.01", 85_000.0, 0.0),
        ("4.1.02", 0.0, 85_000.0),
    ])?;
    post(&conn, &date(cy, cm, 15), "Gastos generales", &[
        ("5.2.03", 120_000.0, 0.0),
        ("1.1.02", 0.0, 120_000.0),
    ])?;

    // Auxiliary petty-cash ledger mirroring the Caja movements.
    let caja_id: i64 =
        conn.query_row("SELECT id FROM accounts WHERE code = '1.1.01'", [], |r| r.get(0))?;
    conn.execute(
        "INSERT OR IGNORE INTO aux_accounts (account_id, name) VALUES (?1, 'Caja chica')",
        [caja_id],
    )?;
    let aux_id: i64 =
        conn.query_row("SELECT id FROM aux_accounts WHERE name = 'Caja chica'", [], |r| r.get(0))?;
    for (kind, amount, day, desc) in [
        ("income", 390_000.0, 3, "Venta de contado"),
        ("income", 85_000.0, 8, "Servicio técnico"),
    ] {
        conn.execute(
            "INSERT INTO aux_lines (aux_account_id, kind, amount, line_date, description) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![aux_id, kind, amount, date(cy, cm, day), desc],
        )?;
    }

    record_rate(&conn, 1325.50)?;

    for (sku, category, model, title, detail, cost_usd, price, stock) in [
        ("PH-MG84", "device", Some("Moto G84"), None, None, Some(210.0), 390_000.0, 12_i64),
        ("AC-USBC", "accessory", None, Some("Cable USB-C 1m"), None, Some(1.8), 8_500.0, 40),
        ("SV-PANT", "service", None, None, Some("Cambio de módulo de pantalla"), None, 65_000.0, 0),
    ] {
        conn.execute(
            "INSERT OR IGNORE INTO products \
             (sku, category, model, title, detail, cost_usd, price, stock) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![sku, category, model, title, detail, cost_usd, price, stock],
        )?;
    }

    println!("Loaded demo data for {STORE_NAME}.");
    println!("Try: balanza report balance");
    println!("     balanza aux reconcile 'Caja chica'");
    println!("     balanza products list");
    Ok(())
}
