use crate::db::{get_connection, get_metadata};
use crate::error::Result;
use crate::fmt::format_bytes;
use crate::rates::latest_rate;
use crate::settings::load_settings;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let data_dir = std::path::PathBuf::from(&settings.data_dir);
    let db_path = data_dir.join("balanza.db");

    println!("Data dir:   {}", data_dir.display());
    println!("Database:   {}", db_path.display());

    if db_path.exists() {
        let size = std::fs::metadata(&db_path)?.len();
        println!("DB size:    {}", format_bytes(size));

        let conn = get_connection(&db_path)?;

        let store = get_metadata(&conn, "store_name");
        println!("Store:      {}", store.as_deref().unwrap_or("(not set)"));

        let accounts: i64 = conn.query_row("SELECT count(*) FROM accounts", [], |r| r.get(0))?;
        let entries: i64 =
            conn.query_row("SELECT count(*) FROM journal_entries", [], |r| r.get(0))?;
        let lines: i64 = conn.query_row("SELECT count(*) FROM entry_lines", [], |r| r.get(0))?;
        let aux: i64 = conn.query_row("SELECT count(*) FROM aux_accounts", [], |r| r.get(0))?;
        let products: i64 = conn.query_row("SELECT count(*) FROM products", [], |r| r.get(0))?;

        println!();
        println!("Accounts:        {accounts}");
        println!("Journal entries: {entries}");
        println!("Entry lines:     {lines}");
        println!("Aux ledgers:     {aux}");
        println!("Products:        {products}");

        match latest_rate(&conn) {
            Ok(rate) => println!("Rate:            {:.2} ({})", rate.value, rate.fetched_at),
            Err(_) => println!("Rate:            (not set)"),
        }
    } else {
        println!();
        println!("Database not found. Run `balanza init` to set up.");
    }

    Ok(())
}
