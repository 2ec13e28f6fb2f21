use comfy_table::{Cell, Table};

use crate::db::get_connection;
use crate::error::Result;
use crate::ledger;
use crate::models::{AccountNature, BalanceGroup};
use crate::settings::get_data_dir;

pub fn add(code: &str, name: &str, nature: &str) -> Result<()> {
    let nature = AccountNature::parse(nature)?;
    let conn = get_connection(&get_data_dir().join("balanza.db"))?;
    conn.execute(
        "INSERT INTO accounts (code, name, nature) VALUES (?1, ?2, ?3)",
        rusqlite::params![code, name, nature.as_str()],
    )?;
    println!("Added account {code} {name} ({})", nature.as_str());
    Ok(())
}

pub fn list() -> Result<()> {
    let conn = get_connection(&get_data_dir().join("balanza.db"))?;
    let accounts = ledger::list_accounts(&conn)?;

    let mut table = Table::new();
    table.set_header(vec!["Code", "Name", "Nature", "Side", "Active"]);
    for a in accounts {
        let side = match a.nature.balance_group() {
            BalanceGroup::Debit => "debit",
            BalanceGroup::Credit => "credit",
        };
        table.add_row(vec![
            Cell::new(&a.code),
            Cell::new(&a.name),
            Cell::new(a.nature.as_str()),
            Cell::new(side),
            Cell::new(if a.is_active { "yes" } else { "no" }),
        ]);
    }
    println!("Chart of Accounts\n{table}");
    Ok(())
}
