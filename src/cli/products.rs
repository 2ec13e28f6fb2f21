use std::time::Duration;

use comfy_table::{Cell, CellAlignment, Table};

use crate::db::get_connection;
use crate::error::{BalanzaError, Result};
use crate::fmt::money;
use crate::models::{Product, ProductDetails};
use crate::rates::{CachedRateProvider, DbRateSource, RateProvider};
use crate::settings::get_data_dir;

#[allow(clippy::too_many_arguments)]
pub fn add(
    sku: &str,
    category: &str,
    model: Option<String>,
    title: Option<String>,
    detail: Option<String>,
    cost_usd: Option<f64>,
    price: f64,
    stock: i64,
) -> Result<()> {
    // Resolve up front so a row never lands with its naming field missing.
    let details = ProductDetails::resolve(sku, category, model, title, detail)?;

    let conn = get_connection(&get_data_dir().join("balanza.db"))?;
    let (model, title, detail) = match &details {
        ProductDetails::Device { model } => (Some(model.as_str()), None, None),
        ProductDetails::Accessory { title } => (None, Some(title.as_str()), None),
        ProductDetails::Service { detail } => (None, None, Some(detail.as_str())),
    };
    conn.execute(
        "INSERT INTO products (sku, category, model, title, detail, cost_usd, price, stock) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        rusqlite::params![sku, details.category(), model, title, detail, cost_usd, price, stock],
    )?;
    println!("Added product {sku}: {}", details.display_name());
    Ok(())
}

pub fn list() -> Result<()> {
    let conn = get_connection(&get_data_dir().join("balanza.db"))?;

    let mut stmt = conn.prepare(
        "SELECT id, sku, category, model, title, detail, cost_usd, price, stock \
         FROM products ORDER BY sku",
    )?;
    let raw: Vec<(i64, String, String, Option<String>, Option<String>, Option<String>, Option<f64>, f64, i64)> =
        stmt.query_map([], |row| {
            Ok((
                row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?,
                row.get(5)?, row.get(6)?, row.get(7)?, row.get(8)?,
            ))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let products: Vec<Product> = raw
        .into_iter()
        .map(|(id, sku, category, model, title, detail, cost_usd, price, stock)| {
            Ok(Product {
                details: ProductDetails::resolve(&sku, &category, model, title, detail)?,
                id,
                sku,
                cost_usd,
                price,
                stock,
            })
        })
        .collect::<Result<_>>()?;

    let mut provider = CachedRateProvider::new(DbRateSource::new(&conn), Duration::from_secs(900));
    let rate = match provider.current_rate() {
        Ok(rate) => Some(rate.value),
        Err(BalanzaError::NoRate) => None,
        Err(e) => return Err(e),
    };

    let mut table = Table::new();
    table.set_header(vec!["SKU", "Category", "Name", "Cost USD", "Cost local", "Price", "Stock"]);
    for p in products {
        let cost_usd = p.cost_usd.map(|c| format!("{c:.2}")).unwrap_or_default();
        let cost_local = match (p.cost_usd, rate) {
            (Some(c), Some(r)) => money(c * r),
            _ => String::new(),
        };
        table.add_row(vec![
            Cell::new(&p.sku),
            Cell::new(p.details.category()),
            Cell::new(p.details.display_name()),
            Cell::new(cost_usd).set_alignment(CellAlignment::Right),
            Cell::new(cost_local).set_alignment(CellAlignment::Right),
            Cell::new(money(p.price)).set_alignment(CellAlignment::Right),
            Cell::new(p.stock).set_alignment(CellAlignment::Right),
        ]);
    }
    match rate {
        Some(r) => println!("Products (rate {r:.2})\n{table}"),
        None => println!("Products (no rate recorded)\n{table}"),
    }
    Ok(())
}
