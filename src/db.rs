use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS accounts (
    id INTEGER PRIMARY KEY,
    code TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    nature TEXT NOT NULL,
    is_active INTEGER DEFAULT 1,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS journal_entries (
    id INTEGER PRIMARY KEY,
    entry_date TEXT NOT NULL,
    memo TEXT,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS entry_lines (
    id INTEGER PRIMARY KEY,
    entry_id INTEGER NOT NULL,
    account_id INTEGER NOT NULL,
    debit REAL NOT NULL DEFAULT 0,
    credit REAL NOT NULL DEFAULT 0,
    FOREIGN KEY (entry_id) REFERENCES journal_entries(id),
    FOREIGN KEY (account_id) REFERENCES accounts(id)
);

CREATE TABLE IF NOT EXISTS aux_accounts (
    id INTEGER PRIMARY KEY,
    account_id INTEGER NOT NULL,
    name TEXT NOT NULL UNIQUE,
    created_at TEXT DEFAULT (datetime('now')),
    FOREIGN KEY (account_id) REFERENCES accounts(id)
);

CREATE TABLE IF NOT EXISTS aux_lines (
    id INTEGER PRIMARY KEY,
    aux_account_id INTEGER NOT NULL,
    kind TEXT NOT NULL,
    amount REAL NOT NULL,
    line_date TEXT NOT NULL,
    description TEXT,
    FOREIGN KEY (aux_account_id) REFERENCES aux_accounts(id)
);

CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY,
    sku TEXT NOT NULL UNIQUE,
    category TEXT NOT NULL,
    model TEXT,
    title TEXT,
    detail TEXT,
    cost_usd REAL,
    price REAL NOT NULL DEFAULT 0,
    stock INTEGER NOT NULL DEFAULT 0,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS rates (
    id INTEGER PRIMARY KEY,
    value REAL NOT NULL,
    fetched_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
";

// (code, name, nature)
const DEFAULT_CHART: &[(&str, &str, &str)] = &[
    // Assets
    ("1.1.01", "Caja", "asset"),
    ("1.1.02", "Banco Cuenta Corriente", "asset"),
    ("1.1.03", "Mercaderías", "asset"),
    ("1.1.04", "Deudores por Ventas", "asset"),
    ("1.1.05", "Anticipos a Proveedores del Exterior", "asset"),
    ("1.2.01", "Muebles y Útiles", "asset"),
    ("1.2.02", "Equipos de Computación", "asset"),
    // Liabilities
    ("2.1.01", "Proveedores", "liability"),
    ("2.1.02", "Impuestos a Pagar", "liability"),
    ("2.1.03", "Despachante de Aduana", "liability"),
    ("2.2.01", "Préstamos Bancarios", "liability"),
    // Equity
    ("3.1.01", "Capital", "equity"),
    ("3.2.01", "Resultados Acumulados", "equity"),
    // Income
    ("4.1.01", "Ventas", "income"),
    ("4.1.02", "Servicios Técnicos", "income"),
    ("4.2.01", "Intereses Ganados", "income"),
    ("4.2.02", "Diferencia de Cambio Ganada", "income"),
    // Costs and expenses
    ("5.1.01", "Costo de Mercaderías Vendidas", "negative_result"),
    ("5.1.02", "Gastos de Importación", "negative_result"),
    ("5.2.01", "Sueldos y Cargas Sociales", "negative_result"),
    ("5.2.02", "Alquileres Perdidos", "negative_result"),
    ("5.2.03", "Gastos Generales", "negative_result"),
    ("5.2.04", "Impuestos y Tasas", "negative_result"),
    ("5.2.05", "Diferencia de Cambio Perdida", "negative_result"),
];

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;

    let count: i64 = conn.query_row("SELECT count(*) FROM accounts", [], |row| row.get(0))?;
    if count == 0 {
        for (code, name, nature) in DEFAULT_CHART {
            conn.execute(
                "INSERT INTO accounts (code, name, nature) VALUES (?1, ?2, ?3)",
                rusqlite::params![code, name, nature],
            )?;
        }
    }
    Ok(())
}

pub fn get_metadata(conn: &Connection, key: &str) -> Option<String> {
    conn.query_row("SELECT value FROM metadata WHERE key = ?1", [key], |row| row.get(0))
        .ok()
}

pub fn set_metadata(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO metadata (key, value) VALUES (?1, ?2) \
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        rusqlite::params![key, value],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountNature;

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    #[test]
    fn test_init_db_creates_tables() {
        let (_dir, conn) = test_db();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        for expected in &[
            "accounts", "journal_entries", "entry_lines",
            "aux_accounts", "aux_lines", "products", "rates", "metadata",
        ] {
            assert!(tables.contains(&expected.to_string()), "missing table: {expected}");
        }
    }

    #[test]
    fn test_init_db_is_idempotent() {
        let (_dir, conn) = test_db();
        init_db(&conn).unwrap();
        let count: i64 = conn.query_row("SELECT count(*) FROM accounts", [], |r| r.get(0)).unwrap();
        assert_eq!(count as usize, DEFAULT_CHART.len());
    }

    #[test]
    fn test_seeded_chart_natures_parse() {
        let (_dir, conn) = test_db();
        let natures: Vec<String> = conn
            .prepare("SELECT DISTINCT nature FROM accounts")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        for n in natures {
            AccountNature::parse(&n).unwrap();
        }
    }

    #[test]
    fn test_seeded_codes_are_sorted_unique() {
        let (_dir, conn) = test_db();
        let codes: Vec<String> = conn
            .prepare("SELECT code FROM accounts ORDER BY code")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        let mut deduped = codes.clone();
        deduped.dedup();
        assert_eq!(codes.len(), deduped.len());
    }

    #[test]
    fn test_metadata_roundtrip() {
        let (_dir, conn) = test_db();
        assert_eq!(get_metadata(&conn, "store_name"), None);
        set_metadata(&conn, "store_name", "Electro Sur").unwrap();
        set_metadata(&conn, "store_name", "Electro Norte").unwrap();
        assert_eq!(get_metadata(&conn, "store_name").as_deref(), Some("Electro Norte"));
    }
}
