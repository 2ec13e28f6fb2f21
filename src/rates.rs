use std::time::{Duration, Instant};

use rusqlite::Connection;

use crate::error::{BalanzaError, Result};

/// One exchange-rate observation (pesos per USD).
#[derive(Debug, Clone, PartialEq)]
pub struct Rate {
    pub value: f64,
    pub fetched_at: String,
}

/// Where rates come from. The store records quotes manually, but the seam
/// exists so a remote quote service can be plugged in without touching the
/// caching logic.
pub trait RateSource {
    fn fetch(&mut self) -> Result<Rate>;
}

/// Rate access with an explicit time-to-live. The TTL is a constructor
/// argument, not module state, so callers decide how stale is acceptable.
pub trait RateProvider {
    fn current_rate(&mut self) -> Result<Rate>;
    fn force_refresh(&mut self) -> Result<Rate>;
}

pub struct CachedRateProvider<S: RateSource> {
    source: S,
    ttl: Duration,
    cached: Option<(Rate, Instant)>,
}

impl<S: RateSource> CachedRateProvider<S> {
    pub fn new(source: S, ttl: Duration) -> Self {
        Self { source, ttl, cached: None }
    }
}

impl<S: RateSource> RateProvider for CachedRateProvider<S> {
    fn current_rate(&mut self) -> Result<Rate> {
        if let Some((rate, at)) = &self.cached {
            if at.elapsed() < self.ttl {
                return Ok(rate.clone());
            }
        }
        self.force_refresh()
    }

    fn force_refresh(&mut self) -> Result<Rate> {
        let rate = self.source.fetch()?;
        self.cached = Some((rate.clone(), Instant::now()));
        Ok(rate)
    }
}

/// Reads the newest manually recorded rate from the `rates` table.
pub struct DbRateSource<'a> {
    conn: &'a Connection,
}

impl<'a> DbRateSource<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl RateSource for DbRateSource<'_> {
    fn fetch(&mut self) -> Result<Rate> {
        latest_rate(self.conn)
    }
}

pub fn record_rate(conn: &Connection, value: f64) -> Result<()> {
    conn.execute("INSERT INTO rates (value) VALUES (?1)", [value])?;
    Ok(())
}

pub fn latest_rate(conn: &Connection) -> Result<Rate> {
    conn.query_row(
        "SELECT value, fetched_at FROM rates ORDER BY id DESC LIMIT 1",
        [],
        |row| {
            Ok(Rate {
                value: row.get(0)?,
                fetched_at: row.get(1)?,
            })
        },
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => BalanzaError::NoRate,
        other => BalanzaError::Db(other),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{get_connection, init_db};

    struct CountingSource {
        value: f64,
        calls: u32,
    }

    impl RateSource for CountingSource {
        fn fetch(&mut self) -> Result<Rate> {
            self.calls += 1;
            Ok(Rate {
                value: self.value,
                fetched_at: format!("call-{}", self.calls),
            })
        }
    }

    #[test]
    fn test_fresh_cache_is_reused() {
        let source = CountingSource { value: 1325.5, calls: 0 };
        let mut provider = CachedRateProvider::new(source, Duration::from_secs(300));
        let first = provider.current_rate().unwrap();
        let second = provider.current_rate().unwrap();
        assert_eq!(first, second);
        assert_eq!(provider.source.calls, 1);
    }

    #[test]
    fn test_zero_ttl_refetches_every_call() {
        let source = CountingSource { value: 1325.5, calls: 0 };
        let mut provider = CachedRateProvider::new(source, Duration::ZERO);
        provider.current_rate().unwrap();
        provider.current_rate().unwrap();
        assert_eq!(provider.source.calls, 2);
    }

    #[test]
    fn test_force_refresh_bypasses_cache() {
        let source = CountingSource { value: 1325.5, calls: 0 };
        let mut provider = CachedRateProvider::new(source, Duration::from_secs(300));
        provider.current_rate().unwrap();
        let refreshed = provider.force_refresh().unwrap();
        assert_eq!(provider.source.calls, 2);
        assert_eq!(refreshed.fetched_at, "call-2");
        // And the refreshed value becomes the cached one.
        assert_eq!(provider.current_rate().unwrap().fetched_at, "call-2");
    }

    #[test]
    fn test_db_source_returns_newest_rate() {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();

        assert!(matches!(latest_rate(&conn), Err(BalanzaError::NoRate)));

        record_rate(&conn, 1300.0).unwrap();
        record_rate(&conn, 1325.5).unwrap();

        let mut source = DbRateSource::new(&conn);
        assert_eq!(source.fetch().unwrap().value, 1325.5);
    }
}
