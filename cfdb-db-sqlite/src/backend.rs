use std::collections::BTreeSet;

use anyhow::Result as Fallible;
use cfdb_core::store::{self, Backend, RegionId};
use diesel::{prelude::*, result::Error as DieselError};
use parking_lot::Mutex;

use super::{models, run_embedded_database_migrations, schema, Connections};

type Result<T> = std::result::Result<T, store::Error>;

fn from_diesel_err(err: DieselError) -> store::Error {
    store::Error::Other(err.into())
}

fn region_column(region: RegionId) -> i16 {
    i16::from(region.to_u8())
}

fn replace_value(
    conn: &mut SqliteConnection,
    region: RegionId,
    key: &str,
    value: &[u8],
) -> QueryResult<()> {
    let record = models::NewRecord {
        region: region_column(region),
        key,
        value,
    };
    diesel::replace_into(schema::records::table)
        .values(&record)
        .execute(conn)?;
    Ok(())
}

fn read_value(
    conn: &mut SqliteConnection,
    region: RegionId,
    key: &str,
) -> QueryResult<Option<Vec<u8>>> {
    use schema::records::dsl;
    dsl::records
        .select(dsl::value)
        .filter(dsl::region.eq(region_column(region)))
        .filter(dsl::key.eq(key))
        .first::<Vec<u8>>(conn)
        .optional()
}

/// A durable backend that stores all regions in a single
/// SQLite table.
#[derive(Debug)]
pub struct SqliteBackend {
    connections: Connections,
    // Claims are valid for the lifetime of the process
    claimed: Mutex<BTreeSet<RegionId>>,
}

impl SqliteBackend {
    pub fn new(connections: Connections) -> Self {
        Self {
            connections,
            claimed: Default::default(),
        }
    }

    /// Connects to the database and applies all pending migrations.
    pub fn open(url: &str, pool_size: u32) -> Fallible<Self> {
        let connections = Connections::init(url, pool_size)?;
        run_embedded_database_migrations(connections.exclusive()?)?;
        Ok(Self::new(connections))
    }
}

impl Backend for SqliteBackend {
    fn claim(&self, region: RegionId) -> Result<()> {
        if !self.claimed.lock().insert(region) {
            return Err(store::Error::RegionInUse(region));
        }
        Ok(())
    }

    fn read(&self, region: RegionId, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.connections.shared()?;
        read_value(&mut conn, region, key).map_err(from_diesel_err)
    }

    fn write(&self, region: RegionId, key: &str, value: Vec<u8>) -> Result<Option<Vec<u8>>> {
        let mut conn = self.connections.exclusive()?;
        conn.immediate_transaction::<_, DieselError, _>(|conn| {
            let previous = read_value(conn, region, key)?;
            replace_value(conn, region, key, &value)?;
            Ok(previous)
        })
        .map_err(from_diesel_err)
    }

    fn update<F>(&self, region: RegionId, key: &str, f: F) -> Result<()>
    where
        F: FnOnce(Option<Vec<u8>>) -> Result<Option<Vec<u8>>>,
    {
        // The write lock of an immediate transaction is held from the
        // first read until the commit, also against other processes
        // that share the database file.
        let mut update_error = None;
        let mut conn = self.connections.exclusive()?;
        conn.immediate_transaction::<_, DieselError, _>(|conn| {
            let current = read_value(conn, region, key)?;
            match f(current) {
                Ok(Some(value)) => replace_value(conn, region, key, &value),
                Ok(None) => Ok(()),
                Err(err) => {
                    update_error = Some(err);
                    Err(DieselError::RollbackTransaction)
                }
            }
        })
        .map_err(|err| {
            if let Some(update_error) = update_error.take() {
                debug_assert!(matches!(err, DieselError::RollbackTransaction));
                update_error
            } else {
                from_diesel_err(err)
            }
        })
    }

    fn scan(&self, region: RegionId) -> Result<Vec<(String, Vec<u8>)>> {
        use schema::records::dsl;
        let mut conn = self.connections.shared()?;
        let records = dsl::records
            .select((dsl::key, dsl::value))
            .filter(dsl::region.eq(region_column(region)))
            .order_by(dsl::key.asc())
            .load::<models::Record>(&mut *conn)
            .map_err(from_diesel_err)?;
        Ok(records
            .into_iter()
            .map(|models::Record { key, value }| (key, value))
            .collect())
    }
}
