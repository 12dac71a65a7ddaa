#[macro_use]
extern crate diesel;

use std::{
    ops::{Deref, DerefMut},
    sync::Arc,
    time::Duration,
};

use anyhow::{anyhow, Result as Fallible};
use diesel::{connection::SimpleConnection as _, r2d2, sqlite::SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

mod backend;
mod models;
mod schema;

pub use self::backend::SqliteBackend;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

const IN_MEMORY_URL: &str = ":memory:";

/// How long a connection waits for a lock held by another
/// connection or process before failing with SQLITE_BUSY.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

type Connection = SqliteConnection;

type ConnectionManager = r2d2::ConnectionManager<Connection>;
type ConnectionPool = r2d2::Pool<ConnectionManager>;
type PooledConnection = r2d2::PooledConnection<ConnectionManager>;

type SharedConnectionPool = Arc<RwLock<ConnectionPool>>;

pub struct DbReadOnly<'a> {
    _locked_pool: RwLockReadGuard<'a, ConnectionPool>,
    conn: PooledConnection,
}

impl<'a> DbReadOnly<'a> {
    fn try_new(pool: &'a SharedConnectionPool) -> Fallible<Self> {
        let locked_pool = pool.read();
        let conn = locked_pool.get().inspect_err(|err| {
            log::error!("Failed to obtain pooled database connection for read-only access: {err}");
        })?;
        Ok(Self {
            _locked_pool: locked_pool,
            conn,
        })
    }
}

impl Deref for DbReadOnly<'_> {
    type Target = SqliteConnection;
    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl DerefMut for DbReadOnly<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.conn
    }
}

pub struct DbReadWrite<'a> {
    _locked_pool: RwLockWriteGuard<'a, ConnectionPool>,
    conn: PooledConnection,
}

impl<'a> DbReadWrite<'a> {
    fn try_new(pool: &'a SharedConnectionPool) -> Fallible<Self> {
        let locked_pool = pool.write();
        let conn = locked_pool.get().inspect_err(|err| {
            log::error!("Failed to obtain pooled database connection for read/write access: {err}");
        })?;
        Ok(Self {
            _locked_pool: locked_pool,
            conn,
        })
    }
}

impl Deref for DbReadWrite<'_> {
    type Target = SqliteConnection;
    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl DerefMut for DbReadWrite<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.conn
    }
}

#[derive(Clone)]
pub struct Connections {
    // Only a single connection with write access will be
    // handed out at a time from the pool. Multiple read
    // connections can be accessed concurrently. This locking
    // pattern around the connection pool prevents SQLITE_LOCKED
    // ("database is locked") errors.
    pool: SharedConnectionPool,
}

impl std::fmt::Debug for Connections {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Connections").finish_non_exhaustive()
    }
}

/// Configure the database engine
///
/// Some values like the text encoding can only be changed once after the
/// database has initially been created.
pub fn initialize_database(connection: &mut SqliteConnection) -> Fallible<()> {
    connection.batch_execute(r#"
PRAGMA journal_mode = WAL;        -- better write-concurrency
PRAGMA synchronous = NORMAL;      -- fsync only in critical moments, safe for journal_mode = WAL
PRAGMA wal_autocheckpoint = 1000; -- write WAL changes back every 1000 pages (default), for an in average 1MB WAL file
PRAGMA wal_checkpoint(TRUNCATE);  -- free some space by truncating possibly massive WAL files from the last run
PRAGMA secure_delete = 0;         -- avoid some disk I/O
PRAGMA automatic_index = 1;       -- detect and log missing indexes
PRAGMA encoding = 'UTF-8';
"#)?;
    Ok(())
}

/// Settings that are scoped to a single connection and
/// must be applied whenever the pool opens a new one.
#[derive(Debug, Clone, Copy)]
struct ConnectionOptions {
    busy_timeout: Duration,
}

impl r2d2::CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {};",
            self.busy_timeout.as_millis()
        ))
        .map_err(r2d2::Error::QueryError)
    }
}

fn pool_builder(url: &str, pool_size: u32) -> r2d2::Builder<ConnectionManager> {
    let builder = ConnectionPool::builder()
        .max_size(pool_size)
        .connection_customizer(Box::new(ConnectionOptions {
            busy_timeout: BUSY_TIMEOUT,
        }));
    if url == IN_MEMORY_URL {
        // Closing the only connection would discard the database
        builder.max_lifetime(None).idle_timeout(None)
    } else {
        builder
    }
}

impl Connections {
    /// Opens a connection pool.
    ///
    /// Every connection to `:memory:` opens a separate database,
    /// i.e. in-memory databases require a `pool_size` of 1.
    pub fn init(url: &str, pool_size: u32) -> Fallible<Self> {
        // Establish a test connection before creating the connection pool to fail early.
        // If the given file is inaccessible r2d2 seems to do multiple retries
        // and logs errors instead of simply failing and returning and error immediately.
        // Malformed example file name for testing: ":/tmp/cfdb.sqlite"
        use diesel::Connection as _;
        let _ = SqliteConnection::establish(url)?;
        let manager = ConnectionManager::new(url);
        let pool = pool_builder(url, pool_size).build(manager)?;
        initialize_database(&mut *pool.get()?)?;
        Ok(Self::new(pool))
    }

    fn new(pool: ConnectionPool) -> Self {
        Self {
            pool: Arc::new(RwLock::new(pool)),
        }
    }

    pub fn shared(&self) -> Fallible<DbReadOnly> {
        DbReadOnly::try_new(&self.pool)
    }

    pub fn exclusive(&self) -> Fallible<DbReadWrite> {
        DbReadWrite::try_new(&self.pool)
    }
}

pub fn run_embedded_database_migrations(mut conn: DbReadWrite<'_>) -> Fallible<()> {
    log::info!("Running embedded database migrations");
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| anyhow!("Failed to run database migrations: {err}"))?;
    for version in applied {
        log::info!("Applied database migration {version}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::{prelude::*, sql_query, sql_types::Integer};

    #[derive(QueryableByName)]
    struct BusyTimeout {
        #[diesel(sql_type = Integer)]
        timeout: i32,
    }

    fn busy_timeout(conn: &mut SqliteConnection) -> i32 {
        sql_query("PRAGMA busy_timeout")
            .get_result::<BusyTimeout>(conn)
            .unwrap()
            .timeout
    }

    #[test]
    fn every_pooled_connection_waits_for_locks() {
        let connections = Connections::init(IN_MEMORY_URL, 1).unwrap();
        assert_eq!(5_000, busy_timeout(&mut connections.shared().unwrap()));
        assert_eq!(5_000, busy_timeout(&mut connections.exclusive().unwrap()));
    }

    #[test]
    fn in_memory_connections_are_never_recycled() {
        // Without idle connections nothing is ever opened
        let pool = pool_builder(IN_MEMORY_URL, 1)
            .min_idle(Some(0))
            .build_unchecked(ConnectionManager::new(IN_MEMORY_URL));
        assert_eq!(None, pool.max_lifetime());
        assert_eq!(None, pool.idle_timeout());
        let pool = pool_builder("cfdb.sqlite", 4)
            .min_idle(Some(0))
            .build_unchecked(ConnectionManager::new("cfdb.sqlite"));
        assert!(pool.max_lifetime().is_some());
        assert!(pool.idle_timeout().is_some());
    }
}
