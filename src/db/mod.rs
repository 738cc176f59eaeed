use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::{r2d2, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

mod catalog;
mod employees;
mod errors;
mod orders;
pub mod schema;

pub use catalog::CatalogOperations;
pub use employees::{EmployeeOperations, ImportSummary};
pub use errors::RepositoryError;
pub use orders::{OrderOperations, PaymentCorrelation};
pub(crate) use orders::validate_order_pricing;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Applied on every pooled connection. `busy_timeout` bounds lock waits so
/// no request hangs on a contended write; WAL lets readers proceed during
/// writes.
#[derive(Debug)]
struct ConnectionPragmas;

impl r2d2::CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionPragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(
            "PRAGMA busy_timeout = 5000; \
             PRAGMA journal_mode = WAL; \
             PRAGMA synchronous = NORMAL; \
             PRAGMA foreign_keys = ON;",
        )
        .map_err(r2d2::Error::QueryError)
    }
}

pub fn establish_connection_pool(database_url: &str) -> Pool<ConnectionManager<SqliteConnection>> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);

    Pool::builder()
        .max_size(20)
        .connection_timeout(Duration::from_secs(5))
        .connection_customizer(Box::new(ConnectionPragmas))
        .build(manager)
        .unwrap()
}

pub fn run_db_migrations(
    pool: Pool<ConnectionManager<SqliteConnection>>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

// Connection Guard - Manages pool
pub struct DbConnection<'a> {
    conn: r2d2::PooledConnection<ConnectionManager<SqliteConnection>>,
    _lifetime: std::marker::PhantomData<&'a ()>,
}

impl DbConnection<'_> {
    pub fn new(pool: &Pool<ConnectionManager<SqliteConnection>>) -> Result<Self, RepositoryError> {
        Ok(Self {
            conn: pool.get().map_err(RepositoryError::ConnectionPoolError)?,
            _lifetime: std::marker::PhantomData,
        })
    }

    pub fn connection(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }
}
