//! SQLite persistence
//!
//! Connection pooling, schema migrations, and the weather record store.

mod connection;
mod migrations;
mod weather_record_store;

pub use connection::{ConnectionPool, DatabaseError, PooledConn, create_pool};
pub use migrations::run_migrations;
pub use weather_record_store::SqliteWeatherRecordStore;
