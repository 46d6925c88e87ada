//! # pets-conn-mgr
//!
//! Storage gateway for the pets database. Owns the lifecycle of a single
//! SQLite file and hands out read and write access to it.
//!
//! ## Core Types
//!
//! - **[`SqliteDatabase`]**: Database handle with separate read and write connection pools
//! - **[`SqliteDatabaseConfig`]**: Configuration for connection pool settings
//! - **[`WriteGuard`]**: RAII guard ensuring exclusive write access
//! - **[`Migrator`]**: Re-exported from sqlx for applying schema migrations
//! - **[`Error`]**: Error type for database operations
//!
//! ## Architecture
//!
//! - **Dual pools**: Read-only pool (max 6 connections by default) and a write pool of exactly one connection
//! - **Lazy WAL mode**: Write-Ahead Logging enabled on the first writer acquisition
//! - **Explicit ownership**: `connect` returns an `Arc` owned by the caller; there is no global registry
//!
//! ## Usage
//!
//! ```no_run
//! use pets_conn_mgr::SqliteDatabase;
//!
//! #[tokio::main]
//! async fn main() -> pets_conn_mgr::Result<()> {
//!     let db = SqliteDatabase::connect("shelter.db", None).await?;
//!
//!     let mut writer = db.acquire_writer().await?;
//!     sqlx::query("CREATE TABLE IF NOT EXISTS notes (body TEXT)")
//!         .execute(&mut *writer)
//!         .await?;
//!     drop(writer);
//!
//!     let rows = sqlx::query("SELECT * FROM notes")
//!         .fetch_all(db.read_pool()?)
//!         .await?;
//!     assert!(rows.is_empty());
//!
//!     db.close().await?;
//!     Ok(())
//! }
//! ```

mod config;
mod database;
mod error;
mod write_guard;

pub use config::SqliteDatabaseConfig;
pub use database::SqliteDatabase;
pub use error::{Error, Result};
pub use write_guard::WriteGuard;

pub use sqlx::migrate::Migrator;
