//! Record-management service for projects and their notes.
//!
//! This crate provides the domain models, the SQLite-backed store, and the
//! HTTP surface (axum router plus API-key gate). The binary in `main.rs` is a
//! thin CLI around them.
//!
//! # Usage
//!
//! ```no_run
//! use projman::db::Database;
//! use projman::models::*;
//!
//! let db = Database::open("/tmp/projects.db")?;
//! db.migrate()?;
//!
//! let projects = db.list_projects()?;
//! # Ok::<(), projman::error::Error>(())
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use db::Database;
