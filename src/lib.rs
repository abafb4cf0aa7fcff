//! campus_connect - persistence layer for the Campus Connect events aggregator.
//!
//! Declares the four-table SQLite schema (users, internal events, scraped
//! external events and weather snapshots), the migrations and reset sequence
//! that create it, and typed repositories for reading and writing rows.

pub mod config;
pub mod error;
pub mod logging;
pub mod migrations;
pub mod repository;
pub mod schema;
pub mod seed;

pub use error::{Error, Result};
pub use repository::DbContext;
