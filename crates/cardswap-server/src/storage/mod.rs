//! Storage layer
//!
//! Uses SQLite (embedded), either as a local file or in memory.

pub mod db;

pub use db::{Database, PoolSettings};
