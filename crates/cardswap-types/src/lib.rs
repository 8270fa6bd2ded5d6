//! Cardswap Types - Pure type definitions
//!
//! This crate contains only plain data types shared by the storage layer and
//! the HTTP surface. It has no async runtime or database dependencies.

pub mod api;
pub mod card;
pub mod user;

pub use api::*;
pub use card::*;
pub use user::*;
