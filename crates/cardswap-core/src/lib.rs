//! Cardswap Core Library
//!
//! Error taxonomy and storage ports for the Cardswap service.

// Re-export pure types from cardswap-types
pub use cardswap_types::*;

pub mod error;
pub mod ports;

pub use error::{CardswapError, Result};
pub use ports::{CardStore, Store, UserStore};
