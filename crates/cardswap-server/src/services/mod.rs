//! Business logic services

pub mod accounts;
pub mod cards;

pub use accounts::AccountService;
pub use cards::CardService;
