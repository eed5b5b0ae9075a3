pub use super::models;

pub mod main_store;
pub mod transactions;
