pub mod api;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use crate::core::balance::{compute_group_stats, compute_person_balance};
pub use crate::core::errors::LedgerError;
pub use crate::core::models::Money;
pub use crate::core::services::LedgerService;
pub use crate::core::settlement::simplify_settlements;

#[cfg(test)]
mod tests;
