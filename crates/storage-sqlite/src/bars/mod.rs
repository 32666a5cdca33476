//! Daily bar persistence: Diesel models and the `BarStore` implementation.

pub mod model;
pub mod repository;

#[cfg(test)]
mod repository_tests;

pub use model::{DailyBarDB, NewDailyBarDB};
pub use repository::BarRepository;
