//! In-memory storage adapters.

mod id_strategy;
mod record_store;

pub use id_strategy::{IdStrategy, ParseIdStrategyError};
pub use record_store::InMemoryRecordRepository;
