//! Service layer module
//!
//! Contains the odai generation service and the provider fan-out

pub mod aggregator;
pub mod generator;

pub use aggregator::{generate_all, settle_all, AggregateOutcome};
pub use generator::OdaiGenerator;
