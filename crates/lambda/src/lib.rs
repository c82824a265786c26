//! `dashwatch-lambda`
//!
//! **Responsibility:** the scheduled function's entry point.
//!
//! Per invocation: read configuration, build fresh clients, collect one CSV
//! document per metric, ask the model for a report, publish it, return it.

pub mod error;
pub mod handler;

pub use error::InvocationError;
pub use handler::{handle, invoke};
