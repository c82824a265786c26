//! `dashwatch-infra`
//!
//! **Responsibility:** AWS adapters behind the pipeline ports, and the factory
//! that builds them for each invocation.
//!
//! Domain crates never see an SDK type; conversion happens here.

pub mod aws;
pub mod error;
pub mod services;

pub use error::{InfraError, Service};
pub use services::{AwsServiceFactory, ServiceFactory, Services};
