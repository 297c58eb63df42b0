//! Runtime wiring and process-level setup.
//!
//! - [`FactoryConfig`] - Where the build root lives
//! - [`FactorySystem`] - Wires the stock store, loader and generator into a [`ResourceFactory`](crate::resource::ResourceFactory)
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod config;
pub mod factory_system;
pub mod tracing;

pub use config::*;
pub use factory_system::*;
pub use self::tracing::setup_tracing;
