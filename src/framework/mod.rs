//! Collaborator contracts for resource construction.
//!
//! This module provides the traits the [`ResourceFactory`](crate::resource::ResourceFactory)
//! is written against, together with the errors each collaborator reports.
//!
//! # Main Components
//!
//! - [`Kunstructured`] - Trait that parsed documents implement
//! - [`KunstructuredFactory`] - Parses bytes and maps into documents
//! - [`Loader`] - Resolves paths to content
//! - [`Generator`] - Builds ConfigMap and Secret documents
//!
//! # Testing
//!
//! See [`mock`] module for loader and generator doubles with expectation tracking.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use core::*;
