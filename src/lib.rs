//! # Resource Factory
//!
//! > **Turns raw manifests into a flat, ordered list of typed resources.**
//!
//! This crate is the ingestion boundary of a configuration-assembly pipeline. Callers hand it
//! raw bytes, in-memory maps or already-parsed documents and get back [`Resource`](resource::Resource)
//! values: a document plus the generation metadata later stages need to decide on name-suffix
//! hashing and merge/replace reconciliation.
//!
//! ## Core Concepts
//!
//! ### List Flattening
//! Any document whose `kind` ends in `List` is a container. Its `items` are expanded through a
//! breadth-first work queue, so Lists can nest to any depth without growing the stack, and the
//! output never contains a List.
//!
//! ### Collaborators Behind Traits
//! Parsing, loading and generation are delegated to the traits in [`framework`]:
//! [`KunstructuredFactory`](framework::KunstructuredFactory), [`Loader`](framework::Loader) and
//! [`Generator`](framework::Generator). The factory never assumes a concrete document type.
//!
//! ### Type-Safe Error Handling
//! Each collaborator has its own `thiserror` enum. [`ResourceError`](resource::ResourceError)
//! wraps them, adding the patch path where a parse failure needs it.
//!
//! ## Module Tour
//!
//! ### 1. The Contracts ([`framework`])
//! - **Role**: Traits and errors for every collaborator, plus mocks for tests.
//! - **Key items**: [`Kunstructured`](framework::Kunstructured), [`mock::MockLoader`](framework::mock::MockLoader).
//!
//! ### 2. The Core ([`resource`])
//! - **Role**: [`ResourceFactory`](resource::ResourceFactory) and the [`Resource`](resource::Resource) it builds.
//!
//! ### 3. The Data ([`model`])
//! - **Role**: Generator arguments, options and behaviors as written in a kustomization file.
//!
//! ### 4. The Stock Collaborators ([`document`], [`loader`], [`generator`])
//! - **Role**: YAML store, filesystem loader and key/value ConfigMap/Secret generator.
//!
//! ### 5. The Wiring ([`lifecycle`])
//! - **Role**: [`FactorySystem`](lifecycle::FactorySystem), configuration and tracing setup.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use resource_factory::document::YamlDocumentStore;
//! use resource_factory::generator::KvGenerator;
//! use resource_factory::resource::ResourceFactory;
//!
//! let factory = ResourceFactory::new(Arc::new(YamlDocumentStore), Arc::new(KvGenerator));
//! let resources = factory
//!     .slice_from_bytes(b"kind: List\nitems:\n- kind: Service\n  metadata: {name: web}\n")
//!     .unwrap();
//! assert_eq!(resources.len(), 1);
//! assert_eq!(resources[0].kind(), "Service");
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! RUST_LOG=debug cargo test
//! ```

pub mod document;
pub mod framework;
pub mod generator;
pub mod lifecycle;
pub mod loader;
pub mod model;
pub mod resource;
