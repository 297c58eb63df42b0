//! # Mock Collaborators
//!
//! Utilities for testing the factory in isolation.
//!
//! Use [`MockLoader`] and [`MockGenerator`] to script what a collaborator returns,
//! then call `verify()` to assert every expectation was consumed.

use crate::framework::{GenerateError, Generator, Kunstructured, LoadError, Loader};
use crate::model::{ConfigMapArgs, GeneratorOptions, SecretArgs};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

// =============================================================================
// LOADER
// =============================================================================

/// An expected `load` call and the result it produces.
struct LoadExpectation {
    path: String,
    response: Result<Vec<u8>, LoadError>,
}

/// A loader that answers from a queue of expectations.
///
/// # Example
/// ```ignore
/// let mut loader = MockLoader::new();
/// loader.expect_load("patch.yaml").return_ok(b"kind: Service".to_vec());
/// loader.expect_load("missing.yaml").return_not_found();
///
/// let resources = factory.slice_from_patches(&loader, &paths);
/// loader.verify(); // Ensures all expectations were met
/// ```
///
/// Calls must arrive in the order the expectations were registered; a call
/// for a different path panics.
pub struct MockLoader {
    root: PathBuf,
    expectations: Arc<Mutex<VecDeque<LoadExpectation>>>,
}

impl MockLoader {
    /// Creates a new mock loader with no expectations.
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("/mock"),
            expectations: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Expects a `load` of `path`.
    pub fn expect_load(&mut self, path: impl Into<String>) -> LoadExpectationBuilder {
        LoadExpectationBuilder {
            path: path.into(),
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all load expectations were met. {} remaining", exps.len());
        }
    }
}

impl Default for MockLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader for MockLoader {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load(&self, path: &str) -> Result<Vec<u8>, LoadError> {
        let expectation = self.expectations.lock().unwrap().pop_front();
        match expectation {
            Some(exp) if exp.path == path => exp.response,
            Some(exp) => panic!("Unexpected load of {path:?}, expected {:?}", exp.path),
            None => panic!("Unexpected load of {path:?}, no expectations left"),
        }
    }
}

/// Builder for `load` expectations.
pub struct LoadExpectationBuilder {
    path: String,
    expectations: Arc<Mutex<VecDeque<LoadExpectation>>>,
}

impl LoadExpectationBuilder {
    /// Sets the expectation to return `content`.
    pub fn return_ok(self, content: impl Into<Vec<u8>>) {
        self.push(Ok(content.into()));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: LoadError) {
        self.push(Err(error));
    }

    /// Shorthand for a [`LoadError::NotFound`] on the expected path.
    pub fn return_not_found(self) {
        let path = PathBuf::from(&self.path);
        self.push(Err(LoadError::NotFound { path }));
    }

    fn push(self, response: Result<Vec<u8>, LoadError>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(LoadExpectation {
            path: self.path,
            response,
        });
    }
}

// =============================================================================
// GENERATOR
// =============================================================================

/// Which generator entry point an expectation answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GeneratedKind {
    ConfigMap,
    Secret,
}

struct GenerateExpectation {
    kind: GeneratedKind,
    response: Result<Box<dyn Kunstructured>, GenerateError>,
}

/// A generator that answers from a queue of expectations.
///
/// # Example
/// ```ignore
/// let generator = MockGenerator::new();
/// generator.expect_config_map().return_ok(Box::new(document));
/// generator.expect_secret().return_err(GenerateError::MissingName { kind: "Secret" });
/// ```
#[derive(Clone, Default)]
pub struct MockGenerator {
    expectations: Arc<Mutex<VecDeque<GenerateExpectation>>>,
}

impl MockGenerator {
    /// Creates a new mock generator with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `make_config_map` call.
    pub fn expect_config_map(&self) -> GenerateExpectationBuilder {
        self.builder(GeneratedKind::ConfigMap)
    }

    /// Expects a `make_secret` call.
    pub fn expect_secret(&self) -> GenerateExpectationBuilder {
        self.builder(GeneratedKind::Secret)
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all generate expectations were met. {} remaining", exps.len());
        }
    }

    fn builder(&self, kind: GeneratedKind) -> GenerateExpectationBuilder {
        GenerateExpectationBuilder {
            kind,
            expectations: self.expectations.clone(),
        }
    }

    fn next(&self, kind: GeneratedKind) -> Result<Box<dyn Kunstructured>, GenerateError> {
        let expectation = self.expectations.lock().unwrap().pop_front();
        match expectation {
            Some(exp) if exp.kind == kind => exp.response,
            Some(exp) => panic!("Unexpected {kind:?} generation, expected {:?}", exp.kind),
            None => panic!("Unexpected {kind:?} generation, no expectations left"),
        }
    }
}

impl Generator for MockGenerator {
    fn make_config_map(
        &self,
        _loader: &dyn Loader,
        _options: Option<&GeneratorOptions>,
        _args: &ConfigMapArgs,
    ) -> Result<Box<dyn Kunstructured>, GenerateError> {
        self.next(GeneratedKind::ConfigMap)
    }

    fn make_secret(
        &self,
        _loader: &dyn Loader,
        _options: Option<&GeneratorOptions>,
        _args: &SecretArgs,
    ) -> Result<Box<dyn Kunstructured>, GenerateError> {
        self.next(GeneratedKind::Secret)
    }
}

/// Builder for generator expectations.
pub struct GenerateExpectationBuilder {
    kind: GeneratedKind,
    expectations: Arc<Mutex<VecDeque<GenerateExpectation>>>,
}

impl GenerateExpectationBuilder {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, document: Box<dyn Kunstructured>) {
        self.push(Ok(document));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: GenerateError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Box<dyn Kunstructured>, GenerateError>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(GenerateExpectation {
            kind: self.kind,
            response,
        });
    }
}
