//! Plain data types describing how resources are generated.
//!
//! Everything here deserializes straight from the generator and patch fields
//! of a kustomization file.

pub mod gen_args;
pub mod generator_args;

pub use gen_args::*;
pub use generator_args::*;
