//! Resource construction: the [`Resource`] entity, its errors and the [`ResourceFactory`].

pub mod entity;
pub mod error;
pub mod factory;

pub use entity::*;
pub use error::*;
pub use factory::*;
