//! Application layer: services and use cases
//!
//! This layer reads path lists, drives the domain pipeline and renders output.

pub mod error;
pub mod error_ext;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
