//! Transit registry library
//!
//! Exposes modules for integration testing and binary reuse.

pub mod domain;
pub mod error;
pub mod infra;
pub mod store;

pub use error::{Result, TransitError};
