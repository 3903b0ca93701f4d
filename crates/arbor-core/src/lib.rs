//! Core types and utilities for the Arbor territorial tree simulation.

pub mod types;
pub mod config;
pub mod constants;
pub mod error;

pub use error::{Error, Result};
pub use types::*;
pub use config::*;
pub use constants::*;
