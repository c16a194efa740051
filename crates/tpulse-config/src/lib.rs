//! # tpulse Config
//!
//! Typed configuration for the tpulse dashboard.
//!
//! This crate provides the configuration schema with its defaults, loading
//! from YAML or TOML with `TPULSE_*` environment overrides, validation, and
//! a lock-free cache for atomic replacement.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use cache::*;
pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
