//! # tpulse Common
//!
//! Shared domain types, dataset validation, errors and logging for tpulse.
//!
//! This crate provides the foundational types used across all other crates
//! in the workspace: the post [`Record`], the closed [`Sentiment`] and
//! [`ReliabilityCategory`] enumerations, and the validated, read-only
//! [`Dataset`] snapshot.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod macros;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use color::{is_valid_color, Rgb};
pub use dataset::*;
pub use error::{Result, TPulseError};
pub use logging::{init_logging, LogFormat, LoggingConfig, LoggingGuard};
pub use types::*;
pub use utils::*;
