//! # tpulse Dashboard
//!
//! Command line front end for the tpulse sentiment dashboard.
//!
//! Loads the configuration and the dataset snapshot once, then builds
//! dashboard views as chart spec JSON or SVG previews.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod error;
pub mod loader;

pub use app::*;
pub use error::*;
pub use loader::*;
