//! Cheikhei CLI library
//!
//! This library provides the command-line front end for the cheikhei
//! Meitei Mayek sentence segmentation system.

pub mod commands;
pub mod error;
pub mod output;

pub use error::{CliError, CliResult};
