//! trustdeed - Terminal Trust Fund Setup
//!
//! A terminal-based form for collecting trust-fund setup data and
//! exporting a formatted trust deed, built in Rust.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
