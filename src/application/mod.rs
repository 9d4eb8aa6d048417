//! Application layer owning the form state controller.

pub mod state;

pub use state::{App, AppMode, FormStep};
