pub mod action;
pub mod config;
pub mod error;
pub mod fs;
pub mod inventory;
pub mod io;
pub mod names;
pub mod paths;
pub mod prompt;
pub mod registry;
pub mod workflow;

pub use error::{FnkitError, Result};
