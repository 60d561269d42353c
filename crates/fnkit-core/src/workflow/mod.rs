//! Interactive workflows behind the CLI commands.
//!
//! A workflow finishes with an [`Outcome`]: it completed, the user cancelled
//! a prompt, or a precondition on disk was not met. Only real failures
//! (I/O, name collisions, bad config) are returned as errors.

pub mod add;
pub mod attach;

pub use add::{add_function, AddContext};
pub use attach::{attach_action, AttachContext, AttachReport};

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Completed(T),
    Cancelled(CancelPoint),
    Aborted(Abort),
}

/// The prompt the user walked away from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelPoint {
    Plugin,
    Instance,
    Function,
}

/// A precondition that stopped a run before it changed anything it should
/// not have. `Display` renders the message shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Abort {
    /// The picked plugin is unknown or has no instances.
    NoInstances { plugin: String },
    /// `functions_add` found no instances in the project at all.
    NoProjectInstances,
    /// The instance's `functions/` folder is missing or has no directories.
    NoFunctions { functions_dir: String },
    /// The picked function directory vanished before validation.
    MissingFunction { name: String, functions_dir: String },
    MissingHandler { function_dir: String },
    MissingTemplate { plugin: String, template: String },
}

impl fmt::Display for Abort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Abort::NoInstances { .. } => f.write_str("No service instances found"),
            Abort::NoProjectInstances => f.write_str("No functions.action instances found"),
            Abort::NoFunctions { functions_dir } => write!(
                f,
                "No functions found in {functions_dir}. Please add one and try again!"
            ),
            Abort::MissingFunction {
                name,
                functions_dir,
            } => write!(
                f,
                "Missing \"{name}\" folder in \"{functions_dir}\". Please add one and try again!"
            ),
            Abort::MissingHandler { function_dir } => write!(
                f,
                "Missing \"{}\" file in \"{function_dir}\". Please add one and try again!",
                crate::paths::HANDLER_FILE
            ),
            Abort::MissingTemplate { plugin, template } => write!(
                f,
                "Missing action template for plugin \"{plugin}\" in \"{template}\". \
                 Please add one and try again!"
            ),
        }
    }
}
