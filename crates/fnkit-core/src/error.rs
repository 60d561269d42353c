use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FnkitError {
    #[error("not initialized: run 'fnkit init'")]
    NotInitialized,

    #[error("service plugin not found: {0}")]
    PluginNotFound(String),

    #[error("service instance not found: {0}")]
    InstanceNotFound(String),

    #[error("cannot rename function '{from}' to '{to}': '{to}' already exists")]
    NameCollision { from: String, to: String },

    #[error("action template folder not found: {}", .0.display())]
    TemplateMissing(PathBuf),

    #[error("action descriptor missing after copy: {}", .0.display())]
    DescriptorMissing(PathBuf),

    #[error("function file already exists: {} (use --force to overwrite)", .0.display())]
    FunctionExists(PathBuf),

    #[error("invalid function name '{0}': nothing left after removing special characters")]
    InvalidFunctionName(String),

    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, FnkitError>;
