use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory and file constants
// ---------------------------------------------------------------------------

pub const FNKIT_DIR: &str = ".fnkit";
pub const CONFIG_FILE: &str = ".fnkit/config.yaml";

pub const FUNCTIONS_DIR: &str = "functions";
pub const HANDLER_FILE: &str = "handler.js";
pub const ACTION_DESCRIPTOR_FILE: &str = "action.graphql";

/// Token inside the action descriptor replaced with the function name.
pub const ACTION_NAME_PLACEHOLDER: &str = "actionName";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn fnkit_dir(root: &Path) -> PathBuf {
    root.join(FNKIT_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// `<root>/<installation_path>/functions`
pub fn functions_dir(root: &Path, installation_path: &Path) -> PathBuf {
    root.join(installation_path).join(FUNCTIONS_DIR)
}

pub fn function_dir(functions_dir: &Path, name: &str) -> PathBuf {
    functions_dir.join(name)
}

pub fn handler_path(function_dir: &Path) -> PathBuf {
    function_dir.join(HANDLER_FILE)
}

pub fn action_descriptor_path(function_dir: &Path) -> PathBuf {
    function_dir.join(ACTION_DESCRIPTOR_FILE)
}

/// Single-file function scaffolded by `functions:add`.
pub fn function_file(functions_dir: &Path, name: &str) -> PathBuf {
    functions_dir.join(format!("{name}.js"))
}

/// Render `path` relative to `root` for user-facing messages.
/// Paths outside `root` are shown as-is.
pub fn display_relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
