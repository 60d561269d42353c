//! Filesystem steps that pair a function directory with an action.

use crate::error::{FnkitError, Result};
use crate::fs::Filesystem;
use crate::names;
use crate::paths;
use std::path::{Path, PathBuf};

/// Whether `path` exists. Callers turn `false` into a user-facing abort.
pub fn require_exists(fs: &dyn Filesystem, path: &Path) -> bool {
    let exists = fs.exists(path);
    if !exists {
        tracing::debug!(path = %path.display(), "required path missing");
    }
    exists
}

/// Rename `functions_dir/raw` to `functions_dir/canonical` unless they are
/// equal. Returns the path to use from here on.
///
/// An existing `canonical` sibling is a [`FnkitError::NameCollision`]; it is
/// never merged into or overwritten.
pub fn rename_if_changed(
    fs: &dyn Filesystem,
    functions_dir: &Path,
    raw: &str,
    canonical: &str,
) -> Result<PathBuf> {
    let to = paths::function_dir(functions_dir, canonical);
    if raw == canonical {
        return Ok(to);
    }
    if fs.exists(&to) {
        return Err(FnkitError::NameCollision {
            from: raw.to_string(),
            to: canonical.to_string(),
        });
    }
    let from = paths::function_dir(functions_dir, raw);
    fs.rename(&from, &to)?;
    tracing::info!(from = %from.display(), to = %to.display(), "renamed function directory");
    Ok(to)
}

/// Copy `template` into `function_dir` and write the function name into the
/// copied action descriptor. Returns the descriptor path.
pub fn attach_template(
    fs: &dyn Filesystem,
    template: &Path,
    function_dir: &Path,
    canonical: &str,
) -> Result<PathBuf> {
    if !fs.exists(template) {
        return Err(FnkitError::TemplateMissing(template.to_path_buf()));
    }
    fs.copy_dir(template, function_dir)?;
    tracing::info!(
        template = %template.display(),
        target = %function_dir.display(),
        "copied action template"
    );

    let descriptor = paths::action_descriptor_path(function_dir);
    if !fs.exists(&descriptor) {
        return Err(FnkitError::DescriptorMissing(descriptor));
    }
    let replaced = fs.replace_token(
        &descriptor,
        paths::ACTION_NAME_PLACEHOLDER,
        &names::sanitize(canonical),
    )?;
    match replaced {
        0 => tracing::warn!(
            descriptor = %descriptor.display(),
            "action descriptor has no '{}' placeholder",
            paths::ACTION_NAME_PLACEHOLDER
        ),
        1 => {}
        n => tracing::warn!(
            descriptor = %descriptor.display(),
            "replaced {n} '{}' placeholders, expected one",
            paths::ACTION_NAME_PLACEHOLDER
        ),
    }
    Ok(descriptor)
}
