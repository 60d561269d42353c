//! `functions:add`: scaffold a single-file function in a chosen instance.

use super::{Abort, CancelPoint, Outcome};
use crate::error::{FnkitError, Result};
use crate::fs::Filesystem;
use crate::names;
use crate::paths;
use crate::prompt::{Choice, Prompter};
use crate::registry::{Instance, Registry};
use std::path::{Path, PathBuf};

/// Body written for every new function file.
pub const FUNCTION_TEMPLATE: &str = r#"const handler = async (req, res) => {
  const { input } = req.body || {};

  return res.status(200).json({
    status: true,
    message: "Hello from the function!",
    input,
  });
};

module.exports = handler;
"#;

pub struct AddContext<'a> {
    pub root: &'a Path,
    pub registry: &'a Registry,
    /// Overwrite an existing function file.
    pub force: bool,
}

/// Pick an instance and write `<instance>/functions/<sanitized-name>.js`.
/// Returns the path of the written file.
pub fn add_function(
    ctx: &AddContext<'_>,
    fs: &dyn Filesystem,
    prompter: &mut dyn Prompter,
    function_name: &str,
) -> Result<Outcome<PathBuf>> {
    let name = names::sanitize(function_name);
    if name.is_empty() {
        return Err(FnkitError::InvalidFunctionName(function_name.to_string()));
    }

    let instances = ctx.registry.instances();
    if instances.is_empty() {
        return Ok(Outcome::Aborted(Abort::NoProjectInstances));
    }

    let choices: Vec<Choice> = instances
        .iter()
        .map(|i| Choice::new(i.name()).with_description(format!("Select {} instance", i.name())))
        .collect();
    let Some(idx) = prompter.select("Select an instance", &choices)? else {
        return Ok(Outcome::Cancelled(CancelPoint::Instance));
    };
    let instance = &instances[idx];

    let functions_dir = paths::functions_dir(ctx.root, instance.installation_path());
    let path = paths::function_file(&functions_dir, &name);
    if fs.exists(&path) && !ctx.force {
        return Err(FnkitError::FunctionExists(path));
    }
    fs.write_file(&path, FUNCTION_TEMPLATE.as_bytes())?;
    tracing::info!(instance = instance.name(), path = %path.display(), "wrote function file");
    Ok(Outcome::Completed(path))
}
