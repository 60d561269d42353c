use crate::error::Result;
use crate::fs::Filesystem;
use crate::paths;
use crate::registry::Instance;
use serde::Serialize;
use std::path::Path;

/// A function directory found under an instance's `functions/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionEntry {
    pub instance: String,
    pub name: String,
    pub has_handler: bool,
    pub has_action: bool,
}

/// Function directories of `instance`. A missing `functions/` folder yields
/// an empty list.
pub fn list_functions(
    root: &Path,
    fs: &dyn Filesystem,
    instance: &dyn Instance,
) -> Result<Vec<FunctionEntry>> {
    let functions_dir = paths::functions_dir(root, instance.installation_path());
    if !fs.exists(&functions_dir) {
        return Ok(Vec::new());
    }
    let entries = fs
        .list_directories(&functions_dir)?
        .into_iter()
        .map(|name| {
            let dir = paths::function_dir(&functions_dir, &name);
            FunctionEntry {
                instance: instance.name().to_string(),
                has_handler: fs.exists(&paths::handler_path(&dir)),
                has_action: fs.exists(&paths::action_descriptor_path(&dir)),
                name,
            }
        })
        .collect();
    Ok(entries)
}
