use anyhow::Context;
use fnkit_core::{config::Config, io, paths};
use std::path::Path;

pub fn run(root: &Path) -> anyhow::Result<()> {
    let project_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string());

    println!("Initializing fnkit in: {}", root.display());

    let dir = paths::fnkit_dir(root);
    io::ensure_dir(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    if paths::config_path(root).exists() {
        println!("  exists:  {}", paths::CONFIG_FILE);
    } else {
        Config::new(&project_name)
            .save(root)
            .context("failed to write config.yaml")?;
        println!("  created: {}", paths::CONFIG_FILE);
    }

    println!("\nNext: register plugins and instances in {}", paths::CONFIG_FILE);
    Ok(())
}
