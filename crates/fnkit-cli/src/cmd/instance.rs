use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use fnkit_core::registry::{Instance, Registry};
use std::path::Path;

#[derive(Subcommand)]
pub enum InstanceSubcommand {
    /// List every service instance in the project
    List,
}

pub fn run(root: &Path, subcmd: InstanceSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        InstanceSubcommand::List => list(root, json),
    }
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let registry = Registry::load(root).context("failed to load service instances")?;
    let instances = registry.instances();

    if json {
        let items: Vec<serde_json::Value> = instances
            .iter()
            .map(|i| {
                serde_json::json!({
                    "name": i.name(),
                    "plugin": i.plugin_name(),
                    "installation_path": i.installation_path(),
                })
            })
            .collect();
        print_json(&items)?;
        return Ok(());
    }

    if instances.is_empty() {
        println!("No service instances.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = instances
        .iter()
        .map(|i| {
            vec![
                i.name().to_string(),
                i.plugin_name().to_string(),
                i.installation_path().display().to_string(),
            ]
        })
        .collect();
    print_table(&["NAME", "PLUGIN", "PATH"], rows);
    Ok(())
}
