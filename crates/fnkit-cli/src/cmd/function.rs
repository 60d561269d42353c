use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use fnkit_core::{
    fs::OsFilesystem,
    inventory::{list_functions, FunctionEntry},
    registry::Registry,
    FnkitError,
};
use std::path::Path;

#[derive(Subcommand)]
pub enum FunctionSubcommand {
    /// List function directories and whether they have a handler and action
    List {
        /// Only this instance
        #[arg(long)]
        instance: Option<String>,
    },
}

pub fn run(root: &Path, subcmd: FunctionSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        FunctionSubcommand::List { instance } => list(root, instance.as_deref(), json),
    }
}

fn list(root: &Path, only: Option<&str>, json: bool) -> anyhow::Result<()> {
    let registry = Registry::load(root).context("failed to load service instances")?;

    let instances: Vec<_> = match only {
        Some(name) => vec![registry
            .instance_by_name(name)
            .ok_or_else(|| FnkitError::InstanceNotFound(name.to_string()))?],
        None => registry.instances().iter().collect(),
    };

    let mut entries: Vec<FunctionEntry> = Vec::new();
    for inst in instances {
        entries.extend(
            list_functions(root, &OsFilesystem, inst)
                .with_context(|| format!("failed to list functions of '{}'", inst.name))?,
        );
    }

    if json {
        print_json(&entries)?;
        return Ok(());
    }

    if entries.is_empty() {
        println!("No functions.");
        return Ok(());
    }

    let mark = |b: bool| String::from(if b { "yes" } else { "no" });
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| {
            vec![
                e.instance.clone(),
                e.name.clone(),
                mark(e.has_handler),
                mark(e.has_action),
            ]
        })
        .collect();
    print_table(&["INSTANCE", "FUNCTION", "HANDLER", "ACTION"], rows);
    Ok(())
}
