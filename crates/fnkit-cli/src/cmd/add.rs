use crate::prompt::TerminalPrompter;
use anyhow::Context;
use fnkit_core::{
    fs::OsFilesystem,
    paths,
    registry::Registry,
    workflow::{add_function, AddContext, Outcome},
};
use std::path::Path;

pub fn run(root: &Path, function_name: &str, force: bool) -> anyhow::Result<()> {
    let registry = Registry::load(root).context("failed to load service instances")?;
    let ctx = AddContext {
        root,
        registry: &registry,
        force,
    };

    match add_function(&ctx, &OsFilesystem, &mut TerminalPrompter::default(), function_name)? {
        Outcome::Completed(path) => {
            println!("  created: {}", paths::display_relative(root, &path));
        }
        Outcome::Cancelled(_) => {}
        Outcome::Aborted(abort) => eprintln!("{abort}"),
    }
    Ok(())
}
