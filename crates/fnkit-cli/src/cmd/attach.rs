use crate::prompt::TerminalPrompter;
use anyhow::Context;
use fnkit_core::{
    config::Config,
    fs::OsFilesystem,
    paths,
    registry::Registry,
    workflow::{attach_action, AttachContext, CancelPoint, Outcome},
};
use std::path::Path;

pub fn run(root: &Path) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let registry =
        Registry::from_config(root, &config).context("failed to resolve service instances")?;
    let ctx = AttachContext {
        root,
        services: &config.services,
        registry: &registry,
    };

    let outcome = attach_action(&ctx, &OsFilesystem, &mut TerminalPrompter::default())
        .context("failed to attach action")?;

    match outcome {
        Outcome::Completed(report) => {
            let function_dir = paths::display_relative(root, &report.function_dir);
            if report.renamed() {
                println!(
                    "  renamed: {} -> {}",
                    report.original_name, report.canonical_name
                );
            }
            println!(
                "  created: {}",
                paths::display_relative(root, &report.descriptor)
            );
            println!("\nAttached action '{}' to {function_dir}", report.canonical_name);
        }
        Outcome::Cancelled(CancelPoint::Plugin) => println!("No plugin selected"),
        Outcome::Cancelled(_) => {}
        Outcome::Aborted(abort) => eprintln!("{abort}"),
    }
    Ok(())
}
