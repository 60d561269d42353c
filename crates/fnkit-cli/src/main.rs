mod cmd;
mod output;
mod prompt;
mod root;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, function::FunctionSubcommand, instance::InstanceSubcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "fnkit",
    about = "Scaffold service functions and attach actions to them",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .fnkit/ or .git/)
    #[arg(long, global = true, env = "FNKIT_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .fnkit/config.yaml in the current project
    Init,

    /// Attach an action to an existing function (interactive)
    #[command(name = "function:attach-action")]
    AttachAction,

    /// Add a function file to a service instance
    #[command(name = "functions:add")]
    FunctionsAdd {
        /// Name of the function to be added
        #[arg(value_name = "FUNCTION_NAME")]
        function_name: String,

        /// Overwrite an existing function file
        #[arg(long)]
        force: bool,
    },

    /// Inspect service instances
    Instance {
        #[command(subcommand)]
        subcommand: InstanceSubcommand,
    },

    /// Inspect function directories
    Function {
        #[command(subcommand)]
        subcommand: FunctionSubcommand,
    },

    /// Validate the project configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG replaces the default level entirely when set.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::AttachAction => cmd::attach::run(&root),
        Commands::FunctionsAdd {
            function_name,
            force,
        } => cmd::add::run(&root, &function_name, force),
        Commands::Instance { subcommand } => cmd::instance::run(&root, subcommand, cli.json),
        Commands::Function { subcommand } => cmd::function::run(&root, subcommand, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
