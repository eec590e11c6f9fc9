//! `beginning` command-line tool.
//!
//! Thin front-end over `beginning-core`: resolves flags against `.beginning.toml`
//! preferences, then calls the core list / plan / scaffold / hook operations.

mod cli_config;
mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "beginning", version, about = "Generate a new Go project from a template")]
#[command(styles = output::clap_styles())]
pub(crate) struct Cli {
    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// List the template types of the active template source
    List {
        /// Read templates from this directory instead of the bundled set
        #[arg(long, env = "BEGINNING_TEMPLATES")]
        templates: Option<PathBuf>,
    },

    /// Show the entries of a template type and where they land
    Info {
        /// Template type, e.g. `service`
        template_type: String,

        /// Read templates from this directory instead of the bundled set
        #[arg(long, env = "BEGINNING_TEMPLATES")]
        templates: Option<PathBuf>,
    },

    /// Generate a project
    Create(CreateArgs),

    /// Write a starter values file
    Init {
        /// Where to write the values file
        #[arg(long, default_value = "values.yaml")]
        path: PathBuf,

        /// Extra value to include (key=value, repeatable)
        #[arg(long)]
        param: Vec<String>,
    },
}

#[derive(Debug, clap::Args)]
pub(crate) struct CreateArgs {
    /// Template type (default: `service`)
    #[arg(short = 't', long = "type")]
    pub template_type: Option<String>,

    /// Go module path, e.g. github.com/acme/orders
    #[arg(short = 'm', long = "module")]
    pub module_name: Option<String>,

    /// Repository name
    #[arg(short = 'r', long = "repo")]
    pub repo_name: Option<String>,

    /// Go toolchain version written into go.mod
    #[arg(short = 'g', long = "go-version")]
    pub go_version: Option<String>,

    /// Output directory (default: ./<repo name>)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Values file (default: values.yaml, ignored when absent)
    #[arg(short = 'v', long = "values")]
    pub values_file: Option<PathBuf>,

    /// Extra template value (key=value, repeatable)
    #[arg(long)]
    pub param: Vec<String>,

    /// Read templates from this directory instead of the bundled set
    #[arg(long, env = "BEGINNING_TEMPLATES")]
    pub templates: Option<PathBuf>,

    /// Do not run post-generation hooks
    #[arg(long)]
    pub skip_hooks: bool,

    /// Print the planned tree without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let directive = if cli.verbose {
        "beginning=debug"
    } else {
        "beginning=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli_config = cli_config::load_cli_config();

    let result = match cli.command {
        Commands::List { templates } => commands::handle_list_command(templates, &cli_config),
        Commands::Info {
            template_type,
            templates,
        } => commands::handle_info_command(&template_type, templates, &cli_config),
        Commands::Create(args) => commands::handle_create_command(args, &cli_config),
        Commands::Init { path, param } => commands::handle_init_command(&path, &param),
    };

    if let Err(e) = result {
        output::error(&e);
        for hint in e.hints() {
            output::hint(hint);
        }
        std::process::exit(1);
    }

    Ok(())
}
