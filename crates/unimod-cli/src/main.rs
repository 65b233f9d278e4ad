#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::uninlined_format_args)]

mod commands;
mod logging;

use clap::{Parser, ValueEnum};
use commands::ResolveArgs;
use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};
use unimod_core::{Environment, ImplicitRelative, ResolveMode, ResolverConfig};

#[derive(Parser, Debug)]
#[command(name = "unimod")]
#[command(author, version, about = "Resolve module references into the canonical module namespace", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Resolver config file (JSON)
    #[arg(long, global = true, value_name = "PATH", env = "UNIMOD_CONFIG")]
    config: Option<PathBuf>,

    /// Runtime(s) this process counts as, for `@server` / `@client` references
    #[arg(long, global = true, value_enum, env = "UNIMOD_PLATFORM")]
    platform: Option<PlatformArg>,

    /// How bare references are resolved against their parent
    #[arg(long, global = true, value_enum)]
    implicit_relative: Option<ImplicitRelativeArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Resolve a module reference to its canonical id
    Resolve {
        #[command(flatten)]
        args: ReferenceArgs,
    },

    /// Show each step taken while resolving a module reference
    Explain {
        #[command(flatten)]
        args: ReferenceArgs,
    },
}

#[derive(clap::Args, Debug)]
struct ReferenceArgs {
    /// Module reference as written in code (e.g. "{alice:pkg}/lib", "/lib/x@server")
    reference: String,

    /// Canonical id of the referencing module
    #[arg(long)]
    parent: Option<String>,

    /// Address of the referencing module
    #[arg(long, value_name = "ADDRESS")]
    parent_address: Option<String>,

    /// Use the synchronous entry point (no platform filter, no implicit-relative)
    #[arg(long)]
    sync: bool,
}

impl ReferenceArgs {
    fn into_resolve_args(self) -> ResolveArgs {
        ResolveArgs {
            reference: self.reference,
            parent: self.parent,
            parent_address: self.parent_address,
            mode: if self.sync {
                ResolveMode::Sync
            } else {
                ResolveMode::Async
            },
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PlatformArg {
    Server,
    Client,
    Both,
    #[value(name = "none")]
    Neither,
}

impl From<PlatformArg> for Environment {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Server => Environment::server(),
            PlatformArg::Client => Environment::client(),
            PlatformArg::Both => Environment::new(true, true),
            PlatformArg::Neither => Environment::new(false, false),
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ImplicitRelativeArg {
    Sibling,
    Legacy,
}

impl From<ImplicitRelativeArg> for ImplicitRelative {
    fn from(arg: ImplicitRelativeArg) -> Self {
        match arg {
            ImplicitRelativeArg::Sibling => ImplicitRelative::Sibling,
            ImplicitRelativeArg::Legacy => ImplicitRelative::Legacy,
        }
    }
}

/// File config first, then flag overrides.
fn build_config(
    path: Option<&Path>,
    platform: Option<PlatformArg>,
    implicit_relative: Option<ImplicitRelativeArg>,
) -> Result<ResolverConfig> {
    let mut config = match path {
        Some(path) => ResolverConfig::load(path).into_diagnostic()?,
        None => ResolverConfig::default(),
    };

    if let Some(platform) = platform {
        config = config.with_environment(platform.into());
    }
    if let Some(policy) = implicit_relative {
        config = config.with_implicit_relative(policy.into());
    }

    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // `version` needs neither logging nor a config file.
    let (args, explain) = match cli.command {
        Commands::Version => return commands::version::run(),
        Commands::Resolve { args } => (args, false),
        Commands::Explain { args } => (args, true),
    };

    logging::init(cli.verbose, cli.json);
    let config = build_config(cli.config.as_deref(), cli.platform, cli.implicit_relative)?;

    if explain {
        commands::explain::run(config, args.into_resolve_args(), cli.json)
    } else {
        commands::resolve::run(config, args.into_resolve_args(), cli.json)
    }
}
