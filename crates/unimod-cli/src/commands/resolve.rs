use super::{block_on, resolver, ResolveArgs};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tracing::debug;
use unimod_core::version::OUTPUT_SCHEMA_VERSION;
use unimod_core::{Error, ResolveMode, ResolverConfig};

/// JSON output of `unimod resolve --json`.
#[derive(Debug, Serialize)]
struct ResolveOutput {
    schema_version: u32,
    reference: String,
    parent: Option<String>,
    mode: &'static str,
    status: &'static str,
    resolved: Option<String>,
    /// Whether the host loader produced the id.
    delegated: bool,
    error_code: Option<&'static str>,
    error_message: Option<String>,
}

pub fn run(config: ResolverConfig, args: ResolveArgs, json: bool) -> Result<()> {
    let resolver = resolver(config)?;

    let resolution = match args.mode {
        ResolveMode::Async => resolver.resolve(
            &args.reference,
            args.parent.as_deref(),
            args.parent_address.as_deref(),
        ),
        ResolveMode::Sync => resolver.resolve_sync(&args.reference, args.parent.as_deref()),
    };

    let (delegated, outcome): (bool, Result<String, Error>) = match resolution {
        Ok(resolution) => {
            let delegated = resolution.is_pending();
            (delegated, block_on(resolution.into_id())?)
        }
        Err(err) => (false, Err(err)),
    };
    debug!(reference = %args.reference, delegated, "resolution finished");

    if json {
        let failed = outcome.is_err();
        let output = ResolveOutput {
            schema_version: OUTPUT_SCHEMA_VERSION,
            reference: args.reference,
            parent: args.parent,
            mode: args.mode.as_str(),
            status: if failed { "error" } else { "resolved" },
            error_code: outcome.as_ref().err().map(Error::code),
            error_message: outcome.as_ref().err().map(ToString::to_string),
            resolved: outcome.ok(),
            delegated,
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
        if failed {
            std::process::exit(1);
        }
        return Ok(());
    }

    let id = outcome.into_diagnostic()?;
    println!("{id}");
    Ok(())
}
