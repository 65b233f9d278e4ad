use super::{block_on, resolver, ResolveArgs};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use unimod_core::resolver::EXPLAIN_SCHEMA_VERSION;
use unimod_core::{Error, ResolveTraceStep, ResolverConfig};

/// JSON output of `unimod explain --json`.
#[derive(Debug, Serialize)]
struct ExplainOutput {
    schema_version: u32,
    reference: String,
    parent: Option<String>,
    mode: &'static str,
    platform: Platform,
    implicit_relative: &'static str,
    resolved: Option<String>,
    error_code: Option<&'static str>,
    error_message: Option<String>,
    trace: Vec<ResolveTraceStep>,
}

#[derive(Debug, Serialize)]
struct Platform {
    is_server: bool,
    is_client: bool,
}

pub fn run(config: ResolverConfig, args: ResolveArgs, json: bool) -> Result<()> {
    let platform = Platform {
        is_server: config.environment.is_server,
        is_client: config.environment.is_client,
    };
    let implicit_relative = config.implicit_relative.as_str();
    let resolver = resolver(config)?;

    let (resolution, trace) = resolver.resolve_with_trace(
        &args.reference,
        args.parent.as_deref(),
        args.parent_address.as_deref(),
        args.mode,
    );

    let outcome: Result<String, Error> = match resolution {
        Ok(resolution) => block_on(resolution.into_id())?,
        Err(err) => Err(err),
    };

    let output = ExplainOutput {
        schema_version: EXPLAIN_SCHEMA_VERSION,
        reference: args.reference,
        parent: args.parent,
        mode: args.mode.as_str(),
        platform,
        implicit_relative,
        error_code: outcome.as_ref().err().map(Error::code),
        error_message: outcome.as_ref().err().map(ToString::to_string),
        resolved: outcome.ok(),
        trace: trace.steps,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        print_explain_human(&output);
    }

    if output.resolved.is_none() {
        std::process::exit(1);
    }
    Ok(())
}

/// Print the explain result in human-readable format.
fn print_explain_human(result: &ExplainOutput) {
    println!("Reference: {}", result.reference);
    println!("Parent: {}", result.parent.as_deref().unwrap_or("(none)"));
    println!(
        "Mode: {} (server: {}, client: {}, implicit-relative: {})",
        result.mode, result.platform.is_server, result.platform.is_client, result.implicit_relative
    );
    println!();

    if let Some(ref resolved) = result.resolved {
        println!("Resolved: {resolved}");
    } else {
        println!("Status: UNRESOLVED");
        if let Some(code) = result.error_code {
            println!("Error: {code}");
        }
        if let Some(ref msg) = result.error_message {
            println!("Message: {msg}");
        }
    }
    println!();

    println!("Resolution trace:");
    for (i, step) in result.trace.iter().enumerate() {
        let status = if step.ok { "OK" } else { "--" };
        println!("  {}. [{}] {}: {}", i + 1, status, step.step, step.detail);

        if let Some(ref input) = step.input {
            println!("      in: {input}");
        }
        if let Some(ref output) = step.output {
            println!("      out: {output}");
        }
        if let Some(rule) = step.rule {
            println!("      rule: {rule}");
        }
        for note in &step.notes {
            println!("      note: {note}");
        }
    }
}
