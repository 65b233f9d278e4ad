//! Name normalizer.
//!
//! Maps a module reference as written by calling code, plus the canonical
//! name of the referencing module, onto the canonical namespace:
//!
//! - Absolute paths (`/lib/x`) land in the parent's subtree, or in the
//!   application tree when there is no parent.
//! - Package-brace references (`{author:package}/path`, `{}/path`) are
//!   rewritten by the ordered rules in [`rules`].
//! - Anything else (relative paths, bare names) comes back unchanged.
//!
//! Pure and deterministic. The only failure is a malformed parent.

pub mod rules;

use crate::error::Error;
use crate::namespace::{directory_index, is_asset, is_canonical, ParentScope, APP_PREFIX};
use crate::resolver::trace::{steps, ResolveTrace, ResolveTraceStep};
use rules::brace_rules;
use tracing::trace;

/// Suffix that lets `name.import` stand for `name`.
pub const IMPORT_MARKER: &str = ".import";

/// Remove a trailing import-compatibility marker.
#[must_use]
pub fn strip_import_marker(reference: &str) -> &str {
    reference.strip_suffix(IMPORT_MARKER).unwrap_or(reference)
}

/// Normalize `reference` relative to the optional canonical `parent`.
pub fn normalize(reference: &str, parent: Option<&str>) -> Result<String, Error> {
    normalize_traced(reference, parent, &mut ResolveTrace::new())
}

/// Normalize `reference`, recording each decision in `trace`.
pub fn normalize_traced(
    reference: &str,
    parent: Option<&str>,
    trace: &mut ResolveTrace,
) -> Result<String, Error> {
    let stripped = strip_import_marker(reference);
    if stripped.len() != reference.len() {
        trace.add_step(
            ResolveTraceStep::new(steps::STRIP_IMPORT_MARKER, true, "removed import marker")
                .with_input(reference)
                .with_output(stripped),
        );
    }

    if stripped.starts_with('/') {
        normalize_absolute(stripped, parent, trace)
    } else if stripped.starts_with('{') {
        Ok(rewrite_braces(stripped, trace))
    } else {
        trace.success(
            steps::CLASSIFY_REFERENCE,
            "relative or bare reference, left unchanged",
        );
        Ok(stripped.to_string())
    }
}

fn normalize_absolute(
    reference: &str,
    parent: Option<&str>,
    trace: &mut ResolveTrace,
) -> Result<String, Error> {
    if is_canonical(reference) || is_asset(reference) {
        trace.success(
            steps::CLASSIFY_REFERENCE,
            "absolute reference already canonical or an asset, left unchanged",
        );
        return Ok(reference.to_string());
    }

    trace.success(steps::CLASSIFY_REFERENCE, "absolute reference");
    let path = directory_index(reference);

    let Some(parent) = parent else {
        let id = format!("{APP_PREFIX}{path}");
        trace.add_step(
            ResolveTraceStep::new(steps::NORMALIZE_ABSOLUTE, true, "no parent, using app tree")
                .with_input(reference)
                .with_output(id.as_str()),
        );
        return Ok(id);
    };

    let scope = match ParentScope::parse(parent) {
        Ok(scope) => scope,
        Err(err) => {
            trace.add_step(
                ResolveTraceStep::new(steps::PARSE_PARENT, false, err.to_string())
                    .with_input(parent),
            );
            return Err(err);
        }
    };

    let detail = match scope {
        ParentScope::App => "parent is in the app tree".to_string(),
        ParentScope::Package { author, package } => {
            format!("parent is in package {author}:{package}")
        }
    };
    trace.add_step(ResolveTraceStep::new(steps::PARSE_PARENT, true, detail).with_input(parent));

    let id = format!("{}{path}", scope.prefix());
    trace!(reference, parent, id = %id, "normalized absolute reference");
    trace.add_step(
        ResolveTraceStep::new(steps::NORMALIZE_ABSOLUTE, true, "prefixed with parent subtree")
            .with_input(reference)
            .with_output(id.as_str()),
    );
    Ok(id)
}

fn rewrite_braces(reference: &str, trace: &mut ResolveTrace) -> String {
    trace.success(steps::CLASSIFY_REFERENCE, "package-brace reference");

    let mut current = reference.to_string();
    for rule in brace_rules() {
        if let Some(next) = rule.apply(&current) {
            trace.add_step(
                ResolveTraceStep::new(steps::REWRITE_BRACES, true, "applied rewrite rule")
                    .with_input(current.as_str())
                    .with_output(next.as_str())
                    .with_rule(rule.name),
            );
            current = next;
        }
    }

    trace!(reference, id = %current, "rewrote brace reference");
    current
}
