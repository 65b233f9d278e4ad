//! Resolution tracing for the explain command.
//!
//! Records each decision the resolver makes so a user can see why a
//! reference ended up at a particular canonical id.

use serde::Serialize;

/// Schema version for the explain output format.
/// Bump when the trace structure changes incompatibly.
pub const EXPLAIN_SCHEMA_VERSION: u32 = 1;

/// A single step in the resolution trace.
#[derive(Debug, Clone, Serialize)]
pub struct ResolveTraceStep {
    /// Step name (e.g., "platform_filter", "rewrite_braces")
    pub step: &'static str,
    /// Whether this step succeeded
    pub ok: bool,
    /// Human-readable description of what happened
    pub detail: String,
    /// Value going into this step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    /// Value coming out of this step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Rewrite rule applied, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl ResolveTraceStep {
    /// Create a new trace step.
    pub fn new(step: &'static str, ok: bool, detail: impl Into<String>) -> Self {
        Self {
            step,
            ok,
            detail: detail.into(),
            input: None,
            output: None,
            rule: None,
            notes: Vec::new(),
        }
    }

    /// Set the input for this step.
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Set the output for this step.
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Set the rewrite rule for this step.
    pub fn with_rule(mut self, rule: &'static str) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Add a note to this step.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

/// Complete resolution trace.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolveTrace {
    /// Ordered list of resolution steps
    pub steps: Vec<ResolveTraceStep>,
}

impl ResolveTrace {
    /// Create a new empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a step to the trace.
    pub fn add_step(&mut self, step: ResolveTraceStep) {
        self.steps.push(step);
    }

    /// Add a simple success step.
    pub fn success(&mut self, step: &'static str, detail: impl Into<String>) {
        self.steps.push(ResolveTraceStep::new(step, true, detail));
    }

    /// Add a simple failure step.
    pub fn failure(&mut self, step: &'static str, detail: impl Into<String>) {
        self.steps.push(ResolveTraceStep::new(step, false, detail));
    }

    /// Names of the recorded steps, in order.
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.step).collect()
    }
}

/// Step names used in resolution tracing.
pub mod steps {
    pub const PLATFORM_FILTER: &str = "platform_filter";
    pub const STRIP_IMPORT_MARKER: &str = "strip_import_marker";
    pub const CLASSIFY_REFERENCE: &str = "classify_reference";
    pub const PARSE_PARENT: &str = "parse_parent";
    pub const NORMALIZE_ABSOLUTE: &str = "normalize_absolute";
    pub const REWRITE_BRACES: &str = "rewrite_braces";
    pub const CANONICAL_CHECK: &str = "canonical_check";
    pub const IMPLICIT_RELATIVE: &str = "implicit_relative";
    pub const DELEGATE_HOST: &str = "delegate_host";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_builder() {
        let mut trace = ResolveTrace::new();
        trace.success(steps::PLATFORM_FILTER, "no platform selector");
        trace.add_step(
            ResolveTraceStep::new(steps::REWRITE_BRACES, true, "applied rule")
                .with_input("{a:b}")
                .with_output("/_modules_/packages/a/b/index")
                .with_rule("package_index")
                .with_note("author: a"),
        );
        trace.failure(steps::PARSE_PARENT, "bad parent");

        assert_eq!(
            trace.step_names(),
            vec![
                steps::PLATFORM_FILTER,
                steps::REWRITE_BRACES,
                steps::PARSE_PARENT
            ]
        );
        assert!(!trace.steps[2].ok);
        assert_eq!(trace.steps[1].rule, Some("package_index"));
    }

    #[test]
    fn test_trace_serializes_without_empty_fields() {
        let mut trace = ResolveTrace::new();
        trace.success(steps::CANONICAL_CHECK, "already canonical");

        let json = serde_json::to_value(&trace).unwrap();
        let step = &json["steps"][0];
        assert_eq!(step["step"], "canonical_check");
        assert_eq!(step["ok"], true);
        assert!(step.get("input").is_none());
        assert!(step.get("notes").is_none());
    }
}
