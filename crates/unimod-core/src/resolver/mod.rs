//! Resolution coordinator.
//!
//! Wraps the normalizer with the platform filter, the canonical-namespace
//! short-circuit, implicit-relative handling for bare references, and
//! delegation to the host loader for everything else.

pub mod trace;

use crate::config::{ImplicitRelative, ResolverConfig};
use crate::error::Error;
use crate::loader::{HostLoader, ModuleResolver, Resolution};
use crate::namespace::{
    directory_index, dirname, is_canonical, is_relative, join_within, ParentScope, EMPTY_MODULE,
};
use crate::normalize::normalize_traced;
use crate::platform::{self, PlatformFilter};
use std::rc::Rc;
use trace::steps;
use tracing::debug;

pub use trace::{ResolveTrace, ResolveTraceStep, EXPLAIN_SCHEMA_VERSION};

/// Which entry point a traced resolution goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveMode {
    #[default]
    Async,
    Sync,
}

impl ResolveMode {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Async => "async",
            Self::Sync => "sync",
        }
    }
}

/// Resolves module references into the canonical namespace.
pub struct Resolver {
    host: Rc<dyn HostLoader>,
    config: ResolverConfig,
}

impl Resolver {
    /// Create a resolver delegating unresolved names to `host`.
    pub fn new(host: Rc<dyn HostLoader>, config: ResolverConfig) -> Self {
        Self { host, config }
    }

    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Asynchronous entry point.
    ///
    /// Applies the platform filter, normalizes, and either returns the
    /// canonical id or a pending result from the host loader. A malformed
    /// parent fails here, never inside the pending future.
    pub fn resolve(
        &self,
        reference: &str,
        parent: Option<&str>,
        parent_address: Option<&str>,
    ) -> Result<Resolution, Error> {
        self.resolve_traced(reference, parent, parent_address, &mut ResolveTrace::new())
    }

    /// Synchronous entry point.
    ///
    /// No platform filter and no implicit-relative handling. Delegation
    /// goes to the host's synchronous normalization, which may itself
    /// return `Resolution::Pending`.
    pub fn resolve_sync(&self, reference: &str, parent: Option<&str>) -> Result<Resolution, Error> {
        self.resolve_sync_traced(reference, parent, &mut ResolveTrace::new())
    }

    /// Resolve and wait for the canonical id.
    pub async fn resolve_id(
        &self,
        reference: &str,
        parent: Option<&str>,
        parent_address: Option<&str>,
    ) -> Result<String, Error> {
        self.resolve(reference, parent, parent_address)?
            .into_id()
            .await
    }

    /// Resolve through `mode`'s entry point, returning the steps taken.
    pub fn resolve_with_trace(
        &self,
        reference: &str,
        parent: Option<&str>,
        parent_address: Option<&str>,
        mode: ResolveMode,
    ) -> (Result<Resolution, Error>, ResolveTrace) {
        let mut trace = ResolveTrace::new();
        let result = match mode {
            ResolveMode::Async => self.resolve_traced(reference, parent, parent_address, &mut trace),
            ResolveMode::Sync => self.resolve_sync_traced(reference, parent, &mut trace),
        };
        (result, trace)
    }

    fn resolve_traced(
        &self,
        reference: &str,
        parent: Option<&str>,
        parent_address: Option<&str>,
        trace: &mut ResolveTrace,
    ) -> Result<Resolution, Error> {
        let reference = match platform::filter(reference, &self.config.environment) {
            PlatformFilter::Elide(tag) => {
                debug!(reference, platform = %tag, "eliding module for other platform");
                trace.add_step(
                    ResolveTraceStep::new(
                        steps::PLATFORM_FILTER,
                        true,
                        format!("reference targets {tag}, using empty module"),
                    )
                    .with_input(reference)
                    .with_output(EMPTY_MODULE),
                );
                return Ok(Resolution::Resolved(EMPTY_MODULE.to_string()));
            }
            PlatformFilter::Keep(stripped) if stripped.len() != reference.len() => {
                trace.add_step(
                    ResolveTraceStep::new(steps::PLATFORM_FILTER, true, "platform selector matches")
                        .with_input(reference)
                        .with_output(stripped),
                );
                stripped
            }
            PlatformFilter::Keep(stripped) => {
                trace.success(steps::PLATFORM_FILTER, "no platform selector");
                stripped
            }
        };

        let val = normalize_traced(reference, parent, trace)?;
        if let Some(resolved) = canonical(val.as_str(), trace) {
            return Ok(resolved);
        }

        if let Some(parent) = parent {
            if !is_relative(reference) {
                if let Some(id) = self.implicit_relative(&val, parent, trace) {
                    return Ok(Resolution::Resolved(id));
                }
            }
        }

        debug!(reference, name = %val, "delegating to host loader");
        trace.add_step(
            ResolveTraceStep::new(steps::DELEGATE_HOST, true, "delegated to host normalize")
                .with_input(val.as_str()),
        );
        Ok(Resolution::Pending(
            self.host.normalize(&val, parent, parent_address),
        ))
    }

    fn resolve_sync_traced(
        &self,
        reference: &str,
        parent: Option<&str>,
        trace: &mut ResolveTrace,
    ) -> Result<Resolution, Error> {
        let val = normalize_traced(reference, parent, trace)?;
        if let Some(resolved) = canonical(val.as_str(), trace) {
            return Ok(resolved);
        }

        debug!(reference, name = %val, "delegating to host loader (sync)");
        let resolution = self.host.normalize_sync(&val, parent);
        let mut step =
            ResolveTraceStep::new(steps::DELEGATE_HOST, true, "delegated to host normalize_sync")
                .with_input(val.as_str());
        match resolution.as_resolved() {
            Some(id) => step = step.with_output(id),
            None => step = step.with_note("host returned a pending result"),
        }
        trace.add_step(step);
        Ok(resolution)
    }

    /// Resolve a bare reference against its parent, per the configured policy.
    fn implicit_relative(&self, val: &str, parent: &str, trace: &mut ResolveTrace) -> Option<String> {
        let id = match self.config.implicit_relative {
            ImplicitRelative::Legacy => format!("{}{parent}", dirname(parent)),
            // Assets and unrecognized brace syntax go to the host.
            ImplicitRelative::Sibling if val.starts_with('/') || val.starts_with('{') => {
                return None
            }
            ImplicitRelative::Sibling => {
                // Parents outside the canonical namespace have no subtree to stay in.
                let root = ParentScope::parse(parent).ok()?.prefix();
                directory_index(&join_within(&root, dirname(parent), val))
            }
        };

        trace.add_step(
            ResolveTraceStep::new(
                steps::IMPLICIT_RELATIVE,
                true,
                format!(
                    "resolved against parent ({} policy)",
                    self.config.implicit_relative.as_str()
                ),
            )
            .with_input(val)
            .with_output(id.as_str()),
        );
        Some(id)
    }
}

fn canonical(val: &str, trace: &mut ResolveTrace) -> Option<Resolution> {
    if is_canonical(val) {
        trace.add_step(
            ResolveTraceStep::new(steps::CANONICAL_CHECK, true, "already canonical")
                .with_output(val),
        );
        Some(Resolution::Resolved(val.to_string()))
    } else {
        trace.add_step(
            ResolveTraceStep::new(steps::CANONICAL_CHECK, false, "outside canonical namespace")
                .with_input(val),
        );
        None
    }
}

impl ModuleResolver for Resolver {
    fn normalize(
        &self,
        name: &str,
        parent: Option<&str>,
        parent_address: Option<&str>,
    ) -> Result<Resolution, Error> {
        self.resolve(name, parent, parent_address)
    }

    fn normalize_sync(&self, name: &str, parent: Option<&str>) -> Result<Resolution, Error> {
        self.resolve_sync(name, parent)
    }
}
