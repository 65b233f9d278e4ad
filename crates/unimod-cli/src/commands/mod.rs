pub mod explain;
pub mod resolve;
pub mod version;

use miette::{IntoDiagnostic, Result};
use std::future::Future;
use std::rc::Rc;
use unimod_core::bootstrap::install;
use unimod_core::{ModuleRegistry, ResolveMode, Resolver, ResolverConfig};

/// A reference to resolve, as given on the command line.
#[derive(Debug, Clone)]
pub struct ResolveArgs {
    pub reference: String,
    pub parent: Option<String>,
    pub parent_address: Option<String>,
    pub mode: ResolveMode,
}

/// Install a resolver into a fresh registry.
pub fn resolver(config: ResolverConfig) -> Result<Rc<Resolver>> {
    let registry = ModuleRegistry::new();
    install(&registry, config).into_diagnostic()
}

/// Drive a pending resolution to completion on a current-thread runtime.
pub fn block_on<F: Future>(fut: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .into_diagnostic()?;
    Ok(runtime.block_on(fut))
}
