//! Wires the resolver into a [`ModuleRegistry`].

use crate::config::ResolverConfig;
use crate::error::Error;
use crate::host::StandardNormalizer;
use crate::namespace::{EMPTY_MODULE, NAMESPACE_PREFIX};
use crate::registry::{Module, ModuleRegistry};
use crate::resolver::Resolver;
use std::rc::Rc;
use tracing::debug;

/// Register a resolver with `registry`.
///
/// - the resolver is registered as a loader under `config.loader_name`
/// - `emptyModule` is registered with no exports
/// - every id under `/_modules_/` is routed to the resolver with
///   `config.format`
pub fn install(registry: &ModuleRegistry, config: ResolverConfig) -> Result<Rc<Resolver>, Error> {
    let loader_name = config.loader_name.clone();
    let format = config.format;

    let resolver = Rc::new(Resolver::new(Rc::new(StandardNormalizer::new()), config));

    registry.register_loader(loader_name.as_str(), resolver.clone());
    registry.register_module(EMPTY_MODULE, Module::Empty);
    registry.configure_routing(&format!("{NAMESPACE_PREFIX}*"), loader_name.as_str(), format)?;

    debug!(loader = %loader_name, format = format.as_str(), "module resolver installed");
    Ok(resolver)
}
