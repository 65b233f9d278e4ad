//! In-memory module registry.
//!
//! A minimal host: modules registered up front by key, named loaders, and
//! routing rules that send matching ids to a loader. It never fetches or
//! evaluates code itself.

use crate::config::ModuleFormat;
use crate::error::Error;
use crate::loader::{not_found, LoadRequest, ModuleResolver};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::debug;

/// A registered module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Module {
    /// No exports. Used for the empty-module sentinel.
    Empty,
    /// Export names of an already-instantiated module.
    Namespace(Vec<String>),
    /// Source handed back by a loader's `fetch` hook.
    Source(String),
}

/// Sends ids matching `pattern` to `loader`.
#[derive(Debug, Clone)]
pub struct LoaderRoute {
    pub pattern: String,
    matcher: glob::Pattern,
    pub loader: String,
    pub format: ModuleFormat,
}

impl LoaderRoute {
    #[must_use]
    pub fn matches(&self, id: &str) -> bool {
        self.matcher.matches(id)
    }
}

/// Module registry with loader routing.
#[derive(Default)]
pub struct ModuleRegistry {
    modules: RefCell<HashMap<String, Module>>,
    loaders: RefCell<HashMap<String, Rc<dyn ModuleResolver>>>,
    routes: RefCell<Vec<LoaderRoute>>,
}

impl ModuleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `module` under `key`, replacing any previous entry.
    pub fn register_module(&self, key: impl Into<String>, module: Module) {
        let key = key.into();
        debug!(key = %key, "registered module");
        self.modules.borrow_mut().insert(key, module);
    }

    /// Register a resolver as a named loader.
    pub fn register_loader(&self, name: impl Into<String>, loader: Rc<dyn ModuleResolver>) {
        let name = name.into();
        debug!(loader = %name, "registered loader");
        self.loaders.borrow_mut().insert(name, loader);
    }

    /// Route ids matching the glob `pattern` to `loader` with `format`.
    ///
    /// When several routes match an id, the most recently configured wins.
    pub fn configure_routing(
        &self,
        pattern: &str,
        loader: impl Into<String>,
        format: ModuleFormat,
    ) -> Result<(), Error> {
        let matcher = glob::Pattern::new(pattern)
            .map_err(|e| Error::other(format!("invalid loader pattern {pattern}: {e}")))?;
        self.routes.borrow_mut().push(LoaderRoute {
            pattern: pattern.to_string(),
            matcher,
            loader: loader.into(),
            format,
        });
        Ok(())
    }

    /// The route responsible for `id`, if any.
    #[must_use]
    pub fn route_for(&self, id: &str) -> Option<LoaderRoute> {
        self.routes
            .borrow()
            .iter()
            .rev()
            .find(|route| route.matches(id))
            .cloned()
    }

    /// A registered module, if present.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Module> {
        self.modules.borrow().get(id).cloned()
    }

    #[must_use]
    pub fn has_loader(&self, name: &str) -> bool {
        self.loaders.borrow().contains_key(name)
    }

    /// A registered loader, if present.
    #[must_use]
    pub fn loader(&self, name: &str) -> Option<Rc<dyn ModuleResolver>> {
        self.loaders.borrow().get(name).cloned()
    }

    /// Load `id`: registered modules are returned directly, anything else
    /// goes through its route's loader hooks.
    pub fn import(&self, id: &str) -> Result<Module, Error> {
        if let Some(module) = self.get(id) {
            return Ok(module);
        }

        let route = self.route_for(id).ok_or_else(|| not_found(id))?;
        let loader = self
            .loader(&route.loader)
            .ok_or_else(|| Error::other(format!("loader {} is not registered", route.loader)))?;

        debug!(id, loader = %route.loader, format = route.format.as_str(), "loading through loader hooks");
        let request = LoadRequest::new(id);
        let address = loader.locate(&request)?;
        let source = loader.fetch(&request.with_address(address))?;
        Ok(Module::Source(source))
    }
}
