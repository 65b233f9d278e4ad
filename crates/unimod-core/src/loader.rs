//! Interfaces between the resolver and the host module loader.
//!
//! The host owns registration, caching and instantiation. It hands the
//! resolver a [`HostLoader`] for its own fallback normalization, and calls
//! the resolver through [`ModuleResolver`].

use crate::error::Error;
use crate::namespace::display_name;
use futures::future::LocalBoxFuture;
use futures::FutureExt;

/// Outcome of a resolution call.
///
/// Both entry points may return either variant: a reference that needs the
/// host's own normalization yields `Pending` even from `normalize_sync`.
pub enum Resolution {
    /// Canonical id known without waiting.
    Resolved(String),
    /// Delegated to the host; await the future for the id.
    Pending(LocalBoxFuture<'static, Result<String, Error>>),
}

impl Resolution {
    /// Wrap a host future.
    pub fn pending<F>(fut: F) -> Self
    where
        F: std::future::Future<Output = Result<String, Error>> + 'static,
    {
        Self::Pending(fut.boxed_local())
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// The id, if it is already known.
    #[must_use]
    pub fn as_resolved(&self) -> Option<&str> {
        match self {
            Self::Resolved(id) => Some(id),
            Self::Pending(_) => None,
        }
    }

    /// Wait for the canonical id.
    pub async fn into_id(self) -> Result<String, Error> {
        match self {
            Self::Resolved(id) => Ok(id),
            Self::Pending(fut) => fut.await,
        }
    }
}

impl std::fmt::Debug for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resolved(id) => f.debug_tuple("Resolved").field(id).finish(),
            Self::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// The host loader's own name resolution, used as a fallback.
pub trait HostLoader {
    /// Asynchronous normalization.
    fn normalize(
        &self,
        name: &str,
        parent: Option<&str>,
        parent_address: Option<&str>,
    ) -> LocalBoxFuture<'static, Result<String, Error>>;

    /// Synchronous normalization. May still hand back a pending result.
    fn normalize_sync(&self, name: &str, parent: Option<&str>) -> Resolution;
}

/// A module the host is about to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    /// Canonical id.
    pub name: String,
    /// Address returned by `locate`, if it ran.
    pub address: Option<String>,
}

impl LoadRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: None,
        }
    }

    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

/// Hooks a host loader calls on a registered resolver.
pub trait ModuleResolver {
    /// Asynchronous resolution entry point.
    fn normalize(
        &self,
        name: &str,
        parent: Option<&str>,
        parent_address: Option<&str>,
    ) -> Result<Resolution, Error>;

    /// Synchronous resolution entry point.
    fn normalize_sync(&self, name: &str, parent: Option<&str>) -> Result<Resolution, Error>;

    /// Find the address of a module's source.
    fn locate(&self, load: &LoadRequest) -> Result<String, Error> {
        Err(not_found(&load.name))
    }

    /// Fetch a module's source.
    fn fetch(&self, load: &LoadRequest) -> Result<String, Error> {
        Err(not_found(&load.name))
    }
}

/// The error reported when a canonical id reaches content loading.
#[must_use]
pub fn not_found(name: &str) -> Error {
    Error::ModuleNotFound {
        name: display_name(name).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    struct Passthrough;

    impl ModuleResolver for Passthrough {
        fn normalize(
            &self,
            name: &str,
            _parent: Option<&str>,
            _parent_address: Option<&str>,
        ) -> Result<Resolution, Error> {
            Ok(Resolution::Resolved(name.to_string()))
        }

        fn normalize_sync(&self, name: &str, _parent: Option<&str>) -> Result<Resolution, Error> {
            Ok(Resolution::Resolved(name.to_string()))
        }
    }

    #[test]
    fn test_resolved_into_id() {
        let r = Resolution::Resolved("/_modules_/app/a".to_string());
        assert!(!r.is_pending());
        assert_eq!(r.as_resolved(), Some("/_modules_/app/a"));
        assert_eq!(block_on(r.into_id()).unwrap(), "/_modules_/app/a");
    }

    #[test]
    fn test_pending_into_id() {
        let r = Resolution::pending(async { Ok("/x".to_string()) });
        assert!(r.is_pending());
        assert_eq!(r.as_resolved(), None);
        assert_eq!(format!("{r:?}"), "Pending(..)");
        assert_eq!(block_on(r.into_id()).unwrap(), "/x");
    }

    #[test]
    fn test_default_hooks_report_not_found() {
        let req = LoadRequest::new("/_modules_/app/missing");
        let err = Passthrough.locate(&req).unwrap_err();
        assert_eq!(err.to_string(), "module app/missing doesn't exist");

        let err = Passthrough
            .fetch(&req.with_address("http://localhost/_modules_/app/missing"))
            .unwrap_err();
        assert!(matches!(err, Error::ModuleNotFound { ref name } if name == "app/missing"));
    }
}
