//! Standard fallback normalization.
//!
//! Stands in for the host loader's own resolution: relative references are
//! resolved against the parent's directory, everything else passes through.

use crate::error::Error;
use crate::loader::{HostLoader, Resolution};
use crate::namespace::{directory_index, dirname, is_relative, join};
use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;

/// URL-style normalization with no knowledge of the canonical namespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardNormalizer;

impl StandardNormalizer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Resolve `name` against `parent`.
    ///
    /// Relative names without a parent are resolved against the root. A
    /// trailing separator names the directory's index module.
    #[must_use]
    pub fn normalize_name(name: &str, parent: Option<&str>) -> String {
        if is_relative(name) {
            directory_index(&join(parent.map_or("", dirname), name))
        } else {
            name.to_string()
        }
    }
}

impl HostLoader for StandardNormalizer {
    fn normalize(
        &self,
        name: &str,
        parent: Option<&str>,
        _parent_address: Option<&str>,
    ) -> LocalBoxFuture<'static, Result<String, Error>> {
        future::ready(Ok(Self::normalize_name(name, parent))).boxed_local()
    }

    fn normalize_sync(&self, name: &str, parent: Option<&str>) -> Resolution {
        Resolution::Resolved(Self::normalize_name(name, parent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_relative_against_parent() {
        let parent = Some("/_modules_/app/lib/a");
        assert_eq!(
            StandardNormalizer::normalize_name("./b", parent),
            "/_modules_/app/lib/b"
        );
        assert_eq!(
            StandardNormalizer::normalize_name("../b/c", parent),
            "/_modules_/app/b/c"
        );
    }

    #[test]
    fn test_relative_directory_gets_index() {
        let parent = Some("/_modules_/packages/alice/mypkg/lib/index");
        assert_eq!(
            StandardNormalizer::normalize_name("../util/", parent),
            "/_modules_/packages/alice/mypkg/util/index"
        );
        assert_eq!(
            StandardNormalizer::normalize_name("./", parent),
            "/_modules_/packages/alice/mypkg/lib/index"
        );
    }

    #[test]
    fn test_relative_without_parent() {
        assert_eq!(StandardNormalizer::normalize_name("./b", None), "/b");
    }

    #[test]
    fn test_non_relative_passes_through() {
        let parent = Some("/_modules_/app/lib/a");
        assert_eq!(StandardNormalizer::normalize_name("react", parent), "react");
        assert_eq!(
            StandardNormalizer::normalize_name("/packages/x.png", parent),
            "/packages/x.png"
        );
    }

    #[test]
    fn test_async_and_sync_agree() {
        let host = StandardNormalizer::new();
        let parent = Some("/_modules_/packages/alice/mypkg/index");
        let async_id = block_on(host.normalize("./lib/x", parent, None)).unwrap();
        let sync = host.normalize_sync("./lib/x", parent);
        assert_eq!(sync.as_resolved(), Some(async_id.as_str()));
        assert_eq!(async_id, "/_modules_/packages/alice/mypkg/lib/x");
    }
}
