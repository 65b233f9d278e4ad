//! The canonical module namespace.
//!
//! Every canonical id lives under `/_modules_/` and belongs to one of two
//! subtrees:
//!
//! - `/_modules_/app/<path>` for the application tree
//! - `/_modules_/packages/<author>/<package>/<path>` for package trees
//!
//! Paths under `/packages/` are static assets and are never rewritten.

use crate::error::Error;

/// Path segment marking the canonical tree.
pub const NAMESPACE_ROOT: &str = "_modules_";

/// Prefix shared by every canonical id.
pub const NAMESPACE_PREFIX: &str = "/_modules_/";

/// Prefix of the application subtree (no trailing separator).
pub const APP_PREFIX: &str = "/_modules_/app";

/// Prefix of the package subtrees (no trailing separator).
pub const PACKAGES_PREFIX: &str = "/_modules_/packages";

/// Prefix of pass-through asset paths.
pub const ASSETS_PREFIX: &str = "/packages/";

/// Id of the pre-registered module with no exports.
pub const EMPTY_MODULE: &str = "emptyModule";

/// Whether `id` is already in the canonical namespace.
#[must_use]
pub fn is_canonical(id: &str) -> bool {
    id.starts_with(NAMESPACE_PREFIX)
}

/// Whether `reference` points at a static asset.
#[must_use]
pub fn is_asset(reference: &str) -> bool {
    reference.starts_with(ASSETS_PREFIX)
}

/// Whether `reference` is written relative to its parent (`./` or `../`).
#[must_use]
pub fn is_relative(reference: &str) -> bool {
    reference.starts_with("./") || reference.starts_with("../")
}

/// Prefix of the subtree owned by `author`'s `package`.
#[must_use]
pub fn package_prefix(author: &str, package: &str) -> String {
    format!("{PACKAGES_PREFIX}/{author}/{package}")
}

/// Rewrite a trailing separator to point at the directory's index module.
#[must_use]
pub fn directory_index(path: &str) -> String {
    match path.strip_suffix('/') {
        Some(dir) => format!("{dir}/index"),
        None => path.to_string(),
    }
}

/// Strip everything up to and including the namespace prefix, for display.
///
/// `/_modules_/app/foo` becomes `app/foo`. Names outside the namespace
/// are returned unchanged.
#[must_use]
pub fn display_name(id: &str) -> &str {
    match id.find(NAMESPACE_PREFIX) {
        Some(idx) => &id[idx + NAMESPACE_PREFIX.len()..],
        None => id,
    }
}

/// Everything in `id` before its last `/`.
#[must_use]
pub fn dirname(id: &str) -> &str {
    match id.rfind('/') {
        Some(idx) => &id[..idx],
        None => "",
    }
}

/// Join `reference` onto the directory `dir`, collapsing `.` and `..`.
///
/// `..` never climbs above the first segment of `dir`.
#[must_use]
pub fn join(dir: &str, reference: &str) -> String {
    let mut segments: Vec<&str> = dir.split('/').collect();
    for segment in reference.split('/') {
        match segment {
            "." => {}
            ".." => {
                if segments.len() > 1 {
                    segments.pop();
                }
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Join `reference` onto `dir` without leaving the subtree rooted at `root`.
///
/// `dir` must lie under `root`. `..` stops at `root`, and empty segments
/// collapse except for a trailing one, which is kept so the result can be
/// passed to [`directory_index`].
#[must_use]
pub fn join_within(root: &str, dir: &str, reference: &str) -> String {
    let base = dir.strip_prefix(root).unwrap_or_default();
    let mut segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();

    let mut parts = reference.split('/').peekable();
    while let Some(segment) = parts.next() {
        match segment {
            "." => {}
            ".." => {
                segments.pop();
            }
            "" if parts.peek().is_some() => {}
            other => segments.push(other),
        }
    }

    let mut out = root.to_string();
    for segment in segments {
        out.push('/');
        out.push_str(segment);
    }
    out
}

/// The subtree a parent module belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentScope<'a> {
    /// The application tree.
    App,
    /// A package tree.
    Package { author: &'a str, package: &'a str },
}

impl<'a> ParentScope<'a> {
    /// Determine the subtree of a canonical parent name.
    ///
    /// The parent is split on `/`: segment 1 must be the namespace root and
    /// segment 2 is the subtree marker. Package parents carry the author and
    /// package name in segments 3 and 4.
    pub fn parse(parent: &'a str) -> Result<Self, Error> {
        let mut segments = parent.split('/');

        if segments.nth(1) != Some(NAMESPACE_ROOT) {
            return Err(Error::InvalidParent {
                parent: parent.to_string(),
            });
        }

        match segments.next() {
            Some("app") => Ok(Self::App),
            Some("packages") => match (segments.next(), segments.next()) {
                (Some(author), Some(package)) => Ok(Self::Package { author, package }),
                _ => Err(Error::UnresolvableParent {
                    parent: parent.to_string(),
                }),
            },
            _ => Err(Error::UnresolvableParent {
                parent: parent.to_string(),
            }),
        }
    }

    /// Canonical prefix of this subtree, without a trailing separator.
    #[must_use]
    pub fn prefix(&self) -> String {
        match self {
            Self::App => APP_PREFIX.to_string(),
            Self::Package { author, package } => package_prefix(author, package),
        }
    }
}
