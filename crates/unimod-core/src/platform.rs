//! Platform selectors (`@server` / `@client`).

use crate::config::Environment;

/// Runtime a reference can be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformTag {
    Server,
    Client,
}

impl PlatformTag {
    #[must_use]
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Server => "@server",
            Self::Client => "@client",
        }
    }

    /// Whether `env` runs this platform.
    #[must_use]
    pub fn matches(&self, env: &Environment) -> bool {
        match self {
            Self::Server => env.is_server,
            Self::Client => env.is_client,
        }
    }
}

impl std::fmt::Display for PlatformTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Server => write!(f, "server"),
            Self::Client => write!(f, "client"),
        }
    }
}

/// Split a trailing platform selector off `reference`.
#[must_use]
pub fn split_platform(reference: &str) -> (&str, Option<PlatformTag>) {
    for tag in [PlatformTag::Server, PlatformTag::Client] {
        if let Some(stripped) = reference.strip_suffix(tag.suffix()) {
            return (stripped, Some(tag));
        }
    }
    (reference, None)
}

/// Outcome of the platform filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformFilter<'a> {
    /// Keep resolving with the selector removed.
    Keep(&'a str),
    /// The reference targets another runtime.
    Elide(PlatformTag),
}

/// Apply the platform filter to `reference` for `env`.
#[must_use]
pub fn filter<'a>(reference: &'a str, env: &Environment) -> PlatformFilter<'a> {
    match split_platform(reference) {
        (stripped, Some(tag)) if tag.matches(env) => PlatformFilter::Keep(stripped),
        (_, Some(tag)) => PlatformFilter::Elide(tag),
        (reference, None) => PlatformFilter::Keep(reference),
    }
}
