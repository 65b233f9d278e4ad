//! Ordered rewrite rules for package-brace references.
//!
//! Every rule whose pattern matches is applied, in declaration order, to
//! the output of the previous rule. A reference can therefore pick up
//! several rewrites (`{a:b}/` gets both `package_path` and
//! `directory_index`).

use crate::namespace::{APP_PREFIX, PACKAGES_PREFIX};
use regex_lite::Regex;
use std::sync::OnceLock;

/// Author or package name inside braces.
const NAME: &str = "[A-Za-z0-9_.-]";

/// A single `(pattern, replacement)` rewrite.
#[derive(Debug)]
pub struct RewriteRule {
    /// Stable rule name, shown in traces.
    pub name: &'static str,
    pattern: Regex,
    replacement: String,
}

impl RewriteRule {
    /// Build a rule from a pattern known at compile time.
    ///
    /// Panics if `pattern` is not a valid regex.
    fn new(name: &'static str, pattern: &str, replacement: String) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("brace rule pattern must compile"),
            replacement,
        }
    }

    /// Rewrite `input`, or `None` when the pattern does not match.
    #[must_use]
    pub fn apply(&self, input: &str) -> Option<String> {
        if self.pattern.is_match(input) {
            Some(
                self.pattern
                    .replace(input, self.replacement.as_str())
                    .into_owned(),
            )
        } else {
            None
        }
    }
}

/// The brace rewrite pipeline, in application order.
pub fn brace_rules() -> &'static [RewriteRule] {
    static RULES: OnceLock<Vec<RewriteRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            // `{}/path` is the application itself.
            RewriteRule::new("app_braces", r"^\{\}/", format!("{APP_PREFIX}/")),
            // `{author:package}` alone is the package's index module.
            RewriteRule::new(
                "package_index",
                &format!(r"^\{{({NAME}*?):?({NAME}+)\}}$"),
                format!("{PACKAGES_PREFIX}/${{1}}/${{2}}/index"),
            ),
            // `{author:package}/path` is a module inside the package.
            RewriteRule::new(
                "package_path",
                &format!(r"^\{{({NAME}*?):?({NAME}+)\}}"),
                format!("{PACKAGES_PREFIX}/${{1}}/${{2}}"),
            ),
            RewriteRule::new("directory_index", r"/$", "/index".to_string()),
        ]
    })
}
