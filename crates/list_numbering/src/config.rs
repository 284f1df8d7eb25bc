//! Configuration for the numbering engine.
//!
//! Defaults suit a browser: decimal markers and forward-only invalidation.
//! Both can be overridden from the environment for debugging.

use css_counter_styles::NumberingStyle;
use std::env;

/// Runtime configuration for [`NumberingEngine`](crate::NumberingEngine).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NumberingConfig {
    /// Marker style for items whose item and list carry no computed style.
    pub default_style: NumberingStyle,
    /// Invalidate a whole list on every change instead of only the items after
    /// the changed one. Only useful for cross-checking the forward invalidation.
    pub full_scope_invalidation: bool,
}

impl NumberingConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `LIST_NUMBERING_DEFAULT_STYLE`: a `list-style-type` keyword (default: `decimal`)
    /// - `LIST_NUMBERING_FULL_INVALIDATION`: set to "1" to invalidate whole lists
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from any variable source, `from_env` being the
    /// process environment.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default_style = lookup("LIST_NUMBERING_DEFAULT_STYLE")
            .and_then(|keyword| {
                let style = NumberingStyle::from_keyword(&keyword);
                if style.is_none() {
                    log::warn!("Ignoring unknown LIST_NUMBERING_DEFAULT_STYLE {keyword:?}");
                }
                style
            })
            .unwrap_or_default();
        let full_scope_invalidation =
            lookup("LIST_NUMBERING_FULL_INVALIDATION").as_deref() == Some("1");
        Self {
            default_style,
            full_scope_invalidation,
        }
    }
}
