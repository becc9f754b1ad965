//! Behavior configuration
//!
//! The JSON shape is `{ selector?, variablesOnNode?, initialStyle? }`; every
//! field is optional.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::BoopError;
use crate::result::Result;

/// Style payload keyed by property name.
pub type StyleMap = BTreeMap<String, String>;

/// Configuration for one attached tilt behavior
///
/// # Examples
///
/// ```
/// use boop_core::BoopConfig;
///
/// let config = BoopConfig::from_json(r#"{ "selector": ".card", "variablesOnNode": true }"#)?;
/// assert_eq!(config.selector(), Some(".card"));
/// assert!(config.variables_on_node);
/// assert!(config.initial_style.is_none());
/// # Ok::<(), boop_core::BoopError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoopConfig {
    /// Locator for the descendant to rotate; `None` rotates the bound element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    /// Write rotation variables onto the bound element instead of the target
    pub variables_on_node: bool,
    /// Replaces the default 3D style payload when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_style: Option<StyleMap>,
}

impl BoopConfig {
    /// Configuration that rotates the bound element with the default style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`BoopError::InvalidConfig`] if the document is not valid JSON or
    /// a field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| BoopError::invalid_config(e.to_string()))
    }

    #[must_use]
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    #[must_use]
    pub const fn with_variables_on_node(mut self, variables_on_node: bool) -> Self {
        self.variables_on_node = variables_on_node;
        self
    }

    #[must_use]
    pub fn with_initial_style<K, V>(mut self, style: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.initial_style = Some(
            style
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// The effective selector: blank strings count as absent.
    ///
    /// ```
    /// # use boop_core::BoopConfig;
    /// assert_eq!(BoopConfig::new().with_selector("  ").selector(), None);
    /// assert_eq!(BoopConfig::new().with_selector(" .a ").selector(), Some(".a"));
    /// ```
    #[must_use]
    pub fn selector(&self) -> Option<&str> {
        self.selector
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let config = BoopConfig::from_json("{}").unwrap();
        assert_eq!(config, BoopConfig::default());
        assert!(!config.variables_on_node);
    }

    #[test]
    fn test_full_schema() {
        let config = BoopConfig::from_json(
            r##"{
                "selector": "#inner",
                "variablesOnNode": true,
                "initialStyle": { "transformStyle": "flat", "--depth": "4px" }
            }"##,
        )
        .unwrap();

        assert_eq!(config.selector(), Some("#inner"));
        assert!(config.variables_on_node);
        let style = config.initial_style.unwrap();
        assert_eq!(style.get("transformStyle").map(String::as_str), Some("flat"));
        assert_eq!(style.get("--depth").map(String::as_str), Some("4px"));
    }

    #[test]
    fn test_null_selector_is_absent() {
        let config = BoopConfig::from_json(r#"{ "selector": null }"#).unwrap();
        assert_eq!(config.selector(), None);
    }

    #[test]
    fn test_wrong_type_is_invalid_config() {
        let err = BoopConfig::from_json(r#"{ "variablesOnNode": "yes" }"#).unwrap_err();
        assert!(matches!(err, BoopError::InvalidConfig { .. }));
    }

    #[test]
    fn test_builder_matches_json() {
        let built = BoopConfig::new()
            .with_selector(".face")
            .with_variables_on_node(true)
            .with_initial_style([("perspective", "500px")]);
        let parsed = BoopConfig::from_json(
            r#"{ "selector": ".face", "variablesOnNode": true, "initialStyle": { "perspective": "500px" } }"#,
        )
        .unwrap();
        assert_eq!(built, parsed);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_string(&BoopConfig::new().with_variables_on_node(true)).unwrap();
        assert_eq!(json, r#"{"variablesOnNode":true}"#);
    }
}
