//! API key resolution from the embedding page.
//!
//! The key can be given in three places, checked in priority order:
//! an attribute on the embedding `<script>` tag, the global
//! `window.shopspecConfig` object, or a `<meta name="shopspec-api-key">` tag.
//! Empty values count as absent everywhere.

use serde::{Deserialize, Serialize};

/// Script tags whose `src` contains this fragment are inspected
pub const SCRIPT_SRC_FRAGMENT: &str = "shopspec-widget.js";
pub const SCRIPT_KEY_ATTRIBUTE: &str = "data-api-key";
pub const SCRIPT_ALT_KEY_ATTRIBUTE: &str = "data-perplexity-key";
pub const GLOBAL_CONFIG_NAME: &str = "shopspecConfig";
pub const META_KEY_NAME: &str = "shopspec-api-key";

/// Key attributes found on one embedding script tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptTag {
    pub api_key: Option<String>,
    pub perplexity_key: Option<String>,
}

/// The page's global configuration object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlobalConfig {
    pub api_key: Option<String>,
    pub perplexity_key: Option<String>,
}

impl GlobalConfig {
    /// Parse the JSON form of the global object. Unreadable objects are ignored.
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("ShopSpec: ignoring unreadable {}: {}", GLOBAL_CONFIG_NAME, e);
                None
            }
        }
    }
}

/// Where a resolved key came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    ScriptAttribute,
    GlobalConfig,
    MetaTag,
}

impl std::fmt::Display for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeySource::ScriptAttribute => write!(f, "script attribute"),
            KeySource::GlobalConfig => write!(f, "global config"),
            KeySource::MetaTag => write!(f, "meta tag"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedKey {
    pub key: String,
    pub source: KeySource,
}

/// Everything the page offers as configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSources {
    pub scripts: Vec<ScriptTag>,
    pub global: Option<GlobalConfig>,
    pub meta_key: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl ConfigSources {
    pub fn with_script_key(mut self, key: impl Into<String>) -> Self {
        self.scripts.push(ScriptTag {
            api_key: Some(key.into()),
            perplexity_key: None,
        });
        self
    }

    pub fn with_global(mut self, global: GlobalConfig) -> Self {
        self.global = Some(global);
        self
    }

    pub fn with_meta_key(mut self, key: impl Into<String>) -> Self {
        self.meta_key = Some(key.into());
        self
    }

    /// First match wins across sources; among script tags the last one with a
    /// key wins.
    pub fn resolve_api_key(&self) -> Option<ResolvedKey> {
        let from_scripts = self
            .scripts
            .iter()
            .filter_map(|tag| present(&tag.api_key).or_else(|| present(&tag.perplexity_key)))
            .last();
        if let Some(key) = from_scripts {
            return Some(ResolvedKey {
                key: key.to_string(),
                source: KeySource::ScriptAttribute,
            });
        }

        if let Some(global) = &self.global {
            if let Some(key) = present(&global.api_key).or_else(|| present(&global.perplexity_key)) {
                return Some(ResolvedKey {
                    key: key.to_string(),
                    source: KeySource::GlobalConfig,
                });
            }
        }

        present(&self.meta_key).map(|key| ResolvedKey {
            key: key.to_string(),
            source: KeySource::MetaTag,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn global(api_key: Option<&str>, perplexity_key: Option<&str>) -> GlobalConfig {
        GlobalConfig {
            api_key: api_key.map(String::from),
            perplexity_key: perplexity_key.map(String::from),
        }
    }

    #[test]
    fn test_no_sources() {
        assert_eq!(ConfigSources::default().resolve_api_key(), None);
    }

    #[test]
    fn test_script_beats_global_and_meta() {
        let sources = ConfigSources::default()
            .with_script_key("from-script")
            .with_global(global(Some("from-global"), None))
            .with_meta_key("from-meta");
        let resolved = sources.resolve_api_key().unwrap();
        assert_eq!(resolved.key, "from-script");
        assert_eq!(resolved.source, KeySource::ScriptAttribute);
    }

    #[test]
    fn test_global_beats_meta() {
        let sources = ConfigSources::default()
            .with_global(global(None, Some("pplx")))
            .with_meta_key("from-meta");
        let resolved = sources.resolve_api_key().unwrap();
        assert_eq!(resolved.key, "pplx");
        assert_eq!(resolved.source, KeySource::GlobalConfig);
    }

    #[test]
    fn test_meta_fallback() {
        let sources = ConfigSources::default()
            .with_global(global(Some(""), None))
            .with_meta_key("from-meta");
        assert_eq!(
            sources.resolve_api_key(),
            Some(ResolvedKey {
                key: "from-meta".to_string(),
                source: KeySource::MetaTag
            })
        );
    }

    #[test]
    fn test_script_attribute_preference() {
        let sources = ConfigSources {
            scripts: vec![ScriptTag {
                api_key: Some(String::new()),
                perplexity_key: Some("alt".to_string()),
            }],
            ..Default::default()
        };
        assert_eq!(sources.resolve_api_key().unwrap().key, "alt");
    }

    #[test]
    fn test_last_script_with_key_wins() {
        let sources = ConfigSources {
            scripts: vec![
                ScriptTag {
                    api_key: Some("first".to_string()),
                    perplexity_key: None,
                },
                ScriptTag {
                    api_key: Some("second".to_string()),
                    perplexity_key: None,
                },
                ScriptTag::default(),
            ],
            ..Default::default()
        };
        assert_eq!(sources.resolve_api_key().unwrap().key, "second");
    }

    #[test]
    fn test_empty_meta_is_absent() {
        assert_eq!(ConfigSources::default().with_meta_key("").resolve_api_key(), None);
    }

    #[test]
    fn test_global_from_json() {
        let config = GlobalConfig::from_json(r#"{"apiKey": "k1", "theme": "dark"}"#).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("k1"));
        assert_eq!(config.perplexity_key, None);
        assert_eq!(GlobalConfig::from_json(r#"{"apiKey": 42}"#), None);
    }
}
