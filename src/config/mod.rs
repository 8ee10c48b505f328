//! Configuration tree nodes handed over by the embedding host.
//!
//! The host owns configuration-file parsing and delivers options as a generic
//! key/value tree; this crate only interprets the semantics of the nodes it
//! understands (the `Cores` option). [`ConfigItem`] is the minimal shape of
//! such a node: a key, typed values, and child nodes.

use serde::{Deserialize, Serialize};

/// A typed value carried by a configuration option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    String(String),
    Number(f64),
    Boolean(bool),
}

impl ConfigValue {
    /// Returns the string payload, or `None` for non-string values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

/// One option node from the host's configuration tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigItem {
    pub key: String,
    #[serde(default)]
    pub values: Vec<ConfigValue>,
    #[serde(default)]
    pub children: Vec<ConfigItem>,
}

impl ConfigItem {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            values: Vec::new(),
            children: Vec::new(),
        }
    }

    /// An option carrying a list of string values.
    pub fn strings<I, S>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            values: values
                .into_iter()
                .map(|s| ConfigValue::String(s.into()))
                .collect(),
            children: Vec::new(),
        }
    }

    /// A block node holding child options.
    pub fn block(key: impl Into<String>, children: Vec<ConfigItem>) -> Self {
        Self {
            key: key.into(),
            values: Vec::new(),
            children,
        }
    }
}
