//! Declarative registration surface.
//!
//! Host configuration files describe per-origin policies as a table of
//! options, each value accepting either a comma-separated string or an
//! explicit list. `PolicyOptions` is the deserialized form of that table;
//! `CorsManager::register` applies it through the policy's named setters.

use serde::Deserialize;

use crate::pattern;

/// A configuration value that is either one comma-separated string or an
/// explicit list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    String(String),
    List(Vec<String>),
}

impl StringOrList {
    /// Flatten into individual tokens. The string form splits on commas,
    /// trims whitespace, and drops empty tokens; the list form is kept as
    /// given, duplicates included.
    #[must_use]
    pub fn into_tokens(self) -> Vec<String> {
        match self {
            StringOrList::String(value) => pattern::split_list(&value),
            StringOrList::List(values) => values,
        }
    }
}

impl From<&str> for StringOrList {
    fn from(value: &str) -> Self {
        StringOrList::String(value.to_string())
    }
}

impl From<String> for StringOrList {
    fn from(value: String) -> Self {
        StringOrList::String(value)
    }
}

impl From<Vec<String>> for StringOrList {
    fn from(values: Vec<String>) -> Self {
        StringOrList::List(values)
    }
}

impl From<Vec<&str>> for StringOrList {
    fn from(values: Vec<&str>) -> Self {
        StringOrList::List(values.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for StringOrList {
    fn from(values: &[&str]) -> Self {
        StringOrList::List(values.iter().map(|s| s.to_string()).collect())
    }
}

/// One policy registration as carried by host configuration.
///
/// Absent fields fall back to the registration defaults: wildcard origins,
/// headers, and methods, no credentials, no exposed headers, no preflight
/// caching.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyOptions {
    /// Allowed origins (`*`, literal origins, or `*.domain.tld` patterns)
    pub origins: Option<StringOrList>,
    /// Allowed request headers
    pub headers: Option<StringOrList>,
    /// Allowed request methods
    pub methods: Option<StringOrList>,
    /// Whether to allow credentialed requests
    pub credentials: Option<bool>,
    /// Headers exposed to browser-side code
    #[serde(rename = "exposedHeaders")]
    pub exposed_headers: Option<StringOrList>,
    /// Preflight cache duration in seconds; zero suppresses the header
    #[serde(rename = "maxAge")]
    pub max_age: Option<u32>,
}
