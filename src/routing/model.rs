//! Route table schema.
//!
//! Routes are read-only snapshots of a gateway configuration document. All
//! types derive Serde traits and use the document's camelCase field names.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One externally routable API path mapping.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Route identifier, unique across the table.
    #[serde(default)]
    pub id: Option<String>,

    /// Exposed URL path template (`/users/{id}` or `/users/:id`).
    #[serde(default)]
    pub path: String,

    /// HTTP methods; absent means all methods.
    #[serde(default)]
    pub methods: Option<Vec<String>>,

    /// First supported version. 0 or absent means unversioned.
    #[serde(default)]
    pub version_start: Option<VersionValue>,

    /// Last supported version. 0 or absent means unbounded.
    #[serde(default)]
    pub version_end: Option<VersionValue>,

    /// Legacy version tags such as `beta`.
    #[serde(default)]
    pub additional_versions: Option<Vec<String>>,

    #[serde(default)]
    pub latest_version_override: Option<VersionValue>,

    #[serde(default)]
    pub rate_limit: Option<f64>,

    #[serde(default)]
    pub rate_limit_interval_seconds: Option<f64>,

    #[serde(default)]
    pub rights: Option<Vec<String>>,

    #[serde(default)]
    pub api_state: Option<ApiState>,

    #[serde(default)]
    pub subroutes: Option<Subroutes>,
}

impl Route {
    /// Create a route with only a path set.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Builder-style id setter.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder-style `versionStart` setter.
    pub fn with_version_start(mut self, version: i64) -> Self {
        self.version_start = Some(VersionValue::Integer(version));
        self
    }

    /// Builder-style `versionEnd` setter.
    pub fn with_version_end(mut self, version: i64) -> Self {
        self.version_end = Some(VersionValue::Integer(version));
        self
    }

    /// A route is versioned when `versionStart` is a non-zero number.
    pub fn is_versioned(&self) -> bool {
        self.version_start
            .as_ref()
            .is_some_and(VersionValue::is_versioned)
    }

    /// `versionStart` as a number, 0 when absent or not numeric.
    pub fn version_start_number(&self) -> f64 {
        self.version_start
            .as_ref()
            .and_then(VersionValue::as_number)
            .unwrap_or(0.0)
    }

    /// `versionEnd` as a number, 0 when absent or not numeric.
    pub fn version_end_number(&self) -> f64 {
        self.version_end
            .as_ref()
            .and_then(VersionValue::as_number)
            .unwrap_or(0.0)
    }

    /// Label used in diagnostics: the id, or a placeholder.
    pub fn label(&self) -> &str {
        self.id.as_deref().unwrap_or("<no id>")
    }

    pub fn declares_additional_version(&self, tag: &str) -> bool {
        self.additional_versions
            .as_ref()
            .is_some_and(|versions| versions.iter().any(|v| v == tag))
    }
}

/// Publication state of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApiState {
    Public,
    Private,
    LimitedPreview,
    PublicPreview,
}

/// A version field as written in the document.
///
/// Kept loose so that fractional numbers and strings reach the validators
/// instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum VersionValue {
    Integer(i64),
    Fractional(f64),
    Text(String),
}

impl VersionValue {
    /// Numeric value, if the field is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            VersionValue::Integer(n) => Some(*n as f64),
            VersionValue::Fractional(f) => Some(*f),
            VersionValue::Text(_) => None,
        }
    }

    /// Integer value. `2024.0` counts as an integer, `2024.5` does not.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            VersionValue::Integer(n) => Some(*n),
            VersionValue::Fractional(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    pub fn is_versioned(&self) -> bool {
        self.as_number().is_some_and(|n| n != 0.0)
    }
}

impl std::fmt::Display for VersionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VersionValue::Integer(n) => write!(f, "{}", n),
            VersionValue::Fractional(n) => write!(f, "{}", n),
            VersionValue::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}

/// Finer-grained rule set nested under a route.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subroute {
    #[serde(default)]
    pub methods: Option<Vec<String>>,

    /// Version tags: legacy (`beta`) or year based (`v2024`).
    #[serde(default)]
    pub versions: Option<Vec<String>>,

    #[serde(default)]
    pub rights: Option<Vec<String>>,

    #[serde(default)]
    pub rate_limit: Option<f64>,

    #[serde(default)]
    pub rate_limit_interval_seconds: Option<f64>,
}

impl Subroute {
    pub fn has_rights(&self) -> bool {
        self.rights.as_ref().is_some_and(|r| !r.is_empty())
    }
}

/// Named subroutes of a route, in name order.
///
/// Accepts either a mapping (`{name: {...}}`) or a list of `{key, value}`
/// entries. Entries sharing a key are all kept, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(from = "RawSubroutes", into = "Vec<SubrouteEntry>")]
pub struct Subroutes(Vec<(String, Subroute)>);

impl Subroutes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, subroute: Subroute) {
        let name = name.into();
        let at = self.0.partition_point(|(existing, _)| *existing <= name);
        self.0.insert(at, (name, subroute));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Subroute)> {
        self.0.iter().map(|(name, subroute)| (name.as_str(), subroute))
    }
}

impl FromIterator<(String, Subroute)> for Subroutes {
    fn from_iter<I: IntoIterator<Item = (String, Subroute)>>(iter: I) -> Self {
        let mut entries: Vec<(String, Subroute)> = iter.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Self(entries)
    }
}

/// Shapes a subroute mapping may arrive in.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSubroutes {
    Map(BTreeMap<String, Subroute>),
    Entries(Vec<SubrouteEntry>),
}

/// One `{key, value}` subroute entry.
#[derive(Deserialize, Serialize)]
struct SubrouteEntry {
    #[serde(alias = "name")]
    key: String,
    #[serde(default)]
    value: Subroute,
}

impl From<RawSubroutes> for Subroutes {
    fn from(raw: RawSubroutes) -> Self {
        match raw {
            RawSubroutes::Map(map) => map.into_iter().collect(),
            RawSubroutes::Entries(entries) => entries
                .into_iter()
                .map(|entry| (entry.key, entry.value))
                .collect(),
        }
    }
}

impl From<Subroutes> for Vec<SubrouteEntry> {
    fn from(subroutes: Subroutes) -> Self {
        subroutes
            .0
            .into_iter()
            .map(|(key, value)| SubrouteEntry { key, value })
            .collect()
    }
}
