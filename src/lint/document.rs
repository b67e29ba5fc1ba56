//! Route table normalization at the document edge.
//!
//! A document is either a bare array of routes or an object holding one
//! under `routes`. Routes are read field by field: a field of the wrong type
//! becomes a `route-table` diagnostic at its own path and is treated as
//! absent, so one bad record never hides the rest of the table. Only a
//! document that is not a route array at all is rejected.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::routing::model::{Route, Subroute, Subroutes};
use crate::rules::{Diagnostic, DocPath, RuleId};

/// Routes read from a document, plus where they live in it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteTable {
    /// One entry per array element, so indices match the document.
    pub routes: Vec<Route>,
    /// Path of the route array inside the document.
    pub location: DocPath,
    /// Fields that could not be read, with table-relative paths.
    pub problems: Vec<Diagnostic>,
}

impl RouteTable {
    /// Normalize a parsed document into a route table.
    pub fn from_document(document: &Value) -> Result<Self, Vec<Diagnostic>> {
        let (table, location) = match document {
            Value::Object(map) => match map.get("routes") {
                Some(routes) => (routes, DocPath::root().join("routes")),
                None => {
                    return Err(vec![Diagnostic::new(
                        RuleId::RouteTable,
                        "document must be a route array or contain a 'routes' array",
                        DocPath::root(),
                    )])
                }
            },
            other => (other, DocPath::root()),
        };

        let Value::Array(items) = table else {
            return Err(vec![Diagnostic::new(
                RuleId::RouteTable,
                format!("route table must be an array, got {}", describe(table)),
                location,
            )]);
        };

        let mut problems = Vec::new();
        let routes = items
            .iter()
            .enumerate()
            .map(|(index, item)| read_route(item, index, &mut problems))
            .collect();

        Ok(Self {
            routes,
            location,
            problems,
        })
    }

    /// Rewrite table-relative diagnostic paths to document paths.
    pub fn locate(&self, diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
        diagnostics
            .into_iter()
            .map(|mut diag| {
                diag.path = diag.path.prefixed(&self.location);
                diag
            })
            .collect()
    }
}

fn problem(problems: &mut Vec<Diagnostic>, message: String, path: DocPath) {
    problems.push(Diagnostic::new(RuleId::RouteTable, message, path));
}

/// Reads typed fields out of one JSON object.
struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    path: DocPath,
    problems: &'a mut Vec<Diagnostic>,
}

impl<'a> FieldReader<'a> {
    fn new(
        object: &'a Map<String, Value>,
        path: DocPath,
        problems: &'a mut Vec<Diagnostic>,
    ) -> Self {
        Self {
            object,
            path,
            problems,
        }
    }

    /// Present, non-null value of `key`.
    fn raw(&self, key: &str) -> Option<&'a Value> {
        self.object.get(key).filter(|value| !value.is_null())
    }

    /// `key` as `T`; a value of the wrong shape is reported and dropped.
    fn read<T: DeserializeOwned>(&mut self, key: &str, expected: &str) -> Option<T> {
        let value = self.raw(key)?;
        match <T as Deserialize>::deserialize(value) {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                problem(
                    self.problems,
                    format!("{} must be {}, got {}", key, expected, describe(value)),
                    self.path.join(key),
                );
                None
            }
        }
    }

    /// `key` as a list of strings. Every non-string element is reported and
    /// the whole list dropped, so element indices stay meaningful.
    fn strings(&mut self, key: &str) -> Option<Vec<String>> {
        let value = self.raw(key)?;
        let Value::Array(items) = value else {
            problem(
                self.problems,
                format!("{} must be a list of strings, got {}", key, describe(value)),
                self.path.join(key),
            );
            return None;
        };

        let mut strings = Vec::with_capacity(items.len());
        let mut valid = true;
        for (i, item) in items.iter().enumerate() {
            match item {
                Value::String(s) => strings.push(s.clone()),
                other => {
                    valid = false;
                    problem(
                        self.problems,
                        format!("{}[{}] must be a string, got {}", key, i, describe(other)),
                        self.path.join(key).join(i),
                    );
                }
            }
        }
        valid.then_some(strings)
    }

    fn subroutes(&mut self) -> Option<Subroutes> {
        let value = self.raw("subroutes")?;
        let base = self.path.join("subroutes");

        match value {
            Value::Object(map) => Some(
                map.iter()
                    .filter_map(|(name, value)| {
                        read_subroute(value, base.join(name.as_str()), self.problems)
                            .map(|subroute| (name.clone(), subroute))
                    })
                    .collect(),
            ),
            Value::Array(items) => Some(self.subroute_entries(items, &base)),
            other => {
                problem(
                    self.problems,
                    format!(
                        "subroutes must be a mapping or a list of {{key, value}} entries, got {}",
                        describe(other)
                    ),
                    base,
                );
                None
            }
        }
    }

    fn subroute_entries(&mut self, items: &'a [Value], base: &DocPath) -> Subroutes {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(items.len());

        for (i, item) in items.iter().enumerate() {
            let entry_path = base.join(i);
            let Value::Object(entry) = item else {
                problem(
                    self.problems,
                    format!("subroute entry must be an object, got {}", describe(item)),
                    entry_path,
                );
                continue;
            };
            let Some(name) = entry.get("key").or_else(|| entry.get("name")).and_then(Value::as_str)
            else {
                problem(
                    self.problems,
                    "subroute entry must have a string 'key'".to_string(),
                    entry_path.join("key"),
                );
                continue;
            };
            if !seen.insert(name) {
                problem(
                    self.problems,
                    format!("subroute key '{}' is declared more than once", name),
                    entry_path.join("key"),
                );
            }

            let subroute = match entry.get("value").filter(|v| !v.is_null()) {
                Some(value) => read_subroute(value, base.join(name), self.problems),
                None => Some(Subroute::default()),
            };
            if let Some(subroute) = subroute {
                entries.push((name.to_string(), subroute));
            }
        }

        entries.into_iter().collect()
    }
}

fn read_route(item: &Value, index: usize, problems: &mut Vec<Diagnostic>) -> Route {
    let path = DocPath::route(index);
    let Value::Object(object) = item else {
        problem(
            problems,
            format!("route {} must be an object, got {}", index, describe(item)),
            path,
        );
        return Route::default();
    };

    let mut fields = FieldReader::new(object, path, problems);
    Route {
        id: fields.read("id", "a string"),
        path: fields.read("path", "a string").unwrap_or_default(),
        methods: fields.strings("methods"),
        version_start: fields.read("versionStart", "a number"),
        version_end: fields.read("versionEnd", "a number"),
        additional_versions: fields.strings("additionalVersions"),
        latest_version_override: fields.read("latestVersionOverride", "a number"),
        rate_limit: fields.read("rateLimit", "a number"),
        rate_limit_interval_seconds: fields.read("rateLimitIntervalSeconds", "a number"),
        rights: fields.strings("rights"),
        api_state: fields.read(
            "apiState",
            "one of public, private, limited-preview, public-preview",
        ),
        subroutes: fields.subroutes(),
    }
}

/// A subroute that is not an object is reported and skipped.
fn read_subroute(
    value: &Value,
    path: DocPath,
    problems: &mut Vec<Diagnostic>,
) -> Option<Subroute> {
    let Value::Object(object) = value else {
        problem(
            problems,
            format!("subroute must be an object, got {}", describe(value)),
            path,
        );
        return None;
    };

    let mut fields = FieldReader::new(object, path, problems);
    Some(Subroute {
        methods: fields.strings("methods"),
        versions: fields.strings("versions"),
        rights: fields.strings("rights"),
        rate_limit: fields.read("rateLimit", "a number"),
        rate_limit_interval_seconds: fields.read("rateLimitIntervalSeconds", "a number"),
    })
}

/// Scalars are shown as written; containers by kind.
fn describe(value: &Value) -> String {
    match value {
        Value::Array(_) => "an array".to_string(),
        Value::Object(_) => "an object".to_string(),
        scalar => scalar.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn messages(table: &RouteTable) -> Vec<String> {
        table
            .problems
            .iter()
            .map(|d| format!("{} {}", d.path, d.message))
            .collect()
    }

    #[test]
    fn test_bare_array() {
        let table = RouteTable::from_document(&json!([
            { "id": "r1", "path": "/a" },
            { "id": "r2", "path": "/b" }
        ]))
        .unwrap();
        assert_eq!(table.routes.len(), 2);
        assert!(table.location.is_empty());
        assert!(table.problems.is_empty());
    }

    #[test]
    fn test_routes_key() {
        let table = RouteTable::from_document(&json!({ "routes": [{ "path": "/a" }] })).unwrap();
        assert_eq!(table.routes[0].path, "/a");
        assert_eq!(table.location.to_string(), "routes");

        let located = table.locate(vec![Diagnostic::new(
            RuleId::CheckPathOrder,
            "x",
            DocPath::route(0),
        )]);
        assert_eq!(located[0].path.to_string(), "routes[0]");
    }

    #[test]
    fn test_not_an_array() {
        let errs = RouteTable::from_document(&json!({ "routes": "nope" })).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].rule, RuleId::RouteTable);
        assert!(errs[0].message.contains("must be an array, got \"nope\""));

        let errs = RouteTable::from_document(&json!(42)).unwrap_err();
        assert!(errs[0].message.contains("got 42"));

        let errs = RouteTable::from_document(&json!({ "paths": [] })).unwrap_err();
        assert!(errs[0].message.contains("'routes'"));
    }

    #[test]
    fn test_bad_fields_keep_the_route() {
        let table = RouteTable::from_document(&json!([
            { "id": 7, "path": "/a", "rights": "admin", "apiState": "secret", "rateLimit": "10" },
            { "id": "ok", "path": "/b", "methods": ["GET", 3] }
        ]))
        .unwrap();

        assert_eq!(table.routes.len(), 2);
        assert_eq!(table.routes[0].path, "/a");
        assert_eq!(table.routes[0].id, None);
        assert_eq!(table.routes[0].rights, None);
        assert_eq!(table.routes[0].api_state, None);
        assert_eq!(table.routes[0].rate_limit, None);
        assert_eq!(table.routes[1].methods, None);
        assert_eq!(
            messages(&table),
            vec![
                "[0].id id must be a string, got 7",
                "[0].rateLimit rateLimit must be a number, got \"10\"",
                "[0].rights rights must be a list of strings, got \"admin\"",
                "[0].apiState apiState must be one of public, private, limited-preview, public-preview, got \"secret\"",
                "[1].methods[1] methods[1] must be a string, got 3",
            ]
        );
    }

    #[test]
    fn test_null_and_missing_path_read_as_empty() {
        let table = RouteTable::from_document(&json!([{ "id": "r1" }, { "id": "r2", "path": null }]))
            .unwrap();
        assert!(table.routes.iter().all(|r| r.path.is_empty()));
        assert!(table.problems.is_empty());
    }

    #[test]
    fn test_non_object_route_keeps_its_slot() {
        let table = RouteTable::from_document(&json!([{ "path": "/a" }, "oops", { "path": "/c" }]))
            .unwrap();
        assert_eq!(table.routes.len(), 3);
        assert_eq!(table.routes[2].path, "/c");
        assert_eq!(messages(&table), vec!["[1] route 1 must be an object, got \"oops\""]);
    }

    #[test]
    fn test_bad_subroute_field_is_located() {
        let table = RouteTable::from_document(&json!([{
            "path": "/c",
            "subroutes": { "limited": { "rateLimit": "10", "rights": ["read"] }, "broken": 5 }
        }]))
        .unwrap();

        let subroutes = table.routes[0].subroutes.as_ref().unwrap();
        let names: Vec<&str> = subroutes.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["limited"]);
        assert_eq!(
            messages(&table),
            vec![
                "[0].subroutes.broken subroute must be an object, got 5",
                "[0].subroutes.limited.rateLimit rateLimit must be a number, got \"10\"",
            ]
        );
    }

    #[test]
    fn test_repeated_entry_key_reported_and_kept() {
        let table = RouteTable::from_document(&json!([{
            "path": "/s",
            "subroutes": [
                { "key": "s", "value": { "methods": ["DELETE"], "rights": ["x"] } },
                { "key": "s", "value": { "rights": ["x"] } },
                { "value": { "rights": ["x"] } }
            ]
        }]))
        .unwrap();

        assert_eq!(table.routes[0].subroutes.as_ref().unwrap().iter().count(), 2);
        assert_eq!(
            messages(&table),
            vec![
                "[0].subroutes[1].key subroute key 's' is declared more than once",
                "[0].subroutes[2].key subroute entry must have a string 'key'",
            ]
        );
    }
}
