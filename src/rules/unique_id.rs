//! Route id uniqueness across a lint run.

use std::collections::HashMap;

use crate::routing::model::Route;
use crate::rules::{Diagnostic, DocPath, RuleId};

/// Ids seen so far in a run, with the position of their first use.
#[derive(Debug, Clone, Default)]
pub struct IdRegistry {
    seen: HashMap<String, usize>,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the id of the route at `index`, reporting a missing or
    /// repeated id.
    pub fn check(&mut self, route: &Route, index: usize) -> Vec<Diagnostic> {
        let path = DocPath::route(index).join("id");
        let Some(id) = route.id.as_deref().filter(|id| !id.is_empty()) else {
            return vec![Diagnostic::new(
                RuleId::CheckUniqueId,
                format!("route '{}' must have an id", route.path),
                path,
            )];
        };

        match self.seen.get(id) {
            Some(&first) => vec![Diagnostic::new(
                RuleId::CheckUniqueId,
                format!("route id '{}' is already used by the route at position {}", id, first),
                path,
            )],
            None => {
                self.seen.insert(id.to_string(), index);
                Vec::new()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn reset(&mut self) {
        self.seen.clear();
    }
}
