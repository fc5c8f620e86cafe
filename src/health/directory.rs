// src/health/directory.rs
use super::checker::Checker;
use dashmap::DashMap;
use std::sync::Arc;

/// Named checkers shared across an application.
///
/// `None` is the default checker and is distinct from every named one.
/// Build one directory at startup and hand out clones of the `Arc`.
#[derive(Debug, Default)]
pub struct CheckerDirectory {
    checkers: DashMap<Option<String>, Arc<Checker>>,
}

impl CheckerDirectory {
    pub fn new() -> Self {
        Self {
            checkers: DashMap::new(),
        }
    }

    /// Returns the checker registered under `name`, creating it on first use.
    ///
    /// Every call with the same name returns the same instance, even when
    /// several callers race on the first lookup.
    pub fn get_checker(&self, name: Option<&str>) -> Arc<Checker> {
        self.checkers
            .entry(name.map(str::to_owned))
            .or_insert_with(|| {
                tracing::debug!(checker = name.unwrap_or("<default>"), "Created health checker");
                Arc::new(Checker::new())
            })
            .clone()
    }

    pub fn names(&self) -> Vec<Option<String>> {
        self.checkers.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }
}
