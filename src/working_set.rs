use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::schedule::SelectedComponent;

/// The student's ordered selection of components
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkingSet {
    items: Vec<SelectedComponent>,
}

impl WorkingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a component; returns false (and changes nothing) if its id is already selected
    pub fn add(&mut self, component: SelectedComponent) -> bool {
        if self.contains(&component.id) {
            return false;
        }
        self.items.push(component);
        true
    }

    /// Removes a component by id; returns false if it wasn't selected
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Replaces the whole selection, keeping the first occurrence of any repeated id
    pub fn replace(&mut self, components: Vec<SelectedComponent>) {
        self.items.clear();
        for component in components {
            self.add(component);
        }
    }

    /// Rebuilds a selection from stored ids, resolving each against the catalog
    pub fn hydrate(ids: &[String], catalog: &Catalog) -> Result<Self> {
        let mut working_set = Self::new();
        for id in ids {
            working_set.add(catalog.require(id)?.clone());
        }
        Ok(working_set)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }

    pub fn items(&self) -> &[SelectedComponent] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
