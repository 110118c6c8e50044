use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use csv::{Reader, ReaderBuilder, Trim};
use log::{info, warn};

use crate::error::{PlannerError, Result};
use crate::schedule::SelectedComponent;

/// Offered course components, in file order, indexed by id
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    components: Vec<SelectedComponent>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(components: Vec<SelectedComponent>) -> Self {
        let mut catalog = Self::default();
        for component in components {
            catalog.upsert(component);
        }
        catalog
    }

    /// Loads the catalog from a CSV file with a header row
    pub fn load<P: AsRef<Path>>(csv_path: P) -> Result<Self> {
        let path = csv_path.as_ref();
        let reader = ReaderBuilder::new().trim(Trim::All).from_path(path)?;
        let catalog = Self::from_csv(reader)?;
        info!("Loaded {} catalog components from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Reads components from any CSV source. Rows without an id or course code are skipped,
    /// and a repeated id replaces the earlier row in place.
    pub fn from_csv<R: Read>(mut reader: Reader<R>) -> Result<Self> {
        let mut catalog = Self::default();

        for (line, result) in reader.deserialize::<SelectedComponent>().enumerate() {
            let component = result?;
            if component.id.trim().is_empty() || component.course_code.trim().is_empty() {
                warn!("Skipping catalog row {}: missing id or course code", line + 1);
                continue;
            }
            catalog.upsert(component);
        }

        Ok(catalog)
    }

    fn upsert(&mut self, component: SelectedComponent) {
        match self.by_id.get(&component.id) {
            Some(&index) => self.components[index] = component,
            None => {
                self.by_id.insert(component.id.clone(), self.components.len());
                self.components.push(component);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&SelectedComponent> {
        self.by_id.get(id).map(|&index| &self.components[index])
    }

    /// Looks up a component, failing for ids the catalog doesn't know
    pub fn require(&self, id: &str) -> Result<&SelectedComponent> {
        self.get(id)
            .ok_or_else(|| PlannerError::UnknownComponent(id.to_string()))
    }

    pub fn components(&self) -> &[SelectedComponent] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
