//! In-memory project store for tests and throwaway sessions.

use std::collections::HashMap;

use crate::snapshot::ProjectSnapshot;
use crate::store::{ProjectStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    projects: HashMap<String, ProjectSnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

impl ProjectStore for MemoryStore {
    fn load(&self, id: &str) -> Result<Option<ProjectSnapshot>, StoreError> {
        Ok(self.projects.get(id).cloned())
    }

    fn save(&mut self, snapshot: &ProjectSnapshot) -> Result<(), StoreError> {
        self.projects
            .insert(snapshot.id.clone(), snapshot.clone());
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        self.projects.remove(id);
        Ok(())
    }

    fn list(&self) -> Result<Vec<ProjectSnapshot>, StoreError> {
        let mut all: Vec<ProjectSnapshot> = self.projects.values().cloned().collect();
        all.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(id: &str, updated_at: u64) -> ProjectSnapshot {
        ProjectSnapshot {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            creator: String::new(),
            updated_at,
            files: Vec::new(),
        }
    }

    #[test]
    fn save_load_delete_cycle() {
        let mut store = MemoryStore::new();
        store.save(&snapshot("p1", 10)).unwrap();
        assert_eq!(store.load("p1").unwrap().unwrap().updated_at, 10);

        store.save(&snapshot("p1", 20)).unwrap();
        assert_eq!(store.load("p1").unwrap().unwrap().updated_at, 20);
        assert_eq!(store.len(), 1);

        store.delete("p1").unwrap();
        assert!(store.load("p1").unwrap().is_none());
        store.delete("p1").unwrap();
    }

    #[test]
    fn list_orders_most_recent_first() {
        let mut store = MemoryStore::new();
        store.save(&snapshot("old", 1)).unwrap();
        store.save(&snapshot("new", 99)).unwrap();
        store.save(&snapshot("mid", 50)).unwrap();
        let ids: Vec<String> = store.list().unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }
}
