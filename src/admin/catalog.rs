//! In-memory process catalog shown on the admin dashboard

use crate::models::Process;

/// Local copy of the process list
///
/// Starts in the loading state until the first fetch settles.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessCatalog {
    processes: Vec<Process>,
    loading: bool,
}

impl ProcessCatalog {
    pub fn new() -> Self {
        Self {
            processes: Vec::new(),
            loading: true,
        }
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn get(&self, id: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.id == id)
    }

    /// Replace everything with a fresh server listing
    pub fn replace(&mut self, processes: Vec<Process>) {
        self.processes = processes;
        self.loading = false;
    }

    /// A fetch finished without data; keep what we have
    pub fn settle(&mut self) {
        self.loading = false;
    }

    /// Append a record the server just created
    pub fn append(&mut self, process: Process) {
        self.processes.push(process);
    }

    /// Drop every entry with `id`; returns the first removed
    pub fn remove(&mut self, id: &str) -> Option<Process> {
        let index = self.processes.iter().position(|p| p.id == id)?;
        let removed = self.processes.remove(index);
        self.processes.retain(|p| p.id != id);
        Some(removed)
    }
}

impl Default for ProcessCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::process;

    #[test]
    fn test_starts_loading() {
        let mut catalog = ProcessCatalog::default();
        assert!(catalog.is_loading());
        catalog.settle();
        assert!(!catalog.is_loading());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_append_keeps_order() {
        let mut catalog = ProcessCatalog::new();
        catalog.replace(vec![process("p1", "Sand")]);
        catalog.append(process("p2", "Glue"));
        let ids: Vec<_> = catalog.processes().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p1", "p2"]);
    }

    #[test]
    fn test_remove_missing_id() {
        let mut catalog = ProcessCatalog::new();
        catalog.replace(vec![process("p1", "Sand")]);
        assert!(catalog.remove("p9").is_none());
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.remove("p1").unwrap().name, "Sand");
        assert!(catalog.get("p1").is_none());
    }
}
