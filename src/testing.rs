//! In-memory backend double for state-machine tests

use async_trait::async_trait;
use std::cell::{Cell, RefCell};

use crate::api::{ApiError, ApiResult, Operation, TrackerApi};
use crate::models::{Process, ProcessDraft, WorkLog, WorkStatus};

pub const START_TIME: &str = "2025-03-01T08:00:00Z";

pub fn process(id: &str, name: &str) -> Process {
    Process {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        category: "general".to_string(),
        estimated_duration: 0,
    }
}

fn unavailable(operation: Operation) -> ApiError {
    ApiError::Status {
        operation,
        status: 503,
    }
}

#[derive(Default)]
pub struct FakeApi {
    pub catalog: RefCell<Vec<Process>>,
    pub fail: RefCell<Vec<Operation>>,
    pub calls: RefCell<Vec<Operation>>,
    next_id: Cell<u32>,
}

impl FakeApi {
    pub fn with_catalog(processes: Vec<Process>) -> Self {
        Self {
            catalog: RefCell::new(processes),
            ..Self::default()
        }
    }

    pub fn fail_on(&self, operation: Operation) {
        self.fail.borrow_mut().push(operation);
    }

    pub fn heal(&self) {
        self.fail.borrow_mut().clear();
    }

    pub fn count(&self, operation: Operation) -> usize {
        self.calls.borrow().iter().filter(|op| **op == operation).count()
    }

    fn enter(&self, operation: Operation) -> ApiResult<()> {
        self.calls.borrow_mut().push(operation);
        if self.fail.borrow().contains(&operation) {
            Err(unavailable(operation))
        } else {
            Ok(())
        }
    }
}

#[async_trait(?Send)]
impl TrackerApi for FakeApi {
    async fn list_processes(&self) -> ApiResult<Vec<Process>> {
        self.enter(Operation::ListProcesses)?;
        Ok(self.catalog.borrow().clone())
    }

    async fn create_process(&self, draft: &ProcessDraft) -> ApiResult<Process> {
        self.enter(Operation::CreateProcess)?;
        self.next_id.set(self.next_id.get() + 1);
        let created = Process {
            id: format!("p{}", self.next_id.get()),
            name: draft.name.clone(),
            description: draft.description.clone(),
            category: draft.category.clone(),
            estimated_duration: draft.estimated_duration,
        };
        self.catalog.borrow_mut().push(created.clone());
        Ok(created)
    }

    async fn delete_process(&self, id: &str) -> ApiResult<()> {
        self.enter(Operation::DeleteProcess)?;
        self.catalog.borrow_mut().retain(|p| p.id != id);
        Ok(())
    }

    async fn start_work(
        &self,
        person_name: &str,
        process_id: &str,
        process_name: &str,
    ) -> ApiResult<WorkLog> {
        self.enter(Operation::StartWork)?;
        Ok(WorkLog {
            id: "log-1".to_string(),
            person_name: person_name.to_string(),
            process_id: process_id.to_string(),
            process_name: Some(process_name.to_string()),
            start_timestamp: START_TIME.to_string(),
            end_timestamp: None,
            duration: None,
            status: WorkStatus::Running,
        })
    }

    async fn stop_work(&self, log_id: &str, person_name: &str) -> ApiResult<WorkLog> {
        self.enter(Operation::StopWork)?;
        Ok(WorkLog {
            id: log_id.to_string(),
            person_name: person_name.to_string(),
            process_id: "p1".to_string(),
            process_name: None,
            start_timestamp: START_TIME.to_string(),
            end_timestamp: Some("2025-03-01T09:00:00Z".to_string()),
            duration: Some(3600),
            status: WorkStatus::Completed,
        })
    }
}
