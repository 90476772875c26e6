//! Admin Dashboard
//!
//! Password-gated management of the process catalog.
//!
//! The gate is a shared password compared on the client. It hides the
//! screen; it does not protect the backend, which accepts the same calls
//! from anyone.
//!
//! Update policy:
//! - create: applied locally only after the server returns the record, which
//!   is appended without a re-fetch
//! - delete: removed locally first; on failure the whole list is re-fetched
//!
//! [`AdminDashboard`] and the browser page share these policies through
//! [`fetch_catalog`], [`apply_listing`], [`submit_process`] and
//! [`remove_process`].

mod catalog;

pub use catalog::ProcessCatalog;

use std::fmt;
use thiserror::Error;

use crate::api::{ApiError, TrackerApi};
use crate::models::{Process, ProcessDraft};

/// Password used when none is configured
pub const DEFAULT_ADMIN_PASSWORD: &str = "root";

/// Errors surfaced by dashboard actions
#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Incorrect password")]
    IncorrectPassword,

    #[error("Admin dashboard is locked")]
    Locked,

    #[error("Process name is required")]
    MissingName,

    #[error("Failed to fetch processes")]
    Fetch(#[source] ApiError),

    #[error("Failed to create process")]
    Create(#[source] ApiError),

    #[error("Failed to delete process")]
    Delete(#[source] ApiError),
}

/// Shared-password check
#[derive(Clone)]
pub struct AdminGate {
    password: String,
}

impl AdminGate {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }

    pub fn verify(&self, input: &str) -> Result<(), AdminError> {
        if input == self.password {
            Ok(())
        } else {
            tracing::warn!("Rejected admin password");
            Err(AdminError::IncorrectPassword)
        }
    }
}

impl Default for AdminGate {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_PASSWORD)
    }
}

impl fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminGate").finish_non_exhaustive()
    }
}

/// Fetch the server listing for the catalog
///
/// Pass the result to [`apply_listing`].
pub async fn fetch_catalog<A: TrackerApi + ?Sized>(
    api: &A,
) -> Result<Vec<Process>, AdminError> {
    api.list_processes().await.map_err(|e| {
        tracing::error!(error = %e, "Process fetch failed");
        AdminError::Fetch(e)
    })
}

/// Apply a listing from [`fetch_catalog`]
pub fn apply_listing(
    catalog: &mut ProcessCatalog,
    listing: Result<Vec<Process>, AdminError>,
) -> Result<(), AdminError> {
    match listing {
        Ok(processes) => {
            catalog.replace(processes);
            Ok(())
        }
        Err(e) => {
            catalog.settle();
            Err(e)
        }
    }
}

/// Validate and create a process; the caller appends the returned record
pub async fn submit_process<A: TrackerApi + ?Sized>(
    api: &A,
    draft: &ProcessDraft,
) -> Result<Process, AdminError> {
    if draft.name.trim().is_empty() {
        return Err(AdminError::MissingName);
    }

    let created = api.create_process(draft).await.map_err(|e| {
        tracing::error!(error = %e, "Create process failed");
        AdminError::Create(e)
    })?;

    tracing::info!(id = %created.id, name = %created.name, "Process created");
    Ok(created)
}

/// Server half of an optimistic delete
///
/// On `Err` the caller's catalog is stale and must be re-fetched.
pub async fn remove_process<A: TrackerApi + ?Sized>(api: &A, id: &str) -> Result<(), AdminError> {
    match api.delete_process(id).await {
        Ok(()) => {
            tracing::info!(id, "Process deleted");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, id, "Delete failed, reloading catalog");
            Err(AdminError::Delete(e))
        }
    }
}

/// Dashboard view model
pub struct AdminDashboard<'a, A: TrackerApi + ?Sized> {
    api: &'a A,
    gate: AdminGate,
    unlocked: bool,
    catalog: ProcessCatalog,
    form: ProcessDraft,
}

impl<'a, A: TrackerApi + ?Sized> AdminDashboard<'a, A> {
    pub fn new(api: &'a A, gate: AdminGate) -> Self {
        Self {
            api,
            gate,
            unlocked: false,
            catalog: ProcessCatalog::new(),
            form: ProcessDraft::default(),
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn catalog(&self) -> &ProcessCatalog {
        &self.catalog
    }

    pub fn form(&self) -> &ProcessDraft {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProcessDraft {
        &mut self.form
    }

    /// Check the password without loading anything
    pub fn unlock(&mut self, password: &str) -> Result<(), AdminError> {
        self.gate.verify(password)?;
        self.unlocked = true;
        tracing::info!("Admin dashboard unlocked");
        Ok(())
    }

    /// Unlock and load the catalog once
    ///
    /// A failed initial fetch is logged; the dashboard stays unlocked.
    pub async fn authenticate(&mut self, password: &str) -> Result<(), AdminError> {
        self.unlock(password)?;
        if let Err(e) = self.refresh().await {
            tracing::error!(error = ?e, "Initial process fetch failed");
        }
        Ok(())
    }

    /// Replace the local catalog with the server listing
    pub async fn refresh(&mut self) -> Result<(), AdminError> {
        self.ensure_unlocked()?;
        let listing = fetch_catalog(self.api).await;
        apply_listing(&mut self.catalog, listing)
    }

    /// Submit the form; on success append the record and reset the form
    pub async fn create(&mut self) -> Result<Process, AdminError> {
        self.ensure_unlocked()?;
        let created = submit_process(self.api, &self.form).await?;
        self.catalog.append(created.clone());
        self.form = ProcessDraft::default();
        Ok(created)
    }

    /// Remove locally, then ask the server; re-fetch on failure
    pub async fn delete(&mut self, id: &str) -> Result<(), AdminError> {
        self.ensure_unlocked()?;
        self.remove_optimistically(id);
        self.confirm_delete(id).await
    }

    /// Optimistic half of [`delete`](Self::delete)
    pub fn remove_optimistically(&mut self, id: &str) -> Option<Process> {
        self.catalog.remove(id)
    }

    /// Server half of [`delete`](Self::delete)
    pub async fn confirm_delete(&mut self, id: &str) -> Result<(), AdminError> {
        let result = remove_process(self.api, id).await;
        if result.is_err() {
            if let Err(reload) = self.refresh().await {
                tracing::error!(error = ?reload, "Catalog reload failed");
            }
        }
        result
    }

    fn ensure_unlocked(&self) -> Result<(), AdminError> {
        if self.unlocked {
            Ok(())
        } else {
            Err(AdminError::Locked)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Operation;
    use crate::testing::{process, FakeApi};

    #[test]
    fn test_gate_compares_exactly() {
        let gate = AdminGate::default();
        assert!(gate.verify("root").is_ok());
        assert!(matches!(gate.verify("Root"), Err(AdminError::IncorrectPassword)));
        assert!(!format!("{:?}", gate).contains("root"));
    }

    #[tokio::test]
    async fn test_wrong_password_stays_locked() {
        let api = FakeApi::with_catalog(vec![process("p1", "Sand")]);
        let mut dashboard = AdminDashboard::new(&api, AdminGate::default());

        let err = dashboard.authenticate("hunter2").await.unwrap_err();
        assert_eq!(err.to_string(), "Incorrect password");
        assert!(!dashboard.is_unlocked());
        assert_eq!(api.count(Operation::ListProcesses), 0);
        assert!(matches!(dashboard.refresh().await, Err(AdminError::Locked)));
    }

    #[tokio::test]
    async fn test_authenticate_loads_catalog_once() {
        let api = FakeApi::with_catalog(vec![process("p1", "Sand"), process("p2", "Glue")]);
        let mut dashboard = AdminDashboard::new(&api, AdminGate::default());

        dashboard.authenticate("root").await.unwrap();
        assert!(!dashboard.catalog().is_loading());
        assert_eq!(dashboard.catalog().len(), 2);
        assert_eq!(api.count(Operation::ListProcesses), 1);
    }

    #[tokio::test]
    async fn test_create_appends_and_resets_form() {
        let api = FakeApi::default();
        let mut dashboard = AdminDashboard::new(&api, AdminGate::default());
        dashboard.authenticate("root").await.unwrap();

        *dashboard.form_mut() = ProcessDraft::new("Sand");
        let created = dashboard.create().await.unwrap();

        assert_eq!(created.id, "p1");
        assert_eq!(dashboard.catalog().len(), 1);
        assert_eq!(dashboard.catalog().processes()[0].id, "p1");
        assert_eq!(dashboard.catalog().processes()[0].category, "general");
        assert_eq!(dashboard.form(), &ProcessDraft::default());
        // no re-fetch after create
        assert_eq!(api.count(Operation::ListProcesses), 1);
    }

    #[tokio::test]
    async fn test_create_failure_keeps_form() {
        let api = FakeApi::default();
        api.fail_on(Operation::CreateProcess);
        let mut dashboard = AdminDashboard::new(&api, AdminGate::default());
        dashboard.authenticate("root").await.unwrap();

        *dashboard.form_mut() = ProcessDraft::new("Sand").estimated_duration(15);
        let err = dashboard.create().await.unwrap_err();

        assert_eq!(err.to_string(), "Failed to create process");
        assert_eq!(dashboard.form().name, "Sand");
        assert_eq!(dashboard.form().estimated_duration, 15);
        assert!(dashboard.catalog().is_empty());
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let api = FakeApi::default();
        let mut dashboard = AdminDashboard::new(&api, AdminGate::default());
        dashboard.authenticate("root").await.unwrap();

        assert!(matches!(dashboard.create().await, Err(AdminError::MissingName)));
        assert_eq!(api.count(Operation::CreateProcess), 0);
    }

    #[tokio::test]
    async fn test_delete_success_is_not_refetched() {
        let api = FakeApi::with_catalog(vec![process("p1", "Sand"), process("p2", "Glue")]);
        let mut dashboard = AdminDashboard::new(&api, AdminGate::default());
        dashboard.authenticate("root").await.unwrap();

        dashboard.delete("p1").await.unwrap();
        assert_eq!(dashboard.catalog().len(), 1);
        assert_eq!(dashboard.catalog().processes()[0].id, "p2");
        assert_eq!(api.count(Operation::ListProcesses), 1);
    }

    #[tokio::test]
    async fn test_delete_failure_reconciles() {
        let api = FakeApi::with_catalog(vec![process("p1", "Sand"), process("p2", "Glue")]);
        api.fail_on(Operation::DeleteProcess);
        let mut dashboard = AdminDashboard::new(&api, AdminGate::default());
        dashboard.authenticate("root").await.unwrap();

        dashboard.remove_optimistically("p1");
        assert_eq!(dashboard.catalog().len(), 1);

        let err = dashboard.confirm_delete("p1").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to delete process");
        assert_eq!(dashboard.catalog().len(), 2);
        assert!(dashboard.catalog().get("p1").is_some());
        assert_eq!(api.count(Operation::ListProcesses), 2);
    }

    #[tokio::test]
    async fn test_submit_rejects_blank_name_without_calling_server() {
        let api = FakeApi::default();

        let err = submit_process(&api, &ProcessDraft::new("   ")).await.unwrap_err();
        assert!(matches!(err, AdminError::MissingName));
        assert_eq!(api.count(Operation::CreateProcess), 0);
    }

    #[tokio::test]
    async fn test_failed_listing_settles_and_keeps_catalog() {
        let api = FakeApi::with_catalog(vec![process("p1", "Sand")]);
        let mut catalog = ProcessCatalog::new();
        apply_listing(&mut catalog, fetch_catalog(&api).await).unwrap();
        assert_eq!(catalog.len(), 1);

        api.fail_on(Operation::ListProcesses);
        let err = apply_listing(&mut catalog, fetch_catalog(&api).await).unwrap_err();
        assert!(matches!(err, AdminError::Fetch(_)));
        assert!(!catalog.is_loading());
        assert_eq!(catalog.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_process_reports_delete_error() {
        let api = FakeApi::with_catalog(vec![process("p1", "Sand")]);
        remove_process(&api, "p1").await.unwrap();

        api.fail_on(Operation::DeleteProcess);
        assert!(matches!(
            remove_process(&api, "p1").await,
            Err(AdminError::Delete(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_failure_through_delete() {
        let api = FakeApi::with_catalog(vec![process("p1", "Sand"), process("p2", "Glue")]);
        api.fail_on(Operation::DeleteProcess);
        let mut dashboard = AdminDashboard::new(&api, AdminGate::default());
        dashboard.authenticate("root").await.unwrap();

        assert!(matches!(
            dashboard.delete("p1").await,
            Err(AdminError::Delete(_))
        ));
        let ids: Vec<_> = dashboard
            .catalog()
            .processes()
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, ["p1", "p2"]);
    }
}
