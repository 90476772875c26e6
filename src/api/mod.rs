//! Tracker Backend API
//!
//! Contract of the remote backend that persists processes and work logs.
//!
//! # Endpoints
//!
//! ## Processes
//! - `GET {base}/processes` - List process definitions
//! - `POST {base}/processes` - Create a process
//! - `DELETE {base}/processes/{id}` - Delete a process
//!
//! ## Work logs
//! - `POST {base}/work-log/start` - Open a RUNNING work log
//! - `POST {base}/work-log/stop` - Close a work log
//!
//! Every call is a single request: no retries, no timeouts. Any transport
//! error, non-success status or undecodable body is an [`ApiError`].
//!
//! The contract is the [`TrackerApi`] trait so the same state machine can
//! run over reqwest (native) or the browser's fetch.

pub mod error;

#[cfg(feature = "native")]
pub mod client;

pub use error::{ApiError, ApiResult, Operation};

#[cfg(feature = "native")]
pub use client::HttpClient;

use async_trait::async_trait;
use serde::Serialize;

use crate::models::{Process, ProcessDraft, WorkLog};

/// API base used when nothing is configured; reverse-proxied to the backend
pub const DEFAULT_API_BASE: &str = "/api";

/// Operations offered by the tracker backend
#[async_trait(?Send)]
pub trait TrackerApi {
    /// All process definitions, in server order
    async fn list_processes(&self) -> ApiResult<Vec<Process>>;

    /// Create a process; returns the stored record with its server id
    async fn create_process(&self, draft: &ProcessDraft) -> ApiResult<Process>;

    /// Delete a process by id
    async fn delete_process(&self, id: &str) -> ApiResult<()>;

    /// Open a work log; the server stamps the start time
    async fn start_work(
        &self,
        person_name: &str,
        process_id: &str,
        process_name: &str,
    ) -> ApiResult<WorkLog>;

    /// Close a work log; the server computes the duration
    async fn stop_work(&self, log_id: &str, person_name: &str) -> ApiResult<WorkLog>;
}

/// Body of `POST /work-log/start`
#[derive(Debug, Serialize)]
pub struct StartWorkRequest<'a> {
    pub person_name: &'a str,
    pub process_id: &'a str,
    pub process_name: &'a str,
}

/// Body of `POST /work-log/stop`
#[derive(Debug, Serialize)]
pub struct StopWorkRequest<'a> {
    pub id: &'a str,
    pub person_name: &'a str,
}

/// URL builder for the backend routes under one base path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn processes(&self) -> String {
        format!("{}/processes", self.base)
    }

    pub fn process(&self, id: &str) -> String {
        format!("{}/processes/{}", self.base, urlencoding::encode(id))
    }

    pub fn start_work(&self) -> String {
        format!("{}/work-log/start", self.base)
    }

    pub fn stop_work(&self) -> String {
        format!("{}/work-log/stop", self.base)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_trim_trailing_slash() {
        let endpoints = Endpoints::new("http://localhost:7071/api/");
        assert_eq!(endpoints.processes(), "http://localhost:7071/api/processes");
        assert_eq!(endpoints.start_work(), "http://localhost:7071/api/work-log/start");
        assert_eq!(endpoints.stop_work(), "http://localhost:7071/api/work-log/stop");
    }

    #[test]
    fn test_process_id_is_path_encoded() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.process("p1"), "/api/processes/p1");
        assert_eq!(endpoints.process("a/b c"), "/api/processes/a%2Fb%20c");
    }

    #[test]
    fn test_request_bodies_use_backend_field_names() {
        let start = serde_json::to_value(StartWorkRequest {
            person_name: "Ada",
            process_id: "p1",
            process_name: "Sand",
        })
        .unwrap();
        assert_eq!(
            start,
            serde_json::json!({"person_name": "Ada", "process_id": "p1", "process_name": "Sand"})
        );

        let stop = serde_json::to_value(StopWorkRequest {
            id: "log-1",
            person_name: "Ada",
        })
        .unwrap();
        assert_eq!(stop, serde_json::json!({"id": "log-1", "person_name": "Ada"}));
    }
}
