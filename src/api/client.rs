//! Backend HTTP Client
//!
//! reqwest implementation of [`TrackerApi`] for native front ends.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::{
    ApiError, ApiResult, Endpoints, Operation, StartWorkRequest, StopWorkRequest, TrackerApi,
};
use crate::connectivity::Connectivity;
use crate::models::{Process, ProcessDraft, WorkLog};

/// Longest a connectivity check may take before the backend counts as offline
pub const CHECK_TIMEOUT: Duration = Duration::from_secs(3);

/// Tracker backend client over HTTP
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    endpoints: Endpoints,
    check_timeout: Duration,
}

impl HttpClient {
    /// Create a client for an absolute base URL (e.g. "http://localhost:7071/api")
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoints: Endpoints::new(base_url),
            check_timeout: CHECK_TIMEOUT,
        }
    }

    pub fn with_check_timeout(mut self, timeout: Duration) -> Self {
        self.check_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        self.endpoints.base()
    }

    /// Check whether the backend answers at all
    ///
    /// Any HTTP response counts as online; a transport failure or no answer
    /// within the check timeout is offline.
    pub async fn check_connectivity(&self) -> Connectivity {
        let request = self
            .client
            .get(self.endpoints.base())
            .timeout(self.check_timeout);
        match request.send().await {
            Ok(_) => Connectivity::Online,
            Err(e) => {
                tracing::debug!(error = %e, "Backend unreachable");
                Connectivity::Offline
            }
        }
    }

    fn check(operation: Operation, result: reqwest::Result<Response>) -> ApiResult<Response> {
        let response = result.map_err(|e| ApiError::Network {
            operation,
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%operation, status = status.as_u16(), "Backend rejected request");
            return Err(ApiError::Status {
                operation,
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(operation: Operation, response: Response) -> ApiResult<T> {
        response.json().await.map_err(|e| ApiError::Decode {
            operation,
            message: e.to_string(),
        })
    }
}

#[async_trait(?Send)]
impl TrackerApi for HttpClient {
    async fn list_processes(&self) -> ApiResult<Vec<Process>> {
        let operation = Operation::ListProcesses;
        let result = self.client.get(self.endpoints.processes()).send().await;
        let response = Self::check(operation, result)?;
        Self::decode(operation, response).await
    }

    async fn create_process(&self, draft: &ProcessDraft) -> ApiResult<Process> {
        let operation = Operation::CreateProcess;
        let result = self
            .client
            .post(self.endpoints.processes())
            .json(draft)
            .send()
            .await;
        let response = Self::check(operation, result)?;
        Self::decode(operation, response).await
    }

    async fn delete_process(&self, id: &str) -> ApiResult<()> {
        let result = self.client.delete(self.endpoints.process(id)).send().await;
        Self::check(Operation::DeleteProcess, result)?;
        Ok(())
    }

    async fn start_work(
        &self,
        person_name: &str,
        process_id: &str,
        process_name: &str,
    ) -> ApiResult<WorkLog> {
        let operation = Operation::StartWork;
        let result = self
            .client
            .post(self.endpoints.start_work())
            .json(&StartWorkRequest {
                person_name,
                process_id,
                process_name,
            })
            .send()
            .await;
        let response = Self::check(operation, result)?;
        Self::decode(operation, response).await
    }

    async fn stop_work(&self, log_id: &str, person_name: &str) -> ApiResult<WorkLog> {
        let operation = Operation::StopWork;
        let result = self
            .client
            .post(self.endpoints.stop_work())
            .json(&StopWorkRequest {
                id: log_id,
                person_name,
            })
            .send()
            .await;
        let response = Self::check(operation, result)?;
        Self::decode(operation, response).await
    }
}
