//! HTTP API Client
//!
//! fetch-based implementation of the tracker backend contract.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use wabash::api::{StartWorkRequest, StopWorkRequest};
use wabash::{
    ApiError, ApiResult, Endpoints, Operation, Process, ProcessDraft, TrackerApi, WorkLog,
    DEFAULT_API_BASE,
};

/// API base baked in at build time, else the proxied default
pub fn api_base() -> &'static str {
    option_env!("WABASH_API_BASE_URL").unwrap_or(DEFAULT_API_BASE)
}

/// Tracker backend over the browser's fetch
#[derive(Debug, Clone)]
pub struct GlooApi {
    endpoints: Endpoints,
}

impl GlooApi {
    pub fn new(base: &str) -> Self {
        Self {
            endpoints: Endpoints::new(base),
        }
    }

    async fn send(
        operation: Operation,
        request: Result<Request, gloo_net::Error>,
    ) -> ApiResult<Response> {
        let network = |e: gloo_net::Error| ApiError::Network {
            operation,
            message: e.to_string(),
        };

        let response = request.map_err(network)?.send().await.map_err(network)?;

        if !response.ok() {
            web_sys::console::error_1(
                &format!("Failed to {}: HTTP {}", operation, response.status()).into(),
            );
            return Err(ApiError::Status {
                operation,
                status: response.status(),
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

impl Default for GlooApi {
    fn default() -> Self {
        Self::new(api_base())
    }
}

#[async_trait(?Send)]
impl TrackerApi for GlooApi {
    async fn list_processes(&self) -> ApiResult<Vec<Process>> {
        let operation = Operation::ListProcesses;
        let request = Request::get(&self.endpoints.processes()).build();
        let response = Self::send(operation, request).await?;
        Self::decode(operation, response).await
    }

    async fn create_process(&self, draft: &ProcessDraft) -> ApiResult<Process> {
        let operation = Operation::CreateProcess;
        let request = Request::post(&self.endpoints.processes()).json(draft);
        let response = Self::send(operation, request).await?;
        Self::decode(operation, response).await
    }

    async fn delete_process(&self, id: &str) -> ApiResult<()> {
        let request = Request::delete(&self.endpoints.process(id)).build();
        Self::send(Operation::DeleteProcess, request).await?;
        Ok(())
    }

    async fn start_work(
        &self,
        person_name: &str,
        process_id: &str,
        process_name: &str,
    ) -> ApiResult<WorkLog> {
        let operation = Operation::StartWork;
        let request = Request::post(&self.endpoints.start_work()).json(&StartWorkRequest {
            person_name,
            process_id,
            process_name,
        });
        let response = Self::send(operation, request).await?;
        Self::decode(operation, response).await
    }

    async fn stop_work(&self, log_id: &str, person_name: &str) -> ApiResult<WorkLog> {
        let operation = Operation::StopWork;
        let request = Request::post(&self.endpoints.stop_work()).json(&StopWorkRequest {
            id: log_id,
            person_name,
        });
        let response = Self::send(operation, request).await?;
        Self::decode(operation, response).await
    }
}
