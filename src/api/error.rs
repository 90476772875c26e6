//! API Error Types
//!
//! The backend's error bodies are never parsed: a failed call is a network
//! failure tagged with the operation and, when one arrived, the status.

use std::fmt;
use thiserror::Error;

/// Backend operation, used to label failures in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListProcesses,
    CreateProcess,
    DeleteProcess,
    StartWork,
    StopWork,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::ListProcesses => "fetch processes",
            Operation::CreateProcess => "create process",
            Operation::DeleteProcess => "delete process",
            Operation::StartWork => "start work",
            Operation::StopWork => "stop work",
        };
        f.write_str(name)
    }
}

/// Failure of a single backend call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Failed to {operation}: network error: {message}")]
    Network { operation: Operation, message: String },

    /// The server answered with a non-success status
    #[error("Failed to {operation}: HTTP {status}")]
    Status { operation: Operation, status: u16 },

    /// The response body did not match the expected shape
    #[error("Failed to {operation}: unexpected response: {message}")]
    Decode { operation: Operation, message: String },
}

impl ApiError {
    pub fn operation(&self) -> Operation {
        match self {
            ApiError::Network { operation, .. }
            | ApiError::Status { operation, .. }
            | ApiError::Decode { operation, .. } => *operation,
        }
    }

    /// HTTP status, if the server responded at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for backend calls
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::Status {
            operation: Operation::DeleteProcess,
            status: 500,
        };
        assert_eq!(err.to_string(), "Failed to delete process: HTTP 500");
        assert_eq!(err.status(), Some(500));

        let err = ApiError::Network {
            operation: Operation::StartWork,
            message: "connection refused".to_string(),
        };
        assert_eq!(err.operation(), Operation::StartWork);
        assert_eq!(err.status(), None);
    }
}
