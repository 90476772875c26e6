//! Domain Types
//!
//! Wire shapes of the records exchanged with the tracker backend.

use serde::{Deserialize, Deserializer, Serialize};

/// Category the backend assigns when none is given
pub const DEFAULT_CATEGORY: &str = "general";

/// Process name used when the selected id is missing from the fetched list
pub const UNKNOWN_PROCESS_NAME: &str = "Unknown";

/// A trackable unit of work defined by an administrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
    /// Estimated duration in minutes
    #[serde(default, deserialize_with = "whole_minutes")]
    pub estimated_duration: u32,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

// The backend stores numbers as decimals and may echo them back as `30.0`.
// Null, negative or non-finite estimates read as 0.
fn whole_minutes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let minutes = match Option::<f64>::deserialize(deserializer)? {
        Some(value) if value.is_finite() && value > 0.0 => value.round().min(u32::MAX as f64),
        _ => 0.0,
    };
    Ok(minutes as u32)
}

fn whole_seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    match Option::<f64>::deserialize(deserializer)? {
        None => Ok(None),
        Some(value) if value.is_finite() && value >= 0.0 => Ok(Some(value.round() as u64)),
        Some(value) => Err(serde::de::Error::custom(format!("invalid duration: {}", value))),
    }
}

/// Fields submitted when creating a process; the server assigns the id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessDraft {
    pub name: String,
    pub description: String,
    pub category: String,
    pub estimated_duration: u32,
}

impl Default for ProcessDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            category: default_category(),
            estimated_duration: 0,
        }
    }
}

impl ProcessDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn estimated_duration(mut self, minutes: u32) -> Self {
        self.estimated_duration = minutes;
        self
    }
}

/// Lifecycle of a work log on the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkStatus {
    Running,
    Completed,
}

impl std::fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkStatus::Running => write!(f, "RUNNING"),
            WorkStatus::Completed => write!(f, "COMPLETED"),
        }
    }
}

/// One operator's time on one process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkLog {
    pub id: String,
    pub person_name: String,
    pub process_id: String,
    #[serde(default)]
    pub process_name: Option<String>,
    /// ISO-8601, as issued by the server
    pub start_timestamp: String,
    #[serde(default)]
    pub end_timestamp: Option<String>,
    /// Seconds, filled in by the server on stop
    #[serde(default, deserialize_with = "whole_seconds")]
    pub duration: Option<u64>,
    pub status: WorkStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_defaults_for_missing_fields() {
        let process: Process =
            serde_json::from_str(r#"{"id":"p1","name":"Sand","is_active":true}"#).unwrap();
        assert_eq!(process.description, "");
        assert_eq!(process.category, "general");
        assert_eq!(process.estimated_duration, 0);
    }

    #[test]
    fn test_draft_default_is_empty_form() {
        let draft = ProcessDraft::default();
        assert_eq!(draft.name, "");
        assert_eq!(draft.category, "general");
        assert_eq!(draft.estimated_duration, 0);
    }

    #[test]
    fn test_work_log_from_backend() {
        let json = r#"{
            "id": "log-1",
            "person_name": "Ada",
            "process_id": "p1",
            "process_name": "Sand",
            "start_timestamp": "2025-03-01T08:00:00.123456Z",
            "end_timestamp": null,
            "duration": null,
            "status": "RUNNING"
        }"#;
        let log: WorkLog = serde_json::from_str(json).unwrap();
        assert_eq!(log.status, WorkStatus::Running);
        assert_eq!(log.process_name.as_deref(), Some("Sand"));
        assert!(log.end_timestamp.is_none());
    }

    #[test]
    fn test_decimal_numbers_from_backend() {
        let process: Process = serde_json::from_str(
            r#"{"id":"p2","name":"Glue","estimated_duration":30.0}"#,
        )
        .unwrap();
        assert_eq!(process.estimated_duration, 30);

        let log: WorkLog = serde_json::from_str(
            r#"{"id":"l","person_name":"Ada","process_id":"p2",
                "start_timestamp":"2025-03-01T08:00:00Z",
                "end_timestamp":"2025-03-01T09:00:00Z",
                "duration":3600.0,"status":"COMPLETED"}"#,
        )
        .unwrap();
        assert_eq!(log.duration, Some(3600));
    }

    #[test]
    fn test_bad_estimates_read_as_zero() {
        let processes: Vec<Process> = serde_json::from_str(
            r#"[{"id":"p1","name":"Sand"},
                {"id":"p2","name":"Glue","estimated_duration":-5},
                {"id":"p3","name":"Cut","estimated_duration":null},
                {"id":"p4","name":"Drill","estimated_duration":12.4}]"#,
        )
        .unwrap();
        let minutes: Vec<_> = processes.iter().map(|p| p.estimated_duration).collect();
        assert_eq!(minutes, [0, 0, 0, 12]);
    }

    #[test]
    fn test_completed_status_name() {
        let status: WorkStatus = serde_json::from_str(r#""COMPLETED""#).unwrap();
        assert_eq!(status, WorkStatus::Completed);
        assert_eq!(status.to_string(), "COMPLETED");
    }
}
