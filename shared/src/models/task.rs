//! Task Model

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::serde_helpers;

/// Task status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| format!("unknown task status: {}", s))
    }
}

/// Task importance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskImportance {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskImportance {
    pub const ALL: [TaskImportance; 3] = [
        TaskImportance::Low,
        TaskImportance::Medium,
        TaskImportance::High,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskImportance::Low => "low",
            TaskImportance::Medium => "medium",
            TaskImportance::High => "high",
        }
    }
}

impl fmt::Display for TaskImportance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskImportance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| format!("unknown task importance: {}", s))
    }
}

fn default_slot_count() -> i64 {
    1
}

/// Task as returned by the API (bookkeeping fields stripped)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub scheduled: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_calendar_date"
    )]
    pub day: Option<NaiveDate>,
    #[serde(default = "default_slot_count")]
    pub slot_count: i64,
    #[serde(default)]
    pub start_slot: i64,
    #[serde(default)]
    pub importance: TaskImportance,
    pub employee_id: String,
}

/// Create task payload (validated)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreate {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub scheduled: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_calendar_date"
    )]
    pub day: Option<NaiveDate>,
    #[serde(
        default = "default_slot_count",
        deserialize_with = "serde_helpers::integer"
    )]
    pub slot_count: i64,
    #[serde(default, deserialize_with = "serde_helpers::integer")]
    pub start_slot: i64,
    #[serde(default)]
    pub importance: TaskImportance,
    pub employee_id: String,
}

/// Update task payload (partial merge, validated)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_calendar_date"
    )]
    pub day: Option<NaiveDate>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::option_integer"
    )]
    pub slot_count: Option<i64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::option_integer"
    )]
    pub start_slot: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<TaskImportance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
}

/// Status breakdown of a task set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub pending_tasks: usize,
    pub in_progress_tasks: usize,
    pub cancelled_tasks: usize,
    /// Percentage with two decimals and a `%` suffix, `"0%"` for an empty set
    pub completion_rate: String,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let count = |status: TaskStatus| tasks.iter().filter(|t| t.status == status).count();

        let total_tasks = tasks.len();
        let completed_tasks = count(TaskStatus::Completed);
        let completion_rate = if total_tasks == 0 {
            "0%".to_string()
        } else {
            format!(
                "{:.2}%",
                completed_tasks as f64 / total_tasks as f64 * 100.0
            )
        };

        Self {
            total_tasks,
            completed_tasks,
            pending_tasks: count(TaskStatus::Pending),
            in_progress_tasks: count(TaskStatus::InProgress),
            cancelled_tasks: count(TaskStatus::Cancelled),
            completion_rate,
        }
    }
}

/// Reporting window of a monthly query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPeriod {
    pub month: u32,
    pub year: i32,
    /// RFC 3339, millisecond precision, UTC
    pub start_date: String,
    pub end_date: String,
}

/// Monthly task report for one employee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyTaskReport {
    pub tasks: Vec<Task>,
    pub stats: TaskStats,
    pub period: ReportPeriod,
}
