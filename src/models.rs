//! Frontend Models
//!
//! Data structures matching the backend's JSON (camelCase fields).

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Priority::Low, Priority::Medium, Priority::High, Priority::Urgent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority {0:?}")]
pub struct UnknownPriority(pub String);

impl FromStr for Priority {
    type Err = UnknownPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => Err(UnknownPriority(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignee {
    pub id: u32,
    pub name: String,
}

/// Kanban task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Column the task sits in
    pub status_id: u32,
    /// Sort key within the column; only relative order matters
    pub order_index: f64,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub project_id: u32,
    #[serde(default)]
    pub assignees: Vec<Assignee>,
}

/// Board column (task status)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: u32,
    pub label: String,
}

impl Column {
    pub fn new(id: u32, label: &str) -> Self {
        Self { id, label: label.to_string() }
    }
}

/// Columns used when configuration doesn't name any
pub fn default_columns() -> Vec<Column> {
    vec![
        Column::new(1, "To Do"),
        Column::new(2, "In Progress"),
        Column::new(3, "Review"),
        Column::new(4, "Done"),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// One page of a paginated listing (1-based page numbers)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: u32,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u32 {
        if self.limit == 0 {
            return 1;
        }
        self.total.div_ceil(self.limit).max(1)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}

/// Partial update sent after a reorder; `statusId` only when the column changed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub order_index: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<u32>,
}

/// Create request body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status_id: u32,
    pub order_index: f64,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub project_id: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_deserializes_camel_case() {
        let json = r#"{
            "id": 5, "title": "Write docs", "statusId": 2, "orderIndex": 1500.5,
            "priority": "high", "dueDate": "2026-11-02", "projectId": 9,
            "assignees": [{"id": 1, "name": "Sam"}]
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();

        assert_eq!(task.status_id, 2);
        assert_eq!(task.order_index, 1500.5);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2026, 11, 2));
        assert_eq!(task.assignees.len(), 1);
        assert!(task.description.is_none());
    }

    #[test]
    fn test_patch_omits_unchanged_status() {
        let same_column = TaskPatch { order_index: 15.0, status_id: None };
        let moved = TaskPatch { order_index: 1000.0, status_id: Some(3) };

        assert_eq!(serde_json::to_string(&same_column).unwrap(), r#"{"orderIndex":15.0}"#);
        assert_eq!(
            serde_json::to_string(&moved).unwrap(),
            r#"{"orderIndex":1000.0,"statusId":3}"#
        );
    }

    #[test]
    fn test_page_navigation() {
        let page = Page::<Project> { items: Vec::new(), page: 1, limit: 10, total: 25 };
        assert_eq!(page.total_pages(), 3);
        assert!(!page.has_prev());
        assert!(page.has_next());

        let last = Page::<Project> { page: 3, ..page.clone() };
        assert!(last.has_prev());
        assert!(!last.has_next());

        let empty = Page::<Project> { items: Vec::new(), page: 1, limit: 10, total: 0 };
        assert_eq!(empty.total_pages(), 1);
        assert!(!empty.has_next());
    }

    #[test]
    fn test_priority_strings() {
        assert_eq!(Priority::Urgent.as_str(), "urgent");
        assert_eq!("low".parse::<Priority>(), Ok(Priority::Low));
        assert_eq!("bogus".parse::<Priority>(), Err(UnknownPriority("bogus".to_string())));
        for priority in Priority::ALL {
            assert_eq!(priority.as_str().parse::<Priority>(), Ok(priority));
        }
    }
}
