//! Wire types for the completed-items endpoint

use crate::error::TodoistLogError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Inclusive query range, both ends formatted `YYYY-MM-DDTHH:MM:SS`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    /// Range start
    pub since: String,
    /// Range end
    pub until: String,
}

impl TimeRange {
    /// Build a range from two local date-times
    ///
    /// # Examples
    ///
    /// ```
    /// use todoist_log::input::parse_timestamp;
    /// use todoist_log::todoist::TimeRange;
    ///
    /// let range = TimeRange::new(
    ///     parse_timestamp("2023-01-01T00:00:00").unwrap(),
    ///     parse_timestamp("2023-01-02T23:59:59").unwrap(),
    /// );
    /// assert_eq!(range.since, "2023-01-01T00:00:00");
    /// ```
    pub fn new(since: NaiveDateTime, until: NaiveDateTime) -> Self {
        Self {
            since: crate::input::format_timestamp(since.date(), since.time()),
            until: crate::input::format_timestamp(until.date(), until.time()),
        }
    }
}

/// JSON body of one completed-items request
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CompletedRequest<'a> {
    pub since: &'a str,
    pub until: &'a str,
    /// Must be true so note content is attached to each item
    pub annotate_notes: bool,
    pub offset: u64,
}

impl<'a> CompletedRequest<'a> {
    /// Request for the page starting at `offset`
    pub fn new(range: &'a TimeRange, offset: u64) -> Self {
        Self {
            since: &range.since,
            until: &range.until,
            annotate_notes: true,
            offset,
        }
    }
}

/// Anything in a lookup table that only contributes its name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedEntity {
    pub name: String,
}

/// Comment attached to a completed task
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Note {
    pub content: String,
}

/// One completed task as returned by the service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletedTask {
    pub completed_at: String,
    pub project_id: Option<String>,
    pub section_id: Option<String>,
    pub content: String,
    pub notes: Vec<Note>,
}

/// Decoded body of one completed-items response
///
/// The lookup tables only cover the items of the same page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Page {
    pub projects: HashMap<String, NamedEntity>,
    pub sections: HashMap<String, NamedEntity>,
    pub items: Vec<CompletedTask>,
}

impl Page {
    /// Name of `project_id` in this page; empty when the task has no project
    ///
    /// # Errors
    ///
    /// Returns [`TodoistLogError::UnknownProject`] if the id is not in the table
    pub fn project_name(&self, project_id: Option<&str>) -> Result<&str, TodoistLogError> {
        match project_id {
            None => Ok(""),
            Some(id) => self
                .projects
                .get(id)
                .map(|p| p.name.as_str())
                .ok_or_else(|| TodoistLogError::UnknownProject(id.to_string())),
        }
    }

    /// Name of `section_id` in this page; empty when the task has no section
    ///
    /// # Errors
    ///
    /// Returns [`TodoistLogError::UnknownSection`] if the id is not in the table
    pub fn section_name(&self, section_id: Option<&str>) -> Result<&str, TodoistLogError> {
        match section_id {
            None => Ok(""),
            Some(id) => self
                .sections
                .get(id)
                .map(|s| s.name.as_str())
                .ok_or_else(|| TodoistLogError::UnknownSection(id.to_string())),
        }
    }
}
