//! Row projection and the tab-delimited report file
//!
//! Each completed task becomes one [`ResultRow`]. Rows are sorted
//! lexicographically field by field before they are written, so the file
//! order never depends on request order.

use crate::error::{Result, TodoistLogError};
use crate::todoist::{CompletedTask, Note, Page, TimeRange};
use std::path::{Path, PathBuf};

/// One output line: completion time, project, section, task, notes
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ResultRow {
    pub completed_at: String,
    pub project: String,
    pub section: String,
    pub content: String,
    pub notes: String,
}

impl ResultRow {
    /// Project `task` against the lookup tables of the page it came from
    ///
    /// # Errors
    ///
    /// Returns a lookup error if the task names a project or section the
    /// page does not define
    pub fn project(
        page: &Page,
        task: &CompletedTask,
    ) -> std::result::Result<Self, TodoistLogError> {
        Ok(Self {
            completed_at: task.completed_at.clone(),
            project: page.project_name(task.project_id.as_deref())?.to_string(),
            section: page.section_name(task.section_id.as_deref())?.to_string(),
            content: task.content.clone(),
            notes: condense_notes(&task.notes),
        })
    }

    /// Fields in output order
    pub fn fields(&self) -> [&str; 5] {
        [
            self.completed_at.as_str(),
            self.project.as_str(),
            self.section.as_str(),
            self.content.as_str(),
            self.notes.as_str(),
        ]
    }
}

/// Quote every non-empty note and join them with `", "`
///
/// # Examples
///
/// ```
/// use todoist_log::report::condense_notes;
/// use todoist_log::todoist::Note;
///
/// let notes: Vec<Note> = ["", "buy milk", ""]
///     .into_iter()
///     .map(|c| Note { content: c.to_string() })
///     .collect();
/// assert_eq!(condense_notes(&notes), "\"buy milk\"");
/// ```
pub fn condense_notes(notes: &[Note]) -> String {
    notes
        .iter()
        .filter(|note| !note.content.is_empty())
        .map(|note| format!("\"{}\"", note.content))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Sort rows into output order
pub fn sort_rows(rows: &mut [ResultRow]) {
    rows.sort();
}

/// Tab-join each row and newline-join the rows, with no trailing newline
pub fn render_rows(rows: &[ResultRow]) -> String {
    rows.iter()
        .map(|row| row.fields().join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Report file name for `range`, with colons replaced by hyphens
///
/// # Examples
///
/// ```
/// use todoist_log::report::output_file_name;
/// use todoist_log::todoist::TimeRange;
///
/// let range = TimeRange {
///     since: "2023-01-01T00:00:00".to_string(),
///     until: "2023-01-02T23:59:59".to_string(),
/// };
/// assert_eq!(
///     output_file_name(&range),
///     "todoist_2023-01-01T00-00-00_2023-01-02T23-59-59.TXT"
/// );
/// ```
pub fn output_file_name(range: &TimeRange) -> String {
    format!("todoist_{}_{}.TXT", range.since, range.until).replace(':', "-")
}

/// Sort `rows` and write them to `dir`, overwriting any existing report
///
/// Returns the path written.
///
/// # Errors
///
/// Returns error if the file cannot be written
pub fn write_report(dir: &Path, range: &TimeRange, rows: &mut [ResultRow]) -> Result<PathBuf> {
    sort_rows(rows);
    let path = dir.join(output_file_name(range));
    std::fs::write(&path, render_rows(rows)).map_err(TodoistLogError::from)?;
    tracing::info!(path = %path.display(), rows = rows.len(), "Wrote report");
    Ok(path)
}
