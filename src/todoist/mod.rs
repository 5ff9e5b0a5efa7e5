//! Todoist completed-items retrieval
//!
//! - `types`: request and response bodies plus the per-page lookups
//! - `client`: the `reqwest` implementation of [`PageSource`]
//!
//! [`fetch_completed_rows`] walks the offset cursor one page at a time
//! until the service returns an empty page.

pub mod client;
pub mod types;

pub use client::TodoistClient;
pub use types::{CompletedRequest, CompletedTask, NamedEntity, Note, Page, TimeRange};

use crate::error::Result;
use crate::report::ResultRow;
use async_trait::async_trait;

/// Offset increment used by the service for completed items
pub const DEFAULT_PAGE_SIZE: u64 = 200;

/// Source of completed-item pages addressed by offset
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the page that starts at `offset` within `range`
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::TodoistLogError::InvalidCredential`] for a
    /// rejected token, `Connection` for any other request failure, and
    /// `MalformedResponse` for an undecodable body.
    async fn fetch_page(&self, range: &TimeRange, offset: u64) -> Result<Page>;
}

/// Fetch every completed task in `range` and project it into a row
///
/// Pages are requested strictly in cursor order with one attempt each; the
/// first failing page aborts the whole retrieval. Rows come back in request
/// order, unsorted.
///
/// # Errors
///
/// Propagates the first page error, or a lookup error from projection
pub async fn fetch_completed_rows<S>(
    source: &S,
    range: &TimeRange,
    page_size: u64,
) -> Result<Vec<ResultRow>>
where
    S: PageSource + ?Sized,
{
    let mut rows = Vec::new();
    let mut offset = 0u64;

    loop {
        let page = source.fetch_page(range, offset).await?;
        tracing::debug!(offset, items = page.items.len(), "Fetched completed-items page");

        if page.items.is_empty() {
            break;
        }

        for task in &page.items {
            rows.push(ResultRow::project(&page, task)?);
        }
        offset += page_size;
    }

    tracing::info!(rows = rows.len(), "Retrieved completed tasks");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TodoistLogError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Replays canned pages and records the offsets requested
    struct ScriptedSource {
        pages: Mutex<Vec<Result<Page>>>,
        offsets: Mutex<Vec<u64>>,
    }

    impl ScriptedSource {
        fn new(pages: Vec<Result<Page>>) -> Self {
            Self {
                pages: Mutex::new(pages.into_iter().rev().collect()),
                offsets: Mutex::new(Vec::new()),
            }
        }

        fn offsets(&self) -> Vec<u64> {
            self.offsets.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageSource for ScriptedSource {
        async fn fetch_page(&self, _range: &TimeRange, offset: u64) -> Result<Page> {
            self.offsets.lock().unwrap().push(offset);
            self.pages
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok(Page::default()))
        }
    }

    fn range() -> TimeRange {
        TimeRange {
            since: "2023-01-01T00:00:00".to_string(),
            until: "2023-01-02T23:59:59".to_string(),
        }
    }

    fn task(content: &str) -> CompletedTask {
        CompletedTask {
            completed_at: "2023-01-01T12:00:00Z".to_string(),
            project_id: Some("p".to_string()),
            section_id: None,
            content: content.to_string(),
            notes: Vec::new(),
        }
    }

    fn page_of(contents: &[&str]) -> Page {
        Page {
            projects: HashMap::from([(
                "p".to_string(),
                NamedEntity {
                    name: "Inbox".to_string(),
                },
            )]),
            sections: HashMap::new(),
            items: contents.iter().map(|c| task(c)).collect(),
        }
    }

    #[tokio::test]
    async fn test_stops_at_first_empty_page() {
        let source = ScriptedSource::new(vec![
            Ok(page_of(&["a", "b"])),
            Ok(page_of(&["c"])),
            Ok(page_of(&[])),
            Ok(page_of(&["never"])),
        ]);

        let rows = fetch_completed_rows(&source, &range(), 200).await.unwrap();

        assert_eq!(source.offsets(), vec![0, 200, 400]);
        let contents: Vec<_> = rows.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(contents, vec!["a", "b", "c"]);
        assert!(rows.iter().all(|r| r.project == "Inbox"));
    }

    #[tokio::test]
    async fn test_empty_first_page_yields_no_rows() {
        let source = ScriptedSource::new(vec![Ok(Page::default())]);
        let rows = fetch_completed_rows(&source, &range(), 200).await.unwrap();
        assert!(rows.is_empty());
        assert_eq!(source.offsets(), vec![0]);
    }

    #[tokio::test]
    async fn test_page_size_drives_offset() {
        let source = ScriptedSource::new(vec![Ok(page_of(&["a"])), Ok(page_of(&["b"]))]);
        fetch_completed_rows(&source, &range(), 50).await.unwrap();
        assert_eq!(source.offsets(), vec![0, 50, 100]);
    }

    #[tokio::test]
    async fn test_error_mid_pagination_discards_partial_rows() {
        let source = ScriptedSource::new(vec![
            Ok(page_of(&["a"])),
            Err(TodoistLogError::InvalidCredential.into()),
            Ok(page_of(&["b"])),
        ]);

        let err = fetch_completed_rows(&source, &range(), 200)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<TodoistLogError>(),
            Some(TodoistLogError::InvalidCredential)
        ));
        assert_eq!(source.offsets(), vec![0, 200]);
    }

    #[tokio::test]
    async fn test_unknown_project_is_fatal() {
        let mut page = page_of(&["a"]);
        page.projects.clear();
        let source = ScriptedSource::new(vec![Ok(page)]);

        let err = fetch_completed_rows(&source, &range(), 200)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TodoistLogError>(),
            Some(TodoistLogError::UnknownProject(_))
        ));
    }
}
