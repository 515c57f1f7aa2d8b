//! Query plan diagnostics from `explain` with `executionStats` verbosity.

use std::fmt;

use bson::{Bson, Document, doc};

use crate::document::DocumentExt;
use crate::error::{MongoError, MongoResult};

/// Stage name reported when the planner scanned the whole collection.
pub const COLLECTION_SCAN: &str = "COLLSCAN";

/// Execution statistics for one explained query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainReport {
    pub execution_time_ms: i64,
    pub docs_examined: i64,
    pub docs_returned: i64,
    /// Root stage of the winning plan (`FETCH`, `COLLSCAN`, ...).
    pub stage: String,
    /// First index found anywhere in the winning plan.
    pub index_name: Option<String>,
}

impl ExplainReport {
    /// Build the `explain` command for a find on `collection`.
    pub fn command(collection: &str, filter: Document) -> Document {
        doc! {
            "explain": { "find": collection, "filter": filter },
            "verbosity": "executionStats",
        }
    }

    /// Parse the server's reply to [`ExplainReport::command`].
    pub fn from_response(response: &Document) -> MongoResult<Self> {
        let stats = response.document("executionStats")?;
        let stages = stats.document("executionStages")?;

        let stage = stages
            .str_opt("stage")
            .ok_or_else(|| MongoError::query("explain output has no root stage"))?
            .to_string();

        Ok(Self {
            execution_time_ms: stats.number_i64("executionTimeMillis")?,
            docs_examined: stats.number_i64("totalDocsExamined")?,
            docs_returned: stats.number_i64("nReturned")?,
            stage,
            index_name: find_index_name(stages),
        })
    }

    /// Index name if one was used, otherwise the root stage.
    pub fn stage_or_index_used(&self) -> &str {
        self.index_name.as_deref().unwrap_or(&self.stage)
    }

    /// Whether the plan read the collection without an index.
    pub fn is_collection_scan(&self) -> bool {
        self.index_name.is_none()
    }
}

impl fmt::Display for ExplainReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}ms, {} examined, {} returned)",
            self.stage_or_index_used(),
            self.execution_time_ms,
            self.docs_examined,
            self.docs_returned
        )
    }
}

// Index scans usually sit below a FETCH, and OR plans fan out into `inputStages`.
fn find_index_name(stage: &Document) -> Option<String> {
    if let Some(name) = stage.str_opt("indexName") {
        return Some(name.to_string());
    }
    if let Some(child) = stage.document_opt("inputStage") {
        if let Some(name) = find_index_name(child) {
            return Some(name);
        }
    }
    stage
        .get_array("inputStages")
        .ok()?
        .iter()
        .filter_map(Bson::as_document)
        .find_map(find_index_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn response(stages: Document) -> Document {
        doc! {
            "queryPlanner": { "namespace": "plp_bookstore.books" },
            "executionStats": {
                "executionSuccess": true,
                "nReturned": 1,
                "executionTimeMillis": 0,
                "totalKeysExamined": 1,
                "totalDocsExamined": 1,
                "executionStages": stages,
            },
            "ok": 1.0,
        }
    }

    #[test]
    fn test_command_shape() {
        let cmd = ExplainReport::command("books", doc! { "title": "1984" });
        assert_eq!(
            cmd,
            doc! {
                "explain": { "find": "books", "filter": { "title": "1984" } },
                "verbosity": "executionStats",
            }
        );
        assert_eq!(cmd.keys().next().map(String::as_str), Some("explain"));
    }

    #[test]
    fn test_index_found_below_fetch() {
        let report = ExplainReport::from_response(&response(doc! {
            "stage": "FETCH",
            "nReturned": 1,
            "inputStage": { "stage": "IXSCAN", "indexName": "title_1" },
        }))
        .unwrap();

        assert_eq!(report.stage, "FETCH");
        assert_eq!(report.index_name.as_deref(), Some("title_1"));
        assert_eq!(report.stage_or_index_used(), "title_1");
        assert!(!report.is_collection_scan());
    }

    #[test]
    fn test_collection_scan_has_no_index() {
        let report = ExplainReport::from_response(&response(doc! {
            "stage": "COLLSCAN",
            "filter": { "genre": { "$eq": "Fiction" } },
        }))
        .unwrap();

        assert_eq!(report.stage_or_index_used(), COLLECTION_SCAN);
        assert!(report.is_collection_scan());
    }

    #[test]
    fn test_index_found_in_or_branches() {
        let report = ExplainReport::from_response(&response(doc! {
            "stage": "SUBPLAN",
            "inputStage": {
                "stage": "OR",
                "inputStages": [
                    { "stage": "COLLSCAN" },
                    { "stage": "FETCH", "inputStage": {
                        "stage": "IXSCAN",
                        "indexName": "author_1_published_year_-1",
                    } },
                ],
            },
        }))
        .unwrap();

        assert_eq!(
            report.index_name.as_deref(),
            Some("author_1_published_year_-1")
        );
    }

    #[test]
    fn test_counters_accept_long_values() {
        let mut resp = response(doc! { "stage": "COLLSCAN" });
        let stats = resp.get_document_mut("executionStats").unwrap();
        stats.insert("totalDocsExamined", 12_i64);
        stats.insert("executionTimeMillis", 3_i64);

        let report = ExplainReport::from_response(&resp).unwrap();
        assert_eq!(report.docs_examined, 12);
        assert_eq!(report.execution_time_ms, 3);
        assert_eq!(
            report.to_string(),
            "COLLSCAN (3ms, 12 examined, 1 returned)"
        );
    }

    #[test]
    fn test_missing_stats_is_query_error() {
        let err = ExplainReport::from_response(&doc! { "ok": 1.0 }).unwrap_err();
        assert!(matches!(err, MongoError::Query(_)));
    }
}
