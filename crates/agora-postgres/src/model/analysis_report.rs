//! Cached AI analysis report model.

use diesel::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::schema::analysis_reports;

/// A cached AI analysis of a project's collected feedback.
///
/// `content_hash` fingerprints the feedback corpus the report was generated
/// from; the analytics endpoint reuses the stored report while the
/// fingerprint is unchanged and regenerates it otherwise.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = analysis_reports)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AnalysisReport {
    /// Unique report identifier
    pub id: Uuid,
    /// Project the report analyses
    pub project_id: Uuid,
    /// Fingerprint of the analysed feedback corpus
    pub content_hash: String,
    /// Sentiment breakdown as JSONB
    pub sentiment: serde_json::Value,
    /// Extracted themes as JSONB
    pub themes: serde_json::Value,
    /// Narrative summary
    pub summary: String,
    /// Model identifier that produced the report
    pub model: String,
    /// Timestamp when the report was generated
    pub generated_at: OffsetDateTime,
}

/// Data for storing a new analysis report.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = analysis_reports)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewAnalysisReport {
    /// Project the report analyses
    pub project_id: Uuid,
    /// Corpus fingerprint
    pub content_hash: String,
    /// Sentiment breakdown
    pub sentiment: serde_json::Value,
    /// Extracted themes
    pub themes: serde_json::Value,
    /// Narrative summary
    pub summary: String,
    /// Model identifier
    pub model: String,
}

impl AnalysisReport {
    /// Returns whether this report still describes the given corpus.
    pub fn matches_corpus(&self, content_hash: &str) -> bool {
        self.content_hash == content_hash
    }
}
