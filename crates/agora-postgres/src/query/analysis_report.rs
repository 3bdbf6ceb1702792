//! Analysis report repository.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::model::{AnalysisReport, NewAnalysisReport};
use crate::{PgError, PgResult, schema};

/// Repository for cached AI analysis reports.
///
/// Reports are append-only; the newest report for a project is the live one
/// and older reports remain as history.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalysisReportRepository;

impl AnalysisReportRepository {
    /// Creates a new analysis report repository instance.
    pub fn new() -> Self {
        Self
    }

    /// Stores a freshly generated report.
    pub async fn store_report(
        conn: &mut AsyncPgConnection,
        report: NewAnalysisReport,
    ) -> PgResult<AnalysisReport> {
        use schema::analysis_reports;

        let report = diesel::insert_into(analysis_reports::table)
            .values(&report)
            .returning(AnalysisReport::as_returning())
            .get_result(conn)
            .await
            .map_err(PgError::from)?;

        Ok(report)
    }

    /// Finds the most recent report for a project.
    pub async fn find_latest_report(
        conn: &mut AsyncPgConnection,
        target_project_id: Uuid,
    ) -> PgResult<Option<AnalysisReport>> {
        use schema::analysis_reports::dsl::*;

        let report = analysis_reports
            .filter(project_id.eq(target_project_id))
            .select(AnalysisReport::as_select())
            .order(generated_at.desc())
            .first(conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(report)
    }

    /// Deletes every report for a project.
    ///
    /// Used when a project's feedback is purged and the cached analysis must
    /// not outlive its inputs.
    pub async fn delete_project_reports(
        conn: &mut AsyncPgConnection,
        target_project_id: Uuid,
    ) -> PgResult<usize> {
        use schema::analysis_reports::dsl::*;

        let deleted = diesel::delete(analysis_reports.filter(project_id.eq(target_project_id)))
            .execute(conn)
            .await
            .map_err(PgError::from)?;

        Ok(deleted)
    }
}
