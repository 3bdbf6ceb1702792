//! Feedback form and response repository.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use super::Pagination;
use crate::model::{
    FeedbackForm, FeedbackResponse, NewFeedbackForm, NewFeedbackResponse, UpdateFeedbackForm,
};
use crate::{PgError, PgResult, schema};

/// Repository for feedback forms and their responses.
#[derive(Debug, Default, Clone, Copy)]
pub struct FeedbackFormRepository;

impl FeedbackFormRepository {
    /// Creates a new feedback form repository instance.
    pub fn new() -> Self {
        Self
    }

    /// Creates a new feedback form.
    pub async fn create_form(
        conn: &mut AsyncPgConnection,
        form: NewFeedbackForm,
    ) -> PgResult<FeedbackForm> {
        use schema::feedback_forms;

        let form = diesel::insert_into(feedback_forms::table)
            .values(&form)
            .returning(FeedbackForm::as_returning())
            .get_result(conn)
            .await
            .map_err(PgError::from)?;

        Ok(form)
    }

    /// Finds a form by its unique identifier.
    pub async fn find_form_by_id(
        conn: &mut AsyncPgConnection,
        target_form_id: Uuid,
    ) -> PgResult<Option<FeedbackForm>> {
        use schema::feedback_forms::dsl::*;

        let form = feedback_forms
            .filter(id.eq(target_form_id))
            .select(FeedbackForm::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(form)
    }

    /// Lists a project's forms, optionally restricted to open ones.
    pub async fn list_project_forms(
        conn: &mut AsyncPgConnection,
        target_project_id: Uuid,
        open_only: bool,
        pagination: Pagination,
    ) -> PgResult<Vec<FeedbackForm>> {
        use schema::feedback_forms::dsl::*;

        let mut query = feedback_forms
            .filter(project_id.eq(target_project_id))
            .select(FeedbackForm::as_select())
            .order(created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .into_boxed();

        if open_only {
            query = query.filter(is_open.eq(true));
        }

        let form_list = query.load(conn).await.map_err(PgError::from)?;

        Ok(form_list)
    }

    /// Updates a form and returns the updated record.
    pub async fn update_form(
        conn: &mut AsyncPgConnection,
        target_form_id: Uuid,
        update: UpdateFeedbackForm,
    ) -> PgResult<Option<FeedbackForm>> {
        use schema::feedback_forms::dsl::*;

        let form = diesel::update(feedback_forms)
            .filter(id.eq(target_form_id))
            .set(&update)
            .returning(FeedbackForm::as_returning())
            .get_result(conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(form)
    }

    /// Deletes a form permanently, together with its responses.
    pub async fn delete_form(conn: &mut AsyncPgConnection, target_form_id: Uuid) -> PgResult<bool> {
        use schema::feedback_forms::dsl::*;

        let deleted = diesel::delete(feedback_forms.filter(id.eq(target_form_id)))
            .execute(conn)
            .await
            .map_err(PgError::from)?;

        Ok(deleted > 0)
    }

    /// Stores a response to a form.
    pub async fn create_response(
        conn: &mut AsyncPgConnection,
        response: NewFeedbackResponse,
    ) -> PgResult<FeedbackResponse> {
        use schema::feedback_responses;

        let response = diesel::insert_into(feedback_responses::table)
            .values(&response)
            .returning(FeedbackResponse::as_returning())
            .get_result(conn)
            .await
            .map_err(PgError::from)?;

        Ok(response)
    }

    /// Lists a form's responses with pagination, newest first.
    pub async fn list_form_responses(
        conn: &mut AsyncPgConnection,
        target_form_id: Uuid,
        pagination: Pagination,
    ) -> PgResult<Vec<FeedbackResponse>> {
        use schema::feedback_responses::dsl::*;

        let response_list = feedback_responses
            .filter(form_id.eq(target_form_id))
            .select(FeedbackResponse::as_select())
            .order(created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .load(conn)
            .await
            .map_err(PgError::from)?;

        Ok(response_list)
    }

    /// Counts a form's responses.
    pub async fn count_form_responses(
        conn: &mut AsyncPgConnection,
        target_form_id: Uuid,
    ) -> PgResult<i64> {
        use schema::feedback_responses::dsl::*;

        let count = feedback_responses
            .filter(form_id.eq(target_form_id))
            .count()
            .get_result(conn)
            .await
            .map_err(PgError::from)?;

        Ok(count)
    }

    /// Returns the response payloads that feed the analysis corpus.
    ///
    /// Joins through the project's forms so a single call collects answers
    /// across every form.
    pub async fn list_project_answers(
        conn: &mut AsyncPgConnection,
        target_project_id: Uuid,
    ) -> PgResult<Vec<serde_json::Value>> {
        use schema::{feedback_forms, feedback_responses};

        let answer_list = feedback_responses::table
            .inner_join(feedback_forms::table)
            .filter(feedback_forms::project_id.eq(target_project_id))
            .order(feedback_responses::created_at.asc())
            .select(feedback_responses::answers)
            .load(conn)
            .await
            .map_err(PgError::from)?;

        Ok(answer_list)
    }
}
