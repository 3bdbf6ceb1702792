//! Public pin repository for map-anchored feedback.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use super::Pagination;
use crate::model::{NewPublicPin, PublicPin, UpdatePublicPin};
use crate::types::PinStatus;
use crate::{PgError, PgResult, schema};

/// Repository for public pin database operations.
#[derive(Debug, Default, Clone, Copy)]
pub struct PublicPinRepository;

impl PublicPinRepository {
    /// Creates a new public pin repository instance.
    pub fn new() -> Self {
        Self
    }

    /// Creates a new pin.
    pub async fn create_pin(
        conn: &mut AsyncPgConnection,
        pin: NewPublicPin,
    ) -> PgResult<PublicPin> {
        use schema::public_pins;

        let pin = diesel::insert_into(public_pins::table)
            .values(&pin)
            .returning(PublicPin::as_returning())
            .get_result(conn)
            .await
            .map_err(PgError::from)?;

        Ok(pin)
    }

    /// Finds a pin by its unique identifier.
    pub async fn find_pin_by_id(
        conn: &mut AsyncPgConnection,
        pin_id: Uuid,
    ) -> PgResult<Option<PublicPin>> {
        use schema::public_pins::dsl::*;

        let pin = public_pins
            .filter(id.eq(pin_id))
            .select(PublicPin::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(pin)
    }

    /// Lists a project's pins, optionally filtered by moderation status.
    ///
    /// Public routes pass `Some(Published)`; the moderation view passes `None`
    /// to see everything.
    pub async fn list_project_pins(
        conn: &mut AsyncPgConnection,
        target_project_id: Uuid,
        status_filter: Option<PinStatus>,
        pagination: Pagination,
    ) -> PgResult<Vec<PublicPin>> {
        use schema::public_pins::dsl::*;

        let mut query = public_pins
            .filter(project_id.eq(target_project_id))
            .select(PublicPin::as_select())
            .order(created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .into_boxed();

        if let Some(wanted) = status_filter {
            query = query.filter(status.eq(wanted));
        }

        let pin_list = query.load(conn).await.map_err(PgError::from)?;

        Ok(pin_list)
    }

    /// Updates a pin and returns the updated record.
    pub async fn update_pin(
        conn: &mut AsyncPgConnection,
        pin_id: Uuid,
        update: UpdatePublicPin,
    ) -> PgResult<Option<PublicPin>> {
        use schema::public_pins::dsl::*;

        let pin = diesel::update(public_pins)
            .filter(id.eq(pin_id))
            .set(&update)
            .returning(PublicPin::as_returning())
            .get_result(conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(pin)
    }

    /// Atomically increments a published pin's reaction counter.
    ///
    /// Reactions on pins that are not publicly visible are rejected by the
    /// status filter rather than an explicit check, which keeps the
    /// increment a single statement.
    pub async fn add_reaction(
        conn: &mut AsyncPgConnection,
        pin_id: Uuid,
    ) -> PgResult<Option<PublicPin>> {
        use schema::public_pins::dsl::*;

        let pin = diesel::update(public_pins)
            .filter(id.eq(pin_id))
            .filter(status.eq(PinStatus::Published))
            .set(reactions.eq(reactions + 1))
            .returning(PublicPin::as_returning())
            .get_result(conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(pin)
    }

    /// Deletes a pin permanently.
    pub async fn delete_pin(conn: &mut AsyncPgConnection, pin_id: Uuid) -> PgResult<bool> {
        use schema::public_pins::dsl::*;

        let deleted = diesel::delete(public_pins.filter(id.eq(pin_id)))
            .execute(conn)
            .await
            .map_err(PgError::from)?;

        Ok(deleted > 0)
    }

    /// Counts a project's pins.
    pub async fn count_project_pins(
        conn: &mut AsyncPgConnection,
        target_project_id: Uuid,
    ) -> PgResult<i64> {
        use schema::public_pins::dsl::*;

        let count = public_pins
            .filter(project_id.eq(target_project_id))
            .count()
            .get_result(conn)
            .await
            .map_err(PgError::from)?;

        Ok(count)
    }

    /// Returns the pin comments that feed the analysis corpus.
    ///
    /// Hidden pins are excluded; pending ones still count as collected
    /// feedback.
    pub async fn list_pin_comments(
        conn: &mut AsyncPgConnection,
        target_project_id: Uuid,
    ) -> PgResult<Vec<String>> {
        use schema::public_pins::dsl::*;

        let comments = public_pins
            .filter(project_id.eq(target_project_id))
            .filter(status.ne(PinStatus::Hidden))
            .filter(comment.ne(""))
            .order(created_at.asc())
            .select(comment)
            .load(conn)
            .await
            .map_err(PgError::from)?;

        Ok(comments)
    }
}
