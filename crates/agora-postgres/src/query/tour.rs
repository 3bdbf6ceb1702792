//! Tour and tour stop repository.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use super::Pagination;
use crate::model::{NewTour, NewTourStop, Tour, TourStop, UpdateTour, UpdateTourStop};
use crate::{PgError, PgResult, schema};

/// Offset added during reorders so intermediate positions never collide with
/// the unique `(tour_id, position)` index.
const REORDER_OFFSET: i32 = 1_000_000;

/// Repository for tours and their ordered stops.
///
/// Stop positions within a tour are kept unique and dense (0..n); the
/// two-phase reorder and the post-delete compaction preserve that invariant.
/// Multi-statement operations expect the caller to hold a transaction.
#[derive(Debug, Default, Clone, Copy)]
pub struct TourRepository;

impl TourRepository {
    /// Creates a new tour repository instance.
    pub fn new() -> Self {
        Self
    }

    /// Creates a new tour.
    pub async fn create_tour(conn: &mut AsyncPgConnection, tour: NewTour) -> PgResult<Tour> {
        use schema::tours;

        let tour = diesel::insert_into(tours::table)
            .values(&tour)
            .returning(Tour::as_returning())
            .get_result(conn)
            .await
            .map_err(PgError::from)?;

        Ok(tour)
    }

    /// Finds a tour by its unique identifier.
    pub async fn find_tour_by_id(
        conn: &mut AsyncPgConnection,
        tour_id: Uuid,
    ) -> PgResult<Option<Tour>> {
        use schema::tours::dsl::*;

        let tour = tours
            .filter(id.eq(tour_id))
            .select(Tour::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(tour)
    }

    /// Lists a project's tours, optionally restricted to published ones.
    pub async fn list_project_tours(
        conn: &mut AsyncPgConnection,
        target_project_id: Uuid,
        published_only: bool,
        pagination: Pagination,
    ) -> PgResult<Vec<Tour>> {
        use schema::tours::dsl::*;

        let mut query = tours
            .filter(project_id.eq(target_project_id))
            .select(Tour::as_select())
            .order(created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .into_boxed();

        if published_only {
            query = query.filter(is_published.eq(true));
        }

        let tour_list = query.load(conn).await.map_err(PgError::from)?;

        Ok(tour_list)
    }

    /// Updates a tour and returns the updated record.
    pub async fn update_tour(
        conn: &mut AsyncPgConnection,
        tour_id: Uuid,
        update: UpdateTour,
    ) -> PgResult<Option<Tour>> {
        use schema::tours::dsl::*;

        let tour = diesel::update(tours)
            .filter(id.eq(tour_id))
            .set(&update)
            .returning(Tour::as_returning())
            .get_result(conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(tour)
    }

    /// Deletes a tour permanently, together with its stops.
    pub async fn delete_tour(conn: &mut AsyncPgConnection, tour_id: Uuid) -> PgResult<bool> {
        use schema::tours::dsl::*;

        let deleted = diesel::delete(tours.filter(id.eq(tour_id)))
            .execute(conn)
            .await
            .map_err(PgError::from)?;

        Ok(deleted > 0)
    }

    /// Adds a stop to a tour.
    pub async fn create_stop(
        conn: &mut AsyncPgConnection,
        stop: NewTourStop,
    ) -> PgResult<TourStop> {
        use schema::tour_stops;

        let stop = diesel::insert_into(tour_stops::table)
            .values(&stop)
            .returning(TourStop::as_returning())
            .get_result(conn)
            .await
            .map_err(PgError::from)?;

        Ok(stop)
    }

    /// Finds a stop by its unique identifier.
    pub async fn find_stop_by_id(
        conn: &mut AsyncPgConnection,
        stop_id: Uuid,
    ) -> PgResult<Option<TourStop>> {
        use schema::tour_stops::dsl::*;

        let stop = tour_stops
            .filter(id.eq(stop_id))
            .select(TourStop::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(stop)
    }

    /// Lists a tour's stops in playback order.
    pub async fn list_tour_stops(
        conn: &mut AsyncPgConnection,
        target_tour_id: Uuid,
    ) -> PgResult<Vec<TourStop>> {
        use schema::tour_stops::dsl::*;

        let stop_list = tour_stops
            .filter(tour_id.eq(target_tour_id))
            .select(TourStop::as_select())
            .order(position.asc())
            .load(conn)
            .await
            .map_err(PgError::from)?;

        Ok(stop_list)
    }

    /// Returns the next free playback position for a tour.
    pub async fn next_stop_position(
        conn: &mut AsyncPgConnection,
        target_tour_id: Uuid,
    ) -> PgResult<i32> {
        use diesel::dsl::max;
        use schema::tour_stops::dsl::*;

        let highest: Option<i32> = tour_stops
            .filter(tour_id.eq(target_tour_id))
            .select(max(position))
            .first(conn)
            .await
            .map_err(PgError::from)?;

        Ok(highest.map_or(0, |p| p + 1))
    }

    /// Updates a stop and returns the updated record.
    pub async fn update_stop(
        conn: &mut AsyncPgConnection,
        stop_id: Uuid,
        update: UpdateTourStop,
    ) -> PgResult<Option<TourStop>> {
        use schema::tour_stops::dsl::*;

        let stop = diesel::update(tour_stops)
            .filter(id.eq(stop_id))
            .set(&update)
            .returning(TourStop::as_returning())
            .get_result(conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(stop)
    }

    /// Deletes a stop and compacts the remaining positions.
    ///
    /// Run inside a transaction: the delete and the compaction must land
    /// together or positions stop being dense.
    pub async fn delete_stop(conn: &mut AsyncPgConnection, stop_id: Uuid) -> PgResult<bool> {
        use schema::tour_stops::dsl::*;

        let Some(stop) = Self::find_stop_by_id(conn, stop_id).await? else {
            return Ok(false);
        };

        diesel::delete(tour_stops.filter(id.eq(stop_id)))
            .execute(conn)
            .await
            .map_err(PgError::from)?;

        // Close the gap left by the deleted stop. Walking down in position
        // order keeps the unique index satisfied at every step.
        let remaining = Self::list_tour_stops(conn, stop.tour_id).await?;
        for (index, remaining_stop) in remaining.iter().enumerate() {
            let wanted = index as i32;
            if remaining_stop.position != wanted {
                diesel::update(tour_stops.filter(id.eq(remaining_stop.id)))
                    .set(position.eq(wanted))
                    .execute(conn)
                    .await
                    .map_err(PgError::from)?;
            }
        }

        Ok(true)
    }

    /// Applies a full reordering of a tour's stops.
    ///
    /// `ordered_stop_ids` must be a permutation of the tour's current stop
    /// ids; anything else is rejected before any row is touched. The reorder
    /// is two-phase (shift far away, then place) so the unique
    /// `(tour_id, position)` index holds throughout. Run inside a
    /// transaction.
    pub async fn reorder_stops(
        conn: &mut AsyncPgConnection,
        target_tour_id: Uuid,
        ordered_stop_ids: &[Uuid],
    ) -> PgResult<Vec<TourStop>> {
        use schema::tour_stops::dsl::*;

        let current = Self::list_tour_stops(conn, target_tour_id).await?;

        if current.len() != ordered_stop_ids.len()
            || !current
                .iter()
                .all(|stop| ordered_stop_ids.contains(&stop.id))
        {
            return Err(PgError::Unexpected(
                "stop order must be a permutation of the tour's stops".into(),
            ));
        }

        // Phase one: move everything clear of the target range.
        diesel::update(tour_stops.filter(tour_id.eq(target_tour_id)))
            .set(position.eq(position + REORDER_OFFSET))
            .execute(conn)
            .await
            .map_err(PgError::from)?;

        // Phase two: place each stop at its requested index.
        for (index, stop_id) in ordered_stop_ids.iter().enumerate() {
            diesel::update(tour_stops.filter(id.eq(*stop_id)))
                .set(position.eq(index as i32))
                .execute(conn)
                .await
                .map_err(PgError::from)?;
        }

        Self::list_tour_stops(conn, target_tour_id).await
    }
}
