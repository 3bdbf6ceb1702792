//! Mailing-list subscriber repository.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use time::OffsetDateTime;
use uuid::Uuid;

use super::Pagination;
use crate::model::{NewSubscriber, Subscriber, UpdateSubscriber};
use crate::types::SubscriberStatus;
use crate::{PgError, PgResult, schema};

/// Repository for mailing-list subscriber operations.
///
/// Implements the double opt-in lifecycle: signup creates (or revives) a
/// pending record, the confirm token promotes it to subscribed, and the
/// unsubscribe token retires it. Token redemption is a single guarded
/// `UPDATE` so a token can only ever fire from the expected state.
#[derive(Debug, Default, Clone, Copy)]
pub struct SubscriberRepository;

impl SubscriberRepository {
    /// Creates a new subscriber repository instance.
    pub fn new() -> Self {
        Self
    }

    /// Signs an email address up to a project's mailing list.
    ///
    /// Idempotent: an existing pending or subscribed record is returned
    /// unchanged, while an unsubscribed record is revived as pending with a
    /// rotated confirm token. Run inside a transaction when composed with
    /// other writes.
    pub async fn subscribe(
        conn: &mut AsyncPgConnection,
        target_project_id: Uuid,
        subscriber_email: &str,
    ) -> PgResult<Subscriber> {
        if let Some(existing) =
            Self::find_subscriber_by_email(conn, target_project_id, subscriber_email).await?
        {
            return match existing.status {
                SubscriberStatus::Pending | SubscriberStatus::Subscribed => Ok(existing),
                SubscriberStatus::Unsubscribed => {
                    let update = UpdateSubscriber {
                        status: Some(SubscriberStatus::Pending),
                        confirm_token: Some(Uuid::new_v4()),
                        confirmed_at: Some(None),
                        unsubscribed_at: Some(None),
                    };

                    Self::update_subscriber(conn, existing.id, update)
                        .await?
                        .ok_or_else(|| {
                            PgError::Unexpected("subscriber vanished during re-subscribe".into())
                        })
                }
            };
        }

        let new_subscriber = NewSubscriber {
            project_id: target_project_id,
            email: subscriber_email.to_owned(),
            status: None,
        };

        Self::create_subscriber(conn, new_subscriber).await
    }

    /// Creates a new subscriber record.
    pub async fn create_subscriber(
        conn: &mut AsyncPgConnection,
        subscriber: NewSubscriber,
    ) -> PgResult<Subscriber> {
        use schema::subscribers;

        let subscriber = diesel::insert_into(subscribers::table)
            .values(&subscriber)
            .returning(Subscriber::as_returning())
            .get_result(conn)
            .await
            .map_err(PgError::from)?;

        Ok(subscriber)
    }

    /// Finds a subscriber by project and email address.
    pub async fn find_subscriber_by_email(
        conn: &mut AsyncPgConnection,
        target_project_id: Uuid,
        subscriber_email: &str,
    ) -> PgResult<Option<Subscriber>> {
        use schema::subscribers::dsl::*;

        let subscriber = subscribers
            .filter(project_id.eq(target_project_id))
            .filter(email.eq(subscriber_email))
            .select(Subscriber::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(subscriber)
    }

    /// Finds a subscriber by unsubscribe token, regardless of status.
    pub async fn find_subscriber_by_unsubscribe_token(
        conn: &mut AsyncPgConnection,
        token: Uuid,
    ) -> PgResult<Option<Subscriber>> {
        use schema::subscribers::dsl::*;

        let subscriber = subscribers
            .filter(unsubscribe_token.eq(token))
            .select(Subscriber::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(subscriber)
    }

    /// Redeems a confirm token, promoting a pending subscriber.
    ///
    /// Returns `None` when the token is unknown or the record is not in the
    /// pending state (already confirmed, or unsubscribed since).
    pub async fn confirm_by_token(
        conn: &mut AsyncPgConnection,
        token: Uuid,
    ) -> PgResult<Option<Subscriber>> {
        use schema::subscribers::dsl::*;

        let subscriber = diesel::update(subscribers)
            .filter(confirm_token.eq(token))
            .filter(status.eq(SubscriberStatus::Pending))
            .set((
                status.eq(SubscriberStatus::Subscribed),
                confirmed_at.eq(Some(OffsetDateTime::now_utc())),
            ))
            .returning(Subscriber::as_returning())
            .get_result(conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(subscriber)
    }

    /// Redeems an unsubscribe token.
    ///
    /// Works from either pending or subscribed; an already-unsubscribed
    /// record returns `None`, which callers treat as success since the
    /// desired end state holds.
    pub async fn unsubscribe_by_token(
        conn: &mut AsyncPgConnection,
        token: Uuid,
    ) -> PgResult<Option<Subscriber>> {
        use schema::subscribers::dsl::*;

        let subscriber = diesel::update(subscribers)
            .filter(unsubscribe_token.eq(token))
            .filter(status.ne(SubscriberStatus::Unsubscribed))
            .set((
                status.eq(SubscriberStatus::Unsubscribed),
                unsubscribed_at.eq(Some(OffsetDateTime::now_utc())),
            ))
            .returning(Subscriber::as_returning())
            .get_result(conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(subscriber)
    }

    /// Updates a subscriber and returns the updated record.
    pub async fn update_subscriber(
        conn: &mut AsyncPgConnection,
        subscriber_id: Uuid,
        update: UpdateSubscriber,
    ) -> PgResult<Option<Subscriber>> {
        use schema::subscribers::dsl::*;

        let subscriber = diesel::update(subscribers)
            .filter(id.eq(subscriber_id))
            .set(&update)
            .returning(Subscriber::as_returning())
            .get_result(conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(subscriber)
    }

    /// Lists a project's subscribers, optionally filtered by status.
    pub async fn list_project_subscribers(
        conn: &mut AsyncPgConnection,
        target_project_id: Uuid,
        status_filter: Option<SubscriberStatus>,
        pagination: Pagination,
    ) -> PgResult<Vec<Subscriber>> {
        use schema::subscribers::dsl::*;

        let mut query = subscribers
            .filter(project_id.eq(target_project_id))
            .select(Subscriber::as_select())
            .order(created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .into_boxed();

        if let Some(wanted) = status_filter {
            query = query.filter(status.eq(wanted));
        }

        let subscriber_list = query.load(conn).await.map_err(PgError::from)?;

        Ok(subscriber_list)
    }

    /// Counts a project's subscribers, optionally filtered by status.
    pub async fn count_project_subscribers(
        conn: &mut AsyncPgConnection,
        target_project_id: Uuid,
        status_filter: Option<SubscriberStatus>,
    ) -> PgResult<i64> {
        use schema::subscribers::dsl::*;

        let mut query = subscribers
            .filter(project_id.eq(target_project_id))
            .into_boxed();

        if let Some(wanted) = status_filter {
            query = query.filter(status.eq(wanted));
        }

        let count = query
            .count()
            .get_result(conn)
            .await
            .map_err(PgError::from)?;

        Ok(count)
    }
}
