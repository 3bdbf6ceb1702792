//! Mailing-list subscriber model.

use diesel::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::schema::subscribers;
use crate::types::SubscriberStatus;

/// A mailing-list member for a project.
///
/// Subscription is double opt-in: a signup creates a pending record with a
/// confirm token; redeeming the token moves it to subscribed. The separate
/// unsubscribe token is embedded in every mailing so recipients can opt out
/// without authenticating.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = subscribers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Subscriber {
    /// Unique subscriber identifier
    pub id: Uuid,
    /// Project the subscription belongs to
    pub project_id: Uuid,
    /// Subscriber email address (unique per project)
    pub email: String,
    /// Double opt-in state
    pub status: SubscriberStatus,
    /// Token redeemed to confirm the subscription
    pub confirm_token: Uuid,
    /// Token redeemed to opt out
    pub unsubscribe_token: Uuid,
    /// Timestamp when the subscription was confirmed
    pub confirmed_at: Option<OffsetDateTime>,
    /// Timestamp when the subscriber opted out
    pub unsubscribed_at: Option<OffsetDateTime>,
    /// Timestamp when the signup happened
    pub created_at: OffsetDateTime,
    /// Timestamp when the record was last updated
    pub updated_at: OffsetDateTime,
}

/// Data for creating a new subscriber.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = subscribers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewSubscriber {
    /// Project the subscription belongs to
    pub project_id: Uuid,
    /// Subscriber email address
    pub email: String,
    /// Initial status
    pub status: Option<SubscriberStatus>,
}

/// Data for updating a subscriber.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = subscribers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateSubscriber {
    /// Double opt-in state
    pub status: Option<SubscriberStatus>,
    /// Rotated confirm token (set on re-subscribe)
    pub confirm_token: Option<Uuid>,
    /// Confirmed at
    pub confirmed_at: Option<Option<OffsetDateTime>>,
    /// Unsubscribed at
    pub unsubscribed_at: Option<Option<OffsetDateTime>>,
}

impl Subscriber {
    /// Returns whether project updates should be delivered here.
    pub fn is_reachable(&self) -> bool {
        self.status.is_reachable()
    }

    /// Returns whether the confirm token may still be redeemed.
    pub fn can_confirm(&self) -> bool {
        self.status.can_confirm()
    }
}
