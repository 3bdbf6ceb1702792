//! Mailing-list subscription status enumeration.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Double opt-in state of a mailing-list subscriber.
///
/// Corresponds to the `SUBSCRIBER_STATUS` PostgreSQL enum. The lifecycle is
/// pending (signed up, unconfirmed) → subscribed (confirm token used) →
/// unsubscribed (unsubscribe token used). Re-subscribing an unsubscribed
/// address restarts the cycle at pending.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::SubscriberStatus"]
pub enum SubscriberStatus {
    /// Signed up but has not yet confirmed their address
    #[db_rename = "pending"]
    #[serde(rename = "pending")]
    #[default]
    Pending,

    /// Confirmed and receiving project updates
    #[db_rename = "subscribed"]
    #[serde(rename = "subscribed")]
    Subscribed,

    /// Opted out; retained so the address is not re-added silently
    #[db_rename = "unsubscribed"]
    #[serde(rename = "unsubscribed")]
    Unsubscribed,
}

impl SubscriberStatus {
    /// Returns whether project updates should be delivered to this subscriber.
    #[inline]
    pub fn is_reachable(self) -> bool {
        matches!(self, SubscriberStatus::Subscribed)
    }

    /// Returns whether a confirm token may still be redeemed.
    #[inline]
    pub fn can_confirm(self) -> bool {
        matches!(self, SubscriberStatus::Pending)
    }
}
