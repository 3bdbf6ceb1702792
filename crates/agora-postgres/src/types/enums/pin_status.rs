//! Moderation status enumeration for map feedback.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Moderation state of a public pin.
///
/// Corresponds to the `PIN_STATUS` PostgreSQL enum. New submissions start as
/// pending and only published pins are served to site visitors.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::PinStatus"]
pub enum PinStatus {
    /// Awaiting moderation
    #[db_rename = "pending"]
    #[serde(rename = "pending")]
    #[default]
    Pending,

    /// Approved and visible to the public
    #[db_rename = "published"]
    #[serde(rename = "published")]
    Published,

    /// Rejected or withdrawn; visible to the team only
    #[db_rename = "hidden"]
    #[serde(rename = "hidden")]
    Hidden,
}

impl PinStatus {
    /// Returns whether the pin is visible to site visitors.
    #[inline]
    pub fn is_public(self) -> bool {
        matches!(self, PinStatus::Published)
    }
}
