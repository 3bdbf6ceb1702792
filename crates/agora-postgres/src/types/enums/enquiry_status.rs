//! Enquiry status enumeration for inbox triage.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Triage state of a public enquiry in the project team inbox.
///
/// Corresponds to the `ENQUIRY_STATUS` PostgreSQL enum.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::EnquiryStatus"]
pub enum EnquiryStatus {
    /// Newly received, nobody has looked at it yet
    #[db_rename = "open"]
    #[serde(rename = "open")]
    #[default]
    Open,

    /// A team member is handling it
    #[db_rename = "in_progress"]
    #[serde(rename = "in_progress")]
    InProgress,

    /// Answered or otherwise closed out
    #[db_rename = "resolved"]
    #[serde(rename = "resolved")]
    Resolved,

    /// Junk; kept for the record but hidden from the default inbox view
    #[db_rename = "spam"]
    #[serde(rename = "spam")]
    Spam,
}

impl EnquiryStatus {
    /// Returns whether the enquiry still needs attention.
    #[inline]
    pub fn is_actionable(self) -> bool {
        matches!(self, EnquiryStatus::Open | EnquiryStatus::InProgress)
    }

    /// Returns whether moving to this status closes the enquiry.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, EnquiryStatus::Resolved | EnquiryStatus::Spam)
    }
}
