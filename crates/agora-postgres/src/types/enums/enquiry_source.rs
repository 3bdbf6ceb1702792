//! Enquiry source enumeration.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The channel an enquiry arrived through.
///
/// Corresponds to the `ENQUIRY_SOURCE` PostgreSQL enum.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::EnquirySource"]
pub enum EnquirySource {
    /// Submitted through the project's web contact form
    #[db_rename = "web_form"]
    #[serde(rename = "web_form")]
    #[default]
    WebForm,

    /// Delivered by the inbound-email webhook
    #[db_rename = "email"]
    #[serde(rename = "email")]
    Email,
}
