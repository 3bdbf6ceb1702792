//! Project visibility enumeration.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Defines who can see a consultation project.
///
/// Corresponds to the `PROJECT_VISIBILITY` PostgreSQL enum.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::ProjectVisibility"]
pub enum ProjectVisibility {
    /// Project is listed publicly and open to site visitors
    #[db_rename = "public"]
    #[serde(rename = "public")]
    #[default]
    Public,

    /// Project is reachable only by direct link shared with stakeholders
    #[db_rename = "private"]
    #[serde(rename = "private")]
    Private,
}

impl ProjectVisibility {
    /// Returns whether the project appears in public listings.
    #[inline]
    pub fn is_public(self) -> bool {
        matches!(self, ProjectVisibility::Public)
    }
}
