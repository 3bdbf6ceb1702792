//! Project status enumeration for consultation lifecycle management.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Defines the operational status of a consultation project.
///
/// Corresponds to the `PROJECT_STATUS` PostgreSQL enum. A project moves from
/// draft (team-only setup) through active (accepting public feedback) to
/// archived (read-only record of the consultation).
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::ProjectStatus"]
pub enum ProjectStatus {
    /// Project is being set up and is not yet visible to the public
    #[db_rename = "draft"]
    #[serde(rename = "draft")]
    #[default]
    Draft,

    /// Project is live and accepting public feedback
    #[db_rename = "active"]
    #[serde(rename = "active")]
    Active,

    /// Consultation has closed; the project remains readable
    #[db_rename = "archived"]
    #[serde(rename = "archived")]
    Archived,
}

impl ProjectStatus {
    /// Returns whether the public can see the project at all.
    #[inline]
    pub fn is_visible(self) -> bool {
        matches!(self, ProjectStatus::Active | ProjectStatus::Archived)
    }

    /// Returns whether the project accepts new public feedback.
    #[inline]
    pub fn accepts_feedback(self) -> bool {
        matches!(self, ProjectStatus::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_only_while_active() {
        assert!(ProjectStatus::Active.accepts_feedback());
        assert!(!ProjectStatus::Draft.accepts_feedback());
        assert!(!ProjectStatus::Archived.accepts_feedback());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ProjectStatus::Archived).unwrap();
        assert_eq!(json, "\"archived\"");
    }
}
