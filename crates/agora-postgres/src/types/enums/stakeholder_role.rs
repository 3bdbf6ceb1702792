//! Stakeholder role enumeration.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The capacity in which a stakeholder relates to a project.
///
/// Corresponds to the `STAKEHOLDER_ROLE` PostgreSQL enum. Political roles
/// (MP, councillor, parish council) are the ones the auto-detection chain
/// can assign; the remainder are set manually by the project team.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::StakeholderRole"]
pub enum StakeholderRole {
    /// Member of Parliament for the constituency covering the site
    #[db_rename = "mp"]
    #[serde(rename = "mp")]
    Mp,

    /// Local-authority councillor for a ward covering the site
    #[db_rename = "councillor"]
    #[serde(rename = "councillor")]
    Councillor,

    /// Civil parish council covering the site
    #[db_rename = "parish_council"]
    #[serde(rename = "parish_council")]
    ParishCouncil,

    /// Local community group or residents' association
    #[db_rename = "community_group"]
    #[serde(rename = "community_group")]
    CommunityGroup,

    /// Individual resident
    #[db_rename = "resident"]
    #[serde(rename = "resident")]
    Resident,

    /// Anything else
    #[db_rename = "other"]
    #[serde(rename = "other")]
    #[default]
    Other,
}

impl StakeholderRole {
    /// Returns whether this role is an elected political representative.
    #[inline]
    pub fn is_political(self) -> bool {
        matches!(
            self,
            StakeholderRole::Mp | StakeholderRole::Councillor | StakeholderRole::ParishCouncil
        )
    }
}
