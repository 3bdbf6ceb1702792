//! Stakeholder provenance enumeration.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// How a stakeholder record entered the system.
///
/// Corresponds to the `STAKEHOLDER_SOURCE` PostgreSQL enum.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::StakeholderSource"]
pub enum StakeholderSource {
    /// Added by a member of the project team
    #[db_rename = "manual"]
    #[serde(rename = "manual")]
    #[default]
    Manual,

    /// Created by the geographic auto-detection chain
    #[db_rename = "detected"]
    #[serde(rename = "detected")]
    Detected,
}
