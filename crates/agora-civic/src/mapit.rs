//! Client for the MapIt administrative-boundary API.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{CivicConfig, Error, Result, TRACING_TARGET_MAPIT};

const SERVICE: &str = "mapit.mysociety.org";

/// MapIt area types that represent a principal council.
const COUNCIL_TYPES: &[&str] = &["DIS", "MTD", "UTA", "LBO", "CTY", "COI"];

/// MapIt area types that represent an electoral ward or division.
const WARD_TYPES: &[&str] = &["DIW", "MTW", "UTW", "LBW", "CED"];

/// MapIt area type for civil parish councils.
const PARISH_TYPE: &str = "CPC";

/// Broad classification of a MapIt area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaKind {
    /// Principal council (district, county, unitary, borough)
    Council,
    /// Electoral ward or county division
    Ward,
    /// Civil parish council
    Parish,
    /// Anything else MapIt reports (regions, constituencies, etc.)
    Other,
}

impl AreaKind {
    /// Classifies a raw MapIt area type code.
    pub fn from_type_code(code: &str) -> Self {
        if COUNCIL_TYPES.contains(&code) {
            AreaKind::Council
        } else if WARD_TYPES.contains(&code) {
            AreaKind::Ward
        } else if code == PARISH_TYPE {
            AreaKind::Parish
        } else {
            AreaKind::Other
        }
    }
}

/// An administrative area covering the queried coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapItArea {
    /// MapIt area identifier
    pub id: i64,
    /// Area name (e.g. `Camden Borough Council`)
    pub name: String,
    /// Raw MapIt type code (e.g. `LBO`)
    pub type_code: String,
    /// Broad classification derived from the type code
    pub kind: AreaKind,
}

#[derive(Debug, Deserialize)]
struct RawArea {
    id: i64,
    name: String,
    #[serde(rename = "type")]
    type_code: String,
}

/// Client for the MapIt API.
#[derive(Debug, Clone)]
pub struct MapItClient {
    http: reqwest::Client,
    base_url: String,
}

impl MapItClient {
    /// Creates a new client from the shared civic configuration.
    pub fn new(config: &CivicConfig) -> Result<Self> {
        Ok(Self {
            http: config.build_http_client()?,
            base_url: config.mapit_base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Returns the administrative areas covering a WGS84 coordinate.
    ///
    /// Areas come back classified; callers usually only care about councils,
    /// wards, and parishes and ignore [`AreaKind::Other`].
    pub async fn areas_for_point(&self, longitude: f64, latitude: f64) -> Result<Vec<MapItArea>> {
        tracing::debug!(
            target: TRACING_TARGET_MAPIT,
            longitude,
            latitude,
            "looking up administrative boundaries"
        );

        let url = format!("{}/point/4326/{},{}", self.base_url, longitude, latitude);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UnexpectedStatus {
                service: SERVICE,
                status,
            });
        }

        let body = response.bytes().await?;
        // MapIt keys the response object by area id.
        let raw: HashMap<String, RawArea> =
            serde_json::from_slice(&body).map_err(|source| Error::Decode {
                service: SERVICE,
                source,
            })?;

        let mut areas: Vec<MapItArea> = raw
            .into_values()
            .map(|area| MapItArea {
                id: area.id,
                name: area.name,
                kind: AreaKind::from_type_code(&area.type_code),
                type_code: area.type_code,
            })
            .collect();

        // HashMap iteration order is arbitrary; keep output deterministic.
        areas.sort_by_key(|area| area.id);

        tracing::debug!(
            target: TRACING_TARGET_MAPIT,
            area_count = areas.len(),
            "boundary lookup finished"
        );

        Ok(areas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_kind_classification() {
        assert_eq!(AreaKind::from_type_code("LBO"), AreaKind::Council);
        assert_eq!(AreaKind::from_type_code("DIS"), AreaKind::Council);
        assert_eq!(AreaKind::from_type_code("DIW"), AreaKind::Ward);
        assert_eq!(AreaKind::from_type_code("CED"), AreaKind::Ward);
        assert_eq!(AreaKind::from_type_code("CPC"), AreaKind::Parish);
        assert_eq!(AreaKind::from_type_code("WMC"), AreaKind::Other);
    }

    #[test]
    fn test_point_response_decodes() {
        let body = r#"{
            "2514": { "id": 2514, "name": "Camden Borough Council", "type": "LBO", "country": "E" },
            "8338": { "id": 8338, "name": "Holborn and Covent Garden", "type": "LBW", "country": "E" }
        }"#;

        let raw: HashMap<String, RawArea> = serde_json::from_str(body).unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw["2514"].name, "Camden Borough Council");
        assert_eq!(raw["8338"].type_code, "LBW");
    }
}
