//! The stakeholder auto-detection chain.
//!
//! Given a postcode, detection chains three lookups:
//!
//! 1. postcodes.io resolves the postcode to a coordinate, constituency and
//!    administrative names (fatal on failure),
//! 2. the Parliament Members API resolves the constituency to its current MP,
//! 3. MapIt resolves the coordinate to the councils, wards and parishes
//!    covering it.
//!
//! Stages 2 and 3 are best-effort: a failure is logged, recorded as a warning
//! on the outcome, and detection continues with what it has. When MapIt is
//! unavailable the admin district from the postcode lookup still yields a
//! council.

use serde::{Deserialize, Serialize};

use crate::{
    AreaKind, CivicConfig, MapItClient, MemberSummary, ParliamentClient, PostcodeInfo,
    PostcodesClient, Result, TRACING_TARGET_DETECTOR,
};

/// A council or parish picked up by detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedArea {
    /// MapIt area id, when the area came from the boundary lookup
    pub mapit_id: Option<i64>,
    /// Area name
    pub name: String,
}

/// Everything a detection run learned about a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionOutcome {
    /// The resolved postcode record
    pub postcode: PostcodeInfo,
    /// Current MP for the constituency, when stage 2 succeeded
    pub mp: Option<MemberSummary>,
    /// Councils covering the coordinate
    pub councils: Vec<DetectedArea>,
    /// Civil parishes covering the coordinate
    pub parishes: Vec<DetectedArea>,
    /// Ward names covering the coordinate, used for councillor matching
    pub wards: Vec<String>,
    /// Human-readable warnings from best-effort stages that failed
    pub warnings: Vec<String>,
}

impl DetectionOutcome {
    /// Returns the council names, for directory lookups.
    pub fn council_names(&self) -> Vec<String> {
        self.councils.iter().map(|area| area.name.clone()).collect()
    }
}

/// Chains the civic-data lookups into one detection operation.
#[derive(Debug, Clone)]
pub struct StakeholderDetector {
    postcodes: PostcodesClient,
    parliament: ParliamentClient,
    mapit: MapItClient,
}

impl StakeholderDetector {
    /// Creates a detector with all three clients from one configuration.
    pub fn new(config: &CivicConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            postcodes: PostcodesClient::new(config)?,
            parliament: ParliamentClient::new(config)?,
            mapit: MapItClient::new(config)?,
        })
    }

    /// Creates a detector from already-built clients.
    pub fn from_clients(
        postcodes: PostcodesClient,
        parliament: ParliamentClient,
        mapit: MapItClient,
    ) -> Self {
        Self {
            postcodes,
            parliament,
            mapit,
        }
    }

    /// Runs the detection chain for a postcode.
    ///
    /// # Errors
    ///
    /// Only the initial postcode lookup is fatal; see the module docs for the
    /// failure policy of the later stages.
    pub async fn detect(&self, postcode: &str) -> Result<DetectionOutcome> {
        let postcode = self.postcodes.lookup(postcode).await?;

        tracing::info!(
            target: TRACING_TARGET_DETECTOR,
            postcode = %postcode.postcode,
            "starting stakeholder detection"
        );

        let mut outcome = DetectionOutcome {
            postcode,
            mp: None,
            councils: Vec::new(),
            parishes: Vec::new(),
            wards: Vec::new(),
            warnings: Vec::new(),
        };

        self.detect_mp(&mut outcome).await;
        self.detect_areas(&mut outcome).await;

        tracing::info!(
            target: TRACING_TARGET_DETECTOR,
            mp_found = outcome.mp.is_some(),
            councils = outcome.councils.len(),
            parishes = outcome.parishes.len(),
            wards = outcome.wards.len(),
            warnings = outcome.warnings.len(),
            "stakeholder detection finished"
        );

        Ok(outcome)
    }

    /// Stage 2: constituency to current MP.
    async fn detect_mp(&self, outcome: &mut DetectionOutcome) {
        let Some(constituency) = outcome.postcode.parliamentary_constituency.clone() else {
            outcome
                .warnings
                .push("postcode has no parliamentary constituency".to_owned());
            return;
        };

        match self.parliament.find_current_mp(&constituency).await {
            Ok(Some(mp)) => outcome.mp = Some(mp),
            Ok(None) => outcome
                .warnings
                .push(format!("no current MP found for {constituency}")),
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET_DETECTOR,
                    error = %error,
                    constituency = %constituency,
                    "MP lookup failed, continuing without"
                );
                outcome.warnings.push(format!("MP lookup failed: {error}"));
            }
        }
    }

    /// Stage 3: coordinate to councils, wards and parishes.
    async fn detect_areas(&self, outcome: &mut DetectionOutcome) {
        let (longitude, latitude) = (outcome.postcode.longitude, outcome.postcode.latitude);

        match self.mapit.areas_for_point(longitude, latitude).await {
            Ok(areas) => {
                for area in areas {
                    match area.kind {
                        AreaKind::Council => outcome.councils.push(DetectedArea {
                            mapit_id: Some(area.id),
                            name: area.name,
                        }),
                        AreaKind::Parish => outcome.parishes.push(DetectedArea {
                            mapit_id: Some(area.id),
                            name: area.name,
                        }),
                        AreaKind::Ward => outcome.wards.push(area.name),
                        AreaKind::Other => {}
                    }
                }
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET_DETECTOR,
                    error = %error,
                    "boundary lookup failed, falling back to postcode areas"
                );
                outcome
                    .warnings
                    .push(format!("boundary lookup failed: {error}"));
            }
        }

        // The postcode lookup carries its own area names; use them to fill
        // gaps so one flaky upstream does not empty the result.
        if outcome.councils.is_empty()
            && let Some(district) = outcome.postcode.admin_district.clone()
        {
            outcome.councils.push(DetectedArea {
                mapit_id: None,
                name: district,
            });
        }

        if outcome.parishes.is_empty()
            && let Some(parish) = outcome.postcode.parish.clone()
            // postcodes.io reports unparished areas with this phrase
            && !parish.to_lowercase().contains("unparished")
        {
            outcome.parishes.push(DetectedArea {
                mapit_id: None,
                name: parish,
            });
        }

        if let Some(ward) = outcome.postcode.admin_ward.clone()
            && !outcome
                .wards
                .iter()
                .any(|existing| crate::matching::wards_match(existing, &ward))
        {
            outcome.wards.push(ward);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome_with_postcode(parish: Option<&str>) -> DetectionOutcome {
        DetectionOutcome {
            postcode: PostcodeInfo {
                postcode: "SW1A 1AA".into(),
                longitude: -0.1416,
                latitude: 51.5010,
                parliamentary_constituency: Some("Cities of London and Westminster".into()),
                admin_district: Some("Westminster".into()),
                admin_ward: Some("St James's".into()),
                parish: parish.map(ToOwned::to_owned),
            },
            mp: None,
            councils: Vec::new(),
            parishes: Vec::new(),
            wards: Vec::new(),
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_council_names() {
        let mut outcome = outcome_with_postcode(None);
        outcome.councils.push(DetectedArea {
            mapit_id: Some(2504),
            name: "Westminster City Council".into(),
        });

        assert_eq!(outcome.council_names(), vec!["Westminster City Council"]);
    }

    #[test]
    fn test_unparished_phrase_detection() {
        let parish = "Westminster, unparished area";
        assert!(parish.to_lowercase().contains("unparished"));
    }
}
