//! Client for the postcodes.io lookup API.
//!
//! A postcode lookup is the entry point of the stakeholder auto-detection
//! chain: it yields the coordinate used by the boundary lookup and the
//! constituency name used by the MP lookup.

use serde::{Deserialize, Serialize};

use crate::{CivicConfig, Error, Result, TRACING_TARGET_POSTCODES};

const SERVICE: &str = "postcodes.io";

/// What a successful postcode lookup tells us about a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostcodeInfo {
    /// Canonical formatting of the postcode (e.g. `SW1A 1AA`)
    pub postcode: String,
    /// WGS84 longitude
    pub longitude: f64,
    /// WGS84 latitude
    pub latitude: f64,
    /// Parliamentary constituency name
    pub parliamentary_constituency: Option<String>,
    /// Administrative district (council) name
    pub admin_district: Option<String>,
    /// Administrative ward name
    pub admin_ward: Option<String>,
    /// Civil parish name, where one exists
    pub parish: Option<String>,
}

/// Response envelope returned by postcodes.io.
#[derive(Debug, Deserialize)]
struct LookupEnvelope {
    result: PostcodeInfo,
}

/// Client for the postcodes.io API.
#[derive(Debug, Clone)]
pub struct PostcodesClient {
    http: reqwest::Client,
    base_url: String,
}

impl PostcodesClient {
    /// Creates a new client from the shared civic configuration.
    pub fn new(config: &CivicConfig) -> Result<Self> {
        Ok(Self {
            http: config.build_http_client()?,
            base_url: config.postcodes_base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Looks up a postcode.
    ///
    /// The postcode is normalized (uppercased, inner whitespace collapsed)
    /// before the request. An unknown postcode maps to [`Error::NotFound`],
    /// which is the only fatal outcome of the detection chain.
    pub async fn lookup(&self, postcode: &str) -> Result<PostcodeInfo> {
        let normalized = normalize_postcode(postcode)
            .ok_or_else(|| Error::InvalidPostcode(postcode.to_owned()))?;

        tracing::debug!(
            target: TRACING_TARGET_POSTCODES,
            postcode = %normalized,
            "looking up postcode"
        );

        let url = format!("{}/postcodes/{}", self.base_url, normalized);
        let response = self.http.get(&url).send().await?;

        match response.status() {
            status if status.is_success() => {}
            reqwest::StatusCode::NOT_FOUND => {
                return Err(Error::NotFound {
                    service: SERVICE,
                    resource: normalized,
                });
            }
            status => {
                return Err(Error::UnexpectedStatus {
                    service: SERVICE,
                    status,
                });
            }
        }

        let body = response.bytes().await?;
        let envelope: LookupEnvelope =
            serde_json::from_slice(&body).map_err(|source| Error::Decode {
                service: SERVICE,
                source,
            })?;

        tracing::debug!(
            target: TRACING_TARGET_POSTCODES,
            postcode = %envelope.result.postcode,
            constituency = ?envelope.result.parliamentary_constituency,
            district = ?envelope.result.admin_district,
            "postcode resolved"
        );

        Ok(envelope.result)
    }
}

/// Normalizes a postcode for the lookup URL.
///
/// Uppercases and strips whitespace, then re-inserts the single space before
/// the inward code (last three characters). Returns `None` when the remaining
/// characters cannot be a UK postcode.
pub fn normalize_postcode(postcode: &str) -> Option<String> {
    let compact: String = postcode
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if !(5..=7).contains(&compact.len()) || !compact.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    let (outward, inward) = compact.split_at(compact.len() - 3);
    Some(format!("{outward} {inward}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_inserts_space() {
        assert_eq!(normalize_postcode("sw1a1aa").as_deref(), Some("SW1A 1AA"));
        assert_eq!(normalize_postcode("m1 1ae").as_deref(), Some("M1 1AE"));
    }

    #[test]
    fn test_normalize_collapses_extra_whitespace() {
        assert_eq!(
            normalize_postcode("  ec1a   1bb ").as_deref(),
            Some("EC1A 1BB")
        );
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(normalize_postcode("").is_none());
        assert!(normalize_postcode("abc").is_none());
        assert!(normalize_postcode("not-a-postcode").is_none());
        assert!(normalize_postcode("ABCDEFGHIJ").is_none());
    }

    #[test]
    fn test_lookup_envelope_decodes() {
        let body = r#"{
            "status": 200,
            "result": {
                "postcode": "SW1A 1AA",
                "longitude": -0.141588,
                "latitude": 51.501009,
                "parliamentary_constituency": "Cities of London and Westminster",
                "admin_district": "Westminster",
                "admin_ward": "St James's",
                "parish": null
            }
        }"#;

        let envelope: LookupEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.result.postcode, "SW1A 1AA");
        assert_eq!(envelope.result.admin_ward.as_deref(), Some("St James's"));
        assert!(envelope.result.parish.is_none());
    }
}
