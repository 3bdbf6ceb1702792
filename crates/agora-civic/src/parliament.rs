//! Client for the UK Parliament Members API.

use serde::{Deserialize, Serialize};

use crate::{CivicConfig, Error, Result, TRACING_TARGET_PARLIAMENT};

const SERVICE: &str = "members-api.parliament.uk";

/// Summary of a serving member of Parliament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberSummary {
    /// Members API identifier
    pub id: i64,
    /// Display name (e.g. `Ms Diane Abbott`)
    pub name: String,
    /// Party name, when listed
    pub party: Option<String>,
    /// Constituency the member currently sits for
    pub constituency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    value: MemberValue,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MemberValue {
    id: i64,
    name_display_as: String,
    latest_party: Option<PartyValue>,
    latest_house_membership: Option<HouseMembership>,
}

#[derive(Debug, Deserialize)]
struct PartyValue {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HouseMembership {
    membership_from: Option<String>,
}

/// Client for the UK Parliament Members API.
#[derive(Debug, Clone)]
pub struct ParliamentClient {
    http: reqwest::Client,
    base_url: String,
}

impl ParliamentClient {
    /// Creates a new client from the shared civic configuration.
    pub fn new(config: &CivicConfig) -> Result<Self> {
        Ok(Self {
            http: config.build_http_client()?,
            base_url: config.parliament_base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Finds the current MP for a constituency.
    ///
    /// Returns `None` when the search matches nobody, which happens around
    /// boundary changes and dissolutions; the detection chain records that as
    /// a warning rather than an error.
    pub async fn find_current_mp(&self, constituency: &str) -> Result<Option<MemberSummary>> {
        tracing::debug!(
            target: TRACING_TARGET_PARLIAMENT,
            constituency = %constituency,
            "searching for current MP"
        );

        let url = format!("{}/api/Members/Search", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("ConstituencyName", constituency),
                ("IsCurrentMember", "true"),
                // House 1 is the Commons
                ("House", "1"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UnexpectedStatus {
                service: SERVICE,
                status,
            });
        }

        let body = response.bytes().await?;
        let envelope: SearchEnvelope =
            serde_json::from_slice(&body).map_err(|source| Error::Decode {
                service: SERVICE,
                source,
            })?;

        let member = envelope.items.into_iter().next().map(|item| MemberSummary {
            id: item.value.id,
            name: item.value.name_display_as,
            party: item.value.latest_party.map(|party| party.name),
            constituency: item
                .value
                .latest_house_membership
                .and_then(|membership| membership.membership_from),
        });

        tracing::debug!(
            target: TRACING_TARGET_PARLIAMENT,
            found = member.is_some(),
            "MP search finished"
        );

        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_envelope_decodes() {
        let body = r#"{
            "items": [
                {
                    "value": {
                        "id": 4514,
                        "nameDisplayAs": "Sir Keir Starmer",
                        "latestParty": { "name": "Labour" },
                        "latestHouseMembership": { "membershipFrom": "Holborn and St Pancras" }
                    }
                }
            ],
            "totalResults": 1
        }"#;

        let envelope: SearchEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.items.len(), 1);
        assert_eq!(envelope.items[0].value.name_display_as, "Sir Keir Starmer");
    }

    #[test]
    fn test_empty_search_decodes() {
        let body = r#"{ "items": [], "totalResults": 0 }"#;
        let envelope: SearchEnvelope = serde_json::from_str(body).unwrap();
        assert!(envelope.items.is_empty());
    }
}
