//! Terminology client seam and its FHIR REST implementation.
//!
//! Lookups run a ValueSet `$expand` with a text filter and return the
//! first coding of the expansion.

use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::error::TerminologyError;
use crate::core::config::TerminologyConfig;

const FHIR_JSON: &str = "application/fhir+json";

/// A `contains` entry of a ValueSet expansion, kept exactly as received.
///
/// Object keys stay in server order (serde_json `preserve_order`).
pub type ExpansionCoding = serde_json::Value;

#[derive(Debug, Deserialize)]
struct ValueSet {
    #[serde(default)]
    expansion: Option<Expansion>,
}

#[derive(Debug, Deserialize)]
struct Expansion {
    #[serde(default)]
    contains: Vec<ExpansionCoding>,
}

/// Something that can look up codes in a terminology service.
#[async_trait::async_trait]
pub trait TerminologyClient: Send + Sync {
    /// Find the most relevant coding in `value_set_url` matching `filter`.
    ///
    /// Returns `Ok(None)` when the expansion has no matches.
    async fn lookup_code(
        &self,
        value_set_url: &str,
        filter: &str,
    ) -> Result<Option<ExpansionCoding>, TerminologyError>;
}

/// Terminology client for a FHIR terminology server (e.g. Ontoserver).
#[derive(Debug, Clone)]
pub struct FhirTerminologyClient {
    client: reqwest::Client,
    base_url: String,
}

impl FhirTerminologyClient {
    /// Create a client from configuration.
    pub fn new(config: &TerminologyConfig) -> Result<Self, TerminologyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(TerminologyError::Client)?;

        Ok(Self {
            client,
            base_url: config.server_url.trim_end_matches('/').to_string(),
        })
    }

    /// The `$expand` endpoint for this server.
    pub fn expand_url(&self) -> String {
        format!("{}/ValueSet/$expand", self.base_url)
    }
}

#[async_trait::async_trait]
impl TerminologyClient for FhirTerminologyClient {
    #[instrument(skip(self))]
    async fn lookup_code(
        &self,
        value_set_url: &str,
        filter: &str,
    ) -> Result<Option<ExpansionCoding>, TerminologyError> {
        info!("Expanding {} with filter '{}'", value_set_url, filter);

        let response = self
            .client
            .get(self.expand_url())
            .query(&[("url", value_set_url), ("filter", filter)])
            .header(ACCEPT, FHIR_JSON)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Terminology server returned {}", status);
            return Err(TerminologyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        debug!("Expansion received: {} bytes", bytes.len());

        let value_set: ValueSet = serde_json::from_slice(&bytes)
            .map_err(|e| TerminologyError::invalid_response(format!("JSON parse error: {e}")))?;

        Ok(value_set
            .expansion
            .and_then(|expansion| expansion.contains.into_iter().next()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> FhirTerminologyClient {
        FhirTerminologyClient::new(&TerminologyConfig {
            server_url: format!("{}/fhir/", server.uri()),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_expand_url_trims_trailing_slash() {
        let client = FhirTerminologyClient::new(&TerminologyConfig {
            server_url: "https://tx.example.org/fhir/".to_string(),
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(client.expand_url(), "https://tx.example.org/fhir/ValueSet/$expand");
    }

    #[tokio::test]
    async fn test_lookup_returns_first_match() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/fhir/ValueSet/$expand"))
            .and(query_param("url", "http://snomed.info/sct?fhir_vs"))
            .and(query_param("filter", "hypertension"))
            .and(header("accept", FHIR_JSON))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "resourceType": "ValueSet",
                "expansion": {
                    "contains": [
                        {
                            "system": "http://snomed.info/sct",
                            "code": "38341003",
                            "display": "Hypertensive disorder",
                            "inactive": false
                        },
                        { "system": "http://snomed.info/sct", "code": "1201005" }
                    ]
                }
            })))
            .mount(&server)
            .await;

        let coding = client_for(&server)
            .lookup_code("http://snomed.info/sct?fhir_vs", "hypertension")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(coding["code"], "38341003");
        assert_eq!(coding["display"], "Hypertensive disorder");
        assert_eq!(coding["inactive"], false);
    }

    #[tokio::test]
    async fn test_lookup_keeps_entry_as_received() {
        let server = MockServer::start().await;

        let body = r#"{
            "resourceType": "ValueSet",
            "expansion": {
                "contains": [
                    {
                        "display": "Glucose [Mass/volume] in Blood",
                        "code": "2339-0",
                        "system": "http://loinc.org",
                        "designation": [{ "value": "Glucose Bld-mCnc" }],
                        "abstract": false
                    }
                ]
            }
        }"#;
        Mock::given(method("GET"))
            .and(path("/fhir/ValueSet/$expand"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let coding = client_for(&server)
            .lookup_code("http://loinc.org/vs", "glucose")
            .await
            .unwrap()
            .unwrap();

        let keys: Vec<_> = coding.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["display", "code", "system", "designation", "abstract"]);
        assert_eq!(coding["designation"][0]["value"], "Glucose Bld-mCnc");
    }

    #[tokio::test]
    async fn test_lookup_empty_expansion() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/fhir/ValueSet/$expand"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "expansion": { "contains": [] } })),
            )
            .mount(&server)
            .await;

        let result = client_for(&server)
            .lookup_code("http://loinc.org/vs", "glucose")
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_lookup_missing_expansion() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/fhir/ValueSet/$expand"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "resourceType": "ValueSet" })),
            )
            .mount(&server)
            .await;

        let result = client_for(&server)
            .lookup_code("http://loinc.org/vs", "glucose")
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_lookup_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/fhir/ValueSet/$expand"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Server Error"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .lookup_code("http://snomed.info/sct?fhir_vs", "hypertension")
            .await
            .unwrap_err();

        assert!(matches!(err, TerminologyError::Status { status: 500, .. }));
        assert_eq!(err.to_string(), "Terminology server error (500): Server Error");
    }

    #[tokio::test]
    async fn test_lookup_invalid_json() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/fhir/ValueSet/$expand"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .lookup_code("http://snomed.info/sct?fhir_vs", "hypertension")
            .await
            .unwrap_err();
        assert!(matches!(err, TerminologyError::InvalidResponse(_)));
    }
}
