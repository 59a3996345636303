use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use url::Url;

use crate::app::{DocketError, Result};
use crate::config::RemoteConfig;
use crate::domain::{Hearing, HearingRecord};
use crate::remote::queries::{
    ADD_HEARING, IS_SUBSCRIBED_TO, SEARCH_HEARINGS_BY_FILENUMBER, SET_VIEWED, UNSUBSCRIBE_HEARING,
};
use crate::remote::HearingsApi;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphqlRequest<'a> {
    operation_name: &'a str,
    query: &'a str,
    variables: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct HearingsData {
    hearings: Vec<Hearing>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IsSubscribedToData {
    is_subscribed_to: bool,
}

/// Mutations only acknowledge; the payload is not inspected.
type Ack = serde_json::Value;

pub struct GraphqlClient {
    client: Client,
    endpoint: Url,
}

impl GraphqlClient {
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("docket/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DocketError::Config(format!("could not build HTTP client: {}", e)))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        operation_name: &str,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let request = GraphqlRequest {
            operation_name,
            query,
            variables,
        };

        let unavailable = |e: reqwest::Error| {
            DocketError::RemoteUnavailable(format!("{}: {}", operation_name, e))
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(unavailable)?;

        response.error_for_status_ref().map_err(unavailable)?;

        let body = response.bytes().await.map_err(unavailable)?;
        decode_response(operation_name, &body)
    }
}

/// Unwraps a GraphQL `{data, errors}` envelope.
fn decode_response<T: DeserializeOwned>(operation_name: &str, body: &[u8]) -> Result<T> {
    let payload: GraphqlResponse<T> = serde_json::from_slice(body).map_err(|e| {
        DocketError::RemoteUnavailable(format!("{}: malformed response: {}", operation_name, e))
    })?;

    if !payload.errors.is_empty() {
        let messages: Vec<&str> = payload.errors.iter().map(|e| e.message.as_str()).collect();
        return Err(DocketError::RemoteUnavailable(format!(
            "{}: {}",
            operation_name,
            messages.join("; ")
        )));
    }

    payload.data.ok_or_else(|| {
        DocketError::RemoteUnavailable(format!("{}: response carried no data", operation_name))
    })
}

#[async_trait]
impl HearingsApi for GraphqlClient {
    async fn search_hearings(&self, court_file_number: &str) -> Result<Vec<Hearing>> {
        let data: HearingsData = self
            .execute(
                "SearchHearingsByCourtFileNumber",
                SEARCH_HEARINGS_BY_FILENUMBER,
                json!({ "courtFileNumber": court_file_number }),
            )
            .await?;
        Ok(data.hearings)
    }

    async fn is_subscribed_to(&self, court_file_number: &str) -> Result<bool> {
        let data: IsSubscribedToData = self
            .execute(
                "IsSubscribedTo",
                IS_SUBSCRIBED_TO,
                json!({ "courtFileNumber": court_file_number }),
            )
            .await?;
        Ok(data.is_subscribed_to)
    }

    async fn add_hearings(&self, hearings: &[HearingRecord]) -> Result<()> {
        let _: Ack = self
            .execute("AddHearings", ADD_HEARING, json!({ "hearings": hearings }))
            .await?;
        Ok(())
    }

    async fn unsubscribe_hearing(&self, court_file_number: &str) -> Result<()> {
        let _: Ack = self
            .execute(
                "UnsubscribeHearing",
                UNSUBSCRIBE_HEARING,
                json!({ "courtFileNumber": court_file_number }),
            )
            .await?;
        Ok(())
    }

    async fn set_viewed(&self, court_file_number: &str) -> Result<()> {
        let _: Ack = self
            .execute(
                "SetViewed",
                SET_VIEWED,
                json!({ "courtFileNumber": court_file_number }),
            )
            .await?;
        Ok(())
    }
}
