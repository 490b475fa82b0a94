use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::config::IntentConfig;
use crate::model::{Query, RecognizedIntent};

/// Client for the intent-recognition service.
///
/// Sends the raw query text and receives the service's verdict: a
/// fulfillment text plus whatever parameters it extracted. The session id
/// keys the service's dialogue state, so it must stay stable across the
/// turns of one conversation.
#[derive(Debug, Clone)]
pub struct IntentClient {
    url: String,
    api_key: Option<String>,
    http: Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DetectRequest<'a> {
    query_text: &'a str,
    session_id: &'a str,
    language_code: &'a str,
}

impl IntentClient {
    pub fn new(config: &IntentConfig) -> Self {
        Self {
            url: config.url.clone(),
            api_key: config.api_key.clone(),
            http: Client::new(),
        }
    }

    pub async fn detect(&self, query: &Query) -> Result<RecognizedIntent> {
        let request = DetectRequest {
            query_text: &query.text,
            session_id: &query.session_id,
            language_code: &query.language_code,
        };

        debug!(session_id = %query.session_id, "requesting intent detection");

        let mut builder = self.http.post(&self.url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let res = builder
            .send()
            .await
            .context("Failed to send request to the intent service")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read the intent service response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Intent service request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body).context("Failed to parse the intent service JSON response")
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((index, _)) => format!("{}...", &body[..index]),
        None => body.to_string(),
    }
}
