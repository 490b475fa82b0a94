use anyhow::{Context, Result};
use clap::Parser;
use inquire::{InquireError, Text};
use reqwest::Client;
use tracing::debug;
use weatherbot_core::{Coordinate, WebhookRequest, WebhookResponse};

use crate::{geolocate, render, session};

/// Fixed message shown when the webhook round trip fails for any reason.
const REQUEST_FAILURE: &str = "An error occurred while processing your request.";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherbot", version, about = "Terminal chat client for the weather chatbot")]
pub struct Cli {
    /// Base URL of the webhook server.
    #[arg(long, default_value = "http://localhost:8080")]
    pub server: String,

    /// Language code forwarded to the intent service.
    #[arg(long, default_value = "en")]
    pub language: String,

    /// Discard the persisted session id and start a fresh conversation.
    #[arg(long)]
    pub new_session: bool,

    /// Skip geolocation; weather queries then need an explicit place.
    #[arg(long)]
    pub no_location: bool,
}

impl Cli {
    /// Run the chat loop until the user leaves with `exit`, `quit`, Esc or
    /// Ctrl-C.
    pub async fn run(self) -> Result<()> {
        let session_id = session::load_or_create(self.new_session)?;
        let webhook_url = format!("{}/webhook", self.server.trim_end_matches('/'));
        let http = Client::new();

        println!("Ask about the weather. Type 'exit' to leave.");

        loop {
            let line = match Text::new("You:").prompt() {
                Ok(line) => line,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
                Err(err) => return Err(err).context("Failed to read input"),
            };

            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            if text.eq_ignore_ascii_case("exit") || text.eq_ignore_ascii_case("quit") {
                break;
            }

            // Re-resolved per submission so a roaming client stays honest.
            let location = if self.no_location {
                None
            } else {
                geolocate::current_location().await
            };

            match send_query(&http, &webhook_url, text, &session_id, &self.language, location)
                .await
            {
                Ok(reply) => print_reply(&reply),
                Err(err) => {
                    debug!("Webhook round trip failed: {err:#}");
                    println!("Bot: {REQUEST_FAILURE}");
                }
            }

            println!();
        }

        Ok(())
    }
}

async fn send_query(
    http: &Client,
    url: &str,
    text: &str,
    session_id: &str,
    language: &str,
    location: Option<Coordinate>,
) -> Result<String> {
    let request = WebhookRequest {
        query_text: text.to_string(),
        session_id: session_id.to_string(),
        location_lat_long: location,
        language_code: language.to_string(),
    };

    let response = http
        .post(url)
        .json(&request)
        .send()
        .await
        .context("Failed to send webhook request")?
        .error_for_status()
        .context("Webhook request failed")?;

    let body: WebhookResponse = response
        .json()
        .await
        .context("Failed to parse webhook response")?;

    Ok(body.fulfillment_text)
}

fn print_reply(reply: &str) {
    for (index, line) in render::render(reply).iter().enumerate() {
        if index == 0 {
            println!("Bot: {line}");
        } else {
            println!("{line}");
        }
    }
}
