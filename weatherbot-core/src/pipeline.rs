use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::intent::IntentClient;
use crate::model::Query;
use crate::normalize::normalize;
use crate::planner;
use crate::reply;
use crate::weather::WeatherClient;

/// Failure stages of the resolution pipeline.
///
/// The webhook boundary collapses every variant into the same generic
/// reply; the split exists so logs say which hop failed.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("intent recognition failed: {0:#}")]
    Intent(anyhow::Error),

    #[error("weather lookup failed: {0:#}")]
    Weather(anyhow::Error),

    #[error("no location to query: the intent named no place and the client sent no coordinates")]
    MissingLocation,
}

/// The intent-to-weather resolution pipeline.
///
/// Owns one client per upstream service. Built once at startup and shared
/// across requests; each call to [`Bot::respond`] is independent, so
/// concurrent requests need no coordination beyond the shared HTTP
/// connection pools.
#[derive(Debug, Clone)]
pub struct Bot {
    intent: IntentClient,
    weather: WeatherClient,
}

impl Bot {
    pub fn new(config: &Config) -> Self {
        Self {
            intent: IntentClient::new(&config.intent),
            weather: WeatherClient::new(&config.weather),
        }
    }

    /// Resolve one query end to end: recognize the intent, fetch and
    /// normalize weather data when the intent calls for it, and render the
    /// reply text.
    pub async fn respond(&self, query: &Query) -> Result<String, PipelineError> {
        let intent = self
            .intent
            .detect(query)
            .await
            .map_err(PipelineError::Intent)?;

        let report = match planner::plan(&intent.parameters, query.fallback_location)? {
            Some(plan) => {
                debug!(
                    multi_day = plan.multi_day,
                    named_place = plan.uses_named_place(),
                    "executing weather plan"
                );

                let payload = self
                    .weather
                    .fetch(&plan)
                    .await
                    .map_err(PipelineError::Weather)?;

                Some(normalize(payload, &plan).map_err(PipelineError::Weather)?)
            }
            None => None,
        };

        Ok(reply::compose(&intent, report.as_ref()))
    }
}
