use chrono::Utc;

use crate::model::{Coordinate, IntentParameters};
use crate::pipeline::PipelineError;

/// Marker parameter whose presence (and truthiness) distinguishes weather
/// intents from small talk.
pub const WEATHER_MARKER: &str = "weather";

/// Where a weather query is anchored. Exactly one mode applies to any
/// plan, so a query can never mix a place name with coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryAnchor {
    /// Query the provider by place name.
    Place(String),
    /// Query the provider by coordinates.
    Coordinate(Coordinate),
}

/// The resolved shape of one weather lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherPlan {
    pub anchor: QueryAnchor,

    /// Selects the forecast endpoint instead of current conditions.
    pub multi_day: bool,

    /// Number of forecast entries to request. Always at least 1.
    pub day_count: u32,

    /// ISO date a single-day observation is reported under, since the
    /// current-conditions payload carries no date of its own.
    pub target_date: String,
}

impl WeatherPlan {
    pub fn uses_named_place(&self) -> bool {
        matches!(self.anchor, QueryAnchor::Place(_))
    }
}

/// Decide whether the recognized intent needs weather data and, if so, how
/// to query for it.
///
/// Returns `Ok(None)` for intents without a truthy weather marker. A
/// non-empty `location` parameter always wins over the client's fallback
/// coordinate; the fallback is consulted only when the intent named no
/// place. With neither available the query cannot be anchored and planning
/// fails before any provider call is made.
pub fn plan(
    parameters: &IntentParameters,
    fallback: Option<Coordinate>,
) -> Result<Option<WeatherPlan>, PipelineError> {
    if !parameters.is_truthy(WEATHER_MARKER) {
        return Ok(None);
    }

    let days = parameters.number("days").unwrap_or(1.0);
    let multi_day = days > 1.0;
    let day_count = (days as u32).max(1);

    let target_date = parameters
        .string("date")
        .filter(|date| !date.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Utc::now().format("%Y-%m-%d").to_string());

    let anchor = match parameters.string("location").filter(|place| !place.is_empty()) {
        Some(place) => QueryAnchor::Place(place.to_string()),
        None => match fallback {
            Some(coordinate) => QueryAnchor::Coordinate(coordinate),
            None => return Err(PipelineError::MissingLocation),
        },
    };

    Ok(Some(WeatherPlan { anchor, multi_day, day_count, target_date }))
}
