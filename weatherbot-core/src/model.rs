use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A geographic coordinate pair, as supplied by the chat client.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// One user submission, assembled at the webhook boundary and discarded
/// after the round trip completes.
#[derive(Debug, Clone)]
pub struct Query {
    pub text: String,
    pub session_id: String,
    pub language_code: String,
    pub fallback_location: Option<Coordinate>,
}

/// A single extracted intent parameter.
///
/// The intent service encodes every value as an object carrying exactly one
/// of `stringValue` or `numberValue`; external tagging reproduces that wire
/// shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterValue {
    StringValue(String),
    NumberValue(f64),
}

impl ParameterValue {
    /// Whether the value counts as set: an empty string and a zero number
    /// are both treated as unset.
    pub fn is_truthy(&self) -> bool {
        match self {
            ParameterValue::StringValue(s) => !s.is_empty(),
            ParameterValue::NumberValue(n) => *n != 0.0,
        }
    }
}

/// Named parameters extracted by the intent service for one query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntentParameters(HashMap<String, ParameterValue>);

impl IntentParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ParameterValue) {
        self.0.insert(name.into(), value);
    }

    /// String value of a parameter, if it is present with a string value.
    pub fn string(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(ParameterValue::StringValue(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Numeric value of a parameter, if it is present with a number value.
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.0.get(name) {
            Some(ParameterValue::NumberValue(n)) => Some(*n),
            _ => None,
        }
    }

    /// Whether a parameter is present and truthy. Absent parameters are
    /// falsy.
    pub fn is_truthy(&self, name: &str) -> bool {
        self.0.get(name).is_some_and(ParameterValue::is_truthy)
    }
}

impl FromIterator<(String, ParameterValue)> for IntentParameters {
    fn from_iter<I: IntoIterator<Item = (String, ParameterValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The intent service's verdict for one query: its own reply text plus the
/// parameters it extracted. Read-only downstream.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizedIntent {
    #[serde(default)]
    pub fulfillment_text: String,
    #[serde(default)]
    pub parameters: IntentParameters,
}

/// One date's weather condition and temperature, the normalized unit of
/// weather data. A single-day lookup yields exactly one of these; a
/// forecast yields one per returned entry, in provider order.
#[derive(Debug, Clone, PartialEq)]
pub struct DayObservation {
    /// Either a plain `YYYY-MM-DD` date (single-day) or the provider's
    /// per-entry timestamp at its own granularity (forecast).
    pub date: String,
    pub temperature_c: f64,
    pub condition: String,
}

/// Normalized weather data for one resolved place.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub place_name: String,
    pub days: Vec<DayObservation>,
}

/// Webhook request body posted by the chat client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    pub query_text: String,
    pub session_id: String,
    #[serde(default)]
    pub location_lat_long: Option<Coordinate>,
    #[serde(default = "default_language_code")]
    pub language_code: String,
}

/// Webhook response body: the fulfillment text and nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub fulfillment_text: String,
}

fn default_language_code() -> String {
    "en".to_string()
}
