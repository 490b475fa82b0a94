//! Core library for the weather chatbot.
//!
//! This crate defines:
//! - Configuration for the webhook server and its two upstream services
//! - Clients for intent recognition and the weather provider
//! - The query planner, payload normalizer and reply formatter
//! - The pipeline that wires them together per request
//!
//! It is used by `weatherbot-server` and `weatherbot-cli`, but can also be
//! reused by other binaries or services.

pub mod config;
pub mod intent;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod planner;
pub mod reply;
pub mod weather;

pub use config::{Config, IntentConfig, ServerConfig, WeatherConfig};
pub use model::{
    Coordinate, DayObservation, IntentParameters, ParameterValue, Query, RecognizedIntent,
    WeatherReport, WebhookRequest, WebhookResponse,
};
pub use pipeline::{Bot, PipelineError};
pub use planner::{QueryAnchor, WeatherPlan};
