use anyhow::{Context, Result, anyhow};

use crate::model::{DayObservation, WeatherReport};
use crate::planner::{QueryAnchor, WeatherPlan};
use crate::weather::{OwCurrentResponse, OwForecastResponse, WeatherPayload};

/// Collapse the provider's two payload shapes into the one report shape
/// replies are rendered from.
///
/// The place name follows a fixed precedence: a place the user named wins
/// over whatever the provider reports back, and the provider's own name is
/// used only for coordinate-anchored queries. A payload with no usable
/// observation is an error, never an empty report.
pub fn normalize(payload: WeatherPayload, plan: &WeatherPlan) -> Result<WeatherReport> {
    let (provider_name, days) = match payload {
        WeatherPayload::SingleDay(current) => single_day(current, plan)?,
        WeatherPayload::MultiDay(forecast) => multi_day(forecast)?,
    };

    let place_name = match &plan.anchor {
        QueryAnchor::Place(name) => name.clone(),
        QueryAnchor::Coordinate(_) => provider_name,
    };

    Ok(WeatherReport { place_name, days })
}

fn single_day(
    current: OwCurrentResponse,
    plan: &WeatherPlan,
) -> Result<(String, Vec<DayObservation>)> {
    let condition = current
        .weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .context("Current-conditions payload contained no weather entry")?;

    let observation = DayObservation {
        date: plan.target_date.clone(),
        temperature_c: current.main.temp,
        condition,
    };

    Ok((current.name, vec![observation]))
}

fn multi_day(forecast: OwForecastResponse) -> Result<(String, Vec<DayObservation>)> {
    if forecast.list.is_empty() {
        return Err(anyhow!("Forecast payload contained no entries"));
    }

    let days = forecast
        .list
        .into_iter()
        .map(|entry| {
            let condition = entry
                .weather
                .into_iter()
                .next()
                .map(|w| w.description)
                .context("Forecast entry contained no weather entry")?;

            Ok(DayObservation {
                date: entry.dt_txt,
                temperature_c: entry.main.temp,
                condition,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((forecast.city.name, days))
}
