use crate::model::{RecognizedIntent, WeatherReport};

/// Render the final fulfillment text for one query.
///
/// Without weather data the intent service's own fulfillment text passes
/// through untouched, however it reads. One observation renders as a
/// single sentence; several render as a heading followed by one line per
/// day, in report order. Temperatures print the way the numbers format
/// themselves, so whole degrees carry no trailing `.0`.
pub fn compose(intent: &RecognizedIntent, weather: Option<&WeatherReport>) -> String {
    let Some(report) = weather else {
        return intent.fulfillment_text.clone();
    };

    match report.days.as_slice() {
        [only] => format!(
            "The weather in {} is {} with a temperature of {}°C.",
            report.place_name, only.condition, only.temperature_c
        ),
        days => {
            let mut text = format!("The weather in {} is as follows:", report.place_name);
            for day in days {
                text.push_str(&format!(
                    "\n{}: {}, {}°C",
                    day.date, day.condition, day.temperature_c
                ));
            }
            text
        }
    }
}
