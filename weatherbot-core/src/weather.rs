use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::WeatherConfig;
use crate::planner::{QueryAnchor, WeatherPlan};

/// Client for the weather provider's current-conditions and forecast
/// endpoints.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

/// The provider's two response shapes, tagged by which endpoint produced
/// them. Resolved here, once, so downstream code never re-inspects raw
/// payloads.
#[derive(Debug)]
pub enum WeatherPayload {
    SingleDay(OwCurrentResponse),
    MultiDay(OwForecastResponse),
}

impl WeatherClient {
    pub fn new(config: &WeatherConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Issue the planned query against the endpoint the plan selects.
    pub async fn fetch(&self, plan: &WeatherPlan) -> Result<WeatherPayload> {
        if plan.multi_day {
            self.fetch_forecast(plan).await.map(WeatherPayload::MultiDay)
        } else {
            self.fetch_current(plan).await.map(WeatherPayload::SingleDay)
        }
    }

    async fn fetch_current(&self, plan: &WeatherPlan) -> Result<OwCurrentResponse> {
        let url = format!("{}/weather", self.base_url);
        let params = self.query_params(plan);

        debug!(url = %url, "requesting current conditions");

        let res = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .context("Failed to send request to the weather provider (current conditions)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read the weather provider's current response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Weather provider current request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body).context("Failed to parse the weather provider's current JSON")
    }

    async fn fetch_forecast(&self, plan: &WeatherPlan) -> Result<OwForecastResponse> {
        let url = format!("{}/forecast", self.base_url);
        let mut params = self.query_params(plan);
        params.push(("cnt", plan.day_count.to_string()));

        debug!(url = %url, count = plan.day_count, "requesting forecast");

        let res = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .context("Failed to send request to the weather provider (forecast)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read the weather provider's forecast response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Weather provider forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body).context("Failed to parse the weather provider's forecast JSON")
    }

    fn query_params(&self, plan: &WeatherPlan) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("appid", self.api_key.clone()),
            ("units", "metric".to_string()),
        ];

        match &plan.anchor {
            QueryAnchor::Place(name) => params.push(("q", name.clone())),
            QueryAnchor::Coordinate(coordinate) => {
                params.push(("lat", coordinate.latitude.to_string()));
                params.push(("lon", coordinate.longitude.to_string()));
            }
        }

        params
    }
}

#[derive(Debug, Deserialize)]
pub struct OwMain {
    pub temp: f64,
}

#[derive(Debug, Deserialize)]
pub struct OwWeather {
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct OwCurrentResponse {
    pub name: String,
    pub main: OwMain,
    pub weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
pub struct OwCity {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct OwForecastEntry {
    pub dt_txt: String,
    pub main: OwMain,
    pub weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
pub struct OwForecastResponse {
    pub city: OwCity,
    pub list: Vec<OwForecastEntry>,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((index, _)) => format!("{}...", &body[..index]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinate;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> WeatherClient {
        WeatherClient::new(&WeatherConfig {
            api_key: "TESTKEY".to_string(),
            base_url: server.uri(),
        })
    }

    fn place_plan(place: &str, multi_day: bool, day_count: u32) -> WeatherPlan {
        WeatherPlan {
            anchor: QueryAnchor::Place(place.to_string()),
            multi_day,
            day_count,
            target_date: "2024-05-01".to_string(),
        }
    }

    #[tokio::test]
    async fn queries_current_conditions_by_place() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "London"))
            .and(query_param("appid", "TESTKEY"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "London",
                "main": {"temp": 15.0},
                "weather": [{"description": "clear sky"}],
            })))
            .expect(1)
            .mount(&server)
            .await;

        let payload = client_for(&server)
            .fetch(&place_plan("London", false, 1))
            .await
            .expect("fetch must succeed");

        match payload {
            WeatherPayload::SingleDay(current) => {
                assert_eq!(current.name, "London");
                assert_eq!(current.main.temp, 15.0);
                assert_eq!(current.weather[0].description, "clear sky");
            }
            WeatherPayload::MultiDay(_) => panic!("expected a single-day payload"),
        }
    }

    #[tokio::test]
    async fn queries_current_conditions_by_coordinates() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("lat", "51.5074"))
            .and(query_param("lon", "-0.1278"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "London",
                "main": {"temp": 11.2},
                "weather": [{"description": "light rain"}],
            })))
            .expect(1)
            .mount(&server)
            .await;

        let plan = WeatherPlan {
            anchor: QueryAnchor::Coordinate(Coordinate { latitude: 51.5074, longitude: -0.1278 }),
            multi_day: false,
            day_count: 1,
            target_date: "2024-05-01".to_string(),
        };

        let payload = client_for(&server).fetch(&plan).await.expect("fetch must succeed");

        assert!(matches!(payload, WeatherPayload::SingleDay(_)));
    }

    #[tokio::test]
    async fn queries_forecast_with_entry_count() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("q", "Paris"))
            .and(query_param("cnt", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "city": {"name": "Paris"},
                "list": [
                    {
                        "dt_txt": "2024-05-01 12:00:00",
                        "main": {"temp": 18.0},
                        "weather": [{"description": "few clouds"}],
                    },
                    {
                        "dt_txt": "2024-05-01 15:00:00",
                        "main": {"temp": 19.5},
                        "weather": [{"description": "scattered clouds"}],
                    },
                ],
            })))
            .expect(1)
            .mount(&server)
            .await;

        let payload = client_for(&server)
            .fetch(&place_plan("Paris", true, 3))
            .await
            .expect("fetch must succeed");

        match payload {
            WeatherPayload::MultiDay(forecast) => {
                assert_eq!(forecast.city.name, "Paris");
                assert_eq!(forecast.list.len(), 2);
                assert_eq!(forecast.list[1].dt_txt, "2024-05-01 15:00:00");
            }
            WeatherPayload::SingleDay(_) => panic!("expected a forecast payload"),
        }
    }

    #[tokio::test]
    async fn queries_forecast_by_coordinates() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("lat", "50.45"))
            .and(query_param("lon", "30.52"))
            .and(query_param("cnt", "2"))
            .and(query_param("appid", "TESTKEY"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "city": {"name": "Kyiv"},
                "list": [
                    {
                        "dt_txt": "2024-05-01 12:00:00",
                        "main": {"temp": 9.0},
                        "weather": [{"description": "overcast clouds"}],
                    },
                    {
                        "dt_txt": "2024-05-02 12:00:00",
                        "main": {"temp": 10.5},
                        "weather": [{"description": "light rain"}],
                    },
                ],
            })))
            .expect(1)
            .mount(&server)
            .await;

        let plan = WeatherPlan {
            anchor: QueryAnchor::Coordinate(Coordinate { latitude: 50.45, longitude: 30.52 }),
            multi_day: true,
            day_count: 2,
            target_date: "2024-05-01".to_string(),
        };

        let payload = client_for(&server).fetch(&plan).await.expect("fetch must succeed");

        match payload {
            WeatherPayload::MultiDay(forecast) => {
                assert_eq!(forecast.city.name, "Kyiv");
                assert_eq!(forecast.list.len(), 2);
            }
            WeatherPayload::SingleDay(_) => panic!("expected a forecast payload"),
        }
    }

    #[tokio::test]
    async fn surfaces_http_errors_with_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(401).set_body_string("{\"message\":\"bad key\"}"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch(&place_plan("London", false, 1))
            .await
            .expect_err("fetch must fail");

        let msg = err.to_string();
        assert!(msg.contains("401"), "unexpected error: {msg}");
        assert!(msg.contains("bad key"), "unexpected error: {msg}");
    }

    #[tokio::test]
    async fn multibyte_error_bodies_truncate_cleanly() {
        let server = MockServer::start().await;

        // 199 ASCII bytes then a two-byte char straddling the truncation
        // limit, followed by filler past it.
        let body = format!("{}é and more detail beyond the cutoff", "a".repeat(199));

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(502).set_body_string(body))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch(&place_plan("London", false, 1))
            .await
            .expect_err("fetch must fail");

        let msg = err.to_string();
        assert!(msg.contains("502"), "unexpected error: {msg}");
        assert!(msg.contains('é'), "unexpected error: {msg}");
        assert!(msg.ends_with("..."), "unexpected error: {msg}");
    }
}
