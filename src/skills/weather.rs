use super::WeatherProvider;
use crate::config::WeatherConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

const OPENWEATHERMAP_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// OpenWeatherMap current-conditions lookup.
pub struct OpenWeatherMap {
    client: reqwest::Client,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    main: Conditions,
    weather: Vec<ConditionSummary>,
}

#[derive(Debug, Deserialize)]
struct Conditions {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionSummary {
    description: String,
}

impl OpenWeatherMap {
    pub fn new(config: &WeatherConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
        }
    }

    async fn fetch(&self, city: &str, api_key: &str) -> Result<Option<CurrentConditions>> {
        let response = self
            .client
            .get(OPENWEATHERMAP_URL)
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .send()
            .await
            .context("Weather request failed")?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let conditions = response
            .json::<CurrentConditions>()
            .await
            .context("Failed to decode weather response")?;

        Ok(Some(conditions))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherMap {
    async fn current_weather(&self, city: &str) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            return "Please configure an OpenWeatherMap API key to get weather information."
                .to_string();
        };

        match self.fetch(city, api_key).await {
            Ok(Some(conditions)) => {
                let description = conditions
                    .weather
                    .first()
                    .map(|w| w.description.as_str())
                    .unwrap_or("unknown conditions");
                format!(
                    "The weather in {} is {:.0}°C with {}.",
                    city, conditions.main.temp, description
                )
            }
            Ok(None) => {
                "Sorry, I couldn't get the weather information for that city.".to_string()
            }
            Err(e) => {
                warn!("Weather lookup for {} failed: {:#}", city, e);
                "Weather service is currently unavailable.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WeatherConfig;

    #[tokio::test]
    async fn missing_api_key_yields_setup_hint() {
        let provider = OpenWeatherMap::new(&WeatherConfig {
            api_key: None,
            default_city: "London".to_string(),
        });

        let reply = provider.current_weather("paris").await;
        assert!(reply.contains("API key"), "got: {}", reply);
    }

    #[test]
    fn decodes_current_conditions() {
        let json = r#"{
            "main": { "temp": 18.4 },
            "weather": [ { "description": "scattered clouds" } ]
        }"#;

        let conditions: CurrentConditions = serde_json::from_str(json).unwrap();
        assert_eq!(conditions.main.temp, 18.4);
        assert_eq!(conditions.weather[0].description, "scattered clouds");
    }
}
