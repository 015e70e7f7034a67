use crate::config::OpenWeatherMapConfig;
use crate::error::{AdvisorError, Result};
use crate::models::WeatherDay;
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use std::collections::BTreeMap;

const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap API response structures
#[derive(Debug, Deserialize)]
struct OwmForecastResponse {
    list: Vec<OwmForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastItem {
    dt: i64,
    main: OwmMain,
    #[serde(default)]
    rain: Option<OwmPrecipitation>,
    #[serde(default)]
    snow: Option<OwmPrecipitation>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmPrecipitation {
    #[serde(rename = "3h", default)]
    three_hour: f64,
}

/// One 3-hour forecast slot, in metric units.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ForecastSlot {
    date: NaiveDate,
    temperature: f64,
    humidity: f64,
    precipitation_mm: f64,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch the 5-day/3-hour forecast and summarise its first day for the
    /// irrigation scheduler.
    pub async fn fetch_first_day(&self) -> Result<WeatherDay> {
        let url = format!(
            "{}/forecast?lat={}&lon={}&appid={}&units=metric",
            API_BASE_URL, self.config.latitude, self.config.longitude, self.config.api_key
        );

        tracing::debug!(
            lat = self.config.latitude,
            lon = self.config.longitude,
            "Fetching OpenWeatherMap forecast"
        );

        let response =
            self.client.get(&url).send().await.map_err(|e| {
                AdvisorError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AdvisorError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned {}: {}",
                status, body
            )));
        }

        let owm_response: OwmForecastResponse = response.json().await.map_err(|e| {
            AdvisorError::DataSourceUnavailable(format!(
                "Failed to parse OpenWeatherMap response: {}",
                e
            ))
        })?;

        first_day(&owm_response).ok_or_else(|| {
            AdvisorError::DataSourceUnavailable("OpenWeatherMap returned an empty forecast".into())
        })
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            API_BASE_URL, self.config.latitude, self.config.longitude, self.config.api_key
        );

        let response =
            self.client.get(&url).send().await.map_err(|e| {
                AdvisorError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        Ok(response.status().is_success())
    }
}

fn convert_item(item: &OwmForecastItem) -> Option<ForecastSlot> {
    let timestamp = DateTime::from_timestamp(item.dt, 0)?;

    // Combine rain and snow precipitation
    let rain_mm = item.rain.as_ref().map(|r| r.three_hour).unwrap_or(0.0);
    let snow_mm = item.snow.as_ref().map(|s| s.three_hour).unwrap_or(0.0);

    Some(ForecastSlot {
        date: timestamp.date_naive(),
        temperature: item.main.temp,
        humidity: item.main.humidity,
        precipitation_mm: rain_mm + snow_mm,
    })
}

/// Earliest forecast date: max temperature, mean humidity, total precipitation.
fn first_day(response: &OwmForecastResponse) -> Option<WeatherDay> {
    let mut by_date: BTreeMap<NaiveDate, Vec<ForecastSlot>> = BTreeMap::new();
    for slot in response.list.iter().filter_map(convert_item) {
        by_date.entry(slot.date).or_default().push(slot);
    }

    let (_, slots) = by_date.into_iter().next()?;
    Some(aggregate_day(&slots))
}

fn aggregate_day(slots: &[ForecastSlot]) -> WeatherDay {
    let temperature = slots
        .iter()
        .map(|s| s.temperature)
        .fold(f64::NEG_INFINITY, f64::max);

    let humidity = slots.iter().map(|s| s.humidity).sum::<f64>() / slots.len().max(1) as f64;

    let rainfall: f64 = slots.iter().map(|s| s.precipitation_mm).sum();

    WeatherDay {
        temperature: if temperature.is_finite() { temperature } else { 0.0 },
        humidity,
        rainfall,
    }
}
