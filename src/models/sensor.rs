use crate::error::{require_finite, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One point-in-time telemetry sample from a field sensor.
///
/// `soil_moisture` is volumetric (0.0-1.0), `light_intensity` is in lux.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    pub temperature: f64,
    pub humidity: f64,
    pub soil_moisture: f64,
    pub light_intensity: f64,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl SensorReading {
    pub fn new(temperature: f64, humidity: f64, soil_moisture: f64, light_intensity: f64) -> Self {
        Self {
            temperature,
            humidity,
            soil_moisture,
            light_intensity,
            timestamp: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_finite("temperature", self.temperature)?;
        require_finite("humidity", self.humidity)?;
        require_finite("soilMoisture", self.soil_moisture)?;
        require_finite("lightIntensity", self.light_intensity)
    }
}

/// A single forecast day as consumed by the irrigation scheduler.
///
/// Temperature in °C, humidity in %, rainfall in mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherDay {
    pub temperature: f64,
    pub humidity: f64,
    #[serde(default)]
    pub rainfall: f64,
}

impl WeatherDay {
    pub fn validate(&self) -> Result<()> {
        require_finite("weatherData.temperature", self.temperature)?;
        require_finite("weatherData.humidity", self.humidity)?;
        require_finite("weatherData.rainfall", self.rainfall)
    }
}
