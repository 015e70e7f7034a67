use super::{Priority, SensorReading, WeatherDay};
use crate::error::{require_finite, AdvisorError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrrigationRequest {
    pub crop_type: String,
    #[serde(default)]
    pub soil_type: String,
    pub area: f64,
    #[serde(default)]
    pub sensor_data: Option<SensorReading>,
    #[serde(default)]
    pub weather_data: Option<WeatherDay>,
}

impl IrrigationRequest {
    pub fn validate(&self) -> Result<()> {
        require_finite("area", self.area)?;
        if self.area < 0.0 {
            return Err(AdvisorError::InvalidInput(format!(
                "area must not be negative (got {})",
                self.area
            )));
        }
        if let Some(sensor) = &self.sensor_data {
            sensor.validate()?;
        }
        if let Some(weather) = &self.weather_data {
            weather.validate()?;
        }
        Ok(())
    }
}

/// One watering session. `amount` in liters, `duration` in minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrrigationSession {
    pub date: NaiveDate,
    pub amount: f64,
    pub duration: f64,
    pub reason: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrrigationPlan {
    pub schedule: Vec<IrrigationSession>,
    pub water_usage: f64,
    pub efficiency: u8,
    pub recommendations: Vec<String>,
}
