use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A historical market observation. Accepted by the forecaster but not
/// part of its arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketRecord {
    pub date: NaiveDate,
    pub price: f64,
    #[serde(default)]
    pub market: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceForecastRequest {
    pub crop: String,
    #[serde(default)]
    pub historical_data: Vec<MarketRecord>,
    #[serde(default)]
    pub external_factors: Vec<String>,
}

impl PriceForecastRequest {
    pub fn for_crop(crop: impl Into<String>) -> Self {
        Self {
            crop: crop.into(),
            historical_data: Vec::new(),
            external_factors: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceForecast {
    pub predictions: Vec<PricePoint>,
    pub confidence: f64,
    pub factors: Vec<String>,
    pub trend: String,
}
