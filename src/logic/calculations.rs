use crate::models::YieldInput;

/// Bounded [0, 1] contributions of the raw yield features.
///
/// Out-of-domain inputs are clamped, never rejected. Humidity is only
/// scaled, callers keep it at or below 100 in practice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

impl FeatureVector {
    pub fn from_input(input: &YieldInput) -> Self {
        Self {
            nitrogen: normalize_nitrogen(input.nitrogen),
            phosphorus: normalize_phosphorus(input.phosphorus),
            potassium: normalize_potassium(input.potassium),
            temperature: normalize_temperature(input.temperature),
            humidity: normalize_humidity(input.humidity),
            ph: normalize_ph(input.ph),
            rainfall: normalize_rainfall(input.rainfall),
        }
    }
}

pub fn normalize_nitrogen(n: f64) -> f64 {
    (n / 100.0).min(1.0)
}

pub fn normalize_phosphorus(p: f64) -> f64 {
    (p / 50.0).min(1.0)
}

pub fn normalize_potassium(k: f64) -> f64 {
    (k / 50.0).min(1.0)
}

pub fn normalize_temperature(celsius: f64) -> f64 {
    ((celsius - 10.0) / 30.0).clamp(0.0, 1.0)
}

pub fn normalize_humidity(percent: f64) -> f64 {
    percent / 100.0
}

pub fn normalize_ph(ph: f64) -> f64 {
    ((ph - 4.0) / 6.0).clamp(0.0, 1.0)
}

pub fn normalize_rainfall(mm: f64) -> f64 {
    (mm / 200.0).min(1.0)
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Clamp an integer confidence score into `[min, max]`.
pub fn clamp_score(score: i32, min: i32, max: i32) -> u8 {
    score.clamp(min, max) as u8
}

pub fn outside(value: f64, low: f64, high: f64) -> bool {
    value < low || value > high
}
