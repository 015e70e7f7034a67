use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }

    /// Risk tier for a health score in [0, 1].
    pub fn from_health_score(score: f64) -> Self {
        if score >= 0.8 {
            Severity::Low
        } else if score >= 0.6 {
            Severity::Medium
        } else if score >= 0.4 {
            Severity::High
        } else {
            Severity::Critical
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    Temperature,
    SoilMoisture,
    Humidity,
}

impl AnomalyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyKind::Temperature => "temperature",
            AnomalyKind::SoilMoisture => "soil_moisture",
            AnomalyKind::Humidity => "humidity",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anomaly {
    #[serde(rename = "type")]
    pub kind: AnomalyKind,
    pub severity: Severity,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub health_score: f64,
    pub anomalies: Vec<Anomaly>,
    pub recommendations: Vec<String>,
    pub risk_level: Severity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_tier_boundaries() {
        assert_eq!(Severity::from_health_score(1.0), Severity::Low);
        assert_eq!(Severity::from_health_score(0.8), Severity::Low);
        assert_eq!(Severity::from_health_score(0.79), Severity::Medium);
        assert_eq!(Severity::from_health_score(0.6), Severity::Medium);
        assert_eq!(Severity::from_health_score(0.4), Severity::High);
        assert_eq!(Severity::from_health_score(0.39), Severity::Critical);
        assert_eq!(Severity::from_health_score(0.0), Severity::Critical);
    }

    #[test]
    fn anomaly_kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(AnomalyKind::SoilMoisture).unwrap(),
            serde_json::json!("soil_moisture")
        );
        assert_eq!(
            serde_json::to_value(Severity::High).unwrap(),
            serde_json::json!("High")
        );
    }
}
