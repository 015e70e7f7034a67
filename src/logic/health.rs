use crate::models::{Anomaly, AnomalyKind, HealthReport, SensorReading, Severity};
use chrono::{DateTime, Utc};

/// Score a sensor reading against safe bands, stamping anomalies with now.
pub fn monitor_health(reading: &SensorReading) -> HealthReport {
    monitor_health_at(reading, Utc::now())
}

/// Score a sensor reading against safe bands.
///
/// Each band subtracts independently from a perfect 1.0:
/// - Temperature <10 or >40°C: -0.3, else <15 or >35°C: -0.1
/// - Humidity <30 or >90%: -0.2, else <40 or >80%: -0.05
/// - Soil moisture <0.2 or >0.8: -0.4, else <0.3 or >0.7: -0.1
/// - Light <200 or >1000 lux: -0.1
pub fn monitor_health_at(reading: &SensorReading, now: DateTime<Utc>) -> HealthReport {
    let score = health_score(reading);
    let anomalies = detect_anomalies(reading, now);
    let risk_level = Severity::from_health_score(score);

    if !anomalies.is_empty() {
        tracing::debug!(
            score,
            anomalies = anomalies.len(),
            risk = %risk_level,
            "Crop health anomalies detected"
        );
    }

    HealthReport {
        health_score: score,
        recommendations: recommendations(reading, score),
        anomalies,
        risk_level,
    }
}

pub fn health_score(reading: &SensorReading) -> f64 {
    let mut score: f64 = 1.0;

    let t = reading.temperature;
    if t < 10.0 || t > 40.0 {
        score -= 0.3;
    } else if t < 15.0 || t > 35.0 {
        score -= 0.1;
    }

    let h = reading.humidity;
    if h < 30.0 || h > 90.0 {
        score -= 0.2;
    } else if h < 40.0 || h > 80.0 {
        score -= 0.05;
    }

    let m = reading.soil_moisture;
    if m < 0.2 || m > 0.8 {
        score -= 0.4;
    } else if m < 0.3 || m > 0.7 {
        score -= 0.1;
    }

    let light = reading.light_intensity;
    if light < 200.0 || light > 1000.0 {
        score -= 0.1;
    }

    score.clamp(0.0, 1.0)
}

fn detect_anomalies(reading: &SensorReading, now: DateTime<Utc>) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();

    if reading.temperature > 35.0 {
        anomalies.push(Anomaly {
            kind: AnomalyKind::Temperature,
            severity: Severity::High,
            description: "Temperature above 35°C may cause heat stress".into(),
            timestamp: now,
        });
    }

    if reading.soil_moisture < 0.2 {
        anomalies.push(Anomaly {
            kind: AnomalyKind::SoilMoisture,
            severity: Severity::Critical,
            description: "Soil moisture critically low, wilting likely".into(),
            timestamp: now,
        });
    }

    if reading.humidity > 85.0 {
        anomalies.push(Anomaly {
            kind: AnomalyKind::Humidity,
            severity: Severity::Medium,
            description: "High humidity increases fungal disease risk".into(),
            timestamp: now,
        });
    }

    anomalies
}

fn recommendations(reading: &SensorReading, score: f64) -> Vec<String> {
    let mut recs = Vec::new();

    if score < 0.3 {
        recs.push("Urgent: crop health is critical. Inspect the field immediately.".to_string());
    } else if score < 0.5 {
        recs.push("High priority: crop is under stress. Address conditions within 24 hours.".into());
    }

    if reading.temperature > 35.0 {
        recs.push("Provide shade or increase irrigation frequency to reduce heat stress.".into());
    }
    if reading.soil_moisture < 0.2 {
        recs.push("Irrigate immediately to restore soil moisture.".into());
    }
    if reading.humidity > 85.0 {
        recs.push("Improve air circulation and watch for fungal disease symptoms.".into());
    }

    recs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(temperature: f64, humidity: f64, soil_moisture: f64, light: f64) -> SensorReading {
        SensorReading::new(temperature, humidity, soil_moisture, light)
    }

    #[test]
    fn ideal_conditions_score_one() {
        let report = monitor_health(&reading(25.0, 60.0, 0.5, 500.0));
        assert_eq!(report.health_score, 1.0);
        assert!(report.anomalies.is_empty());
        assert!(report.recommendations.is_empty());
        assert_eq!(report.risk_level, Severity::Low);
    }

    #[test]
    fn heat_produces_single_temperature_anomaly() {
        let report = monitor_health(&reading(36.0, 50.0, 0.5, 500.0));
        let temperature: Vec<_> = report
            .anomalies
            .iter()
            .filter(|a| a.kind == AnomalyKind::Temperature)
            .collect();
        assert_eq!(temperature.len(), 1);
        assert_eq!(temperature[0].severity, Severity::High);
        assert!((report.health_score - 0.9).abs() < 1e-9);
        assert_eq!(report.risk_level, Severity::Low);
    }

    #[test]
    fn anomaly_order_and_timestamp() {
        let now = Utc::now();
        let report = monitor_health_at(&reading(38.0, 88.0, 0.1, 500.0), now);
        let kinds: Vec<_> = report.anomalies.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AnomalyKind::Temperature,
                AnomalyKind::SoilMoisture,
                AnomalyKind::Humidity
            ]
        );
        assert!(report.anomalies.iter().all(|a| a.timestamp == now));
        assert_eq!(report.anomalies[1].severity, Severity::Critical);
        assert_eq!(report.anomalies[2].severity, Severity::Medium);
    }

    #[test]
    fn bands_accumulate() {
        // temp 38 (-0.1), humidity 88 (-0.05), moisture 0.1 (-0.4) => 0.45
        let report = monitor_health(&reading(38.0, 88.0, 0.1, 500.0));
        assert!((report.health_score - 0.45).abs() < 1e-9);
        assert_eq!(report.risk_level, Severity::High);
        assert!(report.recommendations[0].starts_with("High priority"));
        assert_eq!(report.recommendations.len(), 4);
    }

    #[test]
    fn worst_case_clamps_to_zero() {
        // -0.3 -0.2 -0.4 -0.1 = 0.0
        let report = monitor_health(&reading(45.0, 95.0, 0.05, 50.0));
        assert!(report.health_score >= 0.0);
        assert!(report.health_score < 1e-9);
        assert_eq!(report.risk_level, Severity::Critical);
        assert!(report.recommendations[0].starts_with("Urgent"));
    }

    #[test]
    fn score_always_in_unit_interval() {
        for t in [-20.0, 5.0, 12.0, 25.0, 37.0, 60.0] {
            for h in [0.0, 35.0, 60.0, 85.0, 100.0] {
                for m in [0.0, 0.25, 0.5, 0.75, 1.0] {
                    for l in [0.0, 500.0, 5000.0] {
                        let score = health_score(&reading(t, h, m, l));
                        assert!((0.0..=1.0).contains(&score));
                    }
                }
            }
        }
    }

    #[test]
    fn mild_deviation_only_costs_a_little() {
        // temp 12 (-0.1), humidity 35 (-0.05), moisture 0.75 (-0.1), light 150 (-0.1)
        let score = health_score(&reading(12.0, 35.0, 0.75, 150.0));
        assert!((score - 0.65).abs() < 1e-9);
        assert_eq!(Severity::from_health_score(score), Severity::Medium);
    }
}
