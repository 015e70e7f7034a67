use super::calculations::clamp_score;
use crate::models::{
    IrrigationPlan, IrrigationRequest, IrrigationSession, Priority, SensorReading, SoilType,
    WeatherDay,
};
use crate::reference::{crop_profile_or_default, soil_water_factor};
use chrono::{Duration, Local, NaiveDate};

pub const PLANNING_DAYS: usize = 7;

const SESSION_REASONS: [&str; PLANNING_DAYS] = [
    "Regular maintenance watering",
    "Soil moisture replenishment",
    "Evapotranspiration compensation",
    "Root zone maintenance",
    "Growth stage support",
    "Pre-heat stress hydration",
    "Weekly deep watering",
];

/// Seven-day watering plan starting today.
pub fn schedule_irrigation(request: &IrrigationRequest) -> IrrigationPlan {
    schedule_irrigation_on(request, Local::now().date_naive())
}

/// Seven-day watering plan starting on `today`.
///
/// Daily amount is crop water need × soil factor × weather factor × area,
/// identical for every day of the horizon since only one forecast day is
/// available.
pub fn schedule_irrigation_on(request: &IrrigationRequest, today: NaiveDate) -> IrrigationPlan {
    let crop = crop_profile_or_default(&request.crop_type);
    let soil = SoilType::from_str(&request.soil_type);
    let soil_factor = soil_water_factor(soil);
    let weather_factor = weather_factor(request.weather_data.as_ref());

    let daily_amount = (crop.water_need * soil_factor * weather_factor * request.area).round();

    tracing::debug!(
        crop = crop.name,
        soil_factor,
        weather_factor,
        daily_amount,
        "Irrigation schedule computed"
    );

    let schedule: Vec<IrrigationSession> = SESSION_REASONS
        .iter()
        .enumerate()
        .map(|(offset, reason)| IrrigationSession {
            date: today + Duration::days(offset as i64),
            amount: daily_amount,
            duration: (daily_amount / 2.0).round(),
            reason: reason.to_string(),
            priority: session_priority(daily_amount),
        })
        .collect();

    let water_usage = schedule.iter().map(|s| s.amount).sum();
    let sensor = request.sensor_data.as_ref();

    let mut recommendations = Vec::new();
    if let Some(reading) = sensor {
        if reading.soil_moisture < 0.3 {
            recommendations.push(format!(
                "Soil moisture is low ({:.0}%). Irrigate early in the morning and mulch to \
                 retain moisture.",
                reading.soil_moisture * 100.0
            ));
        }
        if reading.temperature > 35.0 {
            recommendations.push(format!(
                "High temperature ({:.1}°C). Water in the early morning or evening to cut \
                 evaporation losses.",
                reading.temperature
            ));
        }
    }
    if soil == Some(SoilType::Sandy) {
        recommendations.push(
            "Sandy soil drains quickly. Use shorter, more frequent irrigation sessions.".into(),
        );
    }
    if crop.is_high_water_need() {
        recommendations.push(format!(
            "{} has high water requirements. Drip irrigation can reduce water use by 30-50%.",
            crop.name
        ));
    }

    IrrigationPlan {
        schedule,
        water_usage,
        efficiency: efficiency(sensor),
        recommendations,
    }
}

/// Demand adjustment from a single forecast day, within [0.5, 1.5].
pub fn weather_factor(weather: Option<&WeatherDay>) -> f64 {
    let Some(day) = weather else {
        return 1.0;
    };

    let mut factor = 1.0;

    if day.temperature > 30.0 {
        factor += 0.2;
    } else if day.temperature < 15.0 {
        factor -= 0.1;
    }

    if day.humidity < 40.0 {
        factor += 0.1;
    } else if day.humidity > 80.0 {
        factor -= 0.1;
    }

    if day.rainfall > 5.0 {
        factor -= 0.3;
    }

    f64::clamp(factor, 0.5, 1.5)
}

fn session_priority(amount: f64) -> Priority {
    if amount > 20.0 {
        Priority::High
    } else if amount > 15.0 {
        Priority::Medium
    } else {
        Priority::Low
    }
}

fn efficiency(sensor: Option<&SensorReading>) -> u8 {
    let mut efficiency = 85;

    if let Some(reading) = sensor {
        if reading.soil_moisture < 0.3 {
            efficiency -= 10;
        } else if reading.soil_moisture > 0.7 {
            efficiency -= 5;
        }
        if reading.temperature > 35.0 {
            efficiency -= 5;
        }
    }

    clamp_score(efficiency, 60, 95)
}
