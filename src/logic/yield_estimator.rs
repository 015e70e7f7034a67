use super::calculations::{clamp_score, outside, FeatureVector};
use crate::models::{IrrigationMethod, Priority, Recommendation, RecommendationKind, YieldInput};
use crate::reference::{irrigation_yield_multiplier, soil_yield_multiplier};
use serde::{Deserialize, Serialize};

/// Yield for a feature score of 1.0 on neutral soil and irrigation.
const BASE_YIELD: f64 = 1000.0;

const WEIGHT_NITROGEN: f64 = 0.30;
const WEIGHT_PHOSPHORUS: f64 = 0.25;
const WEIGHT_POTASSIUM: f64 = 0.20;
const WEIGHT_TEMPERATURE: f64 = 0.15;
const WEIGHT_HUMIDITY: f64 = 0.10;
const WEIGHT_PH: f64 = 0.10;
const WEIGHT_RAINFALL: f64 = 0.20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldEstimate {
    pub predicted_yield: i64,
    pub confidence: u8,
    pub recommendations: Vec<Recommendation>,
}

/// Weighted linear yield model.
///
/// The weights intentionally sum to more than 1; the product is a unitless
/// score scaled by [`BASE_YIELD`] and the soil and irrigation multipliers.
pub fn estimate_yield(input: &YieldInput) -> YieldEstimate {
    let features = FeatureVector::from_input(input);
    let score = yield_score(&features);

    let soil = input.soil();
    let irrigation = input.irrigation();
    let predicted =
        BASE_YIELD * score * soil_yield_multiplier(soil) * irrigation_yield_multiplier(irrigation);
    let predicted_yield = predicted.round() as i64;

    tracing::debug!(
        score,
        ?soil,
        ?irrigation,
        predicted_yield,
        "Yield estimated"
    );

    YieldEstimate {
        predicted_yield,
        confidence: confidence(input),
        recommendations: recommendations(input, irrigation, predicted_yield),
    }
}

pub fn yield_score(f: &FeatureVector) -> f64 {
    f.nitrogen * WEIGHT_NITROGEN
        + f.phosphorus * WEIGHT_PHOSPHORUS
        + f.potassium * WEIGHT_POTASSIUM
        + f.temperature * WEIGHT_TEMPERATURE
        + f.humidity * WEIGHT_HUMIDITY
        + f.ph * WEIGHT_PH
        + f.rainfall * WEIGHT_RAINFALL
}

fn confidence(input: &YieldInput) -> u8 {
    let mut confidence = 85;

    if outside(input.nitrogen, 20.0, 200.0) {
        confidence -= 10;
    }
    if outside(input.phosphorus, 10.0, 100.0) {
        confidence -= 10;
    }
    if outside(input.potassium, 10.0, 100.0) {
        confidence -= 10;
    }
    if outside(input.ph, 5.0, 8.0) {
        confidence -= 15;
    }
    if outside(input.temperature, 15.0, 35.0) {
        confidence -= 10;
    }

    clamp_score(confidence, 60, 95)
}

fn recommendations(
    input: &YieldInput,
    irrigation: Option<IrrigationMethod>,
    predicted_yield: i64,
) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    if input.nitrogen < 50.0 {
        recs.push(
            Recommendation::new(
                RecommendationKind::Fertilizer,
                Priority::High,
                format!(
                    "Nitrogen is low ({:.1}). Apply a nitrogen-rich fertilizer such as urea \
                     before the next growth stage.",
                    input.nitrogen
                ),
            )
            .with_impact("15-20% yield increase"),
        );
    }

    if outside(input.ph, 6.0, 7.5) {
        let action = if input.ph < 6.0 {
            "Apply agricultural lime to raise pH"
        } else {
            "Apply elemental sulfur or gypsum to lower pH"
        };
        recs.push(
            Recommendation::new(
                RecommendationKind::SoilManagement,
                Priority::Medium,
                format!(
                    "Soil pH ({:.1}) is outside the optimal 6.0-7.5 range. {}.",
                    input.ph, action
                ),
            )
            .with_impact("10-15% yield increase through better nutrient availability"),
        );
    }

    if irrigation == Some(IrrigationMethod::Flood) {
        recs.push(
            Recommendation::new(
                RecommendationKind::IrrigationMethod,
                Priority::Medium,
                "Flood irrigation wastes water and leaches nutrients. Consider switching \
                 to drip or sprinkler irrigation.",
            )
            .with_impact("20-30% water savings and 10-15% yield increase"),
        );
    }

    if predicted_yield < 800 {
        recs.push(
            Recommendation::new(
                RecommendationKind::GeneralManagement,
                Priority::Critical,
                format!(
                    "Predicted yield ({}) is below target. Review soil fertility, irrigation \
                     and pest management practices with an agronomist.",
                    predicted_yield
                ),
            )
            .with_impact("Could recover 25-40% of lost yield"),
        );
    }

    recs
}
