use super::{Amendment, FertilizerRule};
use crate::models::{
    ApplicationTiming, FertilizerLine, FertilizerType, NutrientLevel, Priority, SoilAnalysis,
};

/// Potassium deficiency rule
///
/// K below 20: muriate of potash, (40 - K) * 1.5 kg, capped at 60 kg.
pub struct PotassiumRule;

impl FertilizerRule for PotassiumRule {
    fn id(&self) -> &'static str {
        "potassium"
    }

    fn name(&self) -> &'static str {
        "Potassium Deficiency"
    }

    fn evaluate(&self, _crop_type: &str, soil: &SoilAnalysis) -> Option<Amendment> {
        let k = soil.potassium;

        if NutrientLevel::classify(k, 20.0, f64::INFINITY) != NutrientLevel::Low {
            return None;
        }

        Some(Amendment {
            trigger: "Low K",
            line: FertilizerLine {
                fertilizer_type: FertilizerType::Mop,
                amount: ((40.0 - k) * 1.5).min(60.0),
                unit: "kg".into(),
                application_method: "Broadcast before final tillage".into(),
                timing: ApplicationTiming::PrePlanting,
                priority: Priority::Medium,
                reason: format!("Potassium is low ({:.1}, target 20+)", k),
                expected_benefit: "Better drought tolerance and disease resistance".into(),
            },
        })
    }
}
