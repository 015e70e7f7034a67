use super::{Amendment, FertilizerRule};
use crate::models::{
    ApplicationTiming, FertilizerLine, FertilizerType, NutrientLevel, Priority, SoilAnalysis,
};

/// Nitrogen correction rule
///
/// - N below 30: urea, (50 - N) * 2 kg, capped at 100 kg
/// - N above 80: 20 kg organic matter to buffer the excess
pub struct NitrogenRule;

const LOW_BELOW: f64 = 30.0;
const HIGH_ABOVE: f64 = 80.0;

impl FertilizerRule for NitrogenRule {
    fn id(&self) -> &'static str {
        "nitrogen"
    }

    fn name(&self) -> &'static str {
        "Nitrogen Balance"
    }

    fn evaluate(&self, _crop_type: &str, soil: &SoilAnalysis) -> Option<Amendment> {
        let n = soil.nitrogen;

        match NutrientLevel::classify(n, LOW_BELOW, HIGH_ABOVE) {
            NutrientLevel::Low => Some(Amendment {
                trigger: "Low N",
                line: FertilizerLine {
                    fertilizer_type: FertilizerType::Urea,
                    amount: ((50.0 - n) * 2.0).min(100.0),
                    unit: "kg".into(),
                    application_method: "Broadcast in two split doses".into(),
                    timing: ApplicationTiming::SideDressing,
                    priority: Priority::High,
                    reason: format!("Nitrogen is low ({:.1}, target 30-80)", n),
                    expected_benefit: "Stronger vegetative growth and greener foliage".into(),
                },
            }),
            NutrientLevel::High => Some(Amendment {
                trigger: "High N",
                line: FertilizerLine {
                    fertilizer_type: FertilizerType::Organic,
                    amount: 20.0,
                    unit: "kg".into(),
                    application_method: "Incorporate into topsoil".into(),
                    timing: ApplicationTiming::PrePlanting,
                    priority: Priority::Low,
                    reason: format!(
                        "Nitrogen is high ({:.1}); organic matter buffers the excess",
                        n
                    ),
                    expected_benefit: "Better soil structure and slower nutrient release".into(),
                },
            }),
            NutrientLevel::Normal => None,
        }
    }
}
