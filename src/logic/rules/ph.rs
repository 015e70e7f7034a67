use super::{Amendment, FertilizerRule};
use crate::models::{
    ApplicationTiming, FertilizerLine, FertilizerType, NutrientLevel, Priority, SoilAnalysis,
};

/// Soil pH correction rule
///
/// - pH below 6.0: agricultural lime, (6.5 - pH) * 100 kg
/// - pH above 7.5: elemental sulfur, (pH - 7.0) * 50 kg
///
/// Both go down a week before planting so the soil has time to react.
pub struct PhRule;

impl FertilizerRule for PhRule {
    fn id(&self) -> &'static str {
        "ph"
    }

    fn name(&self) -> &'static str {
        "Soil pH Correction"
    }

    fn evaluate(&self, _crop_type: &str, soil: &SoilAnalysis) -> Option<Amendment> {
        let ph = soil.ph;

        match NutrientLevel::classify(ph, 6.0, 7.5) {
            NutrientLevel::Low => Some(Amendment {
                trigger: "Acidic pH",
                line: FertilizerLine {
                    fertilizer_type: FertilizerType::Lime,
                    amount: (6.5 - ph) * 100.0,
                    unit: "kg".into(),
                    application_method: "Broadcast and incorporate".into(),
                    timing: ApplicationTiming::PrePlanting,
                    priority: Priority::High,
                    reason: format!("Soil is acidic (pH {:.1})", ph),
                    expected_benefit: "Raises pH toward 6.5 and unlocks phosphorus".into(),
                },
            }),
            NutrientLevel::High => Some(Amendment {
                trigger: "Alkaline pH",
                line: FertilizerLine {
                    fertilizer_type: FertilizerType::Sulfur,
                    amount: (ph - 7.0) * 50.0,
                    unit: "kg".into(),
                    application_method: "Broadcast and incorporate".into(),
                    timing: ApplicationTiming::PrePlanting,
                    priority: Priority::Medium,
                    reason: format!("Soil is alkaline (pH {:.1})", ph),
                    expected_benefit: "Lowers pH toward 7.0 and improves micronutrient uptake"
                        .into(),
                },
            }),
            NutrientLevel::Normal => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acidic_soil_adds_lime() {
        let soil = SoilAnalysis::new(50.0, 30.0, 30.0, 5.0);
        let amendment = PhRule.evaluate("wheat", &soil).unwrap();
        assert_eq!(amendment.line.fertilizer_type, FertilizerType::Lime);
        assert!((amendment.line.amount - 150.0).abs() < 1e-9);
    }

    #[test]
    fn alkaline_soil_adds_sulfur() {
        let soil = SoilAnalysis::new(50.0, 30.0, 30.0, 8.0);
        let amendment = PhRule.evaluate("wheat", &soil).unwrap();
        assert_eq!(amendment.trigger, "Alkaline pH");
        assert_eq!(amendment.line.fertilizer_type, FertilizerType::Sulfur);
        assert!((amendment.line.amount - 50.0).abs() < 1e-9);
    }

    #[test]
    fn neutral_soil_no_amendment() {
        for ph in [6.0, 6.8, 7.5] {
            let soil = SoilAnalysis::new(50.0, 30.0, 30.0, ph);
            assert!(PhRule.evaluate("wheat", &soil).is_none(), "pH {}", ph);
        }
    }
}
