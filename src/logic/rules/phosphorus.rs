use super::{Amendment, FertilizerRule};
use crate::models::{
    ApplicationTiming, FertilizerLine, FertilizerType, NutrientLevel, Priority, SoilAnalysis,
};

/// Phosphorus deficiency rule
///
/// P below 15: DAP, (25 - P) * 2 kg, capped at 50 kg. Banded at planting so
/// the seedling roots reach it early.
pub struct PhosphorusRule;

impl FertilizerRule for PhosphorusRule {
    fn id(&self) -> &'static str {
        "phosphorus"
    }

    fn name(&self) -> &'static str {
        "Phosphorus Deficiency"
    }

    fn evaluate(&self, _crop_type: &str, soil: &SoilAnalysis) -> Option<Amendment> {
        let p = soil.phosphorus;

        if NutrientLevel::classify(p, 15.0, f64::INFINITY) != NutrientLevel::Low {
            return None;
        }

        Some(Amendment {
            trigger: "Low P",
            line: FertilizerLine {
                fertilizer_type: FertilizerType::Dap,
                amount: ((25.0 - p) * 2.0).min(50.0),
                unit: "kg".into(),
                application_method: "Band placement beside the seed row".into(),
                timing: ApplicationTiming::AtPlanting,
                priority: Priority::High,
                reason: format!("Phosphorus is low ({:.1}, target 15+)", p),
                expected_benefit: "Faster root establishment and earlier flowering".into(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_phosphorus_adds_dap() {
        let soil = SoilAnalysis::new(50.0, 10.0, 30.0, 6.5);
        let amendment = PhosphorusRule.evaluate("maize", &soil).unwrap();
        assert_eq!(amendment.line.fertilizer_type, FertilizerType::Dap);
        assert_eq!(amendment.line.amount, 30.0);
        assert_eq!(amendment.line.timing, ApplicationTiming::AtPlanting);
    }

    #[test]
    fn dap_amount_is_capped() {
        let soil = SoilAnalysis::new(50.0, 0.0, 30.0, 6.5);
        assert_eq!(PhosphorusRule.evaluate("maize", &soil).unwrap().line.amount, 50.0);
    }

    #[test]
    fn adequate_phosphorus_no_amendment() {
        let soil = SoilAnalysis::new(50.0, 15.0, 30.0, 6.5);
        assert!(PhosphorusRule.evaluate("maize", &soil).is_none());
    }
}
