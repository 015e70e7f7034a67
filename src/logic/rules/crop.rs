use super::{Amendment, FertilizerRule};
use crate::models::{ApplicationTiming, FertilizerLine, FertilizerType, Priority, SoilAnalysis};
use crate::reference::crop_profile;

/// Rice top-dressing rule
///
/// Paddy rice gets a fixed 25 kg NPK top dressing at tillering regardless
/// of the soil test.
pub struct RiceTopDressingRule;

impl FertilizerRule for RiceTopDressingRule {
    fn id(&self) -> &'static str {
        "rice_top_dressing"
    }

    fn name(&self) -> &'static str {
        "Rice Top Dressing"
    }

    fn evaluate(&self, crop_type: &str, _soil: &SoilAnalysis) -> Option<Amendment> {
        if crop_profile(crop_type)?.name != "rice" {
            return None;
        }

        Some(Amendment {
            trigger: "Rice crop",
            line: FertilizerLine {
                fertilizer_type: FertilizerType::Npk,
                amount: 25.0,
                unit: "kg".into(),
                application_method: "Top dressing into standing water".into(),
                timing: ApplicationTiming::TopDressing,
                priority: Priority::Medium,
                reason: "Rice needs a balanced top dressing at active tillering".into(),
                expected_benefit: "Higher tiller count and better grain fill".into(),
            },
        })
    }
}
