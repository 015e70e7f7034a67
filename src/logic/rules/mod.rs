pub mod crop;
pub mod engine;
pub mod nitrogen;
pub mod ph;
pub mod phosphorus;
pub mod potassium;

pub use engine::FertilizerPlanner;

use crate::models::{FertilizerLine, SoilAnalysis};

/// A fertilizer line proposed by one rule, plus the trigger that fired it.
#[derive(Debug, Clone, PartialEq)]
pub struct Amendment {
    pub trigger: &'static str,
    pub line: FertilizerLine,
}

/// Trait for soil amendment rules
///
/// Rules are evaluated independently and in order; each proposes zero or
/// one amendment.
pub trait FertilizerRule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule and return an amendment if conditions are met
    fn evaluate(&self, crop_type: &str, soil: &SoilAnalysis) -> Option<Amendment>;
}
