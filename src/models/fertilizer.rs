use super::{Priority, SoilAnalysis};
use crate::error::{require_finite, AdvisorError, Result};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FertilizerType {
    Urea,
    Organic,
    #[serde(rename = "DAP")]
    Dap,
    #[serde(rename = "MOP")]
    Mop,
    Lime,
    Sulfur,
    #[serde(rename = "NPK")]
    Npk,
}

impl FertilizerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FertilizerType::Urea => "Urea",
            FertilizerType::Organic => "Organic",
            FertilizerType::Dap => "DAP",
            FertilizerType::Mop => "MOP",
            FertilizerType::Lime => "Lime",
            FertilizerType::Sulfur => "Sulfur",
            FertilizerType::Npk => "NPK",
        }
    }

    /// Key used in the pricing table section of the config file.
    pub fn key(&self) -> &'static str {
        match self {
            FertilizerType::Urea => "urea",
            FertilizerType::Organic => "organic",
            FertilizerType::Dap => "dap",
            FertilizerType::Mop => "mop",
            FertilizerType::Lime => "lime",
            FertilizerType::Sulfur => "sulfur",
            FertilizerType::Npk => "npk",
        }
    }

    pub fn all() -> &'static [FertilizerType] {
        &[
            FertilizerType::Urea,
            FertilizerType::Organic,
            FertilizerType::Dap,
            FertilizerType::Mop,
            FertilizerType::Lime,
            FertilizerType::Sulfur,
            FertilizerType::Npk,
        ]
    }
}

impl std::fmt::Display for FertilizerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// When an amendment goes down, relative to planting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationTiming {
    PrePlanting,
    AtPlanting,
    SideDressing,
    TopDressing,
    PostHarvest,
}

impl ApplicationTiming {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationTiming::PrePlanting => "pre_planting",
            ApplicationTiming::AtPlanting => "at_planting",
            ApplicationTiming::SideDressing => "side_dressing",
            ApplicationTiming::TopDressing => "top_dressing",
            ApplicationTiming::PostHarvest => "post_harvest",
        }
    }

    pub fn offset_days(&self) -> i64 {
        match self {
            ApplicationTiming::PrePlanting => -7,
            ApplicationTiming::AtPlanting => 0,
            ApplicationTiming::SideDressing => 30,
            ApplicationTiming::TopDressing => 45,
            ApplicationTiming::PostHarvest => 120,
        }
    }

    pub fn date_from(&self, planting_date: NaiveDate) -> NaiveDate {
        planting_date + Duration::days(self.offset_days())
    }
}

impl std::fmt::Display for ApplicationTiming {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a soil value sits relative to its action thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NutrientLevel {
    Low,
    Normal,
    High,
}

impl NutrientLevel {
    /// `Low` strictly below `low`, `High` strictly above `high`.
    pub fn classify(value: f64, low: f64, high: f64) -> Self {
        if value < low {
            NutrientLevel::Low
        } else if value > high {
            NutrientLevel::High
        } else {
            NutrientLevel::Normal
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FertilizerLine {
    pub fertilizer_type: FertilizerType,
    pub amount: f64,
    pub unit: String,
    pub application_method: String,
    pub timing: ApplicationTiming,
    pub priority: Priority,
    pub reason: String,
    pub expected_benefit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationScheduleEntry {
    pub date: NaiveDate,
    pub fertilizer: FertilizerType,
    pub amount: f64,
    pub method: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionStep {
    pub rule: String,
    pub outcome: String,
}

/// Ordered record of which fertilizer rules fired.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecisionTrace(Vec<DecisionStep>);

impl DecisionTrace {
    pub fn push(&mut self, rule: impl Into<String>, outcome: impl Into<String>) {
        self.0.push(DecisionStep {
            rule: rule.into(),
            outcome: outcome.into(),
        });
    }

    pub fn steps(&self) -> &[DecisionStep] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Human-readable form, e.g. `Low N → Urea | Rice → NPK`.
    pub fn render(&self) -> String {
        self.0
            .iter()
            .map(|s| format!("{} → {}", s.rule, s.outcome))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FertilizerRequest {
    pub crop_type: String,
    pub soil_analysis: SoilAnalysis,
    pub planting_date: NaiveDate,
    pub budget: f64,
}

impl FertilizerRequest {
    pub fn validate(&self) -> Result<()> {
        self.soil_analysis.validate()?;
        require_finite("budget", self.budget)?;
        if self.budget < 0.0 {
            return Err(AdvisorError::InvalidInput(format!(
                "budget must not be negative (got {})",
                self.budget
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FertilizerPlan {
    pub fertilizers: Vec<FertilizerLine>,
    pub trace: DecisionTrace,
    pub confidence: u8,
    pub total_cost: f64,
    pub currency: String,
    pub schedule: Vec<ApplicationScheduleEntry>,
}
