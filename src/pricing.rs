use crate::models::FertilizerType;
use serde::{Deserialize, Serialize};

/// Cost per kilogram of each amendment, in `currency` units.
///
/// Loaded from the `pricing` section of the config file so the rule set
/// never hard-codes a currency.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PricingTable {
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_urea")]
    pub urea: f64,
    #[serde(default = "default_organic")]
    pub organic: f64,
    #[serde(default = "default_dap")]
    pub dap: f64,
    #[serde(default = "default_mop")]
    pub mop: f64,
    #[serde(default = "default_lime")]
    pub lime: f64,
    #[serde(default = "default_sulfur")]
    pub sulfur: f64,
    #[serde(default = "default_npk")]
    pub npk: f64,
}

fn default_currency() -> String {
    "INR".into()
}

fn default_urea() -> f64 {
    0.5
}

fn default_organic() -> f64 {
    0.3
}

fn default_dap() -> f64 {
    0.8
}

fn default_mop() -> f64 {
    0.6
}

fn default_lime() -> f64 {
    0.2
}

fn default_sulfur() -> f64 {
    0.4
}

fn default_npk() -> f64 {
    0.7
}

impl PricingTable {
    pub fn cost_per_kg(&self, fertilizer: FertilizerType) -> f64 {
        match fertilizer {
            FertilizerType::Urea => self.urea,
            FertilizerType::Organic => self.organic,
            FertilizerType::Dap => self.dap,
            FertilizerType::Mop => self.mop,
            FertilizerType::Lime => self.lime,
            FertilizerType::Sulfur => self.sulfur,
            FertilizerType::Npk => self.npk,
        }
    }
}

impl Default for PricingTable {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            urea: default_urea(),
            organic: default_organic(),
            dap: default_dap(),
            mop: default_mop(),
            lime: default_lime(),
            sulfur: default_sulfur(),
            npk: default_npk(),
        }
    }
}
