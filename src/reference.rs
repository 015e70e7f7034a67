//! Static per-crop, per-soil and per-irrigation-method lookup data.
//!
//! Everything here is a `static` and safe to read from any thread.

use crate::models::{IrrigationMethod, SoilType};

#[derive(Debug, Clone, Copy)]
pub struct CropProfile {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    /// Liters per unit of area per day.
    pub water_need: f64,
    pub compatible_soils: &'static [SoilType],
}

impl CropProfile {
    pub fn matches(&self, crop: &str) -> bool {
        let crop = crop.trim().to_lowercase();
        self.name == crop || self.aliases.contains(&crop.as_str())
    }

    pub fn is_high_water_need(&self) -> bool {
        self.water_need >= HIGH_WATER_NEED
    }

    pub fn suits_soil(&self, soil: SoilType) -> bool {
        self.compatible_soils.contains(&soil)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MarketProfile {
    pub crop: &'static str,
    pub aliases: &'static [&'static str],
    /// Currency units per quintal.
    pub base_price: f64,
    /// Amplitude of the yearly sine, as a fraction of the base price.
    pub seasonal_variation: f64,
    pub trend: &'static str,
}

impl MarketProfile {
    pub fn matches(&self, crop: &str) -> bool {
        let crop = crop.trim().to_lowercase();
        self.crop == crop || self.aliases.contains(&crop.as_str())
    }
}

/// Crops at or above this daily water need get extra conservation advice.
pub const HIGH_WATER_NEED: f64 = 22.0;

pub static CROPS: &[CropProfile] = &[
    CropProfile {
        name: "rice",
        aliases: &["paddy"],
        water_need: 25.0,
        compatible_soils: &[SoilType::Clay, SoilType::Silty, SoilType::Loamy],
    },
    CropProfile {
        name: "wheat",
        aliases: &[],
        water_need: 15.0,
        compatible_soils: &[SoilType::Loamy, SoilType::Clay, SoilType::Silty],
    },
    CropProfile {
        name: "maize",
        aliases: &["corn"],
        water_need: 20.0,
        compatible_soils: &[SoilType::Loamy, SoilType::Silty, SoilType::Sandy],
    },
    CropProfile {
        name: "tomatoes",
        aliases: &["tomato"],
        water_need: 18.0,
        compatible_soils: &[SoilType::Loamy, SoilType::Sandy],
    },
    CropProfile {
        name: "potatoes",
        aliases: &["potato"],
        water_need: 16.0,
        compatible_soils: &[SoilType::Sandy, SoilType::Loamy],
    },
    CropProfile {
        name: "cotton",
        aliases: &[],
        water_need: 22.0,
        compatible_soils: &[SoilType::Clay, SoilType::Loamy],
    },
    CropProfile {
        name: "sugarcane",
        aliases: &["sugar cane"],
        water_need: 28.0,
        compatible_soils: &[SoilType::Loamy, SoilType::Clay],
    },
    CropProfile {
        name: "soybeans",
        aliases: &["soybean", "soy"],
        water_need: 14.0,
        compatible_soils: &[SoilType::Loamy, SoilType::Silty],
    },
];

pub static MARKETS: &[MarketProfile] = &[
    MarketProfile {
        crop: "rice",
        aliases: &["paddy"],
        base_price: 2000.0,
        seasonal_variation: 0.15,
        trend: "stable",
    },
    MarketProfile {
        crop: "wheat",
        aliases: &[],
        base_price: 2200.0,
        seasonal_variation: 0.10,
        trend: "increasing",
    },
    MarketProfile {
        crop: "maize",
        aliases: &["corn"],
        base_price: 1850.0,
        seasonal_variation: 0.20,
        trend: "volatile",
    },
    MarketProfile {
        crop: "tomatoes",
        aliases: &["tomato"],
        base_price: 1500.0,
        seasonal_variation: 0.35,
        trend: "volatile",
    },
    MarketProfile {
        crop: "potatoes",
        aliases: &["potato"],
        base_price: 1200.0,
        seasonal_variation: 0.25,
        trend: "seasonal",
    },
    MarketProfile {
        crop: "cotton",
        aliases: &[],
        base_price: 6000.0,
        seasonal_variation: 0.12,
        trend: "increasing",
    },
    MarketProfile {
        crop: "sugarcane",
        aliases: &["sugar cane"],
        base_price: 315.0,
        seasonal_variation: 0.05,
        trend: "stable",
    },
    MarketProfile {
        crop: "soybeans",
        aliases: &["soybean", "soy"],
        base_price: 4300.0,
        seasonal_variation: 0.18,
        trend: "increasing",
    },
];

const DEFAULT_CROP: &str = "tomatoes";
const DEFAULT_MARKET: &str = "rice";

pub fn crop_profile(crop: &str) -> Option<&'static CropProfile> {
    CROPS.iter().find(|c| c.matches(crop))
}

/// Profile for `crop`, falling back to tomatoes for unknown crops.
pub fn crop_profile_or_default(crop: &str) -> &'static CropProfile {
    crop_profile(crop).unwrap_or_else(|| {
        tracing::debug!("Unknown crop '{}', using {} water profile", crop, DEFAULT_CROP);
        &CROPS[default_index(CROPS.iter().map(|c| c.name), DEFAULT_CROP)]
    })
}

pub fn market_profile(crop: &str) -> Option<&'static MarketProfile> {
    MARKETS.iter().find(|m| m.matches(crop))
}

/// Market profile for `crop`, falling back to rice for unknown crops.
pub fn market_profile_or_default(crop: &str) -> &'static MarketProfile {
    market_profile(crop).unwrap_or_else(|| {
        tracing::debug!("Unknown crop '{}', using {} market profile", crop, DEFAULT_MARKET);
        &MARKETS[default_index(MARKETS.iter().map(|m| m.crop), DEFAULT_MARKET)]
    })
}

fn default_index<'a>(mut names: impl Iterator<Item = &'a str>, default: &str) -> usize {
    names.position(|n| n == default).unwrap_or(0)
}

/// Yield multiplier by soil type. Unknown soil is neutral.
pub fn soil_yield_multiplier(soil: Option<SoilType>) -> f64 {
    match soil {
        Some(SoilType::Sandy) => 0.8,
        Some(SoilType::Loamy) => 1.0,
        Some(SoilType::Clay) => 0.9,
        Some(SoilType::Silty) => 0.95,
        None => 1.0,
    }
}

/// Yield multiplier by irrigation method. Unknown method is neutral.
pub fn irrigation_yield_multiplier(method: Option<IrrigationMethod>) -> f64 {
    match method {
        Some(IrrigationMethod::Drip) => 1.2,
        Some(IrrigationMethod::Sprinkler) => 1.0,
        Some(IrrigationMethod::Flood) => 0.8,
        Some(IrrigationMethod::Manual) => 0.9,
        None => 1.0,
    }
}

/// Water demand factor by soil infiltration. Sandy soil drains fastest.
pub fn soil_water_factor(soil: Option<SoilType>) -> f64 {
    match soil {
        Some(SoilType::Sandy) => 1.2,
        Some(SoilType::Loamy) => 1.0,
        Some(SoilType::Clay) => 0.8,
        Some(SoilType::Silty) => 0.9,
        None => 1.0,
    }
}
