use crate::error::{require_finite, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilType {
    Sandy,
    Loamy,
    Clay,
    Silty,
}

impl SoilType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Sandy => "sandy",
            SoilType::Loamy => "loamy",
            SoilType::Clay => "clay",
            SoilType::Silty => "silty",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sandy" | "sand" => Some(SoilType::Sandy),
            "loamy" | "loam" => Some(SoilType::Loamy),
            "clay" | "clayey" => Some(SoilType::Clay),
            "silty" | "silt" => Some(SoilType::Silty),
            _ => None,
        }
    }

    pub fn all() -> &'static [SoilType] {
        &[
            SoilType::Sandy,
            SoilType::Loamy,
            SoilType::Clay,
            SoilType::Silty,
        ]
    }
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IrrigationMethod {
    Drip,
    Sprinkler,
    Flood,
    Manual,
}

impl IrrigationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            IrrigationMethod::Drip => "drip",
            IrrigationMethod::Sprinkler => "sprinkler",
            IrrigationMethod::Flood => "flood",
            IrrigationMethod::Manual => "manual",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "drip" | "trickle" => Some(IrrigationMethod::Drip),
            "sprinkler" | "sprinklers" => Some(IrrigationMethod::Sprinkler),
            "flood" | "furrow" => Some(IrrigationMethod::Flood),
            "manual" | "hand" => Some(IrrigationMethod::Manual),
            _ => None,
        }
    }
}

impl std::fmt::Display for IrrigationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Farmer-supplied soil test. Values may be far outside agronomic ranges.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilAnalysis {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub ph: f64,
    #[serde(default)]
    pub organic_matter: f64,
    #[serde(default)]
    pub soil_type: String,
}

impl SoilAnalysis {
    pub fn new(nitrogen: f64, phosphorus: f64, potassium: f64, ph: f64) -> Self {
        Self {
            nitrogen,
            phosphorus,
            potassium,
            ph,
            organic_matter: 0.0,
            soil_type: String::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_finite("soilAnalysis.nitrogen", self.nitrogen)?;
        require_finite("soilAnalysis.phosphorus", self.phosphorus)?;
        require_finite("soilAnalysis.potassium", self.potassium)?;
        require_finite("soilAnalysis.ph", self.ph)?;
        require_finite("soilAnalysis.organicMatter", self.organic_matter)
    }
}

/// Feature set consumed by the yield estimator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldInput {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
    #[serde(default)]
    pub soil_type: String,
    #[serde(default)]
    pub irrigation_method: String,
}

impl YieldInput {
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("nitrogen", self.nitrogen),
            ("phosphorus", self.phosphorus),
            ("potassium", self.potassium),
            ("temperature", self.temperature),
            ("humidity", self.humidity),
            ("ph", self.ph),
            ("rainfall", self.rainfall),
        ] {
            require_finite(field, value)?;
        }
        Ok(())
    }

    pub fn soil(&self) -> Option<SoilType> {
        SoilType::from_str(&self.soil_type)
    }

    pub fn irrigation(&self) -> Option<IrrigationMethod> {
        IrrigationMethod::from_str(&self.irrigation_method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soil_type_from_str_valid() {
        assert_eq!(SoilType::from_str("sandy"), Some(SoilType::Sandy));
        assert_eq!(SoilType::from_str("Loamy"), Some(SoilType::Loamy));
        assert_eq!(SoilType::from_str("loam"), Some(SoilType::Loamy));
        assert_eq!(SoilType::from_str(" CLAY "), Some(SoilType::Clay));
        assert_eq!(SoilType::from_str("silt"), Some(SoilType::Silty));
    }

    #[test]
    fn soil_type_from_str_invalid() {
        assert_eq!(SoilType::from_str("peat"), None);
        assert_eq!(SoilType::from_str(""), None);
    }

    #[test]
    fn soil_type_round_trip() {
        for soil in SoilType::all() {
            assert_eq!(SoilType::from_str(soil.as_str()), Some(*soil));
        }
    }

    #[test]
    fn irrigation_method_from_str() {
        assert_eq!(
            IrrigationMethod::from_str("Drip"),
            Some(IrrigationMethod::Drip)
        );
        assert_eq!(
            IrrigationMethod::from_str("sprinklers"),
            Some(IrrigationMethod::Sprinkler)
        );
        assert_eq!(
            IrrigationMethod::from_str("flood"),
            Some(IrrigationMethod::Flood)
        );
        assert_eq!(IrrigationMethod::from_str("center pivot"), None);
    }

    #[test]
    fn yield_input_deserializes_camel_case() {
        let input: YieldInput = serde_json::from_str(
            r#"{"nitrogen":60,"phosphorus":20,"potassium":25,"temperature":25,
                "humidity":55,"ph":6.5,"rainfall":100,"soilType":"loamy",
                "irrigationMethod":"drip"}"#,
        )
        .unwrap();
        assert_eq!(input.soil(), Some(SoilType::Loamy));
        assert_eq!(input.irrigation(), Some(IrrigationMethod::Drip));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn yield_input_missing_field_fails_to_parse() {
        let parsed: std::result::Result<YieldInput, _> =
            serde_json::from_str(r#"{"nitrogen":60,"phosphorus":20}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn soil_analysis_defaults_optional_fields() {
        let soil: SoilAnalysis =
            serde_json::from_str(r#"{"nitrogen":20,"phosphorus":30,"potassium":30,"ph":7.0}"#)
                .unwrap();
        assert_eq!(soil.organic_matter, 0.0);
        assert!(soil.soil_type.is_empty());
        assert!(soil.validate().is_ok());
    }
}
