use crate::error::{AdvisorError, Result};
use crate::pricing::PricingTable;
use dialoguer::{Input, Password};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub pricing: PricingTable,
    #[serde(default)]
    pub forecast: ForecastConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openweathermap: Option<OpenWeatherMapConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ForecastConfig {
    /// Fixed seed for price forecast noise. Unset means a fresh seed per call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .field("latitude", &self.latitude)
            .field("longitude", &self.longitude)
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl Config {
    /// Load from `config_override`, or the first config found in a standard
    /// location. With no override and no file, built-in defaults apply.
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(AdvisorError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                p
            }
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        tracing::debug!("Loading config from {:?}", config_path);

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| AdvisorError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&config_str)
    }

    /// Parse YAML after `${VAR}` substitution.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content)?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| AdvisorError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Search for config.yaml in standard locations.
    fn find_config_path() -> Option<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        // Then the XDG config directory
        dirs::config_dir()
            .map(|dir| dir.join("agroadvisor").join("config.yaml"))
            .filter(|p| p.exists())
    }

    /// Default path for writing new config files (~/.config/agroadvisor/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AdvisorError::Config("Cannot determine config directory".into()))?
            .join("agroadvisor");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the new Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up agroadvisor!");
        println!();

        // --- Pricing ---
        println!("Fertilizer pricing (cost per kg)");
        let defaults = PricingTable::default();
        let currency: String = Input::new()
            .with_prompt("  Currency")
            .default(defaults.currency.clone())
            .interact_text()
            .map_err(|e| AdvisorError::Config(format!("Input error: {}", e)))?;

        let mut pricing = PricingTable {
            currency,
            ..defaults
        };
        for (label, cost) in [
            ("Urea", &mut pricing.urea),
            ("Organic", &mut pricing.organic),
            ("DAP", &mut pricing.dap),
            ("MOP", &mut pricing.mop),
            ("Lime", &mut pricing.lime),
            ("Sulfur", &mut pricing.sulfur),
            ("NPK", &mut pricing.npk),
        ] {
            *cost = Input::new()
                .with_prompt(format!("  {}", label))
                .default(*cost)
                .interact_text()
                .map_err(|e| AdvisorError::Config(format!("Input error: {}", e)))?;
        }

        println!();

        // --- Price forecast ---
        println!("Price forecast (leave seed blank for a fresh seed on every run)");
        let seed: String = Input::new()
            .with_prompt("  Seed")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| AdvisorError::Config(format!("Input error: {}", e)))?;
        let seed = if seed.trim().is_empty() {
            None
        } else {
            Some(seed.trim().parse::<u64>().map_err(|_| {
                AdvisorError::Config(format!("Seed must be a whole number, got '{}'", seed))
            })?)
        };

        println!();

        // --- OpenWeatherMap (optional) ---
        println!("OpenWeatherMap (leave API key blank to skip)");
        let owm_api_key: String = Password::new()
            .with_prompt("  API key")
            .allow_empty_password(true)
            .interact()
            .map_err(|e| AdvisorError::Config(format!("Input error: {}", e)))?;

        let openweathermap = if owm_api_key.is_empty() {
            None
        } else {
            let latitude: f64 = Input::new()
                .with_prompt("  Latitude")
                .default(20.59)
                .interact_text()
                .map_err(|e| AdvisorError::Config(format!("Input error: {}", e)))?;

            let longitude: f64 = Input::new()
                .with_prompt("  Longitude")
                .default(78.96)
                .interact_text()
                .map_err(|e| AdvisorError::Config(format!("Input error: {}", e)))?;

            Some(OpenWeatherMapConfig {
                api_key: owm_api_key,
                latitude,
                longitude,
                enabled: true,
            })
        };

        println!();

        let config = Config {
            pricing,
            forecast: ForecastConfig { seed },
            openweathermap,
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)?;

        // Write with a header comment
        let content = format!(
            "# agroadvisor configuration\n# Generated by `agroadvisor init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| AdvisorError::Config(format!("Bad substitution pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.pricing, PricingTable::default());
        assert!(config.forecast.seed.is_none());
        assert!(config.openweathermap.is_none());
    }

    #[test]
    fn full_yaml_parses() {
        let yaml = r#"
pricing:
  currency: KES
  urea: 1.25
forecast:
  seed: 1234
openweathermap:
  api_key: abc
  latitude: -1.29
  longitude: 36.82
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.pricing.currency, "KES");
        assert_eq!(config.pricing.urea, 1.25);
        assert_eq!(config.pricing.dap, 0.8);
        assert_eq!(config.forecast.seed, Some(1234));
        let owm = config.openweathermap.unwrap();
        assert!(owm.enabled);
        assert_eq!(owm.api_key, "abc");
    }

    #[test]
    fn env_vars_are_substituted() {
        std::env::set_var("AGROADVISOR_TEST_OWM_KEY", "from-env");
        let yaml = "openweathermap:\n  api_key: ${AGROADVISOR_TEST_OWM_KEY}\n  latitude: 1.0\n  longitude: 2.0\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.openweathermap.unwrap().api_key, "from-env");
    }

    #[test]
    fn unset_env_var_left_in_place() {
        let out = Config::substitute_env_vars("key: ${AGROADVISOR_TEST_SURELY_UNSET}").unwrap();
        assert_eq!(out, "key: ${AGROADVISOR_TEST_SURELY_UNSET}");
    }

    #[test]
    fn invalid_yaml_is_config_error() {
        let err = Config::from_yaml("pricing: [1, 2").unwrap_err();
        assert!(matches!(err, AdvisorError::Config(_)));
    }

    #[test]
    fn missing_override_is_error() {
        let err = Config::load(Some(PathBuf::from("/definitely/not/here.yaml"))).unwrap_err();
        assert!(matches!(err, AdvisorError::Config(_)));
    }

    #[test]
    fn debug_redacts_api_key() {
        let owm = OpenWeatherMapConfig {
            api_key: "secret".into(),
            latitude: 0.0,
            longitude: 0.0,
            enabled: true,
        };
        let out = format!("{:?}", owm);
        assert!(!out.contains("secret"));
        assert!(out.contains("REDACTED"));
    }
}
