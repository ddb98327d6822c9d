//! # Announcer Settings
//!
//! YAML settings: channel directory, classification rules, reference time
//! zones and the card footer.
//!
//! ```yaml
//! channels:
//!   general: 360051864110235649
//!   events: 822489737154658359
//!   telegram-bridge: 761654190631288893
//!   Awareness: 760897115466498089
//! classifications:
//!   - keyword: Awareness
//!     label: Awareness
//! reference_zones:
//!   - label: New York
//!     zone: America/New_York
//! ```
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use chrono_tz::Tz;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::features::calendar::ClassificationRule;

pub const DEFAULT_FOOTER: &str =
    "Would you like to participate in our ecosystem? Come join one of the weekly committee meetings!";

/// A timezone shown on lead announcements.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReferenceZone {
    pub label: String,
    /// IANA zone name, e.g. `Europe/London`
    pub zone: String,
}

impl ReferenceZone {
    pub fn new(label: &str, zone: &str) -> Self {
        Self {
            label: label.to_string(),
            zone: zone.to_string(),
        }
    }

    pub fn tz(&self) -> Result<Tz> {
        self.zone
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("Unknown time zone '{}': {}", self.zone, e))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Channel name -> Discord channel id
    #[serde(default)]
    pub channels: HashMap<String, u64>,

    /// Ordered classification rules; first match wins
    #[serde(default = "default_classifications")]
    pub classifications: Vec<ClassificationRule>,

    #[serde(default = "default_reference_zones")]
    pub reference_zones: Vec<ReferenceZone>,

    #[serde(default = "default_footer")]
    pub footer: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            channels: HashMap::new(),
            classifications: default_classifications(),
            reference_zones: default_reference_zones(),
            footer: default_footer(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file, falling back to defaults when the file doesn't exist
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            info!("📄 No settings file at {path} - using default settings");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        for rule in &self.classifications {
            if rule.keyword.is_empty() {
                return Err(anyhow::anyhow!(
                    "Classification '{}' has an empty keyword",
                    rule.label
                ));
            }
            if rule.label.is_empty() {
                return Err(anyhow::anyhow!(
                    "Classification keyword '{}' has an empty label",
                    rule.keyword
                ));
            }
        }

        for zone in &self.reference_zones {
            zone.tz()?;
        }

        Ok(())
    }
}

fn default_classifications() -> Vec<ClassificationRule> {
    [
        "Awareness",
        "Development",
        "Governance",
        "Education",
        "Analytics",
        "Website",
        "Design",
        "Infrastructure",
        "Biz Dev",
    ]
    .iter()
    .map(|name| ClassificationRule::new(name, name))
    .collect()
}

fn default_reference_zones() -> Vec<ReferenceZone> {
    vec![
        ReferenceZone::new("New York", "America/New_York"),
        ReferenceZone::new("London", "Europe/London"),
        ReferenceZone::new("Bangkok", "Asia/Bangkok"),
    ]
}

fn default_footer() -> String {
    DEFAULT_FOOTER.to_string()
}
