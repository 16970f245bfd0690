use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::color;

/// Default location of the presentation policy, relative to the working
/// directory.
pub const DEFAULT_POLICY_FILE: &str = "dashboard.json";

/// Default dataset location.
pub const DEFAULT_DATA_FILE: &str = "main_data.csv";

pub const DATA_ENV: &str = "AIR_QUALITY_DATA";
pub const POLICY_ENV: &str = "AIR_QUALITY_CONFIG";

// ---------------------------------------------------------------------------
// Air-quality bands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirQualityBand {
    Good,
    Moderate,
    Poor,
}

impl AirQualityBand {
    pub const ALL: [AirQualityBand; 3] =
        [AirQualityBand::Good, AirQualityBand::Moderate, AirQualityBand::Poor];

    pub fn label(self) -> &'static str {
        match self {
            AirQualityBand::Good => "Good",
            AirQualityBand::Moderate => "Moderate",
            AirQualityBand::Poor => "Poor",
        }
    }
}

// ---------------------------------------------------------------------------
// Presentation policy
// ---------------------------------------------------------------------------

/// Colours as `#rrggbb` strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyColors {
    pub good: String,
    pub moderate: String,
    pub poor: String,
    pub pm25: String,
    pub pm10: String,
    pub highlight: String,
}

impl Default for PolicyColors {
    fn default() -> Self {
        Self {
            good: "#2E7D32".to_string(),
            moderate: "#F9A825".to_string(),
            poor: "#C62828".to_string(),
            pm25: "#90CAF9".to_string(),
            pm10: "#F08080".to_string(),
            highlight: "#FF0000".to_string(),
        }
    }
}

/// Everything about how aggregates are shown that is not the data itself:
/// band thresholds, colours and labels. Missing JSON fields keep their
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationPolicy {
    /// Upper bound (inclusive) of the "good" PM2.5 band, µg/m³.
    pub good_max: f64,
    /// Upper bound (inclusive) of the "moderate" PM2.5 band, µg/m³.
    pub moderate_max: f64,
    pub colors: PolicyColors,
    /// Twelve month abbreviations, January first.
    pub month_labels: Vec<String>,
}

impl Default for PresentationPolicy {
    fn default() -> Self {
        Self {
            good_max: 35.0,
            moderate_max: 75.0,
            colors: PolicyColors::default(),
            month_labels: [
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl PresentationPolicy {
    /// Read and validate a policy file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let policy: PresentationPolicy =
            serde_json::from_str(&text).context("parsing presentation policy")?;
        policy.validate()?;
        Ok(policy)
    }

    /// Like [`load`](Self::load) but never fails: a missing file means
    /// defaults, a broken one is logged and replaced by defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No presentation policy at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(policy) => {
                log::info!("Presentation policy loaded from {}", path.display());
                policy
            }
            Err(e) => {
                log::warn!("Ignoring presentation policy {}: {e:#}", path.display());
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.good_max.is_finite() && self.moderate_max.is_finite()) {
            bail!("band thresholds must be finite");
        }
        if self.good_max > self.moderate_max {
            bail!(
                "good_max ({}) must not exceed moderate_max ({})",
                self.good_max,
                self.moderate_max
            );
        }
        if self.month_labels.len() != 12 {
            bail!("expected 12 month labels, got {}", self.month_labels.len());
        }
        let c = &self.colors;
        for (name, hex) in [
            ("good", &c.good),
            ("moderate", &c.moderate),
            ("poor", &c.poor),
            ("pm25", &c.pm25),
            ("pm10", &c.pm10),
            ("highlight", &c.highlight),
        ] {
            if color::parse_hex(hex).is_none() {
                bail!("colour '{name}' is not a #rrggbb value: {hex}");
            }
        }
        Ok(())
    }

    /// Band of a PM2.5 concentration; both thresholds are inclusive.
    pub fn classify(&self, pm25: f64) -> AirQualityBand {
        if pm25 <= self.good_max {
            AirQualityBand::Good
        } else if pm25 <= self.moderate_max {
            AirQualityBand::Moderate
        } else {
            AirQualityBand::Poor
        }
    }

    pub fn band_hex(&self, band: AirQualityBand) -> &str {
        match band {
            AirQualityBand::Good => &self.colors.good,
            AirQualityBand::Moderate => &self.colors.moderate,
            AirQualityBand::Poor => &self.colors.poor,
        }
    }

    /// Label for month `1..=12`.
    pub fn month_label(&self, month: u32) -> &str {
        month
            .checked_sub(1)
            .and_then(|i| self.month_labels.get(i as usize))
            .map(String::as_str)
            .unwrap_or("?")
    }
}
