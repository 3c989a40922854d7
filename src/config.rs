//! Page-level configuration.
//!
//! The page may embed a JSON object in
//! `<script type="application/json" id="site-config">`. Every field has a
//! default, so an absent or empty object yields the stock look.

use serde::Deserialize;

use crate::clock::DEFAULT_STEP;
use crate::error::{Error, Result};
use crate::palette::Preset;
use crate::decoder::TICK_MS;
use crate::magnetic::DEFAULT_STRENGTH;
use crate::wave::{DEFAULT_SAMPLE_STEP, MIN_SAMPLE_STEP};

/// Element id of the embedded config block.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub aurora: AuroraConfig,
    pub cursor: CursorConfig,
    pub decoder: DecoderConfig,
    pub magnetic: MagneticConfig,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            aurora: AuroraConfig::default(),
            cursor: CursorConfig::default(),
            decoder: DecoderConfig::default(),
            magnetic: MagneticConfig::default(),
            log_level: "info".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuroraConfig {
    pub preset: Preset,
    /// Clock increment per frame.
    pub step: f64,
    /// Horizontal distance between wave samples, in pixels.
    pub sample_step: f64,
    /// Overrides the preset's stroke width.
    pub line_width: Option<f64>,
}

impl Default for AuroraConfig {
    fn default() -> Self {
        Self {
            preset: Preset::default(),
            step: DEFAULT_STEP,
            sample_step: DEFAULT_SAMPLE_STEP,
            line_width: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CursorConfig {
    pub enabled: bool,
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            stiffness: 700.0,
            damping: 25.0,
            mass: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecoderConfig {
    pub enabled: bool,
    pub tick_ms: u32,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tick_ms: TICK_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MagneticConfig {
    pub enabled: bool,
    /// Share of the pointer's offset from the centre the element follows.
    pub strength: f64,
}

impl Default for MagneticConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            strength: DEFAULT_STRENGTH,
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Parse and validate. Blank input means defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.aurora.validate()?;
        positive("cursor.stiffness", self.cursor.stiffness)?;
        positive("cursor.damping", self.cursor.damping)?;
        positive("cursor.mass", self.cursor.mass)?;
        positive("magnetic.strength", self.magnetic.strength)?;
        if self.decoder.tick_ms == 0 {
            return Err(Error::Config("decoder.tick_ms must be positive".into()));
        }
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(Error::Config(format!(
                "log_level {:?} is not one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }

    /// `log_level` as a `tracing` level.
    pub fn max_level(&self) -> tracing::Level {
        match self.log_level.as_str() {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "warn" => tracing::Level::WARN,
            "error" => tracing::Level::ERROR,
            _ => tracing::Level::INFO,
        }
    }
}

impl AuroraConfig {
    /// Parse just the `aurora` section. Blank input means defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: AuroraConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        positive("aurora.step", self.step)?;
        positive("aurora.sample_step", self.sample_step)?;
        if self.sample_step < MIN_SAMPLE_STEP {
            return Err(Error::Config(format!(
                "aurora.sample_step must be at least {MIN_SAMPLE_STEP}, got {}",
                self.sample_step
            )));
        }
        if let Some(w) = self.line_width {
            positive("aurora.line_width", w)?;
        }
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::Config(format!("{name} must be finite and positive, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn blank_is_default() {
        assert_eq!(Config::from_json("  ").unwrap(), Config::default());
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_json(r#"{"aurora":{"preset":"ribbon"}}"#).unwrap();
        assert_eq!(config.aurora.preset, Preset::Ribbon);
        assert_eq!(config.aurora.step, DEFAULT_STEP);
        assert_eq!(config.aurora.line_width, None);
        assert_eq!(config.cursor, CursorConfig::default());
    }

    #[test]
    fn rejects_non_positive_step() {
        let err = Config::from_json(r#"{"aurora":{"step":0}}"#).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("aurora.step")));
    }

    #[test]
    fn rejects_unknown_fields_and_presets() {
        assert!(Config::from_json(r#"{"aurora":{"speed":2}}"#).is_err());
        assert!(Config::from_json(r#"{"aurora":{"preset":"neon"}}"#).is_err());
    }

    #[test]
    fn rejects_bad_log_level() {
        assert!(Config::from_json(r#"{"log_level":"verbose"}"#).is_err());
        let config = Config::from_json(r#"{"log_level":"debug"}"#).unwrap();
        assert_eq!(config.max_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn aurora_section_parses_alone() {
        let aurora = AuroraConfig::from_json(r#"{"preset":"ribbon","step":1.0}"#).unwrap();
        assert_eq!(aurora.preset, Preset::Ribbon);
        assert_eq!(aurora.step, 1.0);
        assert!(AuroraConfig::from_json(r#"{"sample_step":-1}"#).is_err());
    }

    #[test]
    fn sample_step_has_a_floor() {
        let err = Config::from_json(r#"{"aurora":{"sample_step":1e-300}}"#).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("at least")));
        assert!(AuroraConfig::from_json(r#"{"sample_step":0.25}"#).is_err());
        assert!(AuroraConfig::from_json(r#"{"sample_step":0.5}"#).is_ok());
    }

    #[test]
    fn magnetic_section() {
        let config = Config::from_json(r#"{"magnetic":{"strength":0.2}}"#).unwrap();
        assert_eq!(config.magnetic.strength, 0.2);
        assert!(config.magnetic.enabled);
        assert!(Config::from_json(r#"{"magnetic":{"strength":0}}"#).is_err());
    }

    #[test]
    fn zero_tick_is_invalid() {
        assert!(Config::from_json(r#"{"decoder":{"tick_ms":0}}"#).is_err());
    }
}
