//! Shared configuration for Sketchpad
//!
//! This crate provides the single source of truth for the capture settings
//! consumed by the sketch core: simplification tolerance and mode, and the
//! optional point-count limits used for cap enforcement and the length
//! indicator.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

#[cfg(feature = "bevy")]
use bevy::prelude::Resource;

/// Default simplification tolerance (0 keeps every non-collinear point)
pub const DEFAULT_TOLERANCE: f64 = 0.0;

/// Environment variable for the simplification tolerance
pub const ENV_TOLERANCE: &str = "SKETCHPAD_TOLERANCE";
/// Environment variable for the simplification mode
pub const ENV_SIMPLIFY_MODE: &str = "SKETCHPAD_SIMPLIFY_MODE";
/// Environment variable for the maximum sketch length
pub const ENV_MAX_LENGTH: &str = "SKETCHPAD_MAX_LENGTH";
/// Environment variable for the minimum sketch length
pub const ENV_MIN_LENGTH: &str = "SKETCHPAD_MIN_LENGTH";
/// Environment variable for the cap policy
pub const ENV_CAP_POLICY: &str = "SKETCHPAD_CAP_POLICY";
/// Environment variable toggling the reset on surface resize
pub const ENV_CLEAR_ON_RESIZE: &str = "SKETCHPAD_CLEAR_ON_RESIZE";

/// Errors produced while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid tolerance: {0} (must be a finite number >= 0)")]
    InvalidTolerance(f64),

    #[error("Invalid max length: must be a positive integer")]
    InvalidMaxLength,

    #[error("Unknown simplify mode: {0:?}")]
    UnknownSimplifyMode(String),

    #[error("Unknown cap policy: {0:?}")]
    UnknownCapPolicy(String),

    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// When strokes are run through the simplifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimplifyMode {
    /// Never simplify; strokes render from raw points
    #[default]
    None,
    /// Re-simplify the active stroke after every added point
    RealTime,
    /// Simplify once, when the stroke is committed
    StrokeEnd,
}

impl SimplifyMode {
    /// Whether rendering should use simplified points at all
    pub fn renders_simplified(self) -> bool {
        self != SimplifyMode::None
    }
}

impl FromStr for SimplifyMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "real_time" | "realtime" => Ok(Self::RealTime),
            "stroke_end" => Ok(Self::StrokeEnd),
            _ => Err(ConfigError::UnknownSimplifyMode(s.to_string())),
        }
    }
}

/// What happens when a new point would push the sketch past `max_length`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapPolicy {
    /// Evict the oldest points (oldest stroke first) to make room
    #[default]
    EvictOldest,
    /// Drop the new point; the sketch stops growing at the cap
    RejectNew,
}

impl FromStr for CapPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "evict_oldest" | "evict" => Ok(Self::EvictOldest),
            "reject_new" | "reject" => Ok(Self::RejectNew),
            _ => Err(ConfigError::UnknownCapPolicy(s.to_string())),
        }
    }
}

/// Capture configuration for a sketch session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
#[serde(default)]
pub struct SketchConfig {
    /// Simplification tolerance in surface units
    pub tolerance: f64,
    /// When the simplifier runs
    pub simplify_mode: SimplifyMode,
    /// Ceiling on raw points retained across the sketch (None = uncapped)
    pub max_length: Option<usize>,
    /// Display-only threshold for the length indicator
    pub min_length: Option<usize>,
    /// Behavior at the cap
    pub cap_policy: CapPolicy,
    /// Clear the sketch when the surface dimensions change
    pub clear_on_resize: bool,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            simplify_mode: SimplifyMode::default(),
            max_length: None,
            min_length: None,
            cap_policy: CapPolicy::default(),
            clear_on_resize: true,
        }
    }
}

impl SketchConfig {
    /// Parse a configuration from JSON and validate it.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration from `SKETCHPAD_*` environment variables.
    ///
    /// Unset variables keep their default values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_TOLERANCE) {
            config.tolerance = parse_value(ENV_TOLERANCE, &value)?;
        }
        if let Some(value) = lookup(ENV_SIMPLIFY_MODE) {
            config.simplify_mode = value.parse()?;
        }
        if let Some(value) = lookup(ENV_MAX_LENGTH) {
            config.max_length = Some(parse_value(ENV_MAX_LENGTH, &value)?);
        }
        if let Some(value) = lookup(ENV_MIN_LENGTH) {
            config.min_length = Some(parse_value(ENV_MIN_LENGTH, &value)?);
        }
        if let Some(value) = lookup(ENV_CAP_POLICY) {
            config.cap_policy = value.parse()?;
        }
        if let Some(value) = lookup(ENV_CLEAR_ON_RESIZE) {
            config.clear_on_resize = parse_value(ENV_CLEAR_ON_RESIZE, &value)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the capture core cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ConfigError::InvalidTolerance(self.tolerance));
        }
        if self.max_length == Some(0) {
            return Err(ConfigError::InvalidMaxLength);
        }
        if let (Some(min), Some(max)) = (self.min_length, self.max_length)
            && min > max
        {
            warn!("min_length {} exceeds max_length {}; minimum can never be shown", min, max);
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = SketchConfig::default();
        assert_eq!(config.tolerance, DEFAULT_TOLERANCE);
        assert_eq!(config.simplify_mode, SimplifyMode::None);
        assert_eq!(config.max_length, None);
        assert_eq!(config.cap_policy, CapPolicy::EvictOldest);
        assert!(config.clear_on_resize);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_tolerance_is_valid() {
        let config = SketchConfig {
            tolerance: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let config = SketchConfig {
            tolerance: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTolerance(_))
        ));

        let config = SketchConfig {
            tolerance: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_max_length_rejected() {
        let config = SketchConfig {
            max_length: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMaxLength)
        ));
    }

    #[test]
    fn test_min_above_max_is_accepted() {
        let config = SketchConfig {
            min_length: Some(20),
            max_length: Some(10),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            SketchConfig::from_json_str(r#"{"tolerance": 2.5, "simplify_mode": "real_time"}"#)
                .unwrap();
        assert_eq!(config.tolerance, 2.5);
        assert_eq!(config.simplify_mode, SimplifyMode::RealTime);
        assert_eq!(config.max_length, None);
        assert!(config.clear_on_resize);
    }

    #[test]
    fn test_from_json_rejects_negative_max_length() {
        let result = SketchConfig::from_json_str(r#"{"max_length": -3}"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_lookup() {
        let config = SketchConfig::from_lookup(lookup_from(&[
            (ENV_TOLERANCE, "1.5"),
            (ENV_SIMPLIFY_MODE, "stroke_end"),
            (ENV_MAX_LENGTH, "200"),
            (ENV_MIN_LENGTH, "50"),
            (ENV_CAP_POLICY, "reject_new"),
            (ENV_CLEAR_ON_RESIZE, "false"),
        ]))
        .unwrap();

        assert_eq!(config.tolerance, 1.5);
        assert_eq!(config.simplify_mode, SimplifyMode::StrokeEnd);
        assert_eq!(config.max_length, Some(200));
        assert_eq!(config.min_length, Some(50));
        assert_eq!(config.cap_policy, CapPolicy::RejectNew);
        assert!(!config.clear_on_resize);
    }

    #[test]
    fn test_from_lookup_invalid_number() {
        let result = SketchConfig::from_lookup(lookup_from(&[(ENV_MAX_LENGTH, "lots")]));
        match result {
            Err(ConfigError::InvalidValue { var, value }) => {
                assert_eq!(var, ENV_MAX_LENGTH);
                assert_eq!(value, "lots");
            }
            other => panic!("Expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_simplify_mode_parsing() {
        assert_eq!("None".parse::<SimplifyMode>().unwrap(), SimplifyMode::None);
        assert_eq!(
            "real_time".parse::<SimplifyMode>().unwrap(),
            SimplifyMode::RealTime
        );
        assert!("sometimes".parse::<SimplifyMode>().is_err());
        assert!(!SimplifyMode::None.renders_simplified());
        assert!(SimplifyMode::StrokeEnd.renders_simplified());
    }
}
