//! Timing and observer settings for both widgets.
//!
//! Entry points accept an optional JSON object; any field left out keeps its
//! default.

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// How long a drop's feedback toast stays up.
    pub feedback_clear_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            feedback_clear_ms: 3_000,
        }
    }
}

impl GameConfig {
    pub fn from_json(json: Option<&str>) -> Result<Self, ConfigError> {
        match json {
            Some(s) if !s.trim().is_empty() => Ok(serde_json::from_str(s)?),
            _ => Ok(Self::default()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    /// Delay before the hover hint appears for a user who has not interacted.
    pub hint_delay_ms: u32,
    /// Distance around the viewport that already counts as "in view".
    pub root_margin_px: f64,
    /// Minimum visible fraction of a card before it is revealed.
    pub threshold: f64,
    /// Entrance transition delay added per card position.
    pub stagger_ms: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            hint_delay_ms: 2_000,
            root_margin_px: 50.0,
            threshold: 0.1,
            stagger_ms: 80,
        }
    }
}

impl BoardConfig {
    pub fn from_json(json: Option<&str>) -> Result<Self, ConfigError> {
        let config: Self = match json {
            Some(s) if !s.trim().is_empty() => serde_json::from_str(s)?,
            _ => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::Threshold(self.threshold));
        }
        if !self.root_margin_px.is_finite() || self.root_margin_px < 0.0 {
            return Err(ConfigError::RootMargin(self.root_margin_px));
        }
        Ok(())
    }

    /// `rootMargin` string in the form `IntersectionObserver` expects.
    pub fn root_margin_css(&self) -> String {
        format!("{}px", self.root_margin_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_json_uses_defaults() {
        assert_eq!(GameConfig::from_json(None).unwrap(), GameConfig::default());
        assert_eq!(BoardConfig::from_json(Some("  ")).unwrap(), BoardConfig::default());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let cfg = BoardConfig::from_json(Some(r#"{"hintDelayMs": 500}"#)).unwrap();
        assert_eq!(cfg.hint_delay_ms, 500);
        assert_eq!(cfg.stagger_ms, 80);
        assert_eq!(cfg.root_margin_css(), "50px");
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let err = BoardConfig::from_json(Some(r#"{"threshold": 1.5}"#)).unwrap_err();
        assert!(matches!(err, ConfigError::Threshold(t) if t == 1.5));
    }

    #[test]
    fn negative_margin_is_rejected() {
        let err = BoardConfig::from_json(Some(r#"{"rootMarginPx": -4}"#)).unwrap_err();
        assert!(matches!(err, ConfigError::RootMargin(_)));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            GameConfig::from_json(Some("{feedback")),
            Err(ConfigError::Json(_))
        ));
    }
}
