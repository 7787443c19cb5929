//! Config - Tunable constants for every controller.
//!
//! All thresholds and delays live here so they can be tuned in one place.
//! The scroll threshold is a single field on purpose: the header styling and
//! the scroll indicator must flip at the same offset.
//!
//! # Example
//!
//! ```ignore
//! use eagletech_fx::FxConfig;
//!
//! let config = FxConfig::from_json(r#"{ "mobile_breakpoint": 900 }"#)?;
//! assert_eq!(config.scroll_threshold, 100.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{FxError, FxResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FxConfig {
    /// Delay before the loading screen receives `fade-out`.
    pub loading_fade_delay_ms: u64,
    /// Delay between `fade-out` and removal of the loading screen.
    pub loading_remove_delay_ms: u64,
    /// Scroll offset (px) past which the header is `scrolled` and the
    /// scroll indicator hides.
    pub scroll_threshold: f32,
    /// Fixed header allowance subtracted from smooth-scroll targets.
    pub header_offset: f32,
    /// Viewport widths strictly above this use the desktop navigation.
    pub mobile_breakpoint: f32,
    /// Quiet period for the resize handler.
    pub resize_debounce_ms: u64,
    /// Hero background translation per scrolled pixel.
    pub parallax_factor: f32,
    /// Visible fraction required to reveal an element.
    pub reveal_threshold: f32,
    /// Bottom root margin for the reveal observer (negative shrinks).
    pub reveal_root_margin_bottom: f32,
    /// Initial downward offset of unrevealed elements.
    pub reveal_offset_px: f32,
    /// Inline transition applied to revealable elements.
    pub reveal_transition: String,
    /// Stop observing an element once it has been revealed.
    pub release_revealed: bool,
    /// Duration of a smooth scroll animation.
    pub smooth_scroll_ms: u64,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            loading_fade_delay_ms: 2000,
            loading_remove_delay_ms: 500,
            scroll_threshold: 100.0,
            header_offset: 80.0,
            mobile_breakpoint: 768.0,
            resize_debounce_ms: 250,
            parallax_factor: 0.5,
            reveal_threshold: 0.1,
            reveal_root_margin_bottom: -50.0,
            reveal_offset_px: 30.0,
            reveal_transition: "opacity 0.6s ease, transform 0.6s ease".to_string(),
            release_revealed: false,
            smooth_scroll_ms: 400,
        }
    }
}

impl FxConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> FxResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no controller can work with.
    pub fn validate(&self) -> FxResult<()> {
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(FxError::config(format!(
                "reveal_threshold must be within 0..=1, got {}",
                self.reveal_threshold
            )));
        }
        if self.scroll_threshold < 0.0 || !self.scroll_threshold.is_finite() {
            return Err(FxError::config("scroll_threshold must be a non-negative number"));
        }
        if !self.mobile_breakpoint.is_finite() || self.mobile_breakpoint <= 0.0 {
            return Err(FxError::config("mobile_breakpoint must be a positive number"));
        }
        for (name, value) in [
            ("parallax_factor", self.parallax_factor),
            ("header_offset", self.header_offset),
            ("reveal_offset_px", self.reveal_offset_px),
            ("reveal_root_margin_bottom", self.reveal_root_margin_bottom),
        ] {
            if !value.is_finite() {
                return Err(FxError::config(format!("{name} must be finite, got {value}")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_page_script() {
        let config = FxConfig::default();
        assert_eq!(config.loading_fade_delay_ms, 2000);
        assert_eq!(config.loading_remove_delay_ms, 500);
        assert_eq!(config.scroll_threshold, 100.0);
        assert_eq!(config.header_offset, 80.0);
        assert_eq!(config.mobile_breakpoint, 768.0);
        assert_eq!(config.resize_debounce_ms, 250);
        assert_eq!(config.parallax_factor, 0.5);
        assert!(!config.release_revealed);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = FxConfig::from_json(r#"{ "mobile_breakpoint": 900 }"#).unwrap();
        assert_eq!(config.mobile_breakpoint, 900.0);
        assert_eq!(config.scroll_threshold, 100.0);
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let err = FxConfig::from_json(r#"{ "reveal_threshold": 1.5 }"#).unwrap_err();
        assert!(matches!(err, FxError::Config(_)));
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let nan_breakpoint = FxConfig { mobile_breakpoint: f32::NAN, ..FxConfig::default() };
        assert!(matches!(nan_breakpoint.validate(), Err(FxError::Config(_))));

        for config in [
            FxConfig { header_offset: f32::INFINITY, ..FxConfig::default() },
            FxConfig { reveal_offset_px: f32::NAN, ..FxConfig::default() },
            FxConfig { reveal_root_margin_bottom: f32::NEG_INFINITY, ..FxConfig::default() },
        ] {
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("must be finite"), "{err}");
        }
        assert!(FxConfig::default().validate().is_ok());
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(FxConfig::from_json("{"), Err(FxError::Json(_))));
    }
}
