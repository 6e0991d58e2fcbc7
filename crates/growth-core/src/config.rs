use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Geometry constants shared by the slider and disc widgets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetConfig {
    /// Pixels of the slider track not usable by the handle.
    pub slider_handle_inset: f64,
    pub disc_radius: f64,
    /// Radius accepted by click-to-jump. Wider than `disc_radius`.
    pub disc_hit_radius: f64,
    /// Distance from the selector's top-left corner to its centre.
    pub handle_center_offset: f64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            slider_handle_inset: 46.0,
            disc_radius: 125.0,
            disc_hit_radius: 135.0,
            handle_center_offset: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerConfig {
    pub content_fade_ms: u32,
    pub background_fade_ms: u32,
    pub player_fade_ms: u32,
    pub player_background: String,
    pub page_background: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            content_fade_ms: 100,
            background_fade_ms: 500,
            player_fade_ms: 200,
            player_background: "#181818".to_string(),
            page_background: "#FFFFFF".to_string(),
        }
    }
}

/// Everything a page may override, usually from an inline JSON script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageConfig {
    pub widgets: WidgetConfig,
    pub player: PlayerConfig,
}

impl PageConfig {
    /// Parses overrides; missing keys keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Self::default());
        }
        let config: PageConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.widgets;
        if !(w.disc_radius.is_finite() && w.disc_radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "discRadius must be positive, got {}",
                w.disc_radius
            )));
        }
        if !(w.disc_hit_radius.is_finite() && w.disc_hit_radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "discHitRadius must be positive, got {}",
                w.disc_hit_radius
            )));
        }
        if !(w.slider_handle_inset.is_finite() && w.slider_handle_inset >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "sliderHandleInset must not be negative, got {}",
                w.slider_handle_inset
            )));
        }
        Ok(())
    }
}
