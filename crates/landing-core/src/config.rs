//! Landing Configuration
//!
//! Tunables for every controller plus the option objects handed to the
//! third-party libraries. Every field has a default, so an empty `{}` or a
//! partial document is valid.

use serde::{Deserialize, Serialize};

use crate::error::{LandingError, LandingResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LandingConfig {
    pub navbar: NavbarConfig,
    pub menu: MenuConfig,
    pub counter: CounterConfig,
    pub smooth_scroll: SmoothScrollConfig,
    pub reveal: RevealConfig,
    pub aos: AosOptions,
    pub lightbox: LightboxOptions,
    /// `trace`, `debug`, `info`, `warn`, `error` or `off`
    pub log_level: String,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            navbar: NavbarConfig::default(),
            menu: MenuConfig::default(),
            counter: CounterConfig::default(),
            smooth_scroll: SmoothScrollConfig::default(),
            reveal: RevealConfig::default(),
            aos: AosOptions::default(),
            lightbox: LightboxOptions::default(),
            log_level: "info".to_string(),
        }
    }
}

impl LandingConfig {
    /// Parse a JSON document, filling gaps with defaults
    pub fn from_json(text: &str) -> LandingResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.counter.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavbarConfig {
    /// Scroll offset (px) above which the navbar is marked `scrolled`
    pub scroll_threshold: f64,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self { scroll_threshold: 50.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MenuConfig {
    /// Viewport width (px) at or below which link clicks close the menu
    pub breakpoint: f64,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self { breakpoint: 768.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CounterConfig {
    pub duration_ms: f64,
    /// Assumed frame interval; ~60Hz
    pub frame_ms: f64,
    pub visibility_threshold: f64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000.0,
            frame_ms: 16.0,
            visibility_threshold: 0.5,
        }
    }
}

impl CounterConfig {
    /// Both timings must be positive and finite
    pub fn validate(&self) -> LandingResult<()> {
        for (name, value) in [("durationMs", self.duration_ms), ("frameMs", self.frame_ms)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(LandingError::Config(format!("counter.{} must be positive, got {}", name, value)));
            }
        }
        Ok(())
    }

    /// Number of frames one animation is spread over; never less than one
    pub fn steps(&self) -> f64 {
        let steps = self.duration_ms / self.frame_ms;
        if steps.is_finite() && steps >= 1.0 {
            steps
        } else {
            1.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SmoothScrollConfig {
    /// Used when `#mainNav` is absent or has no height
    pub fallback_navbar_height: f64,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self { fallback_navbar_height: 80.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevealConfig {
    pub debounce_ms: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self { debounce_ms: 100 }
    }
}

/// Options passed verbatim to `AOS.init`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AosOptions {
    pub duration: u32,
    pub easing: String,
    pub once: bool,
    pub mirror: bool,
    pub offset: u32,
}

impl Default for AosOptions {
    fn default() -> Self {
        Self {
            duration: 1000,
            easing: "ease-in-out".to_string(),
            once: true,
            mirror: false,
            offset: 100,
        }
    }
}

/// Options passed verbatim to `GLightbox(...)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LightboxOptions {
    pub touch_navigation: bool,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub autoplay_videos: bool,
    pub close_button: bool,
    pub close_on_outside_click: bool,
}

impl Default for LightboxOptions {
    fn default() -> Self {
        Self {
            touch_navigation: true,
            looping: true,
            autoplay_videos: true,
            close_button: true,
            close_on_outside_click: true,
        }
    }
}
