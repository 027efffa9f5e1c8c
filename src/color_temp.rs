//! Dim-to-warm color temperature adjustment.
//!
//! As a light dims, its color temperature is pulled from the base value
//! toward a warm target, the way an incandescent filament glows redder at
//! low power. Everything here works in mired, where larger values are warmer.

use crate::constants::{
    DEFAULT_DIM_TO_WARM_MAX_BRIGHTNESS, DEFAULT_DIM_TO_WARM_MIN_BRIGHTNESS,
    DEFAULT_LIGHT_MAX_MIREDS, DEFAULT_LIGHT_MIN_MIREDS, DEFAULT_MAX_COLOR_TEMP,
    DEFAULT_MIN_COLOR_TEMP,
};
use crate::utils::{interpolate_u32, kelvin_to_mired, progress_between};

/// Dim-to-warm behaviour for one light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimToWarmSettings {
    pub enabled: bool,
    /// At or below this brightness (percent) the light is fully at the warm target.
    pub min_brightness: u8,
    /// At or above this brightness (percent) the base color temperature is kept.
    pub max_brightness: u8,
    /// Warm target; defaults to the warm end of the kelvin range.
    pub target_color_temp_mired: Option<u32>,
    /// Warm end of the allowed range.
    pub min_color_temp_kelvin: u32,
    /// Cool end of the allowed range.
    pub max_color_temp_kelvin: u32,
}

impl Default for DimToWarmSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            min_brightness: DEFAULT_DIM_TO_WARM_MIN_BRIGHTNESS,
            max_brightness: DEFAULT_DIM_TO_WARM_MAX_BRIGHTNESS,
            target_color_temp_mired: None,
            min_color_temp_kelvin: DEFAULT_MIN_COLOR_TEMP,
            max_color_temp_kelvin: DEFAULT_MAX_COLOR_TEMP,
        }
    }
}

impl DimToWarmSettings {
    /// The mired value the light approaches at minimum brightness.
    pub fn warm_target_mired(&self) -> u32 {
        self.target_color_temp_mired
            .unwrap_or_else(|| kelvin_to_mired(self.min_color_temp_kelvin))
    }

    /// Mired bounds derived from the kelvin range, as (coolest, warmest).
    pub fn mired_range(&self) -> (u32, u32) {
        (
            kelvin_to_mired(self.max_color_temp_kelvin),
            kelvin_to_mired(self.min_color_temp_kelvin),
        )
    }
}

/// Physical color temperature range of a light, in mired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightCapabilities {
    pub min_mireds: u32,
    pub max_mireds: u32,
}

impl Default for LightCapabilities {
    fn default() -> Self {
        Self {
            min_mireds: DEFAULT_LIGHT_MIN_MIREDS,
            max_mireds: DEFAULT_LIGHT_MAX_MIREDS,
        }
    }
}

impl LightCapabilities {
    /// Clamp `mired` to what the light can produce.
    pub fn clamp(&self, mired: u32) -> u32 {
        mired.clamp(self.min_mireds, self.max_mireds.max(self.min_mireds))
    }
}

/// Color temperature to apply at `brightness_pct` given a `base_mired` value.
///
/// Below `settings.min_brightness` the result is the warm target, above
/// `settings.max_brightness` it is `base_mired`, and in between it is
/// interpolated linearly in mired. The result is clamped to both the light's
/// capabilities and the configured kelvin range. When those two ranges do not
/// overlap, the light's capabilities win.
///
/// # Examples
/// ```
/// use adaptive_lighting::color_temp::{
///     adjust_color_temp_for_brightness, DimToWarmSettings, LightCapabilities,
/// };
///
/// let settings = DimToWarmSettings {
///     enabled: true,
///     target_color_temp_mired: Some(500),
///     ..Default::default()
/// };
/// let light = LightCapabilities { min_mireds: 150, max_mireds: 500 };
/// assert_eq!(adjust_color_temp_for_brightness(200, 50.0, &settings, &light), 350);
/// ```
pub fn adjust_color_temp_for_brightness(
    base_mired: u32,
    brightness_pct: f64,
    settings: &DimToWarmSettings,
    capabilities: &LightCapabilities,
) -> u32 {
    if !settings.enabled {
        return base_mired;
    }

    let target = settings.warm_target_mired();
    let fraction = progress_between(
        brightness_pct,
        f64::from(settings.min_brightness),
        f64::from(settings.max_brightness),
    );
    let adjusted = interpolate_u32(target, base_mired, fraction);

    let (configured_min, configured_max) = settings.mired_range();
    let lower = capabilities.min_mireds.max(configured_min);
    let upper = capabilities.max_mireds.min(configured_max);

    if lower <= upper {
        adjusted.clamp(lower, upper)
    } else {
        capabilities.clamp(adjusted)
    }
}
