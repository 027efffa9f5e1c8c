//! Brightness and color temperature curves driven by the sun.
//!
//! [`SunLightSettings`] reads the sun position and the nearest sun event
//! from [`SunEvents`] and turns them into the brightness and color
//! temperature a light should have at a given instant.

use anyhow::{Result, bail};
use chrono::{DateTime, TimeZone};
use std::fmt;
use std::str::FromStr;

use crate::color_temp::{DimToWarmSettings, LightCapabilities, adjust_color_temp_for_brightness};
use crate::constants::{
    COLOR_TEMP_STEP_KELVIN, DEFAULT_BRIGHTNESS_MODE_TIME_DARK, DEFAULT_BRIGHTNESS_MODE_TIME_LIGHT,
    DEFAULT_MAX_BRIGHTNESS, DEFAULT_MAX_COLOR_TEMP, DEFAULT_MIN_BRIGHTNESS,
    DEFAULT_MIN_COLOR_TEMP, TANH_Y_HIGH, TANH_Y_LOW,
};
use crate::sun_events::{SunEvent, SunEvents};
use crate::utils::{kelvin_to_mired, lerp, scaled_tanh, timestamp_of};

/// How brightness follows the sun.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BrightnessMode {
    /// Full brightness while the sun is up, dimming with the sun position after sunset.
    #[default]
    Default,
    /// Linear ramps around sunrise and sunset.
    Linear,
    /// Smooth hyperbolic-tangent ramps around sunrise and sunset.
    Tanh,
}

impl BrightnessMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrightnessMode::Default => "default",
            BrightnessMode::Linear => "linear",
            BrightnessMode::Tanh => "tanh",
        }
    }
}

impl FromStr for BrightnessMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "default" => Ok(BrightnessMode::Default),
            "linear" => Ok(BrightnessMode::Linear),
            "tanh" => Ok(BrightnessMode::Tanh),
            other => bail!(
                "Unknown brightness mode '{}'. Use 'default', 'linear' or 'tanh'",
                other
            ),
        }
    }
}

impl fmt::Display for BrightnessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a light should be set to at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightTarget {
    pub sun_position: f64,
    /// Percent, within the configured brightness range.
    pub brightness_pct: f64,
    /// Color temperature from the sun curve, before any light-specific adjustment.
    pub color_temp_kelvin: u32,
    /// Final color temperature for the light, after clamping and dim-to-warm.
    pub color_temp_mired: u32,
}

/// Light curves for one set of sun events.
#[derive(Debug, Clone)]
pub struct SunLightSettings {
    pub sun_events: SunEvents,
    pub min_brightness: u8,
    pub max_brightness: u8,
    /// Kelvin at and below the horizon.
    pub min_color_temp: u32,
    /// Kelvin at solar noon.
    pub max_color_temp: u32,
    pub brightness_mode: BrightnessMode,
    /// Seconds the ramp extends into the dark side of sunrise/sunset.
    pub brightness_mode_time_dark: u64,
    /// Seconds the ramp extends into the light side of sunrise/sunset.
    pub brightness_mode_time_light: u64,
}

impl SunLightSettings {
    /// Curves with default brightness and color temperature ranges.
    pub fn new(sun_events: SunEvents) -> Self {
        Self {
            sun_events,
            min_brightness: DEFAULT_MIN_BRIGHTNESS,
            max_brightness: DEFAULT_MAX_BRIGHTNESS,
            min_color_temp: DEFAULT_MIN_COLOR_TEMP,
            max_color_temp: DEFAULT_MAX_COLOR_TEMP,
            brightness_mode: BrightnessMode::Default,
            brightness_mode_time_dark: DEFAULT_BRIGHTNESS_MODE_TIME_DARK,
            brightness_mode_time_light: DEFAULT_BRIGHTNESS_MODE_TIME_LIGHT,
        }
    }

    /// Brightness in percent at `instant`.
    pub fn brightness_pct<Z: TimeZone>(&self, instant: &DateTime<Z>) -> Result<f64> {
        let min = f64::from(self.min_brightness);
        let max = f64::from(self.max_brightness);

        let brightness = match self.brightness_mode {
            BrightnessMode::Default => {
                let position = self.sun_events.sun_position(instant)?;
                if position > 0.0 {
                    max
                } else {
                    min + (max - min) * (1.0 + position)
                }
            }
            BrightnessMode::Linear | BrightnessMode::Tanh => {
                let (event, event_ts) = self.sun_events.closest_event(instant)?;
                let dt = timestamp_of(instant) - event_ts;
                self.ramp_brightness(event, dt, min, max)
            }
        };

        Ok(brightness.clamp(min.min(max), max.max(min)))
    }

    /// Brightness `dt` seconds after (negative: before) `event`.
    fn ramp_brightness(&self, event: SunEvent, dt: f64, min: f64, max: f64) -> f64 {
        let dark = self.brightness_mode_time_dark as f64;
        let light = self.brightness_mode_time_light as f64;

        match (event, self.brightness_mode) {
            (SunEvent::Noon, _) => max,
            (SunEvent::Midnight, _) => min,
            (SunEvent::Sunrise, BrightnessMode::Tanh) => {
                scaled_tanh(dt, -dark, light, TANH_Y_LOW, TANH_Y_HIGH, min, max)
            }
            (SunEvent::Sunset, BrightnessMode::Tanh) => {
                scaled_tanh(dt, -light, dark, TANH_Y_HIGH, TANH_Y_LOW, min, max)
            }
            (SunEvent::Sunrise, _) => lerp(dt, -dark, light, min, max),
            (SunEvent::Sunset, _) => lerp(dt, -light, dark, max, min),
        }
    }

    /// Color temperature in kelvin for a sun position.
    ///
    /// Scales from the minimum at the horizon to the maximum at noon, rounded
    /// to a multiple of 5 K. Below the horizon the minimum is kept.
    pub fn color_temp_kelvin(&self, sun_position: f64) -> u32 {
        if sun_position > 0.0 {
            let min = f64::from(self.min_color_temp);
            let max = f64::from(self.max_color_temp);
            let kelvin = min + (max - min) * sun_position.min(1.0);
            ((kelvin / COLOR_TEMP_STEP_KELVIN).round() * COLOR_TEMP_STEP_KELVIN) as u32
        } else {
            self.min_color_temp
        }
    }

    /// Brightness and color temperature for one light at `instant`.
    pub fn light_target<Z: TimeZone>(
        &self,
        instant: &DateTime<Z>,
        capabilities: &LightCapabilities,
        dim_to_warm: &DimToWarmSettings,
    ) -> Result<LightTarget> {
        let sun_position = self.sun_events.sun_position(instant)?;
        let brightness_pct = self.brightness_pct(instant)?;
        let color_temp_kelvin = self.color_temp_kelvin(sun_position);

        let base_mired = capabilities.clamp(kelvin_to_mired(color_temp_kelvin));
        let color_temp_mired =
            adjust_color_temp_for_brightness(base_mired, brightness_pct, dim_to_warm, capabilities);

        Ok(LightTarget {
            sun_position,
            brightness_pct,
            color_temp_kelvin,
            color_temp_mired,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::location::test_support::FixedLocation;
    use crate::sun_events::SunTimeOverrides;
    use chrono::{Duration, NaiveDate, Utc};
    use chrono_tz::Tz;
    use std::sync::Arc;

    fn utc(h: u32, m: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2022, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
            .and_utc()
    }

    fn settings(mode: BrightnessMode) -> SunLightSettings {
        let events = SunEvents::new(
            "test",
            Arc::new(FixedLocation::standard()),
            SunTimeOverrides::default(),
            Tz::UTC,
        );
        SunLightSettings {
            min_brightness: 10,
            max_brightness: 90,
            brightness_mode: mode,
            ..SunLightSettings::new(events)
        }
    }

    #[test]
    fn test_brightness_mode_parsing() {
        assert_eq!("default".parse::<BrightnessMode>().unwrap(), BrightnessMode::Default);
        assert_eq!("Linear".parse::<BrightnessMode>().unwrap(), BrightnessMode::Linear);
        assert_eq!("TANH".parse::<BrightnessMode>().unwrap(), BrightnessMode::Tanh);
        assert!("sigmoid".parse::<BrightnessMode>().is_err());
        assert_eq!(BrightnessMode::Tanh.to_string(), "tanh");
    }

    #[test]
    fn test_default_mode_follows_sun_position() {
        let s = settings(BrightnessMode::Default);
        // Day: full brightness
        assert_eq!(s.brightness_pct(&utc(9, 0)).unwrap(), 90.0);
        assert_eq!(s.brightness_pct(&utc(12, 0)).unwrap(), 90.0);
        // Horizon: still full
        assert_eq!(s.brightness_pct(&utc(18, 0)).unwrap(), 90.0);
        // Halfway to midnight: halfway down
        assert_eq!(s.brightness_pct(&utc(21, 0)).unwrap(), 50.0);
        assert_eq!(s.brightness_pct(&utc(0, 0)).unwrap(), 10.0);
    }

    #[test]
    fn test_linear_mode_ramps_around_sunrise() {
        let s = SunLightSettings {
            brightness_mode_time_dark: 3600,
            brightness_mode_time_light: 3600,
            ..settings(BrightnessMode::Linear)
        };
        assert_eq!(s.brightness_pct(&utc(5, 0)).unwrap(), 10.0);
        assert_eq!(s.brightness_pct(&utc(6, 0)).unwrap(), 50.0);
        assert_eq!(s.brightness_pct(&utc(6, 30)).unwrap(), 70.0);
        assert_eq!(s.brightness_pct(&utc(7, 0)).unwrap(), 90.0);
        // Closest to noon
        assert_eq!(s.brightness_pct(&utc(10, 0)).unwrap(), 90.0);
    }

    #[test]
    fn test_linear_mode_ramps_around_sunset() {
        let s = SunLightSettings {
            brightness_mode_time_dark: 1800,
            brightness_mode_time_light: 5400,
            ..settings(BrightnessMode::Linear)
        };
        assert_eq!(s.brightness_pct(&utc(16, 30)).unwrap(), 90.0);
        assert_eq!(s.brightness_pct(&utc(18, 0)).unwrap(), 30.0);
        assert_eq!(s.brightness_pct(&utc(18, 30)).unwrap(), 10.0);
        // Well past the end of the ramp
        assert_eq!(s.brightness_pct(&utc(22, 0)).unwrap(), 10.0);
    }

    #[test]
    fn test_tanh_mode_hits_anchor_fractions() {
        let s = SunLightSettings {
            brightness_mode_time_dark: 900,
            brightness_mode_time_light: 3600,
            ..settings(BrightnessMode::Tanh)
        };
        let before_sunrise = utc(6, 0) - Duration::seconds(900);
        let after_sunrise = utc(7, 0);
        assert!((s.brightness_pct(&before_sunrise).unwrap() - 14.0).abs() < 1e-6);
        assert!((s.brightness_pct(&after_sunrise).unwrap() - 86.0).abs() < 1e-6);

        let before_sunset = utc(17, 0);
        let after_sunset = utc(18, 15);
        assert!((s.brightness_pct(&before_sunset).unwrap() - 86.0).abs() < 1e-6);
        assert!((s.brightness_pct(&after_sunset).unwrap() - 14.0).abs() < 1e-6);
    }

    #[test]
    fn test_brightness_stays_in_range() {
        for mode in [BrightnessMode::Default, BrightnessMode::Linear, BrightnessMode::Tanh] {
            let s = settings(mode);
            for hour in 0..24 {
                let b = s.brightness_pct(&utc(hour, 10)).unwrap();
                assert!((10.0..=90.0).contains(&b), "{mode} at {hour}:10 -> {b}");
            }
        }
    }

    #[test]
    fn test_color_temp_curve() {
        let s = settings(BrightnessMode::Default);
        assert_eq!(s.color_temp_kelvin(-0.5), 2000);
        assert_eq!(s.color_temp_kelvin(0.0), 2000);
        assert_eq!(s.color_temp_kelvin(1.0), 5500);
        assert_eq!(s.color_temp_kelvin(0.5), 3750);
        // 2000 + 3500 * 0.001 = 2003.5, rounded to the 5 K step
        assert_eq!(s.color_temp_kelvin(0.001), 2005);
    }

    #[test]
    fn test_light_target_at_noon_and_night() {
        let s = settings(BrightnessMode::Default);
        let caps = LightCapabilities::default();
        let disabled = DimToWarmSettings::default();

        let noon = s.light_target(&utc(12, 0), &caps, &disabled).unwrap();
        assert_eq!(noon.sun_position, 1.0);
        assert_eq!(noon.brightness_pct, 90.0);
        assert_eq!(noon.color_temp_kelvin, 5500);
        assert_eq!(noon.color_temp_mired, 181);

        let night = s.light_target(&utc(0, 0), &caps, &disabled).unwrap();
        assert_eq!(night.sun_position, -1.0);
        assert_eq!(night.brightness_pct, 10.0);
        assert_eq!(night.color_temp_mired, 500);
    }

    #[test]
    fn test_light_target_applies_dim_to_warm() {
        let s = SunLightSettings {
            min_brightness: 1,
            max_brightness: 100,
            ..settings(BrightnessMode::Default)
        };
        let caps = LightCapabilities {
            min_mireds: 150,
            max_mireds: 500,
        };
        let dim_to_warm = DimToWarmSettings {
            enabled: true,
            target_color_temp_mired: Some(450),
            ..Default::default()
        };

        // 21:00: brightness 50.5% sits (50.5 - 20) / 60 of the way up the
        // 20-80% ramp, so 450 + 50 * 0.5083 = 475.4 mired
        let evening = s.light_target(&utc(21, 0), &caps, &dim_to_warm).unwrap();
        assert_eq!(evening.brightness_pct, 50.5);
        assert_eq!(evening.color_temp_kelvin, 2000);
        assert_eq!(evening.color_temp_mired, 475);

        // Noon is bright enough to keep the base color temperature
        let noon = s.light_target(&utc(12, 0), &caps, &dim_to_warm).unwrap();
        assert_eq!(noon.color_temp_mired, 181);
    }

    #[test]
    fn test_base_mired_is_clamped_to_light() {
        let s = settings(BrightnessMode::Default);
        let narrow = LightCapabilities {
            min_mireds: 250,
            max_mireds: 370,
        };
        let target = s
            .light_target(&utc(12, 0), &narrow, &DimToWarmSettings::default())
            .unwrap();
        assert_eq!(target.color_temp_mired, 250);
    }
}
