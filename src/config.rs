//! Configuration system for adaptive-lighting with validation and default generation.
//!
//! Settings are read from `adaptive-lighting.toml` under the XDG config
//! directory (`$XDG_CONFIG_HOME/adaptive-lighting/adaptive-lighting.toml`).
//! A commented default file is generated on first load.
//!
//! ## Configuration Structure
//!
//! ```toml
//! # Location
//! name = "living_room"
//! latitude = 52.379189
//! longitude = 4.899431
//! elevation = 0.0
//! timezone = "Europe/Amsterdam"      # Optional, detected from coordinates
//!
//! # Sun times (all optional, HH:MM or HH:MM:SS)
//! sunrise_time = "07:00"             # Fixed sunrise, ignores min/max
//! min_sunset_time = "19:00"          # Sunset never earlier than this
//!
//! # Light curves
//! min_brightness = 1                 # Percent
//! max_brightness = 100               # Percent
//! min_color_temp = 2000              # Kelvin
//! max_color_temp = 5500              # Kelvin
//! brightness_mode = "tanh"           # "default", "linear" or "tanh"
//! brightness_mode_time_dark = 900    # Seconds
//! brightness_mode_time_light = 3600  # Seconds
//!
//! [dim_to_warm]
//! enabled = true
//! min_brightness = 20
//! max_brightness = 80
//! target_color_temp_mired = 500      # Optional, defaults to min_color_temp
//!
//! [light]
//! min_mireds = 153
//! max_mireds = 500
//! ```
//!
//! ## Validation
//!
//! - **Range validation**: coordinates, kelvin (1000-20000K), brightness (0-100%),
//!   mired (50-1000), ramp times (1 second to 12 hours)
//! - **Format validation**: sun times must parse as `HH:MM[:SS]`, timezones
//!   must be IANA names
//! - **Logical validation**: every min/max pair must be ordered
//!
//! Fixed sunrise/sunset times that shadow min/max clamps are accepted with a warning.

use anyhow::{Context, Result};
use chrono::NaiveTime;
use chrono_tz::Tz;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color_temp::{DimToWarmSettings, LightCapabilities};
use crate::constants::*;
use crate::geo::{SolarLocation, determine_timezone_from_coordinates};
use crate::lighting::{BrightnessMode, SunLightSettings};
use crate::logger::Log;
use crate::sun_events::{SunEvents, SunTimeOverrides};
use crate::utils::path_for_display;

/// Accepted wall-clock formats for sun times, tried in order.
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// `[dim_to_warm]` table.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct DimToWarmConfig {
    pub enabled: Option<bool>,
    pub min_brightness: Option<u8>,
    pub max_brightness: Option<u8>,
    pub target_color_temp_mired: Option<u32>,
}

/// `[light]` table: the color temperature range of the controlled light.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct LightConfig {
    pub min_mireds: Option<u32>,
    pub max_mireds: Option<u32>,
}

/// Configuration loaded from `adaptive-lighting.toml`.
///
/// Most fields are optional and fall back to the defaults in
/// [`crate::constants`]. After [`Config::load_from_path`] every optional
/// field except the sun time overrides, `timezone` and
/// `dim_to_warm.target_color_temp_mired` is populated.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>, // meters
    /// IANA timezone name; detected from the coordinates when absent.
    pub timezone: Option<String>,

    pub sunrise_time: Option<String>,
    pub min_sunrise_time: Option<String>,
    pub max_sunrise_time: Option<String>,
    pub sunset_time: Option<String>,
    pub min_sunset_time: Option<String>,
    pub max_sunset_time: Option<String>,

    pub min_brightness: Option<u8>,
    pub max_brightness: Option<u8>,
    pub min_color_temp: Option<u32>, // Kelvin
    pub max_color_temp: Option<u32>, // Kelvin
    pub brightness_mode: Option<String>,
    pub brightness_mode_time_dark: Option<u64>,  // seconds
    pub brightness_mode_time_light: Option<u64>, // seconds

    pub dim_to_warm: Option<DimToWarmConfig>,
    pub light: Option<LightConfig>,
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Write a commented default configuration to `path`.
    ///
    /// `coords` replaces the default location when given.
    pub fn create_default_config(path: &Path, coords: Option<(f64, f64)>) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let (lat, lon) = coords.unwrap_or((DEFAULT_LATITUDE, DEFAULT_LONGITUDE));

        let config_content = ConfigBuilder::new()
            .add_section("Location")
            .add_setting(
                "name",
                &format!("\"{}\"", DEFAULT_NAME),
                "Identifier shown in logs",
            )
            .add_setting("latitude", &format!("{:.6}", lat), "Degrees, north positive")
            .add_setting("longitude", &format!("{:.6}", lon), "Degrees, east positive")
            .add_setting(
                "elevation",
                &format!("{:.1}", DEFAULT_ELEVATION),
                "Meters above sea level",
            )
            .add_commented_setting(
                "timezone",
                "\"Europe/Amsterdam\"",
                "IANA name, detected from coordinates when unset",
            )
            .add_section("Sun times")
            .add_commented_setting("sunrise_time", "\"07:00\"", "Fixed sunrise, ignores min/max")
            .add_commented_setting("min_sunrise_time", "\"06:00\"", "Sunrise never earlier")
            .add_commented_setting("max_sunrise_time", "\"08:30\"", "Sunrise never later")
            .add_commented_setting("sunset_time", "\"20:00\"", "Fixed sunset, ignores min/max")
            .add_commented_setting("min_sunset_time", "\"18:00\"", "Sunset never earlier")
            .add_commented_setting("max_sunset_time", "\"22:00\"", "Sunset never later")
            .add_section("Light curves")
            .add_setting(
                "min_brightness",
                &DEFAULT_MIN_BRIGHTNESS.to_string(),
                "Percent, at night",
            )
            .add_setting(
                "max_brightness",
                &DEFAULT_MAX_BRIGHTNESS.to_string(),
                "Percent, during the day",
            )
            .add_setting(
                "min_color_temp",
                &DEFAULT_MIN_COLOR_TEMP.to_string(),
                "Kelvin, at and below the horizon",
            )
            .add_setting(
                "max_color_temp",
                &DEFAULT_MAX_COLOR_TEMP.to_string(),
                "Kelvin, at solar noon",
            )
            .add_setting(
                "brightness_mode",
                &format!("\"{}\"", DEFAULT_BRIGHTNESS_MODE),
                "\"default\", \"linear\" or \"tanh\"",
            )
            .add_setting(
                "brightness_mode_time_dark",
                &DEFAULT_BRIGHTNESS_MODE_TIME_DARK.to_string(),
                "Seconds of ramp on the dark side of sunrise/sunset",
            )
            .add_setting(
                "brightness_mode_time_light",
                &DEFAULT_BRIGHTNESS_MODE_TIME_LIGHT.to_string(),
                "Seconds of ramp on the light side of sunrise/sunset",
            )
            .add_table("dim_to_warm")
            .add_setting(
                "enabled",
                &DEFAULT_DIM_TO_WARM_ENABLED.to_string(),
                "Warm the light up as it dims",
            )
            .add_setting(
                "min_brightness",
                &DEFAULT_DIM_TO_WARM_MIN_BRIGHTNESS.to_string(),
                "Percent, fully warm at or below",
            )
            .add_setting(
                "max_brightness",
                &DEFAULT_DIM_TO_WARM_MAX_BRIGHTNESS.to_string(),
                "Percent, unchanged at or above",
            )
            .add_commented_setting(
                "target_color_temp_mired",
                "500",
                "Warm target, defaults to min_color_temp",
            )
            .add_table("light")
            .add_setting(
                "min_mireds",
                &DEFAULT_LIGHT_MIN_MIREDS.to_string(),
                "Coolest color temperature of the light",
            )
            .add_setting(
                "max_mireds",
                &DEFAULT_LIGHT_MAX_MIREDS.to_string(),
                "Warmest color temperature of the light",
            )
            .build();

        fs::write(path, config_content).context("Failed to write default config file")?;
        Log::log_indented(&format!(
            "Created default configuration at {}",
            path_for_display(path)
        ));
        Ok(())
    }

    /// Fill in defaults and check each field on its own.
    fn apply_defaults_and_validate_fields(config: &mut Config) -> Result<()> {
        if config.name.is_none() {
            config.name = Some(DEFAULT_NAME.to_string());
        }

        // Coordinates are required; there is no sensible implicit location
        let (Some(lat), Some(lon)) = (config.latitude, config.longitude) else {
            anyhow::bail!("Both latitude and longitude must be set in the configuration");
        };
        if !(-90.0..=90.0).contains(&lat) {
            anyhow::bail!("Latitude must be between -90 and 90 degrees (got {})", lat);
        }
        if !(-180.0..=180.0).contains(&lon) {
            anyhow::bail!("Longitude must be between -180 and 180 degrees (got {})", lon);
        }

        match config.elevation {
            Some(elevation) if !elevation.is_finite() => {
                anyhow::bail!("Elevation must be a finite number of meters")
            }
            Some(_) => {}
            None => config.elevation = Some(DEFAULT_ELEVATION),
        }

        if let Some(name) = &config.timezone {
            parse_timezone(name)?;
        }

        for (key, value) in [
            ("sunrise_time", &config.sunrise_time),
            ("min_sunrise_time", &config.min_sunrise_time),
            ("max_sunrise_time", &config.max_sunrise_time),
            ("sunset_time", &config.sunset_time),
            ("min_sunset_time", &config.min_sunset_time),
            ("max_sunset_time", &config.max_sunset_time),
        ] {
            parse_optional_time(key, value.as_deref())?;
        }

        // Validate brightness if specified
        if let Some(brightness) = config.min_brightness {
            validate_brightness("min_brightness", brightness)?;
        } else {
            config.min_brightness = Some(DEFAULT_MIN_BRIGHTNESS);
        }
        if let Some(brightness) = config.max_brightness {
            validate_brightness("max_brightness", brightness)?;
        } else {
            config.max_brightness = Some(DEFAULT_MAX_BRIGHTNESS);
        }

        // Validate temperature if specified
        if let Some(temp) = config.min_color_temp {
            validate_kelvin("min_color_temp", temp)?;
        } else {
            config.min_color_temp = Some(DEFAULT_MIN_COLOR_TEMP);
        }
        if let Some(temp) = config.max_color_temp {
            validate_kelvin("max_color_temp", temp)?;
        } else {
            config.max_color_temp = Some(DEFAULT_MAX_COLOR_TEMP);
        }

        if let Some(mode) = &config.brightness_mode {
            mode.parse::<BrightnessMode>()?;
        } else {
            config.brightness_mode = Some(DEFAULT_BRIGHTNESS_MODE.to_string());
        }

        if let Some(seconds) = config.brightness_mode_time_dark {
            validate_ramp_time("brightness_mode_time_dark", seconds)?;
        } else {
            config.brightness_mode_time_dark = Some(DEFAULT_BRIGHTNESS_MODE_TIME_DARK);
        }
        if let Some(seconds) = config.brightness_mode_time_light {
            validate_ramp_time("brightness_mode_time_light", seconds)?;
        } else {
            config.brightness_mode_time_light = Some(DEFAULT_BRIGHTNESS_MODE_TIME_LIGHT);
        }

        let dim_to_warm = config.dim_to_warm.get_or_insert_with(Default::default);
        if dim_to_warm.enabled.is_none() {
            dim_to_warm.enabled = Some(DEFAULT_DIM_TO_WARM_ENABLED);
        }
        if let Some(brightness) = dim_to_warm.min_brightness {
            validate_brightness("dim_to_warm.min_brightness", brightness)?;
        } else {
            dim_to_warm.min_brightness = Some(DEFAULT_DIM_TO_WARM_MIN_BRIGHTNESS);
        }
        if let Some(brightness) = dim_to_warm.max_brightness {
            validate_brightness("dim_to_warm.max_brightness", brightness)?;
        } else {
            dim_to_warm.max_brightness = Some(DEFAULT_DIM_TO_WARM_MAX_BRIGHTNESS);
        }
        if let Some(mired) = dim_to_warm.target_color_temp_mired {
            validate_mired("dim_to_warm.target_color_temp_mired", mired)?;
        }

        let light = config.light.get_or_insert_with(Default::default);
        if let Some(mired) = light.min_mireds {
            validate_mired("light.min_mireds", mired)?;
        } else {
            light.min_mireds = Some(DEFAULT_LIGHT_MIN_MIREDS);
        }
        if let Some(mired) = light.max_mireds {
            validate_mired("light.max_mireds", mired)?;
        } else {
            light.max_mireds = Some(DEFAULT_LIGHT_MAX_MIREDS);
        }

        Ok(())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "Configuration file not found at specified path: {}",
                path.display()
            );
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        Self::apply_defaults_and_validate_fields(&mut config)?;
        validate_config(&config)?;

        Ok(config)
    }

    /// Load the configuration from the default location, creating it if missing.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            Log::log_block_start("No configuration found");
            Self::create_default_config(&config_path, None)
                .context("Failed to create default config during load")?;
        }

        Self::load_from_path(&config_path).with_context(|| {
            Log::log_pipe();
            format!(
                "Failed to load configuration from {}",
                config_path.display()
            )
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_NAME)
    }

    /// Configured timezone, or the one found at the configured coordinates.
    pub fn timezone(&self) -> Result<Tz> {
        match &self.timezone {
            Some(name) => parse_timezone(name),
            None => Ok(determine_timezone_from_coordinates(
                self.latitude.unwrap_or(DEFAULT_LATITUDE),
                self.longitude.unwrap_or(DEFAULT_LONGITUDE),
            )),
        }
    }

    pub fn sun_time_overrides(&self) -> Result<SunTimeOverrides> {
        Ok(SunTimeOverrides {
            sunrise_time: parse_optional_time("sunrise_time", self.sunrise_time.as_deref())?,
            min_sunrise_time: parse_optional_time(
                "min_sunrise_time",
                self.min_sunrise_time.as_deref(),
            )?,
            max_sunrise_time: parse_optional_time(
                "max_sunrise_time",
                self.max_sunrise_time.as_deref(),
            )?,
            sunset_time: parse_optional_time("sunset_time", self.sunset_time.as_deref())?,
            min_sunset_time: parse_optional_time(
                "min_sunset_time",
                self.min_sunset_time.as_deref(),
            )?,
            max_sunset_time: parse_optional_time(
                "max_sunset_time",
                self.max_sunset_time.as_deref(),
            )?,
        })
    }

    pub fn solar_location(&self) -> Result<SolarLocation> {
        let (Some(lat), Some(lon)) = (self.latitude, self.longitude) else {
            anyhow::bail!("Both latitude and longitude must be set in the configuration");
        };
        SolarLocation::new(
            lat,
            lon,
            self.elevation.unwrap_or(DEFAULT_ELEVATION),
            self.timezone()?,
        )
    }

    /// Sun events for the configured location and overrides.
    pub fn to_sun_events(&self) -> Result<SunEvents> {
        let location = self.solar_location()?;
        let timezone = location.timezone;
        Ok(SunEvents::new(
            self.name(),
            Arc::new(location),
            self.sun_time_overrides()?,
            timezone,
        ))
    }

    pub fn sun_light_settings(&self) -> Result<SunLightSettings> {
        let brightness_mode = match &self.brightness_mode {
            Some(mode) => mode.parse()?,
            None => BrightnessMode::default(),
        };

        Ok(SunLightSettings {
            min_brightness: self.min_brightness.unwrap_or(DEFAULT_MIN_BRIGHTNESS),
            max_brightness: self.max_brightness.unwrap_or(DEFAULT_MAX_BRIGHTNESS),
            min_color_temp: self.min_color_temp.unwrap_or(DEFAULT_MIN_COLOR_TEMP),
            max_color_temp: self.max_color_temp.unwrap_or(DEFAULT_MAX_COLOR_TEMP),
            brightness_mode,
            brightness_mode_time_dark: self
                .brightness_mode_time_dark
                .unwrap_or(DEFAULT_BRIGHTNESS_MODE_TIME_DARK),
            brightness_mode_time_light: self
                .brightness_mode_time_light
                .unwrap_or(DEFAULT_BRIGHTNESS_MODE_TIME_LIGHT),
            ..SunLightSettings::new(self.to_sun_events()?)
        })
    }

    /// Dim-to-warm settings, sharing the kelvin range of the light curves.
    pub fn dim_to_warm(&self) -> DimToWarmSettings {
        let table = self.dim_to_warm.clone().unwrap_or_default();
        DimToWarmSettings {
            enabled: table.enabled.unwrap_or(DEFAULT_DIM_TO_WARM_ENABLED),
            min_brightness: table
                .min_brightness
                .unwrap_or(DEFAULT_DIM_TO_WARM_MIN_BRIGHTNESS),
            max_brightness: table
                .max_brightness
                .unwrap_or(DEFAULT_DIM_TO_WARM_MAX_BRIGHTNESS),
            target_color_temp_mired: table.target_color_temp_mired,
            min_color_temp_kelvin: self.min_color_temp.unwrap_or(DEFAULT_MIN_COLOR_TEMP),
            max_color_temp_kelvin: self.max_color_temp.unwrap_or(DEFAULT_MAX_COLOR_TEMP),
        }
    }

    pub fn light_capabilities(&self) -> LightCapabilities {
        let table = self.light.clone().unwrap_or_default();
        LightCapabilities {
            min_mireds: table.min_mireds.unwrap_or(DEFAULT_LIGHT_MIN_MIREDS),
            max_mireds: table.max_mireds.unwrap_or(DEFAULT_LIGHT_MAX_MIREDS),
        }
    }

    pub fn log_config(&self, path: &Path) {
        Log::log_block_start(&format!(
            "Loaded configuration from {}",
            path_for_display(path)
        ));

        Log::log_indented(&format!("Name: {}", self.name()));
        if let (Some(lat), Some(lon)) = (self.latitude, self.longitude) {
            let lat_dir = if lat >= 0.0 { "N" } else { "S" };
            let lon_dir = if lon >= 0.0 { "E" } else { "W" };
            Log::log_indented(&format!(
                "Location: {:.4}°{}, {:.4}°{}",
                lat.abs(),
                lat_dir,
                lon.abs(),
                lon_dir
            ));
        }
        match self.timezone() {
            Ok(tz) if self.timezone.is_some() => Log::log_indented(&format!("Timezone: {}", tz)),
            Ok(tz) => Log::log_indented(&format!("Timezone: {} (detected)", tz)),
            Err(e) => Log::log_indented(&format!("Timezone: {}", e)),
        }

        for (label, value) in [
            ("Fixed sunrise", &self.sunrise_time),
            ("Earliest sunrise", &self.min_sunrise_time),
            ("Latest sunrise", &self.max_sunrise_time),
            ("Fixed sunset", &self.sunset_time),
            ("Earliest sunset", &self.min_sunset_time),
            ("Latest sunset", &self.max_sunset_time),
        ] {
            if let Some(value) = value {
                Log::log_indented(&format!("{}: {}", label, value));
            }
        }

        Log::log_indented(&format!(
            "Brightness: {}% to {}%",
            self.min_brightness.unwrap_or(DEFAULT_MIN_BRIGHTNESS),
            self.max_brightness.unwrap_or(DEFAULT_MAX_BRIGHTNESS)
        ));
        Log::log_indented(&format!(
            "Color temperature: {}K to {}K",
            self.min_color_temp.unwrap_or(DEFAULT_MIN_COLOR_TEMP),
            self.max_color_temp.unwrap_or(DEFAULT_MAX_COLOR_TEMP)
        ));
        Log::log_indented(&format!(
            "Brightness mode: {}",
            self.brightness_mode
                .as_deref()
                .unwrap_or(DEFAULT_BRIGHTNESS_MODE)
        ));

        let dim_to_warm = self.dim_to_warm();
        if dim_to_warm.enabled {
            Log::log_indented(&format!(
                "Dim to warm: {}% to {}%, target {} mired",
                dim_to_warm.min_brightness,
                dim_to_warm.max_brightness,
                dim_to_warm.warm_target_mired()
            ));
        } else {
            Log::log_indented("Dim to warm: disabled");
        }

        let light = self.light_capabilities();
        Log::log_indented(&format!(
            "Light range: {} to {} mired",
            light.min_mireds, light.max_mireds
        ));
    }
}

/// Cross-field validation: every min/max pair must be ordered.
///
/// Fixed sunrise/sunset times that make their clamps irrelevant only warn.
pub fn validate_config(config: &Config) -> Result<()> {
    let overrides = config.sun_time_overrides()?;

    if let (Some(min), Some(max)) = (overrides.min_sunrise_time, overrides.max_sunrise_time) {
        if min > max {
            anyhow::bail!(
                "min_sunrise_time ({}) must not be later than max_sunrise_time ({})",
                min,
                max
            );
        }
    }
    if let (Some(min), Some(max)) = (overrides.min_sunset_time, overrides.max_sunset_time) {
        if min > max {
            anyhow::bail!(
                "min_sunset_time ({}) must not be later than max_sunset_time ({})",
                min,
                max
            );
        }
    }

    if overrides.sunrise_time.is_some()
        && (overrides.min_sunrise_time.is_some() || overrides.max_sunrise_time.is_some())
    {
        Log::log_warning("sunrise_time is set, so min_sunrise_time and max_sunrise_time are ignored");
    }
    if overrides.sunset_time.is_some()
        && (overrides.min_sunset_time.is_some() || overrides.max_sunset_time.is_some())
    {
        Log::log_warning("sunset_time is set, so min_sunset_time and max_sunset_time are ignored");
    }

    let min_brightness = config.min_brightness.unwrap_or(DEFAULT_MIN_BRIGHTNESS);
    let max_brightness = config.max_brightness.unwrap_or(DEFAULT_MAX_BRIGHTNESS);
    if min_brightness > max_brightness {
        anyhow::bail!(
            "min_brightness ({}%) must not exceed max_brightness ({}%)",
            min_brightness,
            max_brightness
        );
    }

    let min_temp = config.min_color_temp.unwrap_or(DEFAULT_MIN_COLOR_TEMP);
    let max_temp = config.max_color_temp.unwrap_or(DEFAULT_MAX_COLOR_TEMP);
    if min_temp > max_temp {
        anyhow::bail!(
            "min_color_temp ({}K) must not exceed max_color_temp ({}K)",
            min_temp,
            max_temp
        );
    }

    let dim_to_warm = config.dim_to_warm();
    if dim_to_warm.min_brightness > dim_to_warm.max_brightness {
        anyhow::bail!(
            "dim_to_warm.min_brightness ({}%) must not exceed dim_to_warm.max_brightness ({}%)",
            dim_to_warm.min_brightness,
            dim_to_warm.max_brightness
        );
    }

    let light = config.light_capabilities();
    if light.min_mireds > light.max_mireds {
        anyhow::bail!(
            "light.min_mireds ({}) must not exceed light.max_mireds ({})",
            light.min_mireds,
            light.max_mireds
        );
    }

    Ok(())
}

fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>().map_err(|_| {
        anyhow::anyhow!(
            "Unknown timezone '{}'. Use an IANA name such as \"Europe/Amsterdam\"",
            name
        )
    })
}

/// Parse a `HH:MM[:SS]` value of the config key `key`.
fn parse_optional_time(key: &str, value: Option<&str>) -> Result<Option<NaiveTime>> {
    let Some(value) = value else {
        return Ok(None);
    };

    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(value.trim(), format).ok())
        .map(Some)
        .with_context(|| format!("Invalid {} '{}' in config. Use HH:MM or HH:MM:SS format", key, value))
}

fn validate_brightness(key: &str, brightness: u8) -> Result<()> {
    if !(MINIMUM_BRIGHTNESS..=MAXIMUM_BRIGHTNESS).contains(&brightness) {
        anyhow::bail!(
            "{} must be between {}% and {}%",
            key,
            MINIMUM_BRIGHTNESS,
            MAXIMUM_BRIGHTNESS
        );
    }
    Ok(())
}

fn validate_kelvin(key: &str, kelvin: u32) -> Result<()> {
    if !(MINIMUM_TEMP..=MAXIMUM_TEMP).contains(&kelvin) {
        anyhow::bail!(
            "{} must be between {} and {} Kelvin",
            key,
            MINIMUM_TEMP,
            MAXIMUM_TEMP
        );
    }
    Ok(())
}

fn validate_mired(key: &str, mired: u32) -> Result<()> {
    if !(MINIMUM_MIRED..=MAXIMUM_MIRED).contains(&mired) {
        anyhow::bail!(
            "{} must be between {} and {} mired",
            key,
            MINIMUM_MIRED,
            MAXIMUM_MIRED
        );
    }
    Ok(())
}

fn validate_ramp_time(key: &str, seconds: u64) -> Result<()> {
    if !(MINIMUM_BRIGHTNESS_MODE_TIME..=MAXIMUM_BRIGHTNESS_MODE_TIME).contains(&seconds) {
        anyhow::bail!(
            "{} must be between {} and {} seconds",
            key,
            MINIMUM_BRIGHTNESS_MODE_TIME,
            MAXIMUM_BRIGHTNESS_MODE_TIME
        );
    }
    Ok(())
}

/// Builder for creating dynamically-aligned configuration files.
///
/// Comments of all setting lines start in the same column, so the generated
/// file stays tidy whatever the default values are.
struct ConfigBuilder {
    entries: Vec<EntryType>,
}

enum EntryType {
    /// `#[title]` heading comment
    Section(String),
    /// `[name]` TOML table header
    Table(String),
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(EntryType::Section(format!("#[{}]", title)));
        self
    }

    fn add_table(mut self, name: &str) -> Self {
        self.entries.push(EntryType::Table(format!("[{}]", name)));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(EntryType::Setting {
            line: format!("{} = {}", key, value),
            comment: format!("# {}", comment),
        });
        self
    }

    /// A disabled example setting the user can uncomment.
    fn add_commented_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(EntryType::Setting {
            line: format!("# {} = {}", key, value),
            comment: format!("# {}", comment),
        });
        self
    }

    fn build(self) -> String {
        let max_width = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                EntryType::Setting { line, .. } => Some(line.len()),
                _ => None,
            })
            .max()
            .unwrap_or(0)
            + 1; // one space between setting and comment

        let mut result = Vec::new();
        for entry in self.entries {
            match entry {
                EntryType::Section(heading) | EntryType::Table(heading) => {
                    if !result.is_empty() {
                        result.push(String::new());
                    }
                    result.push(heading);
                }
                EntryType::Setting { line, comment } => {
                    let padding = " ".repeat(max_width - line.len());
                    result.push(format!("{}{}{}", line, padding, comment));
                }
            }
        }

        let mut content = result.join("\n");
        content.push('\n');
        content
    }
}
