//! Application constants and default values for adaptive-lighting.
//!
//! This module contains the configuration defaults, validation limits,
//! and curve constants used throughout the crate.

// ═══ Configuration Files ═══

pub const CONFIG_DIR_NAME: &str = "adaptive-lighting";
pub const CONFIG_FILE_NAME: &str = "adaptive-lighting.toml";

// ═══ Location Defaults ═══
// Written into newly generated configuration files (Royal Observatory, Greenwich)

pub const DEFAULT_NAME: &str = "adaptive_lighting";
pub const DEFAULT_LATITUDE: f64 = 51.4769;
pub const DEFAULT_LONGITUDE: f64 = -0.0005;
pub const DEFAULT_ELEVATION: f64 = 0.0; // meters above sea level

// ═══ Light Curve Defaults ═══
// These values are used when config options are not specified by the user

pub const DEFAULT_MIN_BRIGHTNESS: u8 = 1; // percent
pub const DEFAULT_MAX_BRIGHTNESS: u8 = 100; // percent
pub const DEFAULT_MIN_COLOR_TEMP: u32 = 2000; // Kelvin - warm, evening light
pub const DEFAULT_MAX_COLOR_TEMP: u32 = 5500; // Kelvin - close to daylight
pub const DEFAULT_BRIGHTNESS_MODE: &str = "default";
pub const DEFAULT_BRIGHTNESS_MODE_TIME_DARK: u64 = 900; // seconds
pub const DEFAULT_BRIGHTNESS_MODE_TIME_LIGHT: u64 = 3600; // seconds

// ═══ Dim-to-Warm Defaults ═══

pub const DEFAULT_DIM_TO_WARM_ENABLED: bool = false;
pub const DEFAULT_DIM_TO_WARM_MIN_BRIGHTNESS: u8 = 20; // percent
pub const DEFAULT_DIM_TO_WARM_MAX_BRIGHTNESS: u8 = 80; // percent

// ═══ Light Capability Defaults ═══
// Range of a typical tunable-white bulb (6500K..2000K)

pub const DEFAULT_LIGHT_MIN_MIREDS: u32 = 153;
pub const DEFAULT_LIGHT_MAX_MIREDS: u32 = 500;

// ═══ Validation Limits ═══

// Temperature limits (Kelvin scale)
pub const MINIMUM_TEMP: u32 = 1000; // Very warm candlelight-like
pub const MAXIMUM_TEMP: u32 = 20000; // Very cool blue light

// Brightness limits (percentage)
pub const MINIMUM_BRIGHTNESS: u8 = 0;
pub const MAXIMUM_BRIGHTNESS: u8 = 100;

// Mired limits accepted for targets and light capabilities
pub const MINIMUM_MIRED: u32 = 1_000_000 / MAXIMUM_TEMP; // 50
pub const MAXIMUM_MIRED: u32 = 1_000_000 / MINIMUM_TEMP; // 1000

// Ramp duration limits for the linear and tanh brightness modes
pub const MINIMUM_BRIGHTNESS_MODE_TIME: u64 = 1; // seconds
pub const MAXIMUM_BRIGHTNESS_MODE_TIME: u64 = 12 * 3600; // seconds

// ═══ Color Temperature Constants ═══

pub const MIRED_KELVIN_NUMERATOR: u32 = 1_000_000;
pub const COLOR_TEMP_STEP_KELVIN: f64 = 5.0; // Kelvin targets are rounded to this step

// ═══ Tanh Brightness Curve ═══
// The tanh ramp reaches TANH_Y_LOW of the brightness range `time_dark`
// seconds on the dark side of the event and TANH_Y_HIGH of it `time_light`
// seconds on the bright side.

pub const TANH_Y_LOW: f64 = 0.05;
pub const TANH_Y_HIGH: f64 = 0.95;

// ═══ Polar Fallback ═══
// Half day length used when the sun neither rises nor sets on a date

pub const POLAR_SUMMER_HALF_DAY_HOURS: i64 = 6; // 12 hours of "day"
pub const POLAR_WINTER_HALF_DAY_HOURS: i64 = 3; // 6 hours of "day"
pub const POLAR_EVENT_MAX_DRIFT_HOURS: i64 = 36; // Larger drifts mean no event occurred

// ═══ Event Bracketing ═══
// Days the previous/next event search may extend beyond date ± 1

pub const MAX_BRACKET_EXTENSION_DAYS: u32 = 3;

// ═══ Exit Codes ═══

pub const EXIT_FAILURE: i32 = 1; // General failure
