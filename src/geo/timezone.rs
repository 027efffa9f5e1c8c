//! Timezone detection from geographic coordinates.
//!
//! Used when the configuration names a location but no timezone, so fixed
//! and clamped wall-clock times are interpreted in the location's own zone.

use chrono_tz::Tz;
use std::sync::OnceLock;
use tzf_rs::DefaultFinder;

/// Determine the IANA timezone for the given coordinates.
///
/// Uses timezone boundary data from tzf-rs. Coordinates that resolve to no
/// parseable zone (open ocean, malformed names) fall back to UTC.
pub fn determine_timezone_from_coordinates(latitude: f64, longitude: f64) -> Tz {
    // The finder parses its boundary data once; share it across calls
    static FINDER: OnceLock<DefaultFinder> = OnceLock::new();
    let finder = FINDER.get_or_init(DefaultFinder::new);

    // tzf-rs takes (longitude, latitude)
    let tz_name = finder.get_tz_name(longitude, latitude);

    tz_name.parse::<Tz>().unwrap_or(Tz::UTC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_locations() {
        assert_eq!(
            determine_timezone_from_coordinates(52.379189, 4.899431),
            Tz::Europe__Amsterdam
        );
        assert_eq!(
            determine_timezone_from_coordinates(35.6762, 139.6503),
            Tz::Asia__Tokyo
        );
    }

    #[test]
    fn test_extreme_coordinates_do_not_panic() {
        for (lat, lon) in [(90.0, 180.0), (-90.0, -180.0), (0.0, 0.0)] {
            let _ = determine_timezone_from_coordinates(lat, lon);
        }
    }
}
