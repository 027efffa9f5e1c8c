//! Astronomical collaborator producing raw sun events for a date.
//!
//! [`AstralLocation`] is the seam between the sun event logic and whatever
//! computes solar times. [`SolarLocation`] is the shipped implementation,
//! built on the `sunrise` crate, with a seasonal fallback for dates on which
//! the sun never rises or never sets.

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::cmp::Ordering;
use sunrise::{Coordinates, SolarDay, SolarEvent};

use crate::constants::{
    POLAR_EVENT_MAX_DRIFT_HOURS, POLAR_SUMMER_HALF_DAY_HOURS, POLAR_WINTER_HALF_DAY_HOURS,
};
use crate::geo::timezone::determine_timezone_from_coordinates;
use crate::logger::Log;

/// Source of the four raw solar events of a calendar date at a fixed place.
///
/// Dates are local calendar dates: sunrise, noon and sunset of `date` fall
/// on `date` in the timezone the events are reported in.
///
/// Implementations must be safe to share between threads; sun event
/// calculations hold them behind an `Arc` and only ever read from them.
#[cfg_attr(test, mockall::automock)]
pub trait AstralLocation: Send + Sync {
    /// Instant the sun rises on `date`.
    fn sunrise(&self, date: NaiveDate) -> Result<DateTime<Utc>>;

    /// Instant the sun sets on `date`.
    fn sunset(&self, date: NaiveDate) -> Result<DateTime<Utc>>;

    /// Solar noon (sun at its highest) on `date`.
    fn noon(&self, date: NaiveDate) -> Result<DateTime<Utc>>;

    /// Solar midnight (sun at its lowest) belonging to `date`.
    fn midnight(&self, date: NaiveDate) -> Result<DateTime<Utc>>;
}

/// Geographic location backed by the `sunrise` crate.
#[derive(Debug, Clone, PartialEq)]
pub struct SolarLocation {
    pub latitude: f64,
    pub longitude: f64,
    /// Observer elevation in meters; raises the horizon and widens the day.
    pub elevation: f64,
    pub timezone: Tz,
}

impl SolarLocation {
    /// Create a location, validating the coordinates.
    pub fn new(latitude: f64, longitude: f64, elevation: f64, timezone: Tz) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            anyhow::bail!(
                "Invalid latitude: {}. Must be between -90 and 90 degrees",
                latitude
            );
        }
        if !(-180.0..=180.0).contains(&longitude) {
            anyhow::bail!(
                "Invalid longitude: {}. Must be between -180 and 180 degrees",
                longitude
            );
        }
        if !elevation.is_finite() {
            anyhow::bail!("Invalid elevation: {}", elevation);
        }

        Ok(Self {
            latitude,
            longitude,
            elevation,
            timezone,
        })
    }

    /// Create a location whose timezone is looked up from its coordinates.
    pub fn from_coordinates(latitude: f64, longitude: f64, elevation: f64) -> Result<Self> {
        let timezone = determine_timezone_from_coordinates(latitude, longitude);
        Self::new(latitude, longitude, elevation, timezone)
    }

    /// Sunrise and sunset of the solar day whose noon falls on `date` in
    /// this location's timezone.
    ///
    /// The `sunrise` crate works on UTC dates, so far from the zone's
    /// meridian (Pacific/Apia, Pacific/Kiritimati) the solar day of the UTC
    /// date belongs to the neighbouring local date. That case is recomputed
    /// one UTC date over.
    fn sunrise_and_sunset(&self, date: NaiveDate) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        let events = self.solar_day(date)?;

        let neighbour = match self.local_noon_date(events).cmp(&date) {
            Ordering::Equal => return Ok(events),
            Ordering::Greater => date.pred_opt(),
            Ordering::Less => date.succ_opt(),
        };

        match neighbour {
            Some(neighbour) => {
                let shifted = self.solar_day(neighbour)?;
                if self.local_noon_date(shifted) == date {
                    Ok(shifted)
                } else {
                    // Dates skipped by a zone change have no solar day of their own
                    Ok(events)
                }
            }
            None => Ok(events),
        }
    }

    fn local_noon_date(&self, (sunrise, sunset): (DateTime<Utc>, DateTime<Utc>)) -> NaiveDate {
        let noon = sunrise + (sunset - sunrise) / 2;
        noon.with_timezone(&self.timezone).date_naive()
    }

    /// Sunrise and sunset for the UTC `date`, falling back for polar day or night.
    fn solar_day(&self, date: NaiveDate) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        let coord = Coordinates::new(self.latitude, self.longitude).with_context(|| {
            format!(
                "Failed to create coordinates for {:.4}, {:.4}",
                self.latitude, self.longitude
            )
        })?;
        let solar_day = SolarDay::new(coord, date).with_altitude(self.elevation);

        let sunrise = solar_day.event_time(SolarEvent::Sunrise);
        let sunset = solar_day.event_time(SolarEvent::Sunset);

        if self.is_plausible_event(date, sunrise)
            && self.is_plausible_event(date, sunset)
            && sunrise < sunset
            && sunset - sunrise < Duration::hours(24)
        {
            Ok((sunrise, sunset))
        } else {
            Ok(self.polar_sunrise_and_sunset(date))
        }
    }

    /// Local mean solar noon: 12:00 UTC shifted by four minutes per degree of longitude.
    fn mean_solar_noon(&self, date: NaiveDate) -> DateTime<Utc> {
        let utc_midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::default()));
        let offset_seconds = (self.longitude * 240.0).round() as i64;
        utc_midnight + Duration::hours(12) - Duration::seconds(offset_seconds)
    }

    /// The `sunrise` crate reports events that never happen as far-off instants.
    fn is_plausible_event(&self, date: NaiveDate, event: DateTime<Utc>) -> bool {
        let drift = event - self.mean_solar_noon(date);
        drift.num_hours().abs() <= POLAR_EVENT_MAX_DRIFT_HOURS
    }

    /// Conventional events centred on mean solar noon when the sun stays
    /// above (midnight sun) or below (polar night) the horizon all day.
    fn polar_sunrise_and_sunset(&self, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        let day_of_year = date.ordinal();
        let is_summer = if self.latitude > 0.0 {
            // Northern hemisphere: summer around day 172 (June 21)
            (80..=264).contains(&day_of_year)
        } else {
            // Southern hemisphere: summer around day 355 (December 21)
            !(80..=264).contains(&day_of_year)
        };

        let half_day = if is_summer {
            Duration::hours(POLAR_SUMMER_HALF_DAY_HOURS)
        } else {
            Duration::hours(POLAR_WINTER_HALF_DAY_HOURS)
        };

        Log::log_warning(&format!(
            "No sunrise/sunset at {:.4}° on {}, assuming {} hours of daylight",
            self.latitude,
            date,
            (half_day * 2).num_hours()
        ));

        let noon = self.mean_solar_noon(date);
        (noon - half_day, noon + half_day)
    }
}

impl AstralLocation for SolarLocation {
    fn sunrise(&self, date: NaiveDate) -> Result<DateTime<Utc>> {
        Ok(self.sunrise_and_sunset(date)?.0)
    }

    fn sunset(&self, date: NaiveDate) -> Result<DateTime<Utc>> {
        Ok(self.sunrise_and_sunset(date)?.1)
    }

    fn noon(&self, date: NaiveDate) -> Result<DateTime<Utc>> {
        let (sunrise, sunset) = self.sunrise_and_sunset(date)?;
        Ok(sunrise + (sunset - sunrise) / 2)
    }

    fn midnight(&self, date: NaiveDate) -> Result<DateTime<Utc>> {
        Ok(self.noon(date)? - Duration::hours(12))
    }
}
