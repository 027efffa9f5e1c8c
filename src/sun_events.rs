//! Sun event timing and the continuous sun position signal.
//!
//! [`SunEvents`] turns the raw events of an [`AstralLocation`] into the four
//! reference events used by the light curves, applying the configured fixed
//! sunrise/sunset times and min/max clamps. From those it derives the previous
//! and next event around any instant, the closest event, and the sun position:
//! a piecewise-linear signal that is 0 at sunrise and sunset, +1 at solar noon
//! and -1 at solar midnight.
//!
//! Every method is a pure function of its argument and the construction-time
//! configuration. Events are not assumed to be ordered sunrise < noon <
//! sunset; near the poles or with aggressive overrides they may collapse or
//! swap, which yields degenerate but in-range positions instead of errors.

use anyhow::{Result, bail};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;
use std::fmt;
use std::sync::Arc;

use crate::constants::MAX_BRACKET_EXTENSION_DAYS;
use crate::geo::AstralLocation;
use crate::utils::{Timestamp, interpolate_f64, timestamp_of};

/// The four reference events of a solar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SunEvent {
    Sunrise,
    Noon,
    Sunset,
    Midnight,
}

impl SunEvent {
    /// All events in the order [`SunEvents::sun_events`] reports them.
    pub const ALL: [SunEvent; 4] = [
        SunEvent::Sunrise,
        SunEvent::Noon,
        SunEvent::Sunset,
        SunEvent::Midnight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SunEvent::Sunrise => "sunrise",
            SunEvent::Noon => "noon",
            SunEvent::Sunset => "sunset",
            SunEvent::Midnight => "midnight",
        }
    }

    /// Value of the sun position signal at this event.
    pub fn position(&self) -> f64 {
        match self {
            SunEvent::Sunrise | SunEvent::Sunset => 0.0,
            SunEvent::Noon => 1.0,
            SunEvent::Midnight => -1.0,
        }
    }
}

impl fmt::Display for SunEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event paired with the Unix timestamp at which it occurs.
pub type EventTime = (SunEvent, Timestamp);

/// Wall-clock overrides for sunrise and sunset.
///
/// A fixed time replaces the astronomical value on every date. Without one,
/// the astronomical value is floored by `min_*` and ceiled by `max_*`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SunTimeOverrides {
    pub sunrise_time: Option<NaiveTime>,
    pub min_sunrise_time: Option<NaiveTime>,
    pub max_sunrise_time: Option<NaiveTime>,
    pub sunset_time: Option<NaiveTime>,
    pub min_sunset_time: Option<NaiveTime>,
    pub max_sunset_time: Option<NaiveTime>,
}

/// Sun event calculations for one location and set of overrides.
#[derive(Clone)]
pub struct SunEvents {
    /// Diagnostic identifier.
    pub name: String,
    astral_location: Arc<dyn AstralLocation>,
    pub overrides: SunTimeOverrides,
    /// Zone in which wall-clock overrides and dates are interpreted.
    pub timezone: Tz,
}

impl fmt::Debug for SunEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SunEvents")
            .field("name", &self.name)
            .field("overrides", &self.overrides)
            .field("timezone", &self.timezone)
            .finish_non_exhaustive()
    }
}

impl SunEvents {
    pub fn new(
        name: impl Into<String>,
        astral_location: Arc<dyn AstralLocation>,
        overrides: SunTimeOverrides,
        timezone: Tz,
    ) -> Self {
        Self {
            name: name.into(),
            astral_location,
            overrides,
            timezone,
        }
    }

    /// The collaborator supplying raw astronomical events.
    pub fn astral_location(&self) -> &Arc<dyn AstralLocation> {
        &self.astral_location
    }

    /// Combine `date` with the wall-clock `time` in the configured timezone.
    ///
    /// Converting the result back into the timezone yields `time` again,
    /// except at DST transitions: an ambiguous local time resolves to the
    /// earlier of its two instants, and a local time skipped by a
    /// spring-forward gap is moved one hour later.
    pub fn replace_time(&self, date: NaiveDate, time: NaiveTime) -> DateTime<Tz> {
        let naive = date.and_time(time);
        self.timezone
            .from_local_datetime(&naive)
            .earliest()
            .unwrap_or_else(|| self.resolve_dst_gap(naive))
    }

    fn resolve_dst_gap(&self, naive: NaiveDateTime) -> DateTime<Tz> {
        let shifted = naive + Duration::hours(1);
        self.timezone
            .from_local_datetime(&shifted)
            .earliest()
            .unwrap_or_else(|| self.timezone.from_utc_datetime(&naive))
    }

    /// Sunrise on `date`, with fixed time and clamps applied.
    pub fn sunrise(&self, date: NaiveDate) -> Result<DateTime<Tz>> {
        if let Some(time) = self.overrides.sunrise_time {
            return Ok(self.replace_time(date, time));
        }

        let sunrise = self
            .astral_location
            .sunrise(date)?
            .with_timezone(&self.timezone);

        Ok(self.clamp_to_wall_clock(
            sunrise,
            self.overrides.min_sunrise_time,
            self.overrides.max_sunrise_time,
        ))
    }

    /// Sunset on `date`, with fixed time and clamps applied.
    pub fn sunset(&self, date: NaiveDate) -> Result<DateTime<Tz>> {
        if let Some(time) = self.overrides.sunset_time {
            return Ok(self.replace_time(date, time));
        }

        let sunset = self
            .astral_location
            .sunset(date)?
            .with_timezone(&self.timezone);

        Ok(self.clamp_to_wall_clock(
            sunset,
            self.overrides.min_sunset_time,
            self.overrides.max_sunset_time,
        ))
    }

    /// Floor `event` at `min` and ceil it at `max`, both read on the
    /// event's own local date.
    fn clamp_to_wall_clock(
        &self,
        event: DateTime<Tz>,
        min: Option<NaiveTime>,
        max: Option<NaiveTime>,
    ) -> DateTime<Tz> {
        let date = event.date_naive();
        let mut event = event;

        if let Some(min) = min {
            let earliest = self.replace_time(date, min);
            if event < earliest {
                event = earliest;
            }
        }

        if let Some(max) = max {
            let latest = self.replace_time(date, max);
            if event > latest {
                event = latest;
            }
        }

        event
    }

    /// Solar noon and solar midnight of `date`, straight from the collaborator.
    pub fn noon_and_midnight(&self, date: NaiveDate) -> Result<(DateTime<Tz>, DateTime<Tz>)> {
        let noon = self.astral_location.noon(date)?;
        let midnight = self.astral_location.midnight(date)?;
        Ok((
            noon.with_timezone(&self.timezone),
            midnight.with_timezone(&self.timezone),
        ))
    }

    /// The four events of `date` in the order sunrise, noon, sunset, midnight.
    pub fn sun_events(&self, date: NaiveDate) -> Result<[EventTime; 4]> {
        let sunrise = self.sunrise(date)?;
        let sunset = self.sunset(date)?;
        let (noon, midnight) = self.noon_and_midnight(date)?;

        Ok([
            (SunEvent::Sunrise, timestamp_of(&sunrise)),
            (SunEvent::Noon, timestamp_of(&noon)),
            (SunEvent::Sunset, timestamp_of(&sunset)),
            (SunEvent::Midnight, timestamp_of(&midnight)),
        ])
    }

    /// Calendar date of `instant` in the configured timezone.
    fn local_date<Z: TimeZone>(&self, instant: &DateTime<Z>) -> NaiveDate {
        instant.with_timezone(&self.timezone).date_naive()
    }

    /// The last event at or before `instant` and the first event after it.
    ///
    /// Events of the neighbouring dates are included, so instants close to
    /// local midnight are bracketed by the right pair. When the zone runs far
    /// ahead of or behind solar time the window grows a day at a time until
    /// it surrounds `instant`.
    pub fn prev_and_next_events<Z: TimeZone>(
        &self,
        instant: &DateTime<Z>,
    ) -> Result<(EventTime, EventTime)> {
        let target = timestamp_of(instant);
        let date = self.local_date(instant);

        let mut first = date.pred_opt().unwrap_or(date);
        let mut last = date.succ_opt().unwrap_or(date);
        let mut events: Vec<EventTime> = Vec::with_capacity(20);
        for day in first.iter_days().take_while(|day| *day <= last) {
            events.extend(self.sun_events(day)?);
        }

        for _ in 0..MAX_BRACKET_EXTENSION_DAYS {
            let earliest = events.iter().map(|(_, ts)| *ts).fold(f64::INFINITY, f64::min);
            let latest = events.iter().map(|(_, ts)| *ts).fold(f64::NEG_INFINITY, f64::max);
            let mut extended = false;

            if earliest > target {
                if let Some(day) = first.pred_opt() {
                    events.extend(self.sun_events(day)?);
                    first = day;
                    extended = true;
                }
            }
            if latest <= target {
                if let Some(day) = last.succ_opt() {
                    events.extend(self.sun_events(day)?);
                    last = day;
                    extended = true;
                }
            }

            if !extended {
                break;
            }
        }

        // Stable sort: coinciding events keep their canonical order
        events.sort_by(|a, b| a.1.total_cmp(&b.1));

        let index = events.partition_point(|(_, ts)| *ts <= target);
        if index == 0 || index == events.len() {
            bail!(
                "No sun events of {} around {} bracket the instant",
                self.name,
                date
            );
        }

        Ok((events[index - 1], events[index]))
    }

    /// The event of `instant`'s date nearest to it; ties go to the earlier event.
    pub fn closest_event<Z: TimeZone>(&self, instant: &DateTime<Z>) -> Result<EventTime> {
        let target = timestamp_of(instant);
        let mut events = self.sun_events(self.local_date(instant))?;
        events.sort_by(|a, b| a.1.total_cmp(&b.1));

        let distance = |event: &EventTime| (event.1 - target).abs();
        let closest = events[1..].iter().fold(events[0], |best, event| {
            if distance(event) < distance(&best) {
                *event
            } else {
                best
            }
        });

        Ok(closest)
    }

    /// Sun position at `instant`, in [-1, 1].
    ///
    /// Linear between the bracketing events: 0 → +1 from sunrise to noon,
    /// +1 → 0 from noon to sunset, 0 → -1 from sunset to midnight and
    /// -1 → 0 from midnight to sunrise. A zero-length interval yields 0.
    pub fn sun_position<Z: TimeZone>(&self, instant: &DateTime<Z>) -> Result<f64> {
        let target = timestamp_of(instant);
        let ((prev_event, prev_ts), (next_event, next_ts)) = self.prev_and_next_events(instant)?;

        let span = next_ts - prev_ts;
        if span <= 0.0 {
            return Ok(0.0);
        }

        let progress = (target - prev_ts) / span;
        let position = interpolate_f64(prev_event.position(), next_event.position(), progress);
        Ok(position.clamp(-1.0, 1.0))
    }
}
