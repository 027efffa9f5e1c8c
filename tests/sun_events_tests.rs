//! Sun event behaviour against the real `sunrise`-crate location at a spread
//! of latitudes, longitudes and timezones.

use adaptive_lighting::utils::timestamp_of;
use adaptive_lighting::{AstralLocation, Log, SolarLocation, SunEvent, SunEvents, SunTimeOverrides};
use chrono::{Duration, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use std::sync::Arc;

const LAT_LONG_TZS: [(f64, f64, &str); 4] = [
    (52.379189, 4.899431, "Europe/Amsterdam"),
    (32.87336, -117.22743, "US/Pacific"),
    (60.0, 50.0, "GMT"),
    (60.0, 50.0, "UTC"),
];

struct Case {
    timezone: Tz,
    location: Arc<SolarLocation>,
}

impl Case {
    fn sun_events(&self, overrides: SunTimeOverrides) -> SunEvents {
        SunEvents::new("test", self.location.clone(), overrides, self.timezone)
    }

    fn plain(&self) -> SunEvents {
        self.sun_events(SunTimeOverrides::default())
    }
}

fn cases() -> Vec<Case> {
    Log::set_enabled(false);
    LAT_LONG_TZS
        .iter()
        .map(|&(lat, lon, tz)| {
            let timezone: Tz = tz.parse().unwrap();
            let location = SolarLocation::new(lat, lon, 0.0, timezone).unwrap();
            Case {
                timezone,
                location: Arc::new(location),
            }
        })
        .collect()
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 1, 1).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[test]
fn test_replace_time() {
    for case in cases() {
        let new_time = time(5, 30);
        let replaced = case.plain().replace_time(date(), new_time);
        assert_eq!(replaced.with_timezone(&case.timezone).time(), new_time);
    }
}

#[test]
fn test_sunrise_without_offset() {
    for case in cases() {
        let result = case.plain().sunrise(date()).unwrap();
        assert_eq!(result, case.location.sunrise(date()).unwrap());
    }
}

#[test]
fn test_sun_position_no_fixed_sunset_and_sunrise() {
    for case in cases() {
        let events = case.plain();
        let location = &case.location;

        let sunset = location.sunset(date()).unwrap();
        assert_eq!(events.sun_position(&sunset).unwrap(), 0.0, "{}", case.timezone);
        let sunrise = location.sunrise(date()).unwrap();
        assert_eq!(events.sun_position(&sunrise).unwrap(), 0.0, "{}", case.timezone);
        let noon = location.noon(date()).unwrap();
        assert_eq!(events.sun_position(&noon).unwrap(), 1.0, "{}", case.timezone);
        let midnight = location.midnight(date()).unwrap();
        assert_eq!(events.sun_position(&midnight).unwrap(), -1.0, "{}", case.timezone);
    }
}

#[test]
fn test_sun_position_fixed_sunset_and_sunrise() {
    for case in cases() {
        let events = case.sun_events(SunTimeOverrides {
            sunrise_time: Some(time(6, 0)),
            sunset_time: Some(time(18, 0)),
            ..Default::default()
        });

        let sunset = events.sunset(date()).unwrap();
        assert_eq!(events.sun_position(&sunset).unwrap(), 0.0, "{}", case.timezone);
        let sunrise = events.sunrise(date()).unwrap();
        assert_eq!(events.sun_position(&sunrise).unwrap(), 0.0, "{}", case.timezone);

        let (noon, midnight) = events.noon_and_midnight(date()).unwrap();
        assert_eq!(events.sun_position(&noon).unwrap(), 1.0, "{}", case.timezone);
        assert_eq!(events.sun_position(&midnight).unwrap(), -1.0, "{}", case.timezone);
    }
}

#[test]
fn test_noon_and_midnight() {
    for case in cases() {
        let (noon, midnight) = case.plain().noon_and_midnight(date()).unwrap();
        assert_eq!(noon, case.location.noon(date()).unwrap());
        assert_eq!(midnight, case.location.midnight(date()).unwrap());
    }
}

#[test]
fn test_sun_events() {
    for case in cases() {
        let events = case.plain().sun_events(date()).unwrap();
        assert_eq!(events.len(), 4);

        let sunrise = case.location.sunrise(date()).unwrap();
        assert!(events.contains(&(SunEvent::Sunrise, timestamp_of(&sunrise))));
        let names: Vec<SunEvent> = events.iter().map(|(event, _)| *event).collect();
        assert_eq!(names, SunEvent::ALL);
    }
}

#[test]
fn test_prev_and_next_events() {
    for case in cases() {
        let events = case.plain();
        let after_sunrise = events.sunrise(date()).unwrap() + Duration::hours(1);
        let (prev_event, next_event) = events.prev_and_next_events(&after_sunrise).unwrap();
        assert_eq!(prev_event.0, SunEvent::Sunrise, "{}", case.timezone);
        assert_eq!(next_event.0, SunEvent::Noon, "{}", case.timezone);
    }
}

#[test]
fn test_closest_event() {
    for case in cases() {
        let events = case.plain();
        let sunrise = events.sunrise(date()).unwrap();
        let (event, ts) = events.closest_event(&sunrise).unwrap();
        assert_eq!(event, SunEvent::Sunrise);
        assert_eq!(
            ts,
            timestamp_of(&case.location.sunrise(sunrise.date_naive()).unwrap())
        );
    }
}

#[test]
fn test_clamped_sunset_moves_position_zero() {
    // Amsterdam sets around 16:37 on January 1st; hold the sunset until 19:00
    let case = &cases()[0];
    let events = case.sun_events(SunTimeOverrides {
        min_sunset_time: Some(time(19, 0)),
        ..Default::default()
    });

    let sunset = events.sunset(date()).unwrap();
    assert_eq!(sunset.time(), time(19, 0));
    assert_eq!(events.sun_position(&sunset).unwrap(), 0.0);

    // The astronomical sunset is now still in daylight
    let astronomical = case.location.sunset(date()).unwrap();
    assert!(events.sun_position(&astronomical).unwrap() > 0.0);
}

#[test]
fn test_polar_location_stays_in_range() {
    let location = SolarLocation::new(78.22, 15.65, 0.0, Tz::Arctic__Longyearbyen).unwrap();
    let events = SunEvents::new(
        "svalbard",
        Arc::new(location),
        SunTimeOverrides::default(),
        Tz::Arctic__Longyearbyen,
    );

    Log::set_enabled(false);
    for (month, day) in [(1, 1), (3, 21), (6, 21), (12, 21)] {
        let day = NaiveDate::from_ymd_opt(2022, month, day).unwrap();
        let start = events.replace_time(day, time(0, 0));
        for step in 0..48 {
            let instant = start + Duration::minutes(30 * step);
            let position = events.sun_position(&instant).unwrap();
            assert!((-1.0..=1.0).contains(&position), "{instant}: {position}");
        }
    }
}

fn far_east_cases() -> Vec<Case> {
    Log::set_enabled(false);
    [
        (-13.83, -171.76, Tz::Pacific__Apia),
        (1.87, -157.4, Tz::Pacific__Kiritimati),
    ]
    .into_iter()
    .map(|(lat, lon, timezone)| Case {
        timezone,
        location: Arc::new(SolarLocation::new(lat, lon, 0.0, timezone).unwrap()),
    })
    .collect()
}

#[test]
fn test_loose_sunset_bound_leaves_sunset_alone_far_east() {
    let day = NaiveDate::from_ymd_opt(2022, 6, 2).unwrap();
    for case in far_east_cases() {
        let events = case.sun_events(SunTimeOverrides {
            min_sunset_time: Some(time(16, 0)),
            max_sunset_time: Some(time(19, 0)),
            ..Default::default()
        });

        let sunset = events.sunset(day).unwrap();
        assert_eq!(sunset, case.location.sunset(day).unwrap(), "{}", case.timezone);
        assert_eq!(sunset.date_naive(), day, "{}", case.timezone);
    }
}

#[test]
fn test_sun_position_ramps_after_local_midnight_far_east() {
    let day = NaiveDate::from_ymd_opt(2022, 6, 2).unwrap();
    for case in far_east_cases() {
        let events = case.plain();
        let just_after = events.replace_time(day, time(0, 5));
        let a_minute_later = just_after + Duration::minutes(1);

        let (prev, next) = events.prev_and_next_events(&just_after).unwrap();
        assert!(prev.1 <= timestamp_of(&just_after), "{}", case.timezone);
        assert!(next.1 > timestamp_of(&just_after), "{}", case.timezone);
        assert_eq!(prev.0, SunEvent::Sunset, "{}", case.timezone);
        assert_eq!(next.0, SunEvent::Midnight, "{}", case.timezone);

        let before = events.sun_position(&just_after).unwrap();
        let after = events.sun_position(&a_minute_later).unwrap();
        assert!(before > -1.0, "{}: {before}", case.timezone);
        assert!(after < before, "{}: {before} -> {after}", case.timezone);
    }
}
