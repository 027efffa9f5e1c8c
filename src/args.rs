//! Command-line argument parsing.
//!
//! The CLI reports the sun events of a date and the light target at an
//! instant. Every option is optional: without any, it reports today and now
//! using the configuration from the default location.

use chrono::{DateTime, FixedOffset, NaiveDate};
use clap::Parser;
use std::path::PathBuf;

/// Report sun events, sun position and adaptive light targets.
#[derive(Debug, Parser, PartialEq)]
#[command(name = "adaptive-lighting", version, about)]
pub struct Args {
    /// Configuration file to use instead of the default location
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Date whose sun events are listed (defaults to the date of --at)
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Instant to evaluate (defaults to now)
    #[arg(long, value_name = "RFC3339", value_parser = parse_instant)]
    pub at: Option<DateTime<FixedOffset>>,

    /// Also show the dim-to-warm color temperature at this brightness
    #[arg(short, long, value_name = "PERCENT", value_parser = parse_brightness)]
    pub brightness: Option<f64>,

    /// Print the loaded configuration and bracketing events
    #[arg(short, long)]
    pub debug: bool,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{}': {} (expected YYYY-MM-DD)", value, e))
}

fn parse_instant(value: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(value).map_err(|e| {
        format!(
            "invalid instant '{}': {} (expected e.g. 2022-01-01T18:00:00+01:00)",
            value, e
        )
    })
}

fn parse_brightness(value: &str) -> Result<f64, String> {
    let brightness: f64 = value
        .parse()
        .map_err(|_| format!("invalid brightness '{}'", value))?;
    if !brightness.is_finite() {
        return Err(format!("invalid brightness '{}'", value));
    }
    Ok(brightness)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("adaptive-lighting").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_no_args() {
        let args = parse(&[]).unwrap();
        assert_eq!(
            args,
            Args {
                config: None,
                date: None,
                at: None,
                brightness: None,
                debug: false,
            }
        );
    }

    #[test]
    fn test_parse_debug_flags() {
        assert!(parse(&["--debug"]).unwrap().debug);
        assert!(parse(&["-d"]).unwrap().debug);
    }

    #[test]
    fn test_parse_config_path() {
        let args = parse(&["-c", "/tmp/lighting.toml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/tmp/lighting.toml")));
    }

    #[test]
    fn test_parse_date_and_instant() {
        let args = parse(&["--date", "2022-01-01", "--at", "2022-01-01T18:30:00+01:00"]).unwrap();
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2022, 1, 1));

        let at = args.at.unwrap();
        assert_eq!(at.hour(), 18);
        assert_eq!(at.offset().local_minus_utc(), 3600);
    }

    #[test]
    fn test_parse_brightness() {
        assert_eq!(parse(&["-b", "42.5"]).unwrap().brightness, Some(42.5));
        assert!(parse(&["--brightness", "bright"]).is_err());
        assert!(parse(&["--brightness", "NaN"]).is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(parse(&["--date", "01/01/2022"]).is_err());
        assert!(parse(&["--at", "2022-01-01 18:00"]).is_err());
        assert!(parse(&["--unknown"]).is_err());
    }
}
