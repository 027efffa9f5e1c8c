use adaptive_lighting::args::Args;
use adaptive_lighting::constants::EXIT_FAILURE;
use adaptive_lighting::utils::{datetime_from_timestamp, kelvin_to_mired};
use adaptive_lighting::{Config, EventTime, Log, adjust_color_temp_for_brightness};
use anyhow::Result;
use chrono::Utc;
use chrono_tz::Tz;
use clap::Parser;

fn main() {
    let args = Args::parse();

    Log::log_version();

    if let Err(e) = run(&args) {
        Log::log_pipe();
        Log::log_error(&format!("{:#}", e));
        Log::log_end();
        std::process::exit(EXIT_FAILURE);
    }

    Log::log_end();
}

fn run(args: &Args) -> Result<()> {
    let (config, config_path) = match &args.config {
        Some(path) => (Config::load_from_path(path)?, path.clone()),
        None => (Config::load()?, Config::get_config_path()?),
    };

    if args.debug {
        config.log_config(&config_path);
    }

    let settings = config.sun_light_settings()?;
    let sun_events = &settings.sun_events;
    let tz = sun_events.timezone;

    let instant = match args.at {
        Some(at) => at.with_timezone(&tz),
        None => Utc::now().with_timezone(&tz),
    };
    let date = args.date.unwrap_or_else(|| instant.date_naive());

    Log::log_block_start(&format!("Sun events on {} ({})", date, tz));
    for event in sun_events.sun_events(date)? {
        Log::log_indented(&describe_event(event, tz));
    }

    Log::log_block_start(&format!("At {}", instant.format("%Y-%m-%d %H:%M:%S %Z")));
    let (prev, next) = sun_events.prev_and_next_events(&instant)?;
    if args.debug {
        Log::log_debug(&format!("Previous event: {}", describe_event(prev, tz)));
        Log::log_debug(&format!("Next event: {}", describe_event(next, tz)));
        Log::log_debug(&format!(
            "Closest event: {}",
            describe_event(sun_events.closest_event(&instant)?, tz)
        ));
    }

    let capabilities = config.light_capabilities();
    let dim_to_warm = config.dim_to_warm();
    let target = settings.light_target(&instant, &capabilities, &dim_to_warm)?;

    Log::log_indented(&format!("Sun position: {:+.3}", target.sun_position));
    Log::log_indented(&format!(
        "Between {} and {}",
        prev.0.as_str(),
        next.0.as_str()
    ));
    Log::log_indented(&format!("Brightness: {:.1}%", target.brightness_pct));
    Log::log_indented(&format!(
        "Color temperature: {}K ({} mired for the light)",
        target.color_temp_kelvin, target.color_temp_mired
    ));

    if let Some(brightness) = args.brightness {
        let base_mired = capabilities.clamp(kelvin_to_mired(target.color_temp_kelvin));
        let adjusted =
            adjust_color_temp_for_brightness(base_mired, brightness, &dim_to_warm, &capabilities);
        Log::log_block_start(&format!("Dim to warm at {:.1}% brightness", brightness));
        Log::log_indented(&format!("{} mired -> {} mired", base_mired, adjusted));
        if !dim_to_warm.enabled {
            Log::log_indented("Dim to warm is disabled in the configuration");
        }
    }

    Ok(())
}

fn describe_event((event, ts): EventTime, tz: Tz) -> String {
    let when = match datetime_from_timestamp(ts) {
        Some(instant) => instant
            .with_timezone(&tz)
            .format("%Y-%m-%d %H:%M:%S %Z")
            .to_string(),
        None => format!("unrepresentable timestamp {}", ts),
    };
    format!("{:<8} {}", event.as_str(), when)
}
