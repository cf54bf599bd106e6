use chrono::{DateTime, Local, Utc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Logs go to stderr so a report on stdout stays clean.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

pub fn plural(count: u32, unit: &str) -> String {
    if count == 1 {
        unit.to_string()
    } else {
        format!("{unit}s")
    }
}

pub fn display_date(timestamp: &DateTime<Utc>, local_time: bool) -> String {
    if local_time {
        timestamp.with_timezone(&Local).format(DATE_FORMAT).to_string()
    } else {
        format!("{} UTC", timestamp.format(DATE_FORMAT))
    }
}
