use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy.
/// Every field has a default, so `load` only fails on malformed values.
pub struct Config {
    /// Endpoint queried by `homework year`
    /// (defaults to http://worldclockapi.com/api/json/utc/now).
    pub worldclock_api_url: String,
    /// Where `homework salary report` writes when no --output is given.
    pub report_path: PathBuf,
    /// Stamp every output line with the local time (HOMEWORK_TIMESTAMPS).
    pub timestamps: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let timestamps = match env::var("HOMEWORK_TIMESTAMPS").as_deref() {
            Ok("1") | Ok("true") | Ok("yes") => true,
            Ok("0") | Ok("false") | Ok("no") | Ok("") | Err(_) => false,
            Ok(other) => anyhow::bail!(
                "HOMEWORK_TIMESTAMPS must be true or false, got {other:?}"
            ),
        };

        Ok(Self {
            worldclock_api_url: env::var("WORLDCLOCK_API_URL")
                .unwrap_or_else(|_| crate::clock::worldclock::DEFAULT_WORLDCLOCK_URL.to_string()),
            report_path: env::var("HOMEWORK_REPORT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./department_report.csv")),
            timestamps,
        })
    }
}
