//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::str::FromStr;
use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for interactive runs
    Development,
    /// JSON structured output for batch/cron runs
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is not set
    pub fn default_filter(&self) -> &'static str {
        match self {
            Profile::Development => "expediente=debug",
            Profile::Production => "expediente=info",
            Profile::Test => "off",
        }
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "pretty" => Ok(Profile::Development),
            "production" | "prod" | "json" => Ok(Profile::Production),
            "test" => Ok(Profile::Test),
            other => Err(format!("unknown logging profile '{}'", other)),
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Call once at process startup; later calls are ignored. Logs go to
/// stderr so that stdout stays reserved for command output (reports, JSON).
///
/// # Example
///
/// ```
/// use expediente_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(profile.default_filter()));

        match profile {
            Profile::Development => {
                tracing_subscriber::fmt()
                    .with_writer(std::io::stderr)
                    .with_env_filter(filter)
                    .init();
            }
            Profile::Production => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_env_filter(filter)
                    .init();
            }
            Profile::Test => {
                // Test capture installs its own subscriber via init_test_capture()
                tracing_subscriber::registry().init();
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_idempotent() {
        init(Profile::Test);
        init(Profile::Test);
    }

    #[test]
    fn test_profile_parse() {
        assert_eq!("json".parse::<Profile>().unwrap(), Profile::Production);
        assert_eq!("Dev".parse::<Profile>().unwrap(), Profile::Development);
        assert!("loud".parse::<Profile>().is_err());
    }

    #[test]
    fn test_default_filters_target_expediente() {
        assert!(Profile::Development.default_filter().starts_with("expediente"));
        assert!(Profile::Production.default_filter().ends_with("info"));
    }
}
