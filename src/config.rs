use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use tokio::time::Duration;

use crate::cache;
use crate::error::ConfigError;

pub const EVENTS_URL: &str = "EVENTS_URL";
pub const USERS_URL: &str = "USERS_URL";
pub const REMINDER_BEFORE: &str = "REMINDER_BEFORE";
pub const REMINDER_ADDR: &str = "REMINDER_ADDR";
pub const CACHE_TTL: &str = "CACHE_TTL";
pub const FETCH_TIMEOUT: &str = "FETCH_TIMEOUT";

/// Time between two reminder cycles.
pub const RECONCILE_PERIOD: Duration = Duration::from_secs(30 * 60);

const DEFAULT_CACHE_TTL_SECS: u64 = 10 * 60;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub events_url: String,
    pub users_url: String,
    /// Kept unparsed; every cycle parses it with [`parse_lead_time`].
    pub reminder_before: String,
    pub address: SocketAddr,
    pub cache_ttl: Duration,
    pub fetch_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let address = parse_or(&lookup, REMINDER_ADDR, SocketAddr::from(([0, 0, 0, 0], 8080)))?;
        let cache_ttl = parse_or(&lookup, CACHE_TTL, DEFAULT_CACHE_TTL_SECS)?;
        let fetch_timeout = parse_or(&lookup, FETCH_TIMEOUT, DEFAULT_FETCH_TIMEOUT_SECS)?;

        Ok(Self {
            events_url: lookup(EVENTS_URL).unwrap_or_default(),
            users_url: lookup(USERS_URL).unwrap_or_default(),
            reminder_before: lookup(REMINDER_BEFORE).unwrap_or_default(),
            address,
            cache_ttl: Duration::from_secs(cache_ttl),
            fetch_timeout: Duration::from_secs(fetch_timeout),
        })
    }

    /// Required variables that were absent or empty.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (EVENTS_URL, &self.events_url),
            (USERS_URL, &self.users_url),
            (REMINDER_BEFORE, &self.reminder_before),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(key, _)| key)
        .collect()
    }

    pub fn cache_config(&self) -> cache::Config {
        cache::Config {
            enabled: !self.cache_ttl.is_zero(),
            ttl: self.cache_ttl,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: ToString,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|err: T::Err| ConfigError::InvalidValue {
                key,
                reason: err.to_string(),
                value,
            }),
    }
}

/// Parses a lead time such as `1h30m`, `45m` or `-10m`.
///
/// A leading `-` yields a negative duration, so only events that are already
/// overdue by at least that much fall inside the window.
pub fn parse_lead_time(raw: &str) -> Result<chrono::Duration, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidDuration {
        value: raw.to_string(),
        reason,
    };

    let trimmed = raw.trim();
    let (negative, magnitude) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let std_duration =
        humantime::parse_duration(magnitude).map_err(|err| invalid(err.to_string()))?;
    let duration =
        chrono::Duration::from_std(std_duration).map_err(|err| invalid(err.to_string()))?;

    Ok(if negative { -duration } else { duration })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_parse_lead_time_compound() {
        assert_eq!(
            parse_lead_time("1h30m").unwrap(),
            chrono::Duration::minutes(90)
        );
        assert_eq!(parse_lead_time("45m").unwrap(), chrono::Duration::minutes(45));
        assert_eq!(parse_lead_time(" 2h ").unwrap(), chrono::Duration::hours(2));
    }

    #[test]
    fn test_parse_lead_time_signed() {
        assert_eq!(
            parse_lead_time("-10m").unwrap(),
            chrono::Duration::minutes(-10)
        );
        assert_eq!(parse_lead_time("+1h").unwrap(), chrono::Duration::hours(1));
    }

    #[test]
    fn test_parse_lead_time_fractional_and_zero() {
        assert_eq!(
            parse_lead_time("1.5h").unwrap(),
            chrono::Duration::minutes(90)
        );
        assert_eq!(
            parse_lead_time("-1.5h").unwrap(),
            chrono::Duration::minutes(-90)
        );
        assert_eq!(parse_lead_time("0").unwrap(), chrono::Duration::zero());
    }

    #[test]
    fn test_parse_lead_time_rejects_garbage() {
        for raw in ["", "soon", "10", "-", "h"] {
            let err = parse_lead_time(raw).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidDuration { ref value, .. } if value == raw),
                "{raw:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup(&[
            (EVENTS_URL, "http://events.local/events"),
            (USERS_URL, "http://users.local/users"),
            (REMINDER_BEFORE, "1h"),
        ]))
        .unwrap();

        assert_eq!(config.events_url, "http://events.local/events");
        assert_eq!(config.users_url, "http://users.local/users");
        assert_eq!(config.reminder_before, "1h");
        assert_eq!(config.address, SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert_eq!(config.cache_ttl, Duration::from_secs(600));
        assert_eq!(config.fetch_timeout, Duration::from_secs(30));
        assert!(config.missing().is_empty());
        assert!(config.cache_config().enabled);
    }

    #[test]
    fn test_config_overrides() {
        let config = Config::from_lookup(lookup(&[
            (REMINDER_ADDR, "127.0.0.1:9000"),
            (CACHE_TTL, "0"),
            (FETCH_TIMEOUT, "5"),
        ]))
        .unwrap();

        assert_eq!(config.address, SocketAddr::from(([127, 0, 0, 1], 9000)));
        assert_eq!(config.fetch_timeout, Duration::from_secs(5));
        assert!(!config.cache_config().enabled);
    }

    #[test]
    fn test_config_reports_missing_required() {
        let config = Config::from_lookup(lookup(&[(USERS_URL, "http://users.local")])).unwrap();
        assert_eq!(config.missing(), vec![EVENTS_URL, REMINDER_BEFORE]);
    }

    #[test]
    fn test_config_rejects_bad_optional_value() {
        let err = Config::from_lookup(lookup(&[(CACHE_TTL, "ten minutes")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: CACHE_TTL, .. }
        ));
    }

    #[test]
    fn test_bad_lead_time_is_not_a_startup_error() {
        let config = Config::from_lookup(lookup(&[(REMINDER_BEFORE, "whenever")])).unwrap();
        assert!(parse_lead_time(&config.reminder_before).is_err());
    }
}
