//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional, with defaults suitable for local development:
//! - `CARTWHEEL_HOST` - Bind address (default: 127.0.0.1)
//! - `CARTWHEEL_PORT` - Listen port (default: 3000)
//! - `CARTWHEEL_NTH_ORDER` - Reward interval: every nth order earns a
//!   discount code (default: 5, must be positive)
//! - `CARTWHEEL_DISCOUNT_PERCENTAGE` - Percentage off carried by generated
//!   codes (default: 10, must be 0-100)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use cartwheel_core::DiscountConfig;
use rust_decimal::Decimal;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_NTH_ORDER: u64 = 5;
const DEFAULT_DISCOUNT_PERCENTAGE: u32 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// The nth-order reward rule handed to the core.
    pub discount: DiscountConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is present but unparseable or
    /// out of range. Absent variables fall back to defaults; they are never
    /// silently defaulted when malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from any variable lookup.
    ///
    /// Separated from [`Self::from_env`] so validation can be tested
    /// without mutating the process environment.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = parse_or(&lookup, "CARTWHEEL_HOST", IpAddr::V4(Ipv4Addr::LOCALHOST))?;
        let port = parse_or(&lookup, "CARTWHEEL_PORT", DEFAULT_PORT)?;
        let nth_order: u64 = parse_or(&lookup, "CARTWHEEL_NTH_ORDER", DEFAULT_NTH_ORDER)?;
        if nth_order == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "CARTWHEEL_NTH_ORDER".to_string(),
                "must be positive".to_string(),
            ));
        }
        let percentage: u32 = parse_or(
            &lookup,
            "CARTWHEEL_DISCOUNT_PERCENTAGE",
            DEFAULT_DISCOUNT_PERCENTAGE,
        )?;
        if percentage > 100 {
            return Err(ConfigError::InvalidEnvVar(
                "CARTWHEEL_DISCOUNT_PERCENTAGE".to_string(),
                "must be between 0 and 100".to_string(),
            ));
        }

        Ok(Self {
            host,
            port,
            discount: DiscountConfig {
                nth_order,
                discount_percentage: Decimal::from(percentage),
            },
        })
    }

    /// The socket address to bind.
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(name.to_string(), e.to_string())),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_string())
        }
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ServerConfig::from_lookup(|_| None).expect("defaults are valid");
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.discount.nth_order, DEFAULT_NTH_ORDER);
        assert_eq!(
            config.discount.discount_percentage,
            Decimal::from(DEFAULT_DISCOUNT_PERCENTAGE)
        );
    }

    #[test]
    fn set_variables_override_the_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("CARTWHEEL_HOST", "0.0.0.0"),
            ("CARTWHEEL_PORT", "8080"),
            ("CARTWHEEL_NTH_ORDER", "3"),
            ("CARTWHEEL_DISCOUNT_PERCENTAGE", "25"),
        ]))
        .expect("valid overrides");
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(config.port, 8080);
        assert_eq!(config.discount.nth_order, 3);
        assert_eq!(config.discount.discount_percentage, Decimal::from(25));
    }

    #[test]
    fn zero_reward_interval_is_rejected() {
        let err = ServerConfig::from_lookup(lookup_from(&[("CARTWHEEL_NTH_ORDER", "0")]))
            .expect_err("interval must be positive");
        let message = err.to_string();
        assert!(message.contains("CARTWHEEL_NTH_ORDER"), "{message}");
        assert!(message.contains("must be positive"), "{message}");
    }

    #[test]
    fn percentage_above_100_is_rejected() {
        let err =
            ServerConfig::from_lookup(lookup_from(&[("CARTWHEEL_DISCOUNT_PERCENTAGE", "150")]))
                .expect_err("percentage out of range");
        let message = err.to_string();
        assert!(message.contains("CARTWHEEL_DISCOUNT_PERCENTAGE"), "{message}");
        assert!(message.contains("between 0 and 100"), "{message}");
    }

    #[test]
    fn malformed_values_are_errors_not_defaults() {
        for (name, value) in [
            ("CARTWHEEL_HOST", "not-an-ip"),
            ("CARTWHEEL_PORT", "later"),
            ("CARTWHEEL_NTH_ORDER", "five"),
            ("CARTWHEEL_DISCOUNT_PERCENTAGE", "-10"),
        ] {
            let err = ServerConfig::from_lookup(lookup_from(&[(name, value)]))
                .expect_err("malformed value must not fall back");
            assert!(err.to_string().contains(name), "{err}");
        }
    }
}
