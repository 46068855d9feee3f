//! Carousel timing configuration.
//!
//! Loads from environment variables with sensible defaults:
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `MARQUEE_CYCLE_MS` | Time each slide is shown while playing | `8000` |
//! | `MARQUEE_TICK_MS` | Progress update granularity | `16` |
//! | `MARQUEE_AUTOPLAY` | Start playing on mount (`true`/`false`/`1`/`0`) | `true` |

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Default length of one cycle (one slide on screen)
pub const DEFAULT_CYCLE_DURATION: Duration = Duration::from_millis(8000);

/// Default progress tick, roughly one frame at 60 Hz
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Errors from building a [`CarouselConfig`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A cycle must take some time, or every tick would advance
    #[error("Cycle duration must be greater than zero")]
    ZeroCycleDuration,

    /// A zero tick would spin the timer loop
    #[error("Tick interval must be greater than zero")]
    ZeroTickInterval,

    /// The progress bar would jump straight from 0 to 1
    #[error("Tick interval {tick:?} is longer than the cycle {cycle:?}")]
    TickExceedsCycle {
        /// Configured tick interval
        tick: Duration,
        /// Configured cycle duration
        cycle: Duration,
    },

    /// An environment variable held something unparsable
    #[error("Invalid value {value:?} for {var}")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// Raw value found
        value: String,
    },
}

/// Autoplay timing for one carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// How long a slide stays on screen before autoplay advances
    pub cycle_duration: Duration,
    /// How often progress is recomputed while playing
    pub tick_interval: Duration,
    /// Whether the carousel starts playing
    pub autoplay: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            cycle_duration: DEFAULT_CYCLE_DURATION,
            tick_interval: DEFAULT_TICK_INTERVAL,
            autoplay: true,
        }
    }
}

impl CarouselConfig {
    /// Set the cycle duration
    #[must_use]
    pub const fn with_cycle_duration(mut self, cycle: Duration) -> Self {
        self.cycle_duration = cycle;
        self
    }

    /// Set the tick interval
    #[must_use]
    pub const fn with_tick_interval(mut self, tick: Duration) -> Self {
        self.tick_interval = tick;
        self
    }

    /// Set whether the carousel starts playing
    #[must_use]
    pub const fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    /// Load configuration from `MARQUEE_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is unparsable or the resulting
    /// timing is unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// See [`CarouselConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let defaults = Self::default();

        let millis = |var: &'static str, default: Duration| match lookup(var) {
            None => Ok(default),
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidValue { var, value: raw }),
        };

        let config = Self {
            cycle_duration: millis("MARQUEE_CYCLE_MS", defaults.cycle_duration)?,
            tick_interval: millis("MARQUEE_TICK_MS", defaults.tick_interval)?,
            autoplay: match lookup("MARQUEE_AUTOPLAY") {
                None => defaults.autoplay,
                Some(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidValue {
                    var: "MARQUEE_AUTOPLAY",
                    value: raw,
                })?,
            },
        };

        config.validate()
    }

    /// Check that the timing is usable
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.cycle_duration.is_zero() {
            return Err(ConfigError::ZeroCycleDuration);
        }
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.tick_interval > self.cycle_duration {
            return Err(ConfigError::TickExceedsCycle {
                tick: self.tick_interval,
                cycle: self.cycle_duration,
            });
        }
        Ok(self)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let vars: HashMap<&'static str, String> =
            pairs.iter().map(|(k, v)| (*k, (*v).to_string())).collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CarouselConfig::from_lookup(lookup(&[])).unwrap_or_default();
        assert_eq!(config.cycle_duration, Duration::from_millis(8000));
        assert_eq!(config.tick_interval, Duration::from_millis(16));
        assert!(config.autoplay);
    }

    #[test]
    fn test_overrides() {
        let config = CarouselConfig::from_lookup(lookup(&[
            ("MARQUEE_CYCLE_MS", "5000"),
            ("MARQUEE_TICK_MS", " 33 "),
            ("MARQUEE_AUTOPLAY", "off"),
        ]));
        assert_eq!(
            config,
            Ok(CarouselConfig {
                cycle_duration: Duration::from_millis(5000),
                tick_interval: Duration::from_millis(33),
                autoplay: false,
            })
        );
    }

    #[test]
    fn test_unparsable_value() {
        let config = CarouselConfig::from_lookup(lookup(&[("MARQUEE_CYCLE_MS", "8s")]));
        assert_eq!(
            config,
            Err(ConfigError::InvalidValue {
                var: "MARQUEE_CYCLE_MS",
                value: "8s".to_string(),
            })
        );

        let config = CarouselConfig::from_lookup(lookup(&[("MARQUEE_AUTOPLAY", "maybe")]));
        assert!(matches!(config, Err(ConfigError::InvalidValue { var: "MARQUEE_AUTOPLAY", .. })));
    }

    #[test]
    fn test_validation() {
        let zero_cycle = CarouselConfig::default().with_cycle_duration(Duration::ZERO);
        assert_eq!(zero_cycle.validate(), Err(ConfigError::ZeroCycleDuration));

        let zero_tick = CarouselConfig::default().with_tick_interval(Duration::ZERO);
        assert_eq!(zero_tick.validate(), Err(ConfigError::ZeroTickInterval));

        let slow_tick = CarouselConfig::default()
            .with_cycle_duration(Duration::from_millis(10))
            .with_tick_interval(Duration::from_millis(20));
        assert!(matches!(slow_tick.validate(), Err(ConfigError::TickExceedsCycle { .. })));

        assert!(CarouselConfig::default().validate().is_ok());
    }
}
