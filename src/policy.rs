//! Retention policies for sample storage.
//!
//! A [`RetentionPolicy`] decides what happens when a push would exceed the
//! nominal capacity of a store:
//!
//! | Policy     | Behavior on overflow                              |
//! |------------|---------------------------------------------------|
//! | `Open`     | Capacity grows; nothing is ever dropped           |
//! | `Fixed`    | The pushed value is silently dropped              |
//! | `Circular` | The oldest retained sample is overwritten         |
//!
//! The enum round-trips through strings for the configuration surface in
//! [`crate::config`].

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Retention strategy for a [`SampleStore`](crate::ds::SampleStore).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RetentionPolicy {
    /// Unbounded growth: capacity is extended as needed.
    Open,
    /// Fixed recording window: pushes past capacity are dropped.
    #[default]
    Fixed,
    /// Circular overwrite: pushes past capacity replace the oldest sample.
    Circular,
}

impl RetentionPolicy {
    /// Returns the canonical lowercase name used by the configuration surface.
    ///
    /// # Example
    ///
    /// ```
    /// use samplekit::policy::RetentionPolicy;
    ///
    /// assert_eq!(RetentionPolicy::Circular.as_str(), "circular");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            RetentionPolicy::Open => "open",
            RetentionPolicy::Fixed => "fixed",
            RetentionPolicy::Circular => "circular",
        }
    }
}

impl fmt::Display for RetentionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RetentionPolicy {
    type Err = ConfigError;

    /// Parses a policy name, case-insensitively.
    ///
    /// # Example
    ///
    /// ```
    /// use samplekit::policy::RetentionPolicy;
    ///
    /// assert_eq!("Circular".parse(), Ok(RetentionPolicy::Circular));
    /// assert!("ring".parse::<RetentionPolicy>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "open" => Ok(RetentionPolicy::Open),
            "fixed" => Ok(RetentionPolicy::Fixed),
            "circular" => Ok(RetentionPolicy::Circular),
            _ => Err(ConfigError::InvalidValue {
                property: "policy".into(),
                value: s.into(),
            }),
        }
    }
}
