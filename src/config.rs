//! Buffer construction and the string-keyed configuration surface.
//!
//! Two entry points:
//!
//! - [`BufferBuilder`] for typed, in-code construction.
//! - [`set_property`] / [`property`] for the surrounding property system,
//!   which addresses configuration fields by name (`"capacity"`, `"policy"`)
//!   and carries values as strings.
//!
//! ## Example
//!
//! ```
//! use samplekit::config::{BufferBuilder, set_property, property};
//! use samplekit::policy::RetentionPolicy;
//!
//! let buf = BufferBuilder::new()
//!     .capacity(128)
//!     .policy(RetentionPolicy::Circular)
//!     .build();
//!
//! assert_eq!(property(&buf, "capacity"), Ok("128".to_string()));
//!
//! set_property(&buf, "policy", "fixed").unwrap();
//! assert_eq!(buf.policy(), RetentionPolicy::Fixed);
//! ```

use crate::error::ConfigError;
use crate::handle::SampleBuffer;
use crate::policy::RetentionPolicy;

/// Name of the capacity configuration field.
pub const PROP_CAPACITY: &str = "capacity";
/// Name of the policy configuration field.
pub const PROP_POLICY: &str = "policy";

/// Typed builder for a [`SampleBuffer`].
///
/// Defaults: capacity 0, `Fixed` policy — matching direct construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct BufferBuilder {
    capacity: usize,
    policy: RetentionPolicy,
}

impl BufferBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the nominal capacity.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the retention policy.
    pub fn policy(mut self, policy: RetentionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds the buffer.
    pub fn build(self) -> SampleBuffer {
        SampleBuffer::with_policy(self.capacity, self.policy)
    }
}

/// Applies a named configuration field to `buf`.
///
/// Capacity values are parsed as signed integers with negative values
/// coerced to zero, matching the lenient contract of the surrounding
/// property system. Policy values parse case-insensitively.
///
/// # Errors
///
/// [`ConfigError::UnknownProperty`] for names outside the surface,
/// [`ConfigError::InvalidValue`] for unparsable values.
pub fn set_property(buf: &SampleBuffer, name: &str, value: &str) -> Result<(), ConfigError> {
    match name {
        PROP_CAPACITY => {
            let requested: i64 = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                property: PROP_CAPACITY.into(),
                value: value.into(),
            })?;
            buf.set_capacity(requested.max(0) as usize);
            Ok(())
        },
        PROP_POLICY => {
            let policy: RetentionPolicy = value.trim().parse()?;
            buf.set_policy(policy);
            Ok(())
        },
        _ => Err(ConfigError::UnknownProperty(name.into())),
    }
}

/// Reads a named configuration field from `buf` as a string.
///
/// # Errors
///
/// [`ConfigError::UnknownProperty`] for names outside the surface.
pub fn property(buf: &SampleBuffer, name: &str) -> Result<String, ConfigError> {
    match name {
        PROP_CAPACITY => Ok(buf.capacity().to_string()),
        PROP_POLICY => Ok(buf.policy().as_str().to_string()),
        _ => Err(ConfigError::UnknownProperty(name.into())),
    }
}
