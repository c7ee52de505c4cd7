//! Error types for the samplekit library.
//!
//! ## Key Components
//!
//! - [`BufferError`]: Returned when a buffer operation violates its calling
//!   contract (e.g. logical index outside `[0, len)`).
//! - [`ConfigError`]: Returned when the string-keyed configuration surface is
//!   given an unknown property name or an unparsable value.
//!
//! ## Example Usage
//!
//! ```
//! use samplekit::error::BufferError;
//! use samplekit::handle::SampleBuffer;
//!
//! let buf = SampleBuffer::new(4);
//! buf.push(1.0);
//!
//! // Out-of-range access is surfaced to the caller, never swallowed.
//! assert_eq!(buf.get(0), Ok(1.0));
//! assert_eq!(buf.get(3), Err(BufferError::IndexOutOfRange { index: 3, len: 1 }));
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// BufferError
// ---------------------------------------------------------------------------

/// Error returned when a buffer operation is called outside its contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// A logical index was outside `[0, len)`.
    IndexOutOfRange {
        /// The requested logical index.
        index: usize,
        /// The logical size of the buffer at the time of the call.
        len: usize,
    },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for buffer of length {len}")
            },
        }
    }
}

impl std::error::Error for BufferError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned by the string-keyed configuration surface.
///
/// Produced by [`set_property`](crate::config::set_property) and
/// [`property`](crate::config::property) when a property name is not part of
/// the configuration surface or a value cannot be parsed for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The property name is not part of the configuration surface.
    UnknownProperty(String),
    /// The value could not be parsed for the named property.
    InvalidValue {
        /// The property the value was supplied for.
        property: String,
        /// The rejected value, verbatim.
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownProperty(name) => {
                write!(f, "unknown buffer property `{name}`")
            },
            ConfigError::InvalidValue { property, value } => {
                write!(f, "invalid value `{value}` for buffer property `{property}`")
            },
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_error_display_names_index_and_len() {
        let err = BufferError::IndexOutOfRange { index: 7, len: 3 };
        assert_eq!(err.to_string(), "index 7 out of range for buffer of length 3");
    }

    #[test]
    fn config_error_display_names_property() {
        let err = ConfigError::UnknownProperty("depth".into());
        assert_eq!(err.to_string(), "unknown buffer property `depth`");

        let err = ConfigError::InvalidValue {
            property: "policy".into(),
            value: "ring".into(),
        };
        assert_eq!(err.to_string(), "invalid value `ring` for buffer property `policy`");
    }
}
