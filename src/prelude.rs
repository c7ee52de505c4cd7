//! Convenience re-exports of the public surface.

pub use crate::config::{property, set_property, BufferBuilder, PROP_CAPACITY, PROP_POLICY};
pub use crate::ds::SampleStore;
pub use crate::error::{BufferError, ConfigError};
pub use crate::handle::SampleBuffer;
pub use crate::policy::RetentionPolicy;
pub use crate::registry::BufferRegistry;
pub use crate::stats::StatsSnapshot;
