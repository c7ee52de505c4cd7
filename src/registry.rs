//! Named buffer registry for multi-channel pipelines.
//!
//! An acquisition pipeline owns one buffer per channel, addressed by channel
//! name. The registry hands out aliasing handles: a consumer looking up
//! `"temperature"` observes every sample the producer pushes through its own
//! handle, per the shared-ownership model in [`crate::handle`].

use rustc_hash::FxHashMap;

use crate::handle::SampleBuffer;

/// Name-keyed collection of channel buffers.
///
/// # Example
///
/// ```
/// use samplekit::registry::BufferRegistry;
/// use samplekit::handle::SampleBuffer;
/// use samplekit::policy::RetentionPolicy;
///
/// let mut registry = BufferRegistry::new();
/// registry.insert("temperature", SampleBuffer::with_policy(1024, RetentionPolicy::Circular));
///
/// let producer = registry.get("temperature").unwrap();
/// producer.push(21.5);
///
/// let consumer = registry.get("temperature").unwrap();
/// assert_eq!(consumer.to_vec(), vec![21.5]);
/// ```
#[derive(Debug, Default)]
pub struct BufferRegistry {
    channels: FxHashMap<String, SampleBuffer>,
}

impl BufferRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `buf` under `name`, returning the previously registered
    /// buffer if the name was taken.
    pub fn insert(&mut self, name: impl Into<String>, buf: SampleBuffer) -> Option<SampleBuffer> {
        self.channels.insert(name.into(), buf)
    }

    /// Returns an aliasing handle to the named buffer.
    pub fn get(&self, name: &str) -> Option<SampleBuffer> {
        self.channels.get(name).cloned()
    }

    /// Returns `true` if a buffer is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.channels.contains_key(name)
    }

    /// Unregisters and returns the named buffer.
    pub fn remove(&mut self, name: &str) -> Option<SampleBuffer> {
        self.channels.remove(name)
    }

    /// Iterates over registered channel names in arbitrary order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.channels.keys().map(String::as_str)
    }

    /// Number of registered channels.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Returns `true` if no channels are registered.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Drops every registration. Buffers stay alive for as long as handles
    /// held elsewhere do.
    pub fn clear(&mut self) {
        self.channels.clear();
    }
}
