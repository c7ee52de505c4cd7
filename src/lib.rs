//! samplekit: bounded sample-buffer primitives for data-acquisition pipelines.
//!
//! The central type is [`SampleBuffer`](handle::SampleBuffer), a shared handle
//! over a [`SampleStore`](ds::SampleStore) that retains `f64` samples under one
//! of three policies: unbounded growth, fixed window, or circular overwrite.

pub mod config;
pub mod ds;
pub mod error;
pub mod handle;
pub mod policy;
pub mod prelude;
pub mod registry;
pub mod stats;
