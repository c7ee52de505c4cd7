//! Raw data structures backing the public buffer types.

pub mod sample_store;

pub use sample_store::SampleStore;
