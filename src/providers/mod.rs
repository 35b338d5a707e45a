//! Provider implementations

pub mod cache;

pub use cache::CacheProvider;
