//! Application Layer - Discovery pipeline
//!
//! Coordinates the market data feed and the datastore through their port
//! traits.

pub mod discovery;

pub use discovery::{DiscoveryPipeline, DiscoverySummary};
