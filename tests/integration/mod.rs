// tests/integration/mod.rs
//! Integration tests for reddit-harvest
//!
//! These verify that strategies, pagination, window aggregation,
//! normalization and output work together through the public API.

#[cfg(test)]
mod listing_flow;

#[cfg(test)]
mod fixture_outputs;
