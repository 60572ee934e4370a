// tests/mod.rs
//! Test suite organization for reddit-harvest
//!
//! Integration tests drive the public API end to end against scripted
//! listing sources and on-disk fixtures.

#[cfg(test)]
pub mod common;

#[cfg(test)]
pub mod integration;
