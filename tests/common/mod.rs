//! Common test utilities for integration tests

#![allow(dead_code)]

pub mod helpers;

pub use helpers::*;
