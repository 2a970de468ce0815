//! Common test utilities for buildlayers integration and property tests.
//!
//! This module provides:
//! - `TestLayers`: an isolated layers root with captured console output
//! - Fixtures: reusable file contents

#![allow(dead_code)]


pub use env::*;
pub use fixtures::*;
