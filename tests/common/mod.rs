//! Shared test utilities for lazysearch integration harnesses.
//!
//! Import everything via `mod common; use common::*;` at the top of each
//! harness file.

#![allow(dead_code)]

pub mod builders;
pub mod worlds;

pub use builders::*;
pub use worlds::*;
