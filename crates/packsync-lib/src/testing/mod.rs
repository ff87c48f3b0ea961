//! Test fixtures for packsync
//!
//! Compiled for unit tests and for downstream crates enabling the
//! `test-utils` feature.

pub mod filesystem;

pub use filesystem::{InstanceFixture, TempDirFixture};
