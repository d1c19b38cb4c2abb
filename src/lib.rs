//! toolpulse crate
//!
//! This crate is an implementation detail of the `toolpulse` tool. Its API is fluid and may change without warning
//! and in a semver-incompatible way.

#[doc(hidden)]
pub mod commands;

#[doc(hidden)]
pub mod config;

#[doc(hidden)]
pub mod facts;

#[doc(hidden)]
pub mod metrics;

#[doc(hidden)]
pub mod misc;

#[doc(hidden)]
pub mod ranking;

#[doc(hidden)]
pub mod reports;

#[doc(hidden)]
pub mod snapshot;

#[doc(hidden)]
pub mod trends;

pub use commands::{Host, run};
