//! ClipCast Core - Foundation types for the timeline engine
//!
//! This crate provides the fundamental types used throughout ClipCast:
//! - Time representation (seconds-based `TimeRange`, `FrameRate`)
//! - Error types shared across crates

pub mod error;
pub mod time;

pub use error::{ClipcastError, Result};
pub use time::{unix_now, FrameRate, TimeRange};
