//! Command and Response models for the cache driver
//!
//! This module defines the DTOs (Data Transfer Objects) read from and
//! written to the driver's JSON Lines streams.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::Command;
pub use responses::{GetResponse, RemoveResponse, StatsResponse};
