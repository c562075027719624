//! harvest-storage
//!
//! Object storage for generated reports. Thin wrapper around the S3 SDK,
//! pointed at any S3-compatible endpoint (IBM COS in production).

pub mod client;
pub mod error;
pub mod mock;
pub mod objects;
pub mod store;
