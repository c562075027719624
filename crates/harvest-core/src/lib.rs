//! harvest-core
//!
//! Domain types, fixed report content and object key conventions shared by
//! the report service. No storage or rendering dependency.

pub mod content;
pub mod models;
pub mod s3_keys;
