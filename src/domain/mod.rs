//! Core store and value types.

pub mod color;
pub mod config;
pub mod context;
pub mod error;
pub mod value;
