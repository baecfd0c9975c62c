//! Port traits consumed by the renderer.

pub mod config_port;
