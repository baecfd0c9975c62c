//! Concrete adapters: the on-disk text format.

pub mod ini_format;
