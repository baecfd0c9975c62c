//! viewconf — typed display configuration for the genome view renderer.
//!
//! Hexagonal layout: the store and its value types live in [`domain`], the
//! accessor protocol the renderer reads through is in [`ports`], and the
//! textual INI format is in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
