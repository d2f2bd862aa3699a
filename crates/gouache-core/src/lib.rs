//! # gouache-core
//!
//! Core types and primitives for the Gouache map-style engine.
//! This crate contains foundational types shared across all Gouache crates:
//! colors, geographic coordinates, configuration, and error types.

pub mod color;
pub mod config;
pub mod error;
pub mod geo;

pub use color::{hex_from_color_text, Color};
pub use config::*;
pub use error::{GouacheError, GouacheResult};
pub use geo::{LngLat, MapView};
