//! # gouache-style
//!
//! The style document model and its editing operations: layers, paint
//! property classification, the positional expression codecs, and the
//! document mutators every editing surface goes through.

pub mod document;
pub mod expr;
pub mod filter;
pub mod mutate;
pub mod preset;
pub mod property;
pub mod stops;

pub use document::{Layer, LayerId, LayerKind, PropertyBlock, StyleDocument};
pub use expr::{InterpolateExpr, InterpolationKind, MatchCase, MatchExpr, Stop, StopSlot};
pub use filter::{filter_layers, LayerFilter};
pub use preset::{default_presets, ColorCategory, ColorPreset};
pub use property::PropertyKind;
pub use stops::StopsTable;
