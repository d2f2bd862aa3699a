//! Quick color presets: one-click tinting of whole families of layers,
//! grouped by what their ids suggest they draw.

use std::str::FromStr;

use gouache_core::{Color, GouacheError};

use crate::document::Layer;

const ROAD_HINTS: &[&str] = &["road", "street", "motorway", "trunk", "primary", "secondary"];

/// A family of layers recolored together by a single swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCategory {
    Background,
    Water,
    Buildings,
    Roads,
}

impl ColorCategory {
    pub const ALL: [ColorCategory; 4] = [
        ColorCategory::Background,
        ColorCategory::Water,
        ColorCategory::Buildings,
        ColorCategory::Roads,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ColorCategory::Background => "background",
            ColorCategory::Water => "water",
            ColorCategory::Buildings => "buildings",
            ColorCategory::Roads => "roads",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ColorCategory::Background => "Background",
            ColorCategory::Water => "Water",
            ColorCategory::Buildings => "Buildings",
            ColorCategory::Roads => "Roads",
        }
    }

    /// Paint keys this category recolors, on layers that already carry them.
    pub fn paint_keys(&self) -> &'static [&'static str] {
        match self {
            ColorCategory::Background => &["background-color"],
            ColorCategory::Water => &["fill-color", "line-color"],
            ColorCategory::Buildings => &["fill-color"],
            ColorCategory::Roads => &["line-color"],
        }
    }

    /// Whether a layer belongs to this category, judged by its id.
    pub fn matches(&self, layer: &Layer) -> bool {
        let id = layer.id.0.to_lowercase();
        match self {
            ColorCategory::Background => id.contains("bg") || id == "background",
            ColorCategory::Water => id.contains("water"),
            ColorCategory::Buildings => id.contains("building"),
            ColorCategory::Roads => ROAD_HINTS.iter().any(|hint| id.contains(hint)),
        }
    }
}

impl FromStr for ColorCategory {
    type Err = GouacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorCategory::ALL
            .iter()
            .copied()
            .find(|category| category.id() == s)
            .ok_or_else(|| GouacheError::InvalidArgument(format!("unknown color category '{}'", s)))
    }
}

impl std::fmt::Display for ColorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// One preset swatch: a category plus the color it last applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPreset {
    pub category: ColorCategory,
    pub color: Color,
}

/// The swatches shown before any edits.
pub fn default_presets() -> Vec<ColorPreset> {
    vec![
        ColorPreset {
            category: ColorCategory::Background,
            color: Color::WHITE,
        },
        ColorPreset {
            category: ColorCategory::Water,
            color: Color::new(0xa9, 0xc4, 0xc4),
        },
        ColorPreset {
            category: ColorCategory::Buildings,
            color: Color::new(0xdc, 0xdc, 0xdc),
        },
        ColorPreset {
            category: ColorCategory::Roads,
            color: Color::BLACK,
        },
    ]
}
