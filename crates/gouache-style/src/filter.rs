//! Layer list filtering: the draw-type chips and the free-text search over
//! layer ids and source layers.

use std::str::FromStr;

use gouache_core::GouacheError;

use crate::document::{Layer, LayerKind, StyleDocument};

/// The layer list chips. `All` admits every kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayerFilter {
    #[default]
    All,
    Fill,
    Line,
    Background,
    Symbol,
}

impl LayerFilter {
    pub const ALL: [LayerFilter; 5] = [
        LayerFilter::All,
        LayerFilter::Fill,
        LayerFilter::Line,
        LayerFilter::Background,
        LayerFilter::Symbol,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LayerFilter::All => "All",
            LayerFilter::Fill => "Fill",
            LayerFilter::Line => "Line",
            LayerFilter::Background => "Background",
            LayerFilter::Symbol => "Symbol",
        }
    }

    fn kind(&self) -> Option<LayerKind> {
        match self {
            LayerFilter::All => None,
            LayerFilter::Fill => Some(LayerKind::Fill),
            LayerFilter::Line => Some(LayerKind::Line),
            LayerFilter::Background => Some(LayerKind::Background),
            LayerFilter::Symbol => Some(LayerKind::Symbol),
        }
    }

    /// Whether a layer passes this chip.
    pub fn admits(&self, layer: &Layer) -> bool {
        self.kind().map_or(true, |kind| layer.kind == kind)
    }
}

impl FromStr for LayerFilter {
    type Err = GouacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(LayerFilter::All),
            "fill" => Ok(LayerFilter::Fill),
            "line" => Ok(LayerFilter::Line),
            "background" => Ok(LayerFilter::Background),
            "symbol" => Ok(LayerFilter::Symbol),
            other => Err(GouacheError::InvalidArgument(format!(
                "unknown layer filter '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for LayerFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label().to_lowercase())
    }
}

/// Layers passing the chip and the search box, in draw order.
///
/// The query is trimmed and matched case-insensitively against each layer's
/// id and source layer; a blank query imposes no restriction.
pub fn filter_layers<'a>(
    doc: &'a StyleDocument,
    filter: LayerFilter,
    query: &str,
) -> Vec<&'a Layer> {
    let needle = query.trim().to_lowercase();
    doc.layers
        .iter()
        .filter(|layer| filter.admits(layer))
        .filter(|layer| needle.is_empty() || layer_matches(layer, &needle))
        .collect()
}

fn layer_matches(layer: &Layer, needle: &str) -> bool {
    layer.id.0.to_lowercase().contains(needle)
        || layer
            .source_layer
            .as_deref()
            .map_or(false, |source| source.to_lowercase().contains(needle))
}
