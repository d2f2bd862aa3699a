use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use gouache_core::GouacheResult;

/// Unique identifier for a layer.
///
/// Uniqueness within a document is an input-data invariant the engine relies
/// on for lookup but does not enforce; with duplicate ids the first match
/// wins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(pub String);

impl LayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The draw type of a layer. Types the editor has no special handling for
/// are carried through untouched as [`LayerKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LayerKind {
    Fill,
    Line,
    Background,
    Symbol,
    Circle,
    Raster,
    Other(String),
}

impl LayerKind {
    pub fn as_str(&self) -> &str {
        match self {
            LayerKind::Fill => "fill",
            LayerKind::Line => "line",
            LayerKind::Background => "background",
            LayerKind::Symbol => "symbol",
            LayerKind::Circle => "circle",
            LayerKind::Raster => "raster",
            LayerKind::Other(s) => s,
        }
    }
}

impl From<String> for LayerKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "fill" => LayerKind::Fill,
            "line" => LayerKind::Line,
            "background" => LayerKind::Background,
            "symbol" => LayerKind::Symbol,
            "circle" => LayerKind::Circle,
            "raster" => LayerKind::Raster,
            _ => LayerKind::Other(s),
        }
    }
}

impl From<LayerKind> for String {
    fn from(kind: LayerKind) -> Self {
        match kind {
            LayerKind::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for LayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which property block of a layer an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyBlock {
    Paint,
    Layout,
}

impl PropertyBlock {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyBlock::Paint => "paint",
            PropertyBlock::Layout => "layout",
        }
    }
}

impl std::fmt::Display for PropertyBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One draw pass within a style document.
///
/// Only the fields the editor works with are modeled; everything else a
/// renderer may care about (`source`, `filter`, zoom bounds, …) survives in
/// `extra` untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    /// Unique layer identifier. Never changed by a property edit.
    pub id: LayerId,
    /// The draw type of this layer.
    #[serde(rename = "type")]
    pub kind: LayerKind,
    /// Source layer this layer draws from, if any.
    #[serde(rename = "source-layer", default, skip_serializing_if = "Option::is_none")]
    pub source_layer: Option<String>,
    /// Visual appearance properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paint: Option<Map<String, Value>>,
    /// Presentation behavior properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Map<String, Value>>,
    /// All other layer fields, carried through opaquely.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Layer {
    /// Create a new layer with empty property blocks.
    pub fn new(id: LayerId, kind: LayerKind) -> Self {
        Self {
            id,
            kind,
            source_layer: None,
            paint: None,
            layout: None,
            extra: Map::new(),
        }
    }

    /// Builder: set a paint property.
    pub fn with_paint(mut self, key: impl Into<String>, value: Value) -> Self {
        self.paint
            .get_or_insert_with(Map::new)
            .insert(key.into(), value);
        self
    }

    /// Builder: set a layout property.
    pub fn with_layout(mut self, key: impl Into<String>, value: Value) -> Self {
        self.layout
            .get_or_insert_with(Map::new)
            .insert(key.into(), value);
        self
    }

    /// Builder: set the source layer.
    pub fn with_source_layer(mut self, source_layer: impl Into<String>) -> Self {
        self.source_layer = Some(source_layer.into());
        self
    }

    /// Borrow a property block, if present.
    pub fn block(&self, block: PropertyBlock) -> Option<&Map<String, Value>> {
        match block {
            PropertyBlock::Paint => self.paint.as_ref(),
            PropertyBlock::Layout => self.layout.as_ref(),
        }
    }

    /// Mutably borrow a property block, creating it when absent.
    pub fn block_mut(&mut self, block: PropertyBlock) -> &mut Map<String, Value> {
        match block {
            PropertyBlock::Paint => self.paint.get_or_insert_with(Map::new),
            PropertyBlock::Layout => self.layout.get_or_insert_with(Map::new),
        }
    }

    /// Borrow a paint property value.
    pub fn paint_value(&self, key: &str) -> Option<&Value> {
        self.paint.as_ref().and_then(|p| p.get(key))
    }

    /// Mutably borrow a paint property value. Never creates the key.
    pub fn paint_value_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.paint.as_mut().and_then(|p| p.get_mut(key))
    }

    /// Whether this layer draws. Absence of `layout.visibility` means visible.
    pub fn is_visible(&self) -> bool {
        self.layout
            .as_ref()
            .and_then(|l| l.get("visibility"))
            .and_then(Value::as_str)
            != Some("none")
    }

    /// Flip `layout.visibility` between `visible` and `none`, creating the
    /// layout block when absent. Returns the new visibility.
    pub fn toggle_visibility(&mut self) -> bool {
        let was_visible = self.is_visible();
        let visibility = if was_visible { "none" } else { "visible" };
        self.block_mut(PropertyBlock::Layout)
            .insert("visibility".to_string(), Value::from(visibility));
        !was_visible
    }

    /// Human-readable name derived from the id: kebab/snake segments,
    /// title-cased, space-joined.
    pub fn display_name(&self) -> String {
        self.id
            .0
            .split(['-', '_'])
            .map(crate::property::title_case)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The whole style — an ordered list of layers (later layers draw on top)
/// plus document-level metadata the editor passes through opaquely.
///
/// Exactly one document is live per editing session. Edits mutate it in
/// place; it is replaced wholesale only on reset/load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleDocument {
    /// Style name, set as a side effect of export.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Ordered draw layers.
    #[serde(default)]
    pub layers: Vec<Layer>,
    /// Everything else: version, sources, sprite/glyph URLs, …
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl StyleDocument {
    /// Parse a style document from JSON text.
    pub fn from_json_str(json: &str) -> GouacheResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to indented JSON, the export format.
    pub fn to_json_pretty(&self) -> GouacheResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Add a layer on top of the draw order.
    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// Get a layer by its id (linear scan; the list is draw-ordered).
    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id.0 == id)
    }

    /// Get a mutable reference to a layer by its id.
    pub fn layer_mut(&mut self, id: &str) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id.0 == id)
    }

    /// Number of layers in the document.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}
