//! The editing session: one live document, the camera, the selection, and
//! every edit path a surface calls. Each applied edit re-renders by pushing
//! the whole document to the map surface, which diffs internally.

use chrono::{DateTime, Utc};
use serde_json::{Number, Value};
use uuid::Uuid;

use gouache_core::{Color, GouacheConfig, GouacheError, GouacheResult, LngLat, MapView};
use gouache_style::{
    default_presets, expr, filter_layers, mutate, ColorCategory, ColorPreset, Layer, LayerFilter,
    PropertyBlock, StopSlot, StyleDocument,
};

use crate::fetch::StyleSource;
use crate::render::MapRenderer;
use crate::search::{Geocoder, Place, SearchState};

/// Zoom applied when navigating to a search result.
const PLACE_ZOOM: f64 = 12.0;

/// An exported style: the suggested file name and the document text.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleExport {
    pub file_name: String,
    pub json: String,
}

/// One live editing session over a style document.
pub struct EditorSession {
    id: Uuid,
    /// Pristine copy of the loaded document, restored on reset.
    base: StyleDocument,
    document: StyleDocument,
    renderer: Box<dyn MapRenderer>,
    /// The configured starting camera.
    home: MapView,
    view: MapView,
    selected: Option<String>,
    presets: Vec<ColorPreset>,
    filter: LayerFilter,
    layer_query: String,
    search: SearchState,
    style_name: String,
    revision: u64,
    last_modified: Option<DateTime<Utc>>,
}

impl EditorSession {
    /// Open a session over `document` and push it to the surface.
    pub fn new(
        document: StyleDocument,
        renderer: Box<dyn MapRenderer>,
        config: &GouacheConfig,
    ) -> Self {
        let home = config.map.initial_view();
        let mut session = Self {
            id: Uuid::new_v4(),
            base: document.clone(),
            document,
            renderer,
            home,
            view: home,
            selected: None,
            presets: default_presets(),
            filter: LayerFilter::All,
            layer_query: String::new(),
            search: SearchState::new(),
            style_name: config.style.name.clone(),
            revision: 0,
            last_modified: None,
        };
        session.renderer.set_style(&session.document);
        tracing::info!(
            "session {} opened with {} layer(s)",
            session.id,
            session.document.layer_count()
        );
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn document(&self) -> &StyleDocument {
        &self.document
    }

    /// Count of applied edits since the document was loaded or reset.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_dirty(&self) -> bool {
        self.revision > 0
    }

    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified
    }

    /// Wall-clock time of the last applied edit, or `Not yet`.
    pub fn last_modified_label(&self) -> String {
        match &self.last_modified {
            Some(at) => at.format("%H:%M:%S").to_string(),
            None => "Not yet".to_string(),
        }
    }

    pub fn view(&self) -> MapView {
        self.view
    }

    pub fn presets(&self) -> &[ColorPreset] {
        &self.presets
    }

    pub fn style_name(&self) -> &str {
        &self.style_name
    }

    pub fn set_style_name(&mut self, name: impl Into<String>) {
        self.style_name = name.into();
    }

    /// Record an applied edit and push the document to the surface.
    fn touch(&mut self) {
        self.revision += 1;
        self.last_modified = Some(Utc::now());
        self.renderer.set_style(&self.document);
    }

    /// Mutably borrow a paint property, saying which lookup failed.
    fn paint_value_mut(&mut self, layer_id: &str, key: &str) -> GouacheResult<&mut Value> {
        if self.document.layer(layer_id).is_none() {
            return Err(GouacheError::LayerNotFound(layer_id.to_string()));
        }
        self.document
            .property_mut(layer_id, PropertyBlock::Paint, key)
            .ok_or_else(|| {
                GouacheError::InvalidArgument(format!(
                    "layer '{}' has no paint property '{}'",
                    layer_id, key
                ))
            })
    }

    // Selection and layer listing

    /// Select a layer for subsequent panel edits. Unknown ids are refused.
    pub fn select_layer(&mut self, layer_id: &str) -> bool {
        if self.document.layer(layer_id).is_some() {
            self.selected = Some(layer_id.to_string());
            true
        } else {
            tracing::debug!("cannot select unknown layer '{}'", layer_id);
            false
        }
    }

    pub fn selected_layer(&self) -> Option<&Layer> {
        self.selected
            .as_deref()
            .and_then(|id| self.document.layer(id))
    }

    pub fn set_layer_filter(&mut self, filter: LayerFilter) {
        self.filter = filter;
    }

    pub fn set_layer_query(&mut self, query: impl Into<String>) {
        self.layer_query = query.into();
    }

    /// Layers passing the current chip and search box, in draw order.
    pub fn filtered_layers(&self) -> Vec<&Layer> {
        filter_layers(&self.document, self.filter, &self.layer_query)
    }

    // Property edits

    /// Write a property value. An unknown layer is ignored; the return
    /// value says whether the edit landed.
    pub fn set_property(
        &mut self,
        layer_id: &str,
        block: PropertyBlock,
        key: &str,
        value: Value,
    ) -> bool {
        let applied = self.document.set_property(layer_id, block, key, value);
        if applied {
            self.touch();
        }
        applied
    }

    /// Write a color-valued paint property as `rgba(r, g, b, 1)` text.
    pub fn set_color(&mut self, layer_id: &str, key: &str, color: Color) -> bool {
        self.set_property(
            layer_id,
            PropertyBlock::Paint,
            key,
            Value::from(color.to_rgba_string()),
        )
    }

    /// Write an opacity-valued paint property from a 0..=100 percentage.
    pub fn set_opacity_percent(&mut self, layer_id: &str, key: &str, percent: f64) -> bool {
        if !percent.is_finite() {
            tracing::debug!("ignoring non-finite opacity {}", percent);
            return false;
        }
        let fraction = (percent / 100.0).clamp(0.0, 1.0);
        // A whole-number fraction (0 or 1) is written as an integer.
        let value = if fraction.fract() == 0.0 {
            Value::from(fraction as i64)
        } else {
            Value::from(fraction)
        };
        self.set_property(layer_id, PropertyBlock::Paint, key, value)
    }

    /// Flip a layer's visibility. Returns the new visibility, or `None`
    /// for an unknown layer.
    pub fn toggle_visibility(&mut self, layer_id: &str) -> Option<bool> {
        let now_visible = self.document.toggle_layer_visibility(layer_id)?;
        if let Some(layer) = self.document.layer(layer_id) {
            tracing::info!(
                "{} {}",
                layer.display_name(),
                if now_visible { "shown" } else { "hidden" }
            );
        }
        self.touch();
        Some(now_visible)
    }

    /// Apply a preset color to every layer in its category and remember it
    /// on the swatch. Returns the number of layers touched.
    pub fn apply_preset(&mut self, category: ColorCategory, color: Color) -> usize {
        if let Some(preset) = self.presets.iter_mut().find(|p| p.category == category) {
            preset.color = color;
        }
        let touched = self.document.apply_category_color(category, color);
        self.touch();
        tracing::info!("all {} colors updated", category);
        touched
    }

    // Zoom ramp edits (interpolate arrays and stops tables)

    pub fn update_ramp_stop(
        &mut self,
        layer_id: &str,
        key: &str,
        index: usize,
        slot: StopSlot,
        new_value: Value,
    ) -> GouacheResult<()> {
        let value = self.paint_value_mut(layer_id, key)?;
        mutate::update_ramp_stop(value, index, slot, new_value)?;
        self.touch();
        Ok(())
    }

    pub fn add_ramp_stop(&mut self, layer_id: &str, key: &str) -> GouacheResult<()> {
        let value = self.paint_value_mut(layer_id, key)?;
        mutate::add_ramp_stop(value)?;
        self.touch();
        Ok(())
    }

    pub fn remove_ramp_stop(&mut self, layer_id: &str, key: &str, index: usize) -> GouacheResult<()> {
        let value = self.paint_value_mut(layer_id, key)?;
        mutate::remove_ramp_stop(value, index)?;
        self.touch();
        Ok(())
    }

    // Match expression edits

    pub fn update_match_case(
        &mut self,
        layer_id: &str,
        key: &str,
        case_index: usize,
        new_value: Value,
    ) -> GouacheResult<()> {
        let value = self.paint_value_mut(layer_id, key)?;
        expr::update_match_case_result(value, case_index, new_value)?;
        self.touch();
        Ok(())
    }

    pub fn update_match_default(
        &mut self,
        layer_id: &str,
        key: &str,
        new_value: Value,
    ) -> GouacheResult<()> {
        let value = self.paint_value_mut(layer_id, key)?;
        expr::update_match_default(value, new_value)?;
        self.touch();
        Ok(())
    }

    // Dash pattern edits

    pub fn update_dash_segment(
        &mut self,
        layer_id: &str,
        key: &str,
        index: usize,
        length: Number,
    ) -> GouacheResult<()> {
        let value = self.paint_value_mut(layer_id, key)?;
        mutate::update_dash_segment(value, index, length)?;
        self.touch();
        Ok(())
    }

    pub fn add_dash_segment(&mut self, layer_id: &str, key: &str) -> GouacheResult<()> {
        let value = self.paint_value_mut(layer_id, key)?;
        mutate::add_dash_segment(value)?;
        self.touch();
        Ok(())
    }

    pub fn remove_dash_segment(
        &mut self,
        layer_id: &str,
        key: &str,
        index: usize,
    ) -> GouacheResult<()> {
        let value = self.paint_value_mut(layer_id, key)?;
        mutate::remove_dash_segment(value, index)?;
        self.touch();
        Ok(())
    }

    // Camera

    /// Move the camera. Camera moves are not document edits.
    pub fn fly_to(&mut self, center: LngLat, zoom: f64) {
        let view = MapView::new(center, zoom);
        self.view = view;
        self.renderer.fly_to(view);
    }

    /// Record a camera move reported by the surface itself. No command is
    /// sent back, so a surface echoing its own moves cannot loop.
    pub fn sync_view(&mut self, view: MapView) {
        self.view = view;
    }

    /// Fly back to the configured starting camera.
    pub fn reset_view(&mut self) {
        self.fly_to(self.home.center, self.home.zoom);
    }

    // Location search

    /// Run a search and install its results. Returns how many places were
    /// found; a blank query is refused.
    pub fn search(&mut self, geocoder: &dyn Geocoder, query: &str) -> GouacheResult<usize> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GouacheError::InvalidArgument(
                "search query is empty".to_string(),
            ));
        }
        let token = self.search.begin(query);
        let places = geocoder.search(query)?;
        if places.is_empty() {
            tracing::info!("no places found for '{}'", query);
        }
        self.search.complete(token, places);
        Ok(self.search.results().len())
    }

    pub fn search_results(&self) -> &[Place] {
        self.search.results()
    }

    /// Navigate to one of the current search results, then forget the
    /// search.
    pub fn go_to_result(&mut self, index: usize) -> GouacheResult<Place> {
        let place = self
            .search
            .results()
            .get(index)
            .cloned()
            .ok_or_else(|| {
                GouacheError::InvalidArgument(format!("no search result at index {}", index))
            })?;
        self.fly_to(place.center, PLACE_ZOOM);
        self.search.clear();
        tracing::info!("navigated to {}", place.name);
        Ok(place)
    }

    // Lifecycle

    /// Throw away all edits and restore the last fetched base document.
    pub fn reset(&mut self) {
        self.document = self.base.clone();
        self.selected = None;
        self.revision = 0;
        self.last_modified = None;
        self.renderer.set_style(&self.document);
        tracing::info!("session {} reset to base style", self.id);
    }

    /// Throw away all edits and refetch the base style from `source`. The
    /// fetched document becomes the new base; a failed fetch leaves the
    /// session exactly as it was.
    pub fn reset_from(&mut self, source: &dyn StyleSource, url: &str) -> GouacheResult<()> {
        let document = source.fetch_style(url)?;
        self.replace_document(document);
        tracing::info!("session {} reset from {}", self.id, url);
        Ok(())
    }

    /// Swap in a freshly loaded document as the new base.
    pub fn replace_document(&mut self, document: StyleDocument) {
        self.base = document.clone();
        self.document = document;
        self.selected = None;
        self.revision = 0;
        self.last_modified = None;
        self.renderer.set_style(&self.document);
    }

    /// Stamp the session's style name into the document and serialize it
    /// with two-space indentation. The file name always ends in `.json`.
    pub fn export(&mut self) -> GouacheResult<StyleExport> {
        let name = self.style_name.trim();
        let name = if name.is_empty() { "custom-style" } else { name };
        let file_name = if name.ends_with(".json") {
            name.to_string()
        } else {
            format!("{}.json", name)
        };
        self.document.name = Some(name.to_string());
        let json = self.document.to_json_pretty()?;
        tracing::info!("exported style as {}", file_name);
        Ok(StyleExport { file_name, json })
    }
}
