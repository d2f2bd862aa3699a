//! Document-level edits: property writes, visibility toggles, category
//! tints, plus the value-level routing that sends stop and dash edits to
//! whichever form the property holds.

use serde_json::{Number, Value};

use gouache_core::{Color, GouacheError, GouacheResult};

use crate::document::{PropertyBlock, StyleDocument};
use crate::expr::{self, StopSlot};
use crate::preset::ColorCategory;
use crate::stops;

impl StyleDocument {
    /// Borrow a property value from a layer's block.
    pub fn property(&self, layer_id: &str, block: PropertyBlock, key: &str) -> Option<&Value> {
        self.layer(layer_id)
            .and_then(|layer| layer.block(block))
            .and_then(|map| map.get(key))
    }

    /// Mutably borrow a property value. Never creates the layer, the block,
    /// or the key.
    pub fn property_mut(
        &mut self,
        layer_id: &str,
        block: PropertyBlock,
        key: &str,
    ) -> Option<&mut Value> {
        let layer = self.layer_mut(layer_id)?;
        let map = match block {
            PropertyBlock::Paint => layer.paint.as_mut()?,
            PropertyBlock::Layout => layer.layout.as_mut()?,
        };
        map.get_mut(key)
    }

    /// Write a property value, creating the block and the key as needed.
    ///
    /// An unknown layer id is ignored; the return value says whether the
    /// write landed.
    pub fn set_property(
        &mut self,
        layer_id: &str,
        block: PropertyBlock,
        key: &str,
        value: Value,
    ) -> bool {
        match self.layer_mut(layer_id) {
            Some(layer) => {
                layer.block_mut(block).insert(key.to_string(), value);
                true
            }
            None => {
                tracing::debug!("ignoring {} edit for unknown layer '{}'", key, layer_id);
                false
            }
        }
    }

    /// Flip a layer's visibility. Returns the new visibility, or `None` for
    /// an unknown layer.
    pub fn toggle_layer_visibility(&mut self, layer_id: &str) -> Option<bool> {
        match self.layer_mut(layer_id) {
            Some(layer) => Some(layer.toggle_visibility()),
            None => {
                tracing::debug!("ignoring visibility toggle for unknown layer '{}'", layer_id);
                None
            }
        }
    }

    /// Tint every layer in `category` with `color`, rewriting only the
    /// category's paint keys each layer already carries. Returns the number
    /// of layers touched.
    pub fn apply_category_color(&mut self, category: ColorCategory, color: Color) -> usize {
        let rgba = color.to_rgba_string();
        let mut touched = 0;
        for layer in &mut self.layers {
            if !category.matches(layer) {
                continue;
            }
            let Some(paint) = layer.paint.as_mut() else {
                continue;
            };
            let mut wrote = false;
            for key in category.paint_keys() {
                if let Some(slot) = paint.get_mut(*key) {
                    *slot = Value::from(rgba.as_str());
                    wrote = true;
                }
            }
            if wrote {
                touched += 1;
            }
        }
        tracing::debug!("tinted {} {} layer(s) {}", touched, category, rgba);
        touched
    }
}

/// Number of stops in a zoom-ramp value of either form.
pub fn ramp_stop_count(value: &Value) -> usize {
    if stops::is_stops_table(value) {
        stops::stop_count(value)
    } else {
        expr::interpolate_stop_count(value)
    }
}

/// Route a stop overwrite to whichever zoom-ramp form the value holds.
pub fn update_ramp_stop(
    value: &mut Value,
    index: usize,
    slot: StopSlot,
    new_value: Value,
) -> GouacheResult<()> {
    if stops::is_stops_table(value) {
        stops::update_stop(value, index, slot, new_value)
    } else {
        expr::update_interpolate_stop(value, index, slot, new_value)
    }
}

/// Append a stop continuing the last one, in either zoom-ramp form.
pub fn add_ramp_stop(value: &mut Value) -> GouacheResult<()> {
    if stops::is_stops_table(value) {
        stops::add_stop(value)
    } else {
        expr::add_interpolate_stop(value)
    }
}

/// Remove a stop from either zoom-ramp form.
pub fn remove_ramp_stop(value: &mut Value, index: usize) -> GouacheResult<()> {
    if stops::is_stops_table(value) {
        stops::remove_stop(value, index)
    } else {
        expr::remove_interpolate_stop(value, index)
    }
}

/// Overwrite one segment length of a dash pattern.
pub fn update_dash_segment(value: &mut Value, index: usize, length: Number) -> GouacheResult<()> {
    let segments = dash_segments_mut(value)?;
    let len = segments.len();
    let slot = segments
        .get_mut(index)
        .ok_or_else(|| dash_out_of_range(index, len))?;
    *slot = Value::Number(length);
    Ok(())
}

/// Append a 1-unit segment to a dash pattern.
pub fn add_dash_segment(value: &mut Value) -> GouacheResult<()> {
    dash_segments_mut(value)?.push(Value::from(1));
    Ok(())
}

/// Remove one segment of a dash pattern. Unlike stops, a dash pattern may
/// be emptied; the renderer treats an empty pattern as a solid line.
pub fn remove_dash_segment(value: &mut Value, index: usize) -> GouacheResult<()> {
    let segments = dash_segments_mut(value)?;
    let len = segments.len();
    if index >= len {
        return Err(dash_out_of_range(index, len));
    }
    segments.remove(index);
    Ok(())
}

fn dash_segments_mut(value: &mut Value) -> GouacheResult<&mut Vec<Value>> {
    value
        .as_array_mut()
        .ok_or_else(|| GouacheError::expression("expected a dash pattern array"))
}

fn dash_out_of_range(index: usize, len: usize) -> GouacheError {
    GouacheError::InvalidArgument(format!(
        "dash segment {} out of range ({} segments)",
        index, len
    ))
}
