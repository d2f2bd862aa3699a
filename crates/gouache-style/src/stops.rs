//! The legacy stops-table codec: `{"base": 1.5, "stops": [[zoom, value], …]}`
//! objects, the older way of expressing zoom-dependent values. Mutations work
//! on the raw JSON object in place so keys this module does not model are
//! left untouched.

use serde_json::{json, Number, Value};

use gouache_core::{GouacheError, GouacheResult};

use crate::expr::{bump_zoom, Stop, StopSlot};

/// Editable form of a stops table.
#[derive(Debug, Clone, PartialEq)]
pub struct StopsTable {
    /// Exponential base. `None` re-encodes without a base key.
    base: Option<Number>,
    pub stops: Vec<Stop>,
}

impl StopsTable {
    /// Decode a `{"stops": […]}` object. Every entry must be a
    /// `[zoom, value]` pair with a numeric zoom.
    pub fn decode(raw: &Value) -> GouacheResult<Self> {
        let entries = stops_entries(raw)?;
        let base = raw.get("base").and_then(Value::as_number).cloned();

        let mut stops = Vec::with_capacity(entries.len());
        for entry in entries {
            let pair = entry
                .as_array()
                .filter(|pair| pair.len() >= 2)
                .ok_or_else(|| GouacheError::expression("stops entry must be a [zoom, value] pair"))?;
            let zoom = pair[0]
                .as_number()
                .ok_or_else(|| GouacheError::expression("stop zoom must be a number"))?
                .clone();
            stops.push(Stop {
                zoom,
                value: pair[1].clone(),
            });
        }

        Ok(Self { base, stops })
    }

    /// Re-encode into the object form.
    pub fn encode(&self) -> Value {
        let pairs: Vec<Value> = self
            .stops
            .iter()
            .map(|stop| json!([stop.zoom, stop.value]))
            .collect();
        match &self.base {
            Some(base) => json!({ "base": base, "stops": pairs }),
            None => json!({ "stops": pairs }),
        }
    }

    /// Effective base for exponential easing (1 when unset).
    pub fn base(&self) -> f64 {
        self.base.as_ref().and_then(Number::as_f64).unwrap_or(1.0)
    }
}

/// Whether a value holds a stops table.
pub fn is_stops_table(raw: &Value) -> bool {
    raw.get("stops").map_or(false, Value::is_array)
}

/// Number of stop pairs in a raw stops table.
pub fn stop_count(raw: &Value) -> usize {
    raw.get("stops")
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

/// Overwrite one half of the pair at `index`.
pub fn update_stop(
    raw: &mut Value,
    index: usize,
    slot: StopSlot,
    new_value: Value,
) -> GouacheResult<()> {
    let entries = stops_entries_mut(raw)?;
    let len = entries.len();
    let pair = entries
        .get_mut(index)
        .and_then(Value::as_array_mut)
        .filter(|pair| pair.len() >= 2)
        .ok_or(GouacheError::StopIndex { index, len })?;
    pair[slot.offset()] = new_value;
    Ok(())
}

/// Append a pair continuing the last one: zoom + 1, value duplicated.
pub fn add_stop(raw: &mut Value) -> GouacheResult<()> {
    let entries = stops_entries_mut(raw)?;
    let (zoom, value) = match entries.last().and_then(Value::as_array) {
        Some(pair) if pair.len() >= 2 => {
            let zoom = pair[0]
                .as_number()
                .ok_or_else(|| GouacheError::expression("stop zoom must be a number"))?;
            (bump_zoom(zoom), pair[1].clone())
        }
        _ => {
            return Err(GouacheError::expression(
                "stops table has no pairs to extend",
            ))
        }
    };
    entries.push(Value::Array(vec![Value::Number(zoom), value]));
    Ok(())
}

/// Remove the pair at `index`. Removing the only remaining pair is refused.
pub fn remove_stop(raw: &mut Value, index: usize) -> GouacheResult<()> {
    let entries = stops_entries_mut(raw)?;
    let len = entries.len();
    if index >= len {
        return Err(GouacheError::StopIndex { index, len });
    }
    if len <= 1 {
        return Err(GouacheError::LastStop);
    }
    entries.remove(index);
    Ok(())
}

fn stops_entries(raw: &Value) -> GouacheResult<&Vec<Value>> {
    raw.get("stops")
        .and_then(Value::as_array)
        .ok_or_else(|| GouacheError::expression("expected a stops table"))
}

fn stops_entries_mut(raw: &mut Value) -> GouacheResult<&mut Vec<Value>> {
    raw.get_mut("stops")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| GouacheError::expression("expected a stops table"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn width_table() -> Value {
        json!({ "base": 1.5, "stops": [[5, 1], [10, 4], [15, 12]] })
    }

    #[test]
    fn test_decode_table() {
        let table = StopsTable::decode(&width_table()).unwrap();
        assert!((table.base() - 1.5).abs() < 1e-9);
        assert_eq!(table.stops.len(), 3);
        assert!((table.stops[1].zoom_f64() - 10.0).abs() < 1e-9);
        assert_eq!(table.stops[2].value, json!(12));
    }

    #[test]
    fn test_decode_table_without_base() {
        let table = StopsTable::decode(&json!({ "stops": [[0, "#102030"]] })).unwrap();
        assert!((table.base() - 1.0).abs() < 1e-9);
        assert_eq!(table.stops[0].value, json!("#102030"));
    }

    #[test]
    fn test_decode_rejects_malformed_entries() {
        assert!(StopsTable::decode(&json!({ "stops": [[5]] })).is_err());
        assert!(StopsTable::decode(&json!({ "stops": ["5,1"] })).is_err());
        assert!(StopsTable::decode(&json!({ "stops": [["low", 1]] })).is_err());
        assert!(StopsTable::decode(&json!([5, 1])).is_err());
    }

    #[test]
    fn test_table_round_trip() {
        for raw in [
            width_table(),
            json!({ "stops": [[0, 0.2], [22, 1.0]] }),
            json!({ "stops": [[8, "#aabbcc"]] }),
        ] {
            let table = StopsTable::decode(&raw).unwrap();
            assert_eq!(table.encode(), raw);
        }
    }

    #[test]
    fn test_round_trip_keeps_integer_zooms() {
        let raw = json!({ "stops": [[5, 1], [10, 4]] });
        let encoded = StopsTable::decode(&raw).unwrap().encode();
        assert_eq!(
            serde_json::to_string(&encoded["stops"]).unwrap(),
            serde_json::to_string(&raw["stops"]).unwrap()
        );
    }

    #[test]
    fn test_is_stops_table() {
        assert!(is_stops_table(&width_table()));
        assert!(!is_stops_table(&json!({ "base": 1.5 })));
        assert!(!is_stops_table(&json!({ "stops": 3 })));
        assert!(!is_stops_table(&json!([1, 2])));
    }

    #[test]
    fn test_update_stop_in_place() {
        let mut raw = width_table();
        update_stop(&mut raw, 1, StopSlot::Value, json!(6)).unwrap();
        assert_eq!(raw["stops"][1], json!([10, 6]));
        update_stop(&mut raw, 2, StopSlot::Zoom, json!(16)).unwrap();
        assert_eq!(raw["stops"][2], json!([16, 12]));
        // The base key survives in-place edits.
        assert_eq!(raw["base"], json!(1.5));
    }

    #[test]
    fn test_update_stop_out_of_range() {
        let mut raw = width_table();
        let err = update_stop(&mut raw, 5, StopSlot::Zoom, json!(0)).unwrap_err();
        assert!(matches!(err, GouacheError::StopIndex { index: 5, len: 3 }));
    }

    #[test]
    fn test_add_stop_continues_last() {
        let mut raw = width_table();
        add_stop(&mut raw).unwrap();
        assert_eq!(stop_count(&raw), 4);
        assert_eq!(raw["stops"][3], json!([16, 12]));
        assert_eq!(serde_json::to_string(&raw["stops"][3][0]).unwrap(), "16");
    }

    #[test]
    fn test_remove_stop() {
        let mut raw = width_table();
        remove_stop(&mut raw, 0).unwrap();
        assert_eq!(raw["stops"], json!([[10, 4], [15, 12]]));
    }

    #[test]
    fn test_remove_last_remaining_stop_is_refused() {
        let mut raw = json!({ "stops": [[0, 1]] });
        let err = remove_stop(&mut raw, 0).unwrap_err();
        assert!(matches!(err, GouacheError::LastStop));
        assert_eq!(stop_count(&raw), 1);
    }
}
