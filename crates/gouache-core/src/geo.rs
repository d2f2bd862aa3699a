use serde::{Deserialize, Serialize};

/// A geographic coordinate in degrees. Stored longitude-first, matching the
/// `[lng, lat]` order used by style documents and geocoding results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

impl Default for LngLat {
    fn default() -> Self {
        Self { lng: 0.0, lat: 0.0 }
    }
}

impl std::fmt::Display for LngLat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

/// The camera state reported by (and sent to) the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: LngLat,
    pub zoom: f64,
}

impl MapView {
    pub fn new(center: LngLat, zoom: f64) -> Self {
        Self { center, zoom }
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: LngLat::default(),
            zoom: 0.0,
        }
    }
}
