use serde::{Deserialize, Serialize};

use crate::geo::{LngLat, MapView};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StyleConfig {
    /// URL of the base style document fetched at session start and on reset.
    pub base_url: String,
    /// Default style name used when exporting.
    pub name: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            base_url: "https://demotiles.maplibre.org/style.json".to_string(),
            name: "custom-style".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MapConfig {
    pub center_lng: f64,
    pub center_lat: f64,
    pub zoom: f64,
}

impl MapConfig {
    /// The initial camera for a new session.
    pub fn initial_view(&self) -> MapView {
        MapView::new(LngLat::new(self.center_lng, self.center_lat), self.zoom)
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lng: -80.1919,
            center_lat: 25.773357,
            zoom: 12.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeocodingConfig {
    /// Forward-geocoding endpoint, queried as `<endpoint>/<query>.json`.
    pub endpoint: String,
    pub access_token: String,
    /// Maximum number of places returned per search.
    pub limit: usize,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.mapbox.com/geocoding/v5/mapbox.places".to_string(),
            access_token: String::new(),
            limit: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct GouacheConfig {
    #[serde(default)]
    pub style: StyleConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub geocoding: GeocodingConfig,
}

impl GouacheConfig {
    pub fn load_from_file(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: GouacheConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view_is_miami() {
        let view = GouacheConfig::default().map.initial_view();
        assert!((view.center.lat - 25.773357).abs() < 1e-9);
        assert!((view.center.lng + 80.1919).abs() < 1e-9);
        assert!((view.zoom - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_geocoding_defaults_visible_at_crate_root() {
        // Downstream crates import this section type from the root.
        let geocoding = crate::GeocodingConfig::default();
        assert!(geocoding.access_token.is_empty());
        assert_eq!(geocoding.limit, 5);
        assert!(geocoding.endpoint.contains("geocoding"));
    }

    #[test]
    fn test_config_round_trip() {
        let dir = std::env::temp_dir();
        let path = dir.join("gouache_test_config.toml");

        let mut config = GouacheConfig::default();
        config.style.name = "night-mode".to_string();
        config.geocoding.limit = 3;
        config.save_to_file(&path).unwrap();

        let loaded = GouacheConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.style.name, "night-mode");
        assert_eq!(loaded.geocoding.limit, 3);

        let _ = std::fs::remove_file(&path);
    }
}
