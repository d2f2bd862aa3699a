//! Forward geocoding and the bookkeeping that keeps slow responses from
//! clobbering a newer search.

use serde::Deserialize;

use gouache_core::{GeocodingConfig, GouacheError, GouacheResult, LngLat};

/// A resolved location.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    /// Short display name.
    pub name: String,
    /// Full descriptive name, when the provider supplies one.
    pub place_name: Option<String>,
    pub center: LngLat,
}

/// Forward geocoding: free-text query to candidate places.
pub trait Geocoder {
    fn search(&self, query: &str) -> GouacheResult<Vec<Place>>;
}

/// Wire shape of a Mapbox-compatible geocoding response.
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    features: Vec<GeocodingFeature>,
}

#[derive(Debug, Deserialize)]
struct GeocodingFeature {
    text: String,
    #[serde(default)]
    place_name: Option<String>,
    /// `[lng, lat]`.
    center: [f64; 2],
}

impl From<GeocodingFeature> for Place {
    fn from(feature: GeocodingFeature) -> Self {
        Place {
            name: feature.text,
            place_name: feature.place_name,
            center: LngLat::new(feature.center[0], feature.center[1]),
        }
    }
}

/// Geocodes against a Mapbox-compatible places endpoint.
pub struct HttpGeocoder {
    client: reqwest::blocking::Client,
    config: GeocodingConfig,
}

impl HttpGeocoder {
    pub fn new(config: GeocodingConfig) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            config,
        }
    }

    fn request_url(&self, query: &str) -> GouacheResult<reqwest::Url> {
        let mut url = reqwest::Url::parse(self.config.endpoint.trim_end_matches('/'))
            .map_err(|e| GouacheError::Config(format!("bad geocoding endpoint: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| GouacheError::Config("geocoding endpoint cannot take a path".to_string()))?
            .push(&format!("{}.json", query));
        url.query_pairs_mut()
            .append_pair("access_token", &self.config.access_token)
            .append_pair("limit", &self.config.limit.to_string());
        Ok(url)
    }
}

impl Geocoder for HttpGeocoder {
    fn search(&self, query: &str) -> GouacheResult<Vec<Place>> {
        let url = self.request_url(query)?;
        tracing::debug!("geocoding '{}'", query);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| GouacheError::Network(format!("geocoding request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(GouacheError::Network(format!(
                "geocoding failed: {}: {}",
                status, body
            )));
        }

        let parsed: GeocodingResponse = response
            .json()
            .map_err(|e| GouacheError::Network(format!("bad geocoding response: {}", e)))?;

        Ok(parsed.features.into_iter().map(Place::from).collect())
    }
}

/// The in-flight search. Each new query supersedes the previous one; a
/// completion must present the token its search was started with, so
/// results arriving late for an old query are dropped.
#[derive(Debug, Default)]
pub struct SearchState {
    generation: u64,
    query: String,
    results: Vec<Place>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new search and return its token.
    pub fn begin(&mut self, query: impl Into<String>) -> u64 {
        self.generation += 1;
        self.query = query.into();
        self.results.clear();
        self.generation
    }

    /// Install results for the search `token` was issued for. Returns false
    /// (and keeps current state) when that search has been superseded.
    pub fn complete(&mut self, token: u64, results: Vec<Place>) -> bool {
        if token != self.generation {
            tracing::debug!(
                "dropping stale geocoding results for '{}' (token {}, current {})",
                self.query,
                token,
                self.generation
            );
            return false;
        }
        self.results = results;
        true
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[Place] {
        &self.results
    }

    /// Forget the query and its results, as after navigating to a result.
    pub fn clear(&mut self) {
        self.query.clear();
        self.results.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(name: &str, lng: f64, lat: f64) -> Place {
        Place {
            name: name.to_string(),
            place_name: None,
            center: LngLat::new(lng, lat),
        }
    }

    #[test]
    fn test_geocoding_response_parsing() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "id": "place.123",
                    "text": "Miami",
                    "place_name": "Miami, Florida, United States",
                    "center": [-80.19366, 25.77427]
                }
            ]
        }"#;
        let parsed: GeocodingResponse = serde_json::from_str(body).unwrap();
        let places: Vec<Place> = parsed.features.into_iter().map(Place::from).collect();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].name, "Miami");
        assert_eq!(
            places[0].place_name.as_deref(),
            Some("Miami, Florida, United States")
        );
        assert!((places[0].center.lng - -80.19366).abs() < 1e-9);
    }

    #[test]
    fn test_missing_features_key_means_no_results() {
        let parsed: GeocodingResponse = serde_json::from_str(r#"{"type":"FeatureCollection"}"#).unwrap();
        assert!(parsed.features.is_empty());
    }

    #[test]
    fn test_request_url_encodes_query_and_params() {
        let geocoder = HttpGeocoder::new(GeocodingConfig {
            endpoint: "https://api.example.com/geocoding/v5/places".to_string(),
            access_token: "tok123".to_string(),
            limit: 5,
        });
        let url = geocoder.request_url("San José, CR").unwrap();
        let text = url.as_str();
        assert!(text.starts_with("https://api.example.com/geocoding/v5/places/"));
        assert!(text.contains(".json?"));
        assert!(text.contains("access_token=tok123"));
        assert!(text.contains("limit=5"));
        assert!(!text.contains(' '));

        // A slash in the query must stay inside one path segment.
        let url = geocoder.request_url("a/b").unwrap();
        assert!(url.as_str().contains("%2F"));
    }

    #[test]
    fn test_stale_results_are_dropped() {
        let mut state = SearchState::new();
        let first = state.begin("mia");
        let second = state.begin("miami");

        // The slow response for the first query arrives after the second
        // search started; it must not be installed.
        assert!(!state.complete(first, vec![place("Mia", 0.0, 0.0)]));
        assert!(state.results().is_empty());

        assert!(state.complete(second, vec![place("Miami", -80.19, 25.77)]));
        assert_eq!(state.results().len(), 1);
        assert_eq!(state.query(), "miami");
    }

    #[test]
    fn test_begin_clears_previous_results() {
        let mut state = SearchState::new();
        let token = state.begin("miami");
        state.complete(token, vec![place("Miami", -80.19, 25.77)]);

        state.begin("lisbon");
        assert!(state.results().is_empty());
    }

    #[test]
    fn test_clear_forgets_query_and_results() {
        let mut state = SearchState::new();
        let token = state.begin("miami");
        state.complete(token, vec![place("Miami", -80.19, 25.77)]);

        state.clear();
        assert_eq!(state.query(), "");
        assert!(state.results().is_empty());
    }
}
