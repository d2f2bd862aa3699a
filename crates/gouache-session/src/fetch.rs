//! Fetching base style documents, usually the one the session starts from.

use reqwest::blocking::Client;

use gouache_core::{GouacheError, GouacheResult};
use gouache_style::StyleDocument;

/// Where base style documents come from.
pub trait StyleSource {
    /// Fetch and parse the style at `url`.
    fn fetch_style(&self, url: &str) -> GouacheResult<StyleDocument>;
}

/// Fetches styles over HTTP with a blocking client.
pub struct HttpStyleSource {
    client: Client,
}

impl HttpStyleSource {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for HttpStyleSource {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleSource for HttpStyleSource {
    fn fetch_style(&self, url: &str) -> GouacheResult<StyleDocument> {
        tracing::info!("fetching base style from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| GouacheError::Network(format!("failed to fetch style: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(GouacheError::Network(format!(
                "style fetch failed: {}: {}",
                status, body
            )));
        }

        let text = response
            .text()
            .map_err(|e| GouacheError::Network(format!("failed to read style body: {}", e)))?;

        let document = StyleDocument::from_json_str(&text)?;
        tracing::debug!("fetched style with {} layer(s)", document.layer_count());
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A source serving a canned document.
    struct FixedStyleSource(StyleDocument);

    impl StyleSource for FixedStyleSource {
        fn fetch_style(&self, _url: &str) -> GouacheResult<StyleDocument> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_fixed_source_round_trips() {
        let source = FixedStyleSource(StyleDocument::default());
        let doc = source.fetch_style("https://example.com/style.json").unwrap();
        assert_eq!(doc.layer_count(), 0);
    }
}
