//! # gouache-session
//!
//! Editing session state and the outward-facing integrations: the map
//! surface abstraction, base style fetching, and location search.

pub mod fetch;
pub mod render;
pub mod search;
pub mod session;

pub use fetch::{HttpStyleSource, StyleSource};
pub use render::{MapRenderer, NullRenderer, RecordingRenderer, RenderLog};
pub use search::{Geocoder, HttpGeocoder, Place, SearchState};
pub use session::{EditorSession, StyleExport};
