//! The map surface abstraction. A session does not talk to a concrete map;
//! it pushes the whole document after every edit and lets the surface diff
//! internally.

use std::sync::{Arc, Mutex};

use gouache_core::MapView;
use gouache_style::StyleDocument;

/// The live map surface a session drives.
pub trait MapRenderer {
    /// Replace the rendered style with the given document.
    fn set_style(&mut self, style: &StyleDocument);

    /// Animate the camera to a new view.
    fn fly_to(&mut self, view: MapView);
}

/// A surface that swallows everything, for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl MapRenderer for NullRenderer {
    fn set_style(&mut self, _style: &StyleDocument) {}

    fn fly_to(&mut self, _view: MapView) {}
}

/// What a recording surface has been told so far.
#[derive(Debug, Default, Clone)]
pub struct RenderLog {
    /// How many times the full document was pushed.
    pub style_pushes: usize,
    /// The most recently pushed document.
    pub last_style: Option<StyleDocument>,
    /// Every camera move, in order.
    pub flights: Vec<MapView>,
}

/// A surface that records what it is told. Clones share one log, so a test
/// can keep a handle while a session owns the renderer.
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    log: Arc<Mutex<RenderLog>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the log.
    pub fn log(&self) -> RenderLog {
        self.log.lock().unwrap().clone()
    }
}

impl MapRenderer for RecordingRenderer {
    fn set_style(&mut self, style: &StyleDocument) {
        let mut log = self.log.lock().unwrap();
        log.style_pushes += 1;
        log.last_style = Some(style.clone());
    }

    fn fly_to(&mut self, view: MapView) {
        self.log.lock().unwrap().flights.push(view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_renderer_shares_log_across_clones() {
        let recorder = RecordingRenderer::new();
        let mut handle = recorder.clone();

        handle.set_style(&StyleDocument::default());
        handle.fly_to(MapView::default());

        let log = recorder.log();
        assert_eq!(log.style_pushes, 1);
        assert!(log.last_style.is_some());
        assert_eq!(log.flights.len(), 1);
    }
}
