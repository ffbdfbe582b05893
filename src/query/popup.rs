//! Popup collaborator
//!
//! Receives the composed feature info. Positioning, anchoring and
//! auto-panning are the map chrome's business.

use crate::query::source::MapCoordinate;

/// Sink for a finished point query.
pub trait PopupSink {
    /// Present the composed text for a clicked coordinate. Overlapping
    /// queries resolve last-write-wins here.
    fn show(&mut self, coordinate: MapCoordinate, text: &str);
}

/// Popup that just remembers the last thing shown, for tests and demos.
#[derive(Debug, Default)]
pub struct RecordingPopup {
    last: Option<(MapCoordinate, String)>,
}

impl RecordingPopup {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently shown coordinate and text.
    pub fn last_shown(&self) -> Option<&(MapCoordinate, String)> {
        self.last.as_ref()
    }
}

impl PopupSink for RecordingPopup {
    fn show(&mut self, coordinate: MapCoordinate, text: &str) {
        self.last = Some((coordinate, text.to_string()));
    }
}
