//! Feature Query Module
//!
//! Point-click feature information, collected per layer in stacking order:
//! - `FeatureInfoSource`: the async query contract of a layer's data source
//! - `FeatureQueryAggregator`: sequential, ordered, fail-soft aggregation
//! - `PopupSink`: where the composed text ends up

mod aggregator;
mod popup;
mod source;

pub use aggregator::FeatureQueryAggregator;
pub use popup::{PopupSink, RecordingPopup};
pub use source::{FailingInfoSource, FeatureInfoSource, MapCoordinate, StaticInfoSource};
