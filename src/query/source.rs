//! Feature info sources
//!
//! A layer may have an associated data source that can describe what sits
//! at a map coordinate. The transport behind `query_at` (WMS GetFeatureInfo,
//! a local feature index, ...) is outside this crate; only the async
//! contract matters here.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{MapstackError, Result};

/// A point in map (view projection) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapCoordinate {
    pub x: f64,
    pub y: f64,
}

impl MapCoordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for MapCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}, {:.2}", self.x, self.y)
    }
}

/// Async query contract of a layer's info source.
#[async_trait]
pub trait FeatureInfoSource: Send + Sync {
    /// Describe the features at a coordinate. Fails on transport errors;
    /// the aggregator treats any failure as "no info" for the layer.
    async fn query_at(&self, coordinate: MapCoordinate) -> Result<String>;
}

/// Source that always answers with a fixed text.
///
/// Used by the demo CLI for catalog entries carrying canned info, and by
/// tests.
#[derive(Debug, Clone)]
pub struct StaticInfoSource {
    text: String,
}

impl StaticInfoSource {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

#[async_trait]
impl FeatureInfoSource for StaticInfoSource {
    async fn query_at(&self, _coordinate: MapCoordinate) -> Result<String> {
        Ok(self.text.clone())
    }
}

/// Source that always fails, standing in for an unreachable server.
#[derive(Debug, Clone)]
pub struct FailingInfoSource {
    reason: String,
}

impl FailingInfoSource {
    pub fn new(reason: &str) -> Self {
        Self {
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl FeatureInfoSource for FailingInfoSource {
    async fn query_at(&self, _coordinate: MapCoordinate) -> Result<String> {
        Err(MapstackError::QueryFailed {
            reason: self.reason.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_display_two_decimals() {
        let coordinate = MapCoordinate::new(385219.769, 275120.3);
        assert_eq!(coordinate.to_string(), "385219.77, 275120.30");
    }

    #[tokio::test]
    async fn test_static_source_answers() {
        let source = StaticInfoSource::new("Region: Wales");
        let text = source.query_at(MapCoordinate::new(0.0, 0.0)).await.unwrap();
        assert_eq!(text, "Region: Wales");
    }

    #[tokio::test]
    async fn test_failing_source_reports_query_failed() {
        let source = FailingInfoSource::new("connection refused");
        let err = source
            .query_at(MapCoordinate::new(0.0, 0.0))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "QUERY_FAILED");
    }
}
