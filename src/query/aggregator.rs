//! Feature query aggregation
//!
//! On a map click the aggregator walks the active stack top-to-bottom and
//! asks each layer's info source in turn, awaiting every answer before
//! issuing the next request. Serializing the queries bounds simultaneous
//! outbound requests and keeps the composed output deterministic even
//! when individual sources are slow or failing.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use crate::query::popup::PopupSink;
use crate::query::source::{FeatureInfoSource, MapCoordinate};
use crate::stack::StackSnapshot;

/// Collects per-layer feature info in stacking order.
///
/// Sources are registered by layer name; layers without a source are
/// silently skipped. A failed query drops that layer's contribution and
/// never aborts the rest.
pub struct FeatureQueryAggregator {
    sources: HashMap<String, Arc<dyn FeatureInfoSource>>,
}

impl FeatureQueryAggregator {
    /// Create an aggregator with no sources
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
        }
    }

    /// Register the info source for a layer, replacing any previous one.
    pub fn register_source(&mut self, layer: &str, source: Arc<dyn FeatureInfoSource>) {
        self.sources.insert(layer.to_string(), source);
    }

    /// Check whether a layer has a registered source
    pub fn has_source(&self, layer: &str) -> bool {
        self.sources.contains_key(layer)
    }

    /// Run a point query against a consistent stack snapshot.
    ///
    /// Queries run strictly one at a time, topmost layer first; results
    /// are composed in that same order. The per-query result map lives
    /// only for the duration of this call.
    pub async fn run_point_query(
        &self,
        snapshot: &StackSnapshot,
        coordinate: MapCoordinate,
    ) -> String {
        let mut pending: HashMap<&str, String> = HashMap::new();

        for layer in snapshot.top_to_bottom() {
            let Some(source) = self.sources.get(layer) else {
                continue;
            };
            match source.query_at(coordinate).await {
                Ok(text) => {
                    pending.insert(layer, text);
                }
                Err(err) => {
                    // Fail-soft: the layer contributes nothing.
                    debug!("info query for layer '{layer}' failed: {err}");
                }
            }
        }

        // Second pass in the same top-to-bottom order, so composition
        // order never depends on response arrival or registration order.
        let mut composed = String::new();
        for layer in snapshot.top_to_bottom() {
            if let Some(text) = pending.get(layer) {
                composed.push_str(text);
            }
        }
        composed
    }

    /// Run a point query and hand the composed text to the popup.
    pub async fn run_and_present(
        &self,
        snapshot: &StackSnapshot,
        coordinate: MapCoordinate,
        popup: &mut dyn PopupSink,
    ) -> String {
        let composed = self.run_point_query(snapshot, coordinate).await;
        popup.show(coordinate, &composed);
        composed
    }
}

impl Default for FeatureQueryAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::query::popup::RecordingPopup;
    use crate::query::source::{FailingInfoSource, StaticInfoSource};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    fn snapshot(active: &[&str]) -> StackSnapshot {
        StackSnapshot {
            active: active.iter().map(|s| s.to_string()).collect(),
            inactive: Vec::new(),
        }
    }

    /// Source that records when it was queried relative to its peers.
    struct ProbeSource {
        name: &'static str,
        order: Arc<Mutex<Vec<&'static str>>>,
        text: &'static str,
    }

    #[async_trait]
    impl FeatureInfoSource for ProbeSource {
        async fn query_at(&self, _coordinate: MapCoordinate) -> Result<String> {
            self.order.lock().unwrap().push(self.name);
            // Yield so an accidentally-concurrent implementation would
            // interleave and scramble the recorded order.
            tokio::task::yield_now().await;
            Ok(self.text.to_string())
        }
    }

    #[tokio::test]
    async fn test_composes_top_to_bottom() {
        // Active bottom-to-top [base, C, B, A]: top-to-bottom is A, B, C.
        let mut aggregator = FeatureQueryAggregator::new();
        aggregator.register_source("a", Arc::new(StaticInfoSource::new("[A]")));
        aggregator.register_source("b", Arc::new(StaticInfoSource::new("[B]")));
        aggregator.register_source("c", Arc::new(StaticInfoSource::new("[C]")));

        let composed = aggregator
            .run_point_query(&snapshot(&["base", "c", "b", "a"]), MapCoordinate::new(0.0, 0.0))
            .await;
        assert_eq!(composed, "[A][B][C]");
    }

    #[tokio::test]
    async fn test_registration_order_is_irrelevant() {
        let mut aggregator = FeatureQueryAggregator::new();
        aggregator.register_source("c", Arc::new(StaticInfoSource::new("[C]")));
        aggregator.register_source("a", Arc::new(StaticInfoSource::new("[A]")));

        let composed = aggregator
            .run_point_query(&snapshot(&["base", "c", "b", "a"]), MapCoordinate::new(0.0, 0.0))
            .await;
        assert_eq!(composed, "[A][C]");
    }

    #[tokio::test]
    async fn test_sourceless_layers_are_skipped() {
        let mut aggregator = FeatureQueryAggregator::new();
        aggregator.register_source("a", Arc::new(StaticInfoSource::new("[A]")));
        aggregator.register_source("c", Arc::new(StaticInfoSource::new("[C]")));

        let composed = aggregator
            .run_point_query(&snapshot(&["base", "c", "b", "a"]), MapCoordinate::new(0.0, 0.0))
            .await;
        assert_eq!(composed, "[A][C]");
    }

    #[tokio::test]
    async fn test_failed_query_is_fail_soft() {
        let mut aggregator = FeatureQueryAggregator::new();
        aggregator.register_source("a", Arc::new(FailingInfoSource::new("timeout")));
        aggregator.register_source("b", Arc::new(StaticInfoSource::new("[B]")));
        aggregator.register_source("c", Arc::new(StaticInfoSource::new("[C]")));

        let composed = aggregator
            .run_point_query(&snapshot(&["base", "c", "b", "a"]), MapCoordinate::new(0.0, 0.0))
            .await;
        assert_eq!(composed, "[B][C]");
    }

    #[tokio::test]
    async fn test_queries_run_sequentially_top_first() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut aggregator = FeatureQueryAggregator::new();
        for (name, text) in [("a", "[A]"), ("b", "[B]"), ("c", "[C]")] {
            aggregator.register_source(
                name,
                Arc::new(ProbeSource {
                    name,
                    order: order.clone(),
                    text,
                }),
            );
        }

        aggregator
            .run_point_query(&snapshot(&["base", "c", "b", "a"]), MapCoordinate::new(0.0, 0.0))
            .await;
        assert_eq!(*order.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_present_hands_text_to_popup() {
        let mut aggregator = FeatureQueryAggregator::new();
        aggregator.register_source("a", Arc::new(StaticInfoSource::new("Region: Wales")));

        let mut popup = RecordingPopup::new();
        let coordinate = MapCoordinate::new(385219.77, 275120.32);
        aggregator
            .run_and_present(&snapshot(&["base", "a"]), coordinate, &mut popup)
            .await;

        let (shown_coordinate, shown_text) = popup.last_shown().unwrap();
        assert_eq!(*shown_coordinate, coordinate);
        assert_eq!(shown_text, "Region: Wales");
    }

    #[tokio::test]
    async fn test_empty_result_composes_empty_text() {
        let aggregator = FeatureQueryAggregator::new();
        let composed = aggregator
            .run_point_query(&snapshot(&["base"]), MapCoordinate::new(1.0, 2.0))
            .await;
        assert_eq!(composed, "");
    }
}
