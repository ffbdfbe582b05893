//! Integration Tests
//!
//! End-to-end tests wiring the catalog, controller, bridge and query
//! aggregator together the way a map UI would.

use std::sync::Arc;

use mapstack::bridge::{DragEvent, DragList, NullControlPanel, ReorderBridge};
use mapstack::catalog::{CatalogConfig, LayerRegistry};
use mapstack::query::{
    FailingInfoSource, FeatureQueryAggregator, MapCoordinate, RecordingPopup, StaticInfoSource,
};
use mapstack::stack::{MemoryRenderStack, StackController};

const CATALOG_JSON: &str = r#"{
    "base": "osm",
    "layers": [
        { "name": "osm" },
        { "name": "regions", "info": "Region: South West\n" },
        { "name": "boundary" },
        { "name": "mining_poly", "min_zoom": 6.0, "info": "Mining: 3 polygons\n" },
        { "name": "mining_point", "min_zoom": 6.0, "info": "Mining: 1 point\n" }
    ]
}"#;

/// Build a full session from the embedded catalog.
fn session() -> (CatalogConfig, StackController, ReorderBridge, FeatureQueryAggregator) {
    let config = CatalogConfig::from_json(CATALOG_JSON).unwrap();
    let registry = Arc::new(LayerRegistry::from_config(&config).unwrap());
    let controller = StackController::new(
        registry,
        &config.base,
        Box::new(MemoryRenderStack::new()),
    )
    .unwrap();
    let bridge = ReorderBridge::new(Box::new(NullControlPanel::new()));

    let mut aggregator = FeatureQueryAggregator::new();
    for layer in &config.layers {
        if let Some(info) = &layer.info {
            aggregator.register_source(&layer.name, Arc::new(StaticInfoSource::new(info)));
        }
    }
    (config, controller, bridge, aggregator)
}

fn drag(source: DragList, target: DragList, old_index: usize, new_index: usize) -> DragEvent {
    DragEvent {
        source,
        target,
        old_index,
        new_index,
    }
}

// === Stack Composition Tests ===

#[test]
fn test_drag_driven_session() {
    let (_, mut controller, mut bridge, _) = session();

    // Build up a stack through drags out of the pool. Pool starts as
    // [regions, boundary, mining_poly, mining_point].
    bridge
        .handle_drag(&mut controller, drag(DragList::Pool, DragList::Active, 0, 0))
        .unwrap();
    bridge
        .handle_drag(&mut controller, drag(DragList::Pool, DragList::Active, 1, 3))
        .unwrap();
    assert_eq!(
        controller.snapshot().active,
        vec!["osm", "regions", "mining_poly"]
    );

    // Reorder within the active list, then drag the top row back out.
    bridge
        .handle_drag(&mut controller, drag(DragList::Active, DragList::Active, 0, 1))
        .unwrap();
    assert_eq!(
        controller.snapshot().active,
        vec!["osm", "mining_poly", "regions"]
    );

    bridge
        .handle_drag(&mut controller, drag(DragList::Active, DragList::Pool, 0, 0))
        .unwrap();
    let snap = controller.snapshot();
    assert_eq!(snap.active, vec!["osm", "mining_poly"]);
    assert_eq!(snap.inactive, vec!["boundary", "mining_point", "regions"]);
}

#[test]
fn test_rejected_operations_leave_state_untouched() {
    let (_, mut controller, mut bridge, _) = session();
    bridge.activate(&mut controller, "regions").unwrap();
    let before = controller.snapshot();

    assert!(bridge.deactivate(&mut controller, "osm").is_err());
    assert!(bridge.activate(&mut controller, "regions").is_err());
    assert!(controller.move_active(1, 9).is_err());

    assert_eq!(controller.snapshot(), before);
}

// === Point Query Tests ===

#[tokio::test]
async fn test_point_query_follows_stacking_order() {
    let (_, mut controller, mut bridge, aggregator) = session();
    bridge.activate(&mut controller, "mining_poly").unwrap();
    bridge.activate(&mut controller, "boundary").unwrap();
    bridge.activate(&mut controller, "regions").unwrap();

    // Top-to-bottom: regions, boundary (no source), mining_poly, osm.
    let composed = aggregator
        .run_point_query(&controller.snapshot(), MapCoordinate::new(400000.0, 250000.0))
        .await;
    assert_eq!(composed, "Region: South West\nMining: 3 polygons\n");
}

#[tokio::test]
async fn test_point_query_tracks_reordering() {
    let (_, mut controller, mut bridge, aggregator) = session();
    bridge.activate(&mut controller, "mining_poly").unwrap();
    bridge.activate(&mut controller, "regions").unwrap();

    let coordinate = MapCoordinate::new(0.0, 0.0);
    let before = aggregator
        .run_point_query(&controller.snapshot(), coordinate)
        .await;
    assert_eq!(before, "Region: South West\nMining: 3 polygons\n");

    // Swap the two draggable rows; composition order follows.
    controller.move_active(1, 2).unwrap();
    let after = aggregator
        .run_point_query(&controller.snapshot(), coordinate)
        .await;
    assert_eq!(after, "Mining: 3 polygons\nRegion: South West\n");
}

#[tokio::test]
async fn test_failing_source_never_breaks_the_popup() {
    let (_, mut controller, mut bridge, mut aggregator) = session();
    bridge.activate(&mut controller, "regions").unwrap();
    bridge.activate(&mut controller, "mining_point").unwrap();
    aggregator.register_source(
        "mining_point",
        Arc::new(FailingInfoSource::new("geoserver unreachable")),
    );

    let mut popup = RecordingPopup::new();
    let coordinate = MapCoordinate::new(510206.33, 374468.61);
    aggregator
        .run_and_present(&controller.snapshot(), coordinate, &mut popup)
        .await;

    let (shown_coordinate, shown_text) = popup.last_shown().unwrap();
    assert_eq!(*shown_coordinate, coordinate);
    assert_eq!(shown_text, "Region: South West\n");
}
