//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command. A command builds a
//! fresh in-memory session from the catalog file; nothing persists
//! between invocations.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use log::info;

use crate::catalog::{CatalogConfig, LayerRegistry};
use crate::query::{FeatureQueryAggregator, MapCoordinate, PopupSink, StaticInfoSource};
use crate::stack::{MemoryRenderStack, StackController};

/// A parsed stack operation from the command line.
enum Op {
    Activate(String),
    Deactivate(String),
    MoveActive(usize, usize),
    MovePool(usize, usize),
    Opacity(String, f32),
    Base(String),
    Clear,
}

fn parse_op(raw: &str) -> anyhow::Result<Op> {
    let parts: Vec<&str> = raw.split(':').collect();
    let op = match parts.as_slice() {
        ["activate", name] => Op::Activate(name.to_string()),
        ["deactivate", name] => Op::Deactivate(name.to_string()),
        ["move-active", old, new] => Op::MoveActive(old.parse()?, new.parse()?),
        ["move-pool", old, new] => Op::MovePool(old.parse()?, new.parse()?),
        ["opacity", name, value] => Op::Opacity(name.to_string(), value.parse()?),
        ["base", name] => Op::Base(name.to_string()),
        ["clear"] => Op::Clear,
        _ => bail!("unrecognized operation: '{raw}'"),
    };
    Ok(op)
}

fn apply_ops(controller: &mut StackController, ops: &[String]) -> anyhow::Result<()> {
    for raw in ops {
        let result = match parse_op(raw)? {
            Op::Activate(name) => controller.activate(&name),
            Op::Deactivate(name) => controller.deactivate(&name),
            Op::MoveActive(old, new) => controller.move_active(old, new),
            Op::MovePool(old, new) => controller.move_pool(old, new),
            Op::Opacity(name, value) => controller.set_opacity(&name, value),
            Op::Base(name) => controller.replace_base(&name),
            Op::Clear => controller.clear_active(),
        };
        result.with_context(|| format!("applying '{raw}'"))?;
    }
    Ok(())
}

fn build_session(catalog_path: &Path) -> anyhow::Result<(CatalogConfig, StackController)> {
    let config = CatalogConfig::load(catalog_path)
        .with_context(|| format!("loading catalog {}", catalog_path.display()))?;
    let registry = Arc::new(LayerRegistry::from_config(&config)?);
    let controller = StackController::new(
        registry,
        &config.base,
        Box::new(MemoryRenderStack::new()),
    )?;
    Ok((config, controller))
}

/// Print the layer catalog.
pub fn inspect(catalog_path: &Path) -> anyhow::Result<()> {
    info!("Inspecting catalog: {}", catalog_path.display());
    let (config, controller) = build_session(catalog_path)?;

    println!("Catalog: {} layers", controller.registry().len());
    for name in controller.registry().names() {
        let entry = controller.registry().get(name)?;
        let mut notes = Vec::new();
        if name == controller.base_name() {
            notes.push("base".to_string());
        }
        if let Some(min_zoom) = entry.min_zoom {
            notes.push(format!("min zoom {min_zoom}"));
        }
        if config.layer(name).and_then(|l| l.info.as_ref()).is_some() {
            notes.push("info source".to_string());
        }
        if let Some(attribution) = &entry.attribution {
            notes.push(attribution.clone());
        }
        if notes.is_empty() {
            println!("  {name}");
        } else {
            println!("  {name} ({})", notes.join(", "));
        }
    }
    Ok(())
}

/// Apply operations and print the snapshot as JSON.
pub fn simulate(catalog_path: &Path, ops: &[String]) -> anyhow::Result<()> {
    info!("Simulating {} operations", ops.len());
    let (_, mut controller) = build_session(catalog_path)?;
    apply_ops(&mut controller, ops)?;

    let snapshot = controller.snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

/// Popup that prints to stdout.
struct PrintPopup;

impl PopupSink for PrintPopup {
    fn show(&mut self, coordinate: MapCoordinate, text: &str) {
        println!("Location: {coordinate}");
        if text.is_empty() {
            println!("(no feature info)");
        } else {
            println!("{text}");
        }
    }
}

/// Apply operations, run a point query, print the popup content.
pub async fn query(catalog_path: &Path, x: f64, y: f64, ops: &[String]) -> anyhow::Result<()> {
    let (config, mut controller) = build_session(catalog_path)?;
    apply_ops(&mut controller, ops)?;

    let mut aggregator = FeatureQueryAggregator::new();
    for layer in &config.layers {
        if let Some(info) = &layer.info {
            aggregator.register_source(&layer.name, Arc::new(StaticInfoSource::new(info)));
        }
    }

    let snapshot = controller.snapshot();
    let coordinate = MapCoordinate::new(x, y);
    info!(
        "Running point query at {} over {} active layers",
        coordinate,
        snapshot.active.len()
    );
    aggregator
        .run_and_present(&snapshot, coordinate, &mut PrintPopup)
        .await;
    Ok(())
}
