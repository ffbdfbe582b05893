//! Command-line interface definitions
//!
//! The binary operates on a catalog JSON file and an optional sequence of
//! stack operations, mostly for demoing and debugging controller behavior
//! without a UI attached.

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Layer-stack controller demo and inspection tool
#[derive(Parser)]
#[command(name = "mapstack", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the layer catalog
    Inspect {
        /// Path to the catalog JSON file
        catalog: PathBuf,
    },

    /// Apply stack operations and print the resulting snapshot as JSON
    Simulate {
        /// Path to the catalog JSON file
        catalog: PathBuf,
        /// Operations to apply in order, e.g. "activate:regions",
        /// "deactivate:regions", "move-active:1:2", "move-pool:0:2",
        /// "opacity:regions:0.5", "base:satellite", "clear"
        #[arg(long = "op")]
        ops: Vec<String>,
    },

    /// Run a point query against the composed stack and print the popup
    Query {
        /// Path to the catalog JSON file
        catalog: PathBuf,
        /// Map x coordinate
        #[arg(long)]
        x: f64,
        /// Map y coordinate
        #[arg(long)]
        y: f64,
        /// Stack operations applied before the query (same syntax as
        /// `simulate`)
        #[arg(long = "op")]
        ops: Vec<String>,
    },
}
