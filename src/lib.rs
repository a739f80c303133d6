//! Floor-plan wall polygons to a directional junction graph.
//!
//! [`operations::boundary::BoundaryResolver`] turns room polygons into atomic
//! wall segments, [`graph::GraphAnnotator`] builds the four-slot junction graph
//! with its connectivity codes and breadth-first levels, and [`dataset`]
//! assembles COCO-style split sets from annotation files.

#![forbid(unsafe_code)]

pub mod config;
pub mod dataset;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod math;
pub mod operations;

pub use config::{PipelineConfig, SlotConflictPolicy};
pub use error::{FloorgraphError, Result};
