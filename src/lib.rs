#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Streaming
//!
//! Procedural voxel terrain that is generated and built incrementally around a moving
//! observer.
//!
//! The world is a sparse grid of cubic chunks. Every frame the chunks inside a cube of
//! `view_distance_in_chunk³` chunks around the observer are made known, and the unbuilt
//! chunk closest to the observer is filled from layered Perlin noise, meshed and handed
//! to a render handle. Already built face neighbours are then refreshed so that faces
//! on shared borders are culled correctly.
//!
//! ## Key Modules
//!
//! * `config` - World tunables loaded from JSON
//! * `core` - Shared ownership primitives
//! * `engine_state` - Voxel data, terrain generation, meshing and chunk streaming
//! * `error` - Failure types
//!
//! ## Usage
//!
//! The headless driver walks an observer through a fresh world and logs what it built:
//!
//! ```bash
//! RUST_LOG=info voxel-streaming [config.json] [frames]
//! ```

use cgmath::{Point3, Vector3};
use log::info;

use config::WorldConfig;
use engine_state::{
    rendering::{headless::HeadlessRendererFactory, CulledMeshBuilder},
    EngineState,
};
use error::{ConfigError, EngineError};

pub mod config;
pub mod core;
pub mod engine_state;
pub mod error;

/// Frames simulated when no frame count is given.
pub const DEFAULT_FRAMES: u64 = 600;

/// Distance the headless observer moves along x and z every frame.
const OBSERVER_STEP: (f32, f32) = (0.5, 0.25);

/// Runs the headless driver with the process arguments.
///
/// The first argument is an optional path to a JSON world config, the second an
/// optional number of frames to simulate.
pub fn run() -> Result<(), EngineError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => WorldConfig::from_path(path)?,
        None => {
            info!("No world config given, using defaults");
            WorldConfig::default()
        }
    };
    let frames = match args.next() {
        Some(frames) => frames.parse::<u64>().map_err(|error| {
            ConfigError::Invalid(format!("frame count {:?} is not a number: {}", frames, error))
        })?,
        None => DEFAULT_FRAMES,
    };

    let mut engine =
        EngineState::new(&config, CulledMeshBuilder, HeadlessRendererFactory::new())?;
    let start = Point3::new(0.0, config.ground_level as f32, 0.0);
    let velocity = Vector3::new(OBSERVER_STEP.0, 0.0, OBSERVER_STEP.1);
    engine.walk(start, velocity, frames)?;

    info!(
        "Finished after {} frames: {} of {} chunks built",
        engine.frame(),
        engine.scheduler().store().built_len(),
        engine.scheduler().store().len()
    );
    Ok(())
}
