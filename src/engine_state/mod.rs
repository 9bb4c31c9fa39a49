//! # Engine State Module
//!
//! The frame driver of the streaming pipeline.
//!
//! ## Key Components
//!
//! * `EngineState` - Owns the scheduler and runs it once per frame
//! * `voxels` - Block and chunk data, terrain generation and the chunk store
//! * `rendering` - Meshing and the render handle seams
//! * `streaming` - Nearest-first chunk scheduling around the observer
//!
//! ## Frame Phases
//!
//! A frame has two phases. [`EngineState::update`] moves the observer and stages the next
//! chunk (selection and block synthesis). [`EngineState::late_update`] commits the staged
//! chunk (meshing, render handle and neighbour refresh). At most one chunk is built per
//! frame.

use cgmath::Point3;
use log::info;
use web_time::Instant;

use rendering::{MeshBuilder, RendererFactory};
use streaming::{BuildOutcome, StagedBuild, StreamingScheduler};

use crate::{
    config::WorldConfig,
    error::{ConfigError, StreamingError},
};

pub mod rendering;
pub mod streaming;
pub mod voxels;

/// Per-frame driver around a [`StreamingScheduler`].
pub struct EngineState<F: RendererFactory, M: MeshBuilder> {
    /// The chunk scheduler
    scheduler: StreamingScheduler<F, M>,
    /// Position of the observer in world space
    observer: Point3<f32>,
    /// Chunk staged by `update`, built by `late_update`
    staged: Option<StagedBuild>,
    /// Number of completed frames
    frame: u64,
    /// Number of chunks built or rebuilt so far
    builds: usize,
}

impl<F: RendererFactory, M: MeshBuilder> EngineState<F, M> {
    /// Creates the engine with a fresh world described by `config`.
    ///
    /// # Errors
    /// [`ConfigError::Invalid`] if `config` does not validate.
    pub fn new(
        config: &WorldConfig,
        mesh_builder: M,
        renderer_factory: F,
    ) -> Result<Self, ConfigError> {
        let scheduler = StreamingScheduler::from_config(config, mesh_builder, renderer_factory)?;
        Ok(Self {
            scheduler,
            observer: Point3::new(0.0, 0.0, 0.0),
            staged: None,
            frame: 0,
            builds: 0,
        })
    }

    /// The chunk scheduler.
    pub fn scheduler(&self) -> &StreamingScheduler<F, M> {
        &self.scheduler
    }

    /// Position of the observer.
    pub fn observer(&self) -> Point3<f32> {
        self.observer
    }

    /// Number of completed frames.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Number of chunk builds so far, rebuilds included.
    pub fn builds(&self) -> usize {
        self.builds
    }

    /// Whether a chunk is staged and waiting for `late_update`.
    pub fn has_staged(&self) -> bool {
        self.staged.is_some()
    }

    /// First phase of a frame: moves the observer and stages the nearest pending chunk.
    ///
    /// A chunk staged by an earlier `update` that never reached `late_update` is kept.
    pub fn update(&mut self, observer: Point3<f32>) {
        self.observer = observer;
        if self.staged.is_none() {
            self.staged = self.scheduler.stage(observer);
        }
    }

    /// Second phase of a frame: builds the chunk staged by `update`, if any.
    pub fn late_update(&mut self) -> Result<Option<BuildOutcome>, StreamingError> {
        self.frame += 1;
        let Some(staged) = self.staged.take() else {
            return Ok(None);
        };
        let outcome = self.scheduler.commit(staged)?;
        self.builds += 1;
        Ok(Some(outcome))
    }

    /// Runs both phases for one frame.
    pub fn step(&mut self, observer: Point3<f32>) -> Result<Option<BuildOutcome>, StreamingError> {
        self.update(observer);
        self.late_update()
    }

    /// Walks the observer from `start` by `velocity` per frame for `frames` frames.
    ///
    /// # Returns
    /// The number of chunks built along the way.
    pub fn walk(
        &mut self,
        start: Point3<f32>,
        velocity: cgmath::Vector3<f32>,
        frames: u64,
    ) -> Result<usize, StreamingError> {
        let started = Instant::now();
        let builds_before = self.builds;
        let mut observer = start;
        for _ in 0..frames {
            self.step(observer)?;
            observer += velocity;
        }
        let built = self.builds - builds_before;
        info!(
            "Walked {} frames: {} chunks built, {} known, ended at {:?} in {:?}",
            frames,
            built,
            self.scheduler.store().len(),
            self.observer,
            started.elapsed()
        );
        Ok(built)
    }
}
