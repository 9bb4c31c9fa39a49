//! # Chunk Streaming
//!
//! The `StreamingScheduler` keeps the world filled in around a moving observer, one
//! chunk per tick, nearest first.
//!
//! ## Tick
//!
//! A tick is split in two phases so the driver can put its own work in between:
//!
//! 1. [`stage`](StreamingScheduler::stage): ensure chunk data exists for the whole view
//!    volume, pick the unbuilt chunk closest to the observer and synthesize its blocks.
//! 2. [`commit`](StreamingScheduler::commit): mesh the staged chunk, hand it to a new
//!    render handle and refresh already built face neighbours.
//!
//! [`tick`](StreamingScheduler::tick) runs both phases back to back.
//!
//! ## Invariants
//!
//! * A chunk is synthesized at most once by the scheduler, and never after a player edit
//! * An anchor gets at most one render handle; building it again rebuilds that handle
//! * Neighbours are refreshed only after the triggering chunk's handle received its mesh

use cgmath::{MetricSpace, Point3};
use log::{debug, info, trace};
use web_time::Instant;

use crate::{
    config::WorldConfig,
    error::{ConfigError, StreamingError},
    engine_state::{
        rendering::{ChunkRenderer, MeshBuilder, RendererFactory},
        voxels::{generation::VoxelSynthesizer, world::ChunkStore, SharedChunk},
    },
};

pub mod neighbors;
pub mod view_volume;

use view_volume::ViewVolume;

/// A chunk selected and synthesized in the first phase of a tick, waiting to be built.
#[must_use = "a staged chunk is only built once it is passed to `commit`"]
pub struct StagedBuild {
    anchor: Point3<i32>,
    chunk: SharedChunk,
}

impl StagedBuild {
    /// Anchor of the staged chunk.
    pub fn anchor(&self) -> Point3<i32> {
        self.anchor
    }

    /// The staged chunk.
    pub fn chunk(&self) -> &SharedChunk {
        &self.chunk
    }
}

/// What a build did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildOutcome {
    /// A render handle was created and registered.
    Built {
        /// Anchor of the built chunk.
        anchor: Point3<i32>,
        /// Number of face neighbours asked to refresh.
        neighbors_refreshed: usize,
    },
    /// The anchor already had a render handle, which received a fresh mesh.
    Rebuilt {
        /// Anchor of the rebuilt chunk.
        anchor: Point3<i32>,
        /// Number of face neighbours asked to refresh.
        neighbors_refreshed: usize,
    },
}

impl BuildOutcome {
    /// Anchor of the chunk the build was for.
    pub fn anchor(&self) -> Point3<i32> {
        match self {
            BuildOutcome::Built { anchor, .. } | BuildOutcome::Rebuilt { anchor, .. } => *anchor,
        }
    }
}

/// Incremental, nearest-first chunk builder.
pub struct StreamingScheduler<F: RendererFactory, M: MeshBuilder> {
    /// Edge length of the view volume, in chunks.
    view_distance_in_chunk: i32,
    /// The chunk ledger.
    store: ChunkStore<F::Renderer>,
    /// Terrain generator for this world.
    synthesizer: VoxelSynthesizer,
    /// Mesh collaborator.
    mesh_builder: M,
    /// Render handle collaborator.
    renderer_factory: F,
}

impl<F: RendererFactory, M: MeshBuilder> StreamingScheduler<F, M> {
    /// Creates a scheduler for a world generated with `seed`.
    ///
    /// # Errors
    /// [`ConfigError::Invalid`] if `config` fails [`WorldConfig::validate`].
    pub fn new(
        config: &WorldConfig,
        seed: i32,
        mesh_builder: M,
        renderer_factory: F,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(StreamingScheduler {
            view_distance_in_chunk: config.view_distance_in_chunk,
            store: ChunkStore::new(config.chunk_size),
            synthesizer: VoxelSynthesizer::new(config.terrain_params(seed)),
            mesh_builder,
            renderer_factory,
        })
    }

    /// Creates a scheduler, resolving the seed from the config's seed policy.
    ///
    /// # Errors
    /// [`ConfigError::Invalid`] if `config` fails [`WorldConfig::validate`].
    pub fn from_config(
        config: &WorldConfig,
        mesh_builder: M,
        renderer_factory: F,
    ) -> Result<Self, ConfigError> {
        let seed = config.seed.resolve();
        info!(
            "Creating world: seed {}, chunk size {}, view distance {} chunks",
            seed, config.chunk_size, config.view_distance_in_chunk
        );
        Self::new(config, seed, mesh_builder, renderer_factory)
    }

    /// The chunk ledger.
    pub fn store(&self) -> &ChunkStore<F::Renderer> {
        &self.store
    }

    /// Mutable access to the chunk ledger.
    pub fn store_mut(&mut self) -> &mut ChunkStore<F::Renderer> {
        &mut self.store
    }

    /// The terrain generator.
    pub fn synthesizer(&self) -> &VoxelSynthesizer {
        &self.synthesizer
    }

    /// The render handle factory.
    pub fn renderer_factory(&self) -> &F {
        &self.renderer_factory
    }

    /// The seed this world was generated with.
    pub fn seed(&self) -> i32 {
        self.synthesizer.params().seed
    }

    /// The view volume around `observer`.
    pub fn view_volume(&self, observer: Point3<f32>) -> ViewVolume {
        ViewVolume::around(observer, self.store.chunk_size(), self.view_distance_in_chunk)
    }

    /// Creates chunk data for every anchor of the view volume that has none.
    pub fn ensure_view_volume(&mut self, observer: Point3<f32>) -> ViewVolume {
        let volume = self.view_volume(observer);
        for anchor in volume.anchors(self.store.chunk_size()) {
            self.store.ensure_chunk(anchor);
        }
        volume
    }

    /// The unbuilt chunk whose anchor is closest to `observer`.
    ///
    /// Equal distances resolve to the chunk created first.
    pub fn select_nearest_pending(&self, observer: Point3<f32>) -> Option<Point3<i32>> {
        let mut closest: Option<(Point3<i32>, f32)> = None;
        for (anchor, _) in self.store.pending_chunks() {
            let anchor_position = Point3::new(anchor.x as f32, anchor.y as f32, anchor.z as f32);
            let distance = observer.distance(anchor_position);
            if closest.map_or(true, |(_, best)| distance < best) {
                closest = Some((anchor, distance));
            }
        }
        closest.map(|(anchor, _)| anchor)
    }

    /// First phase of a tick: ensure, select and synthesize.
    ///
    /// # Returns
    /// The chunk to build, or `None` when every known chunk is already built.
    pub fn stage(&mut self, observer: Point3<f32>) -> Option<StagedBuild> {
        self.ensure_view_volume(observer);

        let anchor = self.select_nearest_pending(observer)?;
        let chunk = self.store.lookup_data(anchor)?;
        trace!("Selected chunk {:?} for building", anchor);

        let needs_synthesis = {
            let data = chunk.get();
            !data.is_generated() && !data.modified_by_player()
        };
        if needs_synthesis {
            self.synthesizer.synthesize(&mut chunk.get_mut());
        }

        Some(StagedBuild { anchor, chunk })
    }

    /// Second phase of a tick: build the staged chunk.
    pub fn commit(&mut self, staged: StagedBuild) -> Result<BuildOutcome, StreamingError> {
        self.build_chunk(staged.anchor)
    }

    /// Runs both phases of a tick.
    ///
    /// # Returns
    /// The build performed this tick, if any.
    pub fn tick(&mut self, observer: Point3<f32>) -> Result<Option<BuildOutcome>, StreamingError> {
        match self.stage(observer) {
            Some(staged) => self.commit(staged).map(Some),
            None => Ok(None),
        }
    }

    /// Meshes the chunk at `anchor`, registers or refreshes its render handle and
    /// refreshes its built face neighbours.
    ///
    /// # Errors
    /// [`StreamingError::MissingChunkData`] if the store has no chunk at `anchor`.
    pub fn build_chunk(&mut self, anchor: Point3<i32>) -> Result<BuildOutcome, StreamingError> {
        let started = Instant::now();
        let chunk = self
            .store
            .lookup_data(anchor)
            .ok_or(StreamingError::MissingChunkData(anchor))?;

        let mesh = self.mesh_builder.build_mesh(&chunk.get(), &self.store);

        let rebuilt = match self.store.renderer(anchor) {
            Some(renderer) => {
                debug!("Chunk {:?} is already built, rebuilding its mesh", anchor);
                renderer.get_mut().update_chunk(mesh);
                true
            }
            None => {
                let renderer = self.renderer_factory.spawn(anchor);
                let renderer = self.store.register_built(anchor, renderer)?;
                let mut renderer = renderer.get_mut();
                renderer.initialize_chunk(chunk.downgrade());
                renderer.update_chunk(mesh);
                false
            }
        };

        let neighbors_refreshed =
            neighbors::notify_neighbors(&self.store, anchor, &self.mesh_builder);

        debug!(
            "Built chunk {:?} ({} neighbours refreshed) in {:?}",
            anchor,
            neighbors_refreshed,
            started.elapsed()
        );

        Ok(if rebuilt {
            BuildOutcome::Rebuilt {
                anchor,
                neighbors_refreshed,
            }
        } else {
            BuildOutcome::Built {
                anchor,
                neighbors_refreshed,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::SeedPolicy,
        engine_state::{
            rendering::{
                headless::{HeadlessRenderer, HeadlessRendererFactory},
                CulledMeshBuilder,
            },
            voxels::block::block_type::BlockType,
        },
    };

    type TestScheduler = StreamingScheduler<HeadlessRendererFactory, CulledMeshBuilder>;

    fn scheduler(chunk_size: i32, view_distance_in_chunk: i32) -> TestScheduler {
        let config = WorldConfig {
            chunk_size,
            view_distance_in_chunk,
            ground_level: 2,
            seed: SeedPolicy::Fixed(123),
            ..WorldConfig::default()
        };
        StreamingScheduler::from_config(&config, CulledMeshBuilder, HeadlessRendererFactory::new())
            .unwrap()
    }

    fn renderer(scheduler: &TestScheduler, anchor: Point3<i32>) -> crate::core::StResource<HeadlessRenderer> {
        scheduler.store().renderer(anchor).unwrap()
    }

    #[test]
    fn selects_the_nearest_pending_chunk() {
        let mut scheduler = scheduler(1, 1);
        scheduler.store_mut().ensure_chunk(Point3::new(5, 0, 0));
        scheduler.store_mut().ensure_chunk(Point3::new(0, 2, 0));
        scheduler.store_mut().ensure_chunk(Point3::new(0, 0, 9));
        assert_eq!(
            scheduler.select_nearest_pending(Point3::new(0.0, 0.0, 0.0)),
            Some(Point3::new(0, 2, 0))
        );
    }

    #[test]
    fn equal_distances_resolve_to_the_first_created() {
        let mut scheduler = scheduler(1, 1);
        scheduler.store_mut().ensure_chunk(Point3::new(3, 0, 0));
        scheduler.store_mut().ensure_chunk(Point3::new(-3, 0, 0));
        assert_eq!(
            scheduler.select_nearest_pending(Point3::new(0.0, 0.0, 0.0)),
            Some(Point3::new(3, 0, 0))
        );
    }

    #[test]
    fn built_chunks_are_not_selected() {
        let mut scheduler = scheduler(1, 1);
        scheduler.store_mut().ensure_chunk(Point3::new(1, 0, 0));
        scheduler.store_mut().ensure_chunk(Point3::new(4, 0, 0));
        scheduler.build_chunk(Point3::new(1, 0, 0)).unwrap();
        assert_eq!(
            scheduler.select_nearest_pending(Point3::new(0.0, 0.0, 0.0)),
            Some(Point3::new(4, 0, 0))
        );
    }

    #[test]
    fn one_chunk_per_tick_until_the_volume_is_built() {
        let mut scheduler = scheduler(4, 2);
        let observer = Point3::new(0.0, 0.0, 0.0);

        let first = scheduler.tick(observer).unwrap().unwrap();
        assert_eq!(first.anchor(), Point3::new(0, 0, 0));
        assert_eq!(scheduler.store().len(), 8);
        assert_eq!(scheduler.store().built_len(), 1);

        for built in 2..=8 {
            assert!(scheduler.tick(observer).unwrap().is_some());
            assert_eq!(scheduler.store().built_len(), built);
        }
        assert_eq!(scheduler.tick(observer).unwrap(), None);
        assert_eq!(scheduler.renderer_factory().spawned(), 8);
    }

    #[test]
    fn staging_synthesizes_without_building() {
        let mut scheduler = scheduler(4, 2);
        let staged = scheduler.stage(Point3::new(0.0, 0.0, 0.0)).unwrap();
        assert!(staged.chunk().get().is_generated());
        assert!(!scheduler.store().is_built(staged.anchor()));

        let outcome = scheduler.commit(staged).unwrap();
        assert!(matches!(outcome, BuildOutcome::Built { .. }));
        assert!(scheduler.store().is_built(outcome.anchor()));
    }

    #[test]
    fn unstaged_chunks_stay_unsynthesized() {
        let mut scheduler = scheduler(4, 2);
        scheduler.ensure_view_volume(Point3::new(0.0, 0.0, 0.0));
        assert!(scheduler
            .store()
            .chunks()
            .all(|(_, chunk)| !chunk.get().is_generated()));
    }

    #[test]
    fn building_twice_never_duplicates_the_handle() {
        let mut scheduler = scheduler(4, 1);
        let anchor = Point3::new(0, 0, 0);
        scheduler.store_mut().ensure_chunk(anchor);

        let first = scheduler.build_chunk(anchor).unwrap();
        let second = scheduler.build_chunk(anchor).unwrap();
        assert!(matches!(first, BuildOutcome::Built { .. }));
        assert!(matches!(second, BuildOutcome::Rebuilt { .. }));
        assert_eq!(scheduler.store().built_len(), 1);
        assert_eq!(scheduler.renderer_factory().spawned(), 1);
        assert_eq!(renderer(&scheduler, anchor).get().mesh_updates(), 2);
    }

    #[test]
    fn building_unknown_chunk_fails() {
        let mut scheduler = scheduler(4, 1);
        assert_eq!(
            scheduler.build_chunk(Point3::new(4, 0, 0)),
            Err(StreamingError::MissingChunkData(Point3::new(4, 0, 0)))
        );
        assert_eq!(scheduler.renderer_factory().spawned(), 0);
    }

    #[test]
    fn building_a_neighbour_refreshes_the_earlier_chunk() {
        let mut scheduler = scheduler(4, 1);
        let a = Point3::new(0, 0, 0);
        let b = Point3::new(4, 0, 0);
        let far = Point3::new(12, 0, 0);
        for anchor in [a, b, far] {
            scheduler.store_mut().ensure_chunk(anchor);
        }

        let outcome = scheduler.build_chunk(a).unwrap();
        assert_eq!(
            outcome,
            BuildOutcome::Built {
                anchor: a,
                neighbors_refreshed: 0
            }
        );
        assert_eq!(renderer(&scheduler, a).get().refreshes(), 0);

        let outcome = scheduler.build_chunk(b).unwrap();
        assert_eq!(
            outcome,
            BuildOutcome::Built {
                anchor: b,
                neighbors_refreshed: 1
            }
        );
        assert_eq!(renderer(&scheduler, a).get().refreshes(), 1);
        assert_eq!(renderer(&scheduler, b).get().refreshes(), 0);

        scheduler.build_chunk(far).unwrap();
        assert_eq!(renderer(&scheduler, a).get().refreshes(), 1);
        assert_eq!(renderer(&scheduler, b).get().refreshes(), 0);
    }

    #[test]
    fn neighbour_refresh_closes_the_seam() {
        let mut scheduler = scheduler(2, 1);
        let a = Point3::new(0, 0, 0);
        let b = Point3::new(2, 0, 0);
        let chunk_a = scheduler.store_mut().ensure_chunk(a);
        chunk_a.get_mut().edit_block(Point3::new(1, 0, 0), BlockType::DIRT);

        scheduler.build_chunk(a).unwrap();
        let faces_before = renderer(&scheduler, a).get().mesh().unwrap().face_count();
        assert_eq!(faces_before, 6);

        let chunk_b = scheduler.store_mut().ensure_chunk(b);
        chunk_b.get_mut().edit_block(Point3::new(0, 0, 0), BlockType::DIRT);
        scheduler.build_chunk(b).unwrap();
        let faces_after = renderer(&scheduler, a).get().mesh().unwrap().face_count();
        assert_eq!(faces_after, 5);
    }

    #[test]
    fn edited_chunks_are_not_regenerated_when_staged() {
        let mut scheduler = scheduler(4, 1);
        let anchor = Point3::new(0, 0, 0);
        let chunk = scheduler.store_mut().ensure_chunk(anchor);
        chunk.get_mut().edit_block(Point3::new(2, 2, 2), BlockType::DIRT);
        let before = chunk.get().as_bytes().to_vec();

        let staged = scheduler.stage(Point3::new(1.0, 1.0, 1.0)).unwrap();
        assert_eq!(staged.anchor(), anchor);
        assert_eq!(chunk.get().as_bytes(), before.as_slice());
        scheduler.commit(staged).unwrap();
    }

    #[test]
    fn moving_observer_extends_the_store() {
        let mut scheduler = scheduler(4, 2);
        scheduler.tick(Point3::new(0.0, 0.0, 0.0)).unwrap();
        assert_eq!(scheduler.store().len(), 8);
        let outcome = scheduler.tick(Point3::new(40.0, 0.0, 0.0)).unwrap().unwrap();
        assert_eq!(scheduler.store().len(), 16);
        assert_eq!(outcome.anchor(), Point3::new(40, 0, 0));
    }

    #[test]
    fn unvalidated_config_is_rejected() {
        let config = WorldConfig {
            chunk_size: 0,
            ..WorldConfig::default()
        };
        let result = TestScheduler::from_config(
            &config,
            CulledMeshBuilder,
            HeadlessRendererFactory::new(),
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn far_observers_stream_without_overflow() {
        let mut scheduler = scheduler(16, 2);
        for observer in [
            Point3::new(3.0e10, 0.0, 0.0),
            Point3::new(-3.0e10, 3.0e10, -3.0e10),
            Point3::new(f32::MAX, f32::MIN, 0.0),
        ] {
            let outcome = scheduler.tick(observer).unwrap().unwrap();
            let anchor = outcome.anchor();
            assert_eq!(anchor.x % 16, 0);
            assert_eq!(anchor.y % 16, 0);
            assert_eq!(anchor.z % 16, 0);
        }
        assert_eq!(scheduler.store().len(), 24);
    }
}
