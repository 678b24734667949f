//! Background worker pool: job queue in, completion channels out.
#![forbid(unsafe_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender, unbounded};
use log::debug;
use rayon::{ThreadPool, ThreadPoolBuilder};
use strata_chunk::{ChunkGrid, ChunkOccupancy, generate_chunk_grid};
use strata_mesh_cpu::{ChunkMeshCPU, NeighborGrids, build_chunk_vertices};
use strata_world::{ChunkCoord, World};

/// Unit of background work. Jobs carry coordinates and value snapshots only;
/// nothing in here may point back into the registry.
pub enum Job {
    Terrain {
        coord: ChunkCoord,
    },
    Mesh {
        coord: ChunkCoord,
        grid: Arc<ChunkGrid>,
        neighbors: NeighborGrids,
    },
}

pub struct TerrainJobOut {
    pub coord: ChunkCoord,
    pub grid: ChunkGrid,
    pub occupancy: ChunkOccupancy,
    pub t_gen_ms: u32,
}

pub struct MeshJobOut {
    pub coord: ChunkCoord,
    pub mesh: ChunkMeshCPU,
    pub t_mesh_ms: u32,
}

#[inline]
fn elapsed_ms(t0: Instant) -> u32 {
    t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32
}

fn process_job(
    job: Job,
    world: &World,
    terrain_tx: &Sender<TerrainJobOut>,
    mesh_tx: &Sender<MeshJobOut>,
) {
    match job {
        Job::Terrain { coord } => {
            let t0 = Instant::now();
            let generated = generate_chunk_grid(world, coord);
            let t_gen_ms = elapsed_ms(t0);
            let _ = terrain_tx.send(TerrainJobOut {
                coord,
                grid: generated.grid,
                occupancy: generated.occupancy,
                t_gen_ms,
            });
        }
        Job::Mesh {
            coord,
            grid,
            neighbors,
        } => {
            let t0 = Instant::now();
            let mesh = build_chunk_vertices(&grid, &neighbors);
            let t_mesh_ms = elapsed_ms(t0);
            let _ = mesh_tx.send(MeshJobOut {
                coord,
                mesh,
                t_mesh_ms,
            });
        }
    }
}

/// Fixed worker pool plus the two completion channels. Submission is
/// fire-and-forget; the owning thread drains results without blocking.
/// Dropping the runtime closes the job channel: workers finish what they
/// hold, observe the disconnect, and exit.
pub struct Runtime {
    job_tx: Sender<Job>,
    terrain_rx: Receiver<TerrainJobOut>,
    mesh_rx: Receiver<MeshJobOut>,
    _pool: Arc<ThreadPool>,
    queued: Arc<AtomicUsize>,
    inflight: Arc<AtomicUsize>,
    pub workers: usize,
}

impl Runtime {
    pub fn new(world: Arc<World>) -> Self {
        let workers = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(2)
            .saturating_sub(1)
            .max(1);
        Self::with_workers(world, workers)
    }

    pub fn with_workers(world: Arc<World>, workers: usize) -> Self {
        let workers = workers.max(1);
        let (job_tx, job_rx) = unbounded::<Job>();
        let (terrain_tx, terrain_rx) = unbounded::<TerrainJobOut>();
        let (mesh_tx, mesh_rx) = unbounded::<MeshJobOut>();

        let queued = Arc::new(AtomicUsize::new(0));
        let inflight = Arc::new(AtomicUsize::new(0));

        let pool = Arc::new(
            ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("strata-worker-{i}"))
                .build()
                .expect("worker pool"),
        );
        for _ in 0..workers {
            let rx = job_rx.clone();
            let terrain_tx = terrain_tx.clone();
            let mesh_tx = mesh_tx.clone();
            let world = world.clone();
            let queued = queued.clone();
            let inflight = inflight.clone();
            pool.spawn(move || {
                while let Ok(job) = rx.recv() {
                    queued.fetch_sub(1, Ordering::Relaxed);
                    inflight.fetch_add(1, Ordering::Relaxed);
                    process_job(job, world.as_ref(), &terrain_tx, &mesh_tx);
                    inflight.fetch_sub(1, Ordering::Relaxed);
                }
                debug!("worker exiting after job channel close");
            });
        }

        Self {
            job_tx,
            terrain_rx,
            mesh_rx,
            _pool: pool,
            queued,
            inflight,
            workers,
        }
    }

    pub fn submit(&self, job: Job) {
        self.queued.fetch_add(1, Ordering::Relaxed);
        if self.job_tx.send(job).is_err() {
            self.queued.fetch_sub(1, Ordering::Relaxed);
        }
    }

    pub fn submit_terrain(&self, coord: ChunkCoord) {
        self.submit(Job::Terrain { coord });
    }

    pub fn submit_mesh(&self, coord: ChunkCoord, grid: Arc<ChunkGrid>, neighbors: NeighborGrids) {
        self.submit(Job::Mesh {
            coord,
            grid,
            neighbors,
        });
    }

    /// Non-blocking drain of finished terrain grids.
    pub fn drain_terrain_results(&self) -> Vec<TerrainJobOut> {
        self.terrain_rx.try_iter().collect()
    }

    /// Non-blocking drain of finished meshes.
    pub fn drain_mesh_results(&self) -> Vec<MeshJobOut> {
        self.mesh_rx.try_iter().collect()
    }

    /// (queued, in-flight) snapshot for the stats line.
    pub fn queue_debug_counts(&self) -> (usize, usize) {
        (
            self.queued.load(Ordering::Relaxed),
            self.inflight.load(Ordering::Relaxed),
        )
    }

    /// True once every submitted job has been drained from the queue and no
    /// worker is mid-job. Results may still be waiting in the channels.
    pub fn is_idle(&self) -> bool {
        let (q, f) = self.queue_debug_counts();
        q == 0 && f == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use strata_blocks::Block;
    use strata_world::WorldGenConfig;

    fn wait_for<T>(mut poll: impl FnMut() -> Vec<T>) -> Vec<T> {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            let out = poll();
            if !out.is_empty() {
                return out;
            }
            assert!(Instant::now() < deadline, "no completion within deadline");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn terrain_job_round_trips_through_the_pool() {
        let world = Arc::new(World::new(5, WorldGenConfig::default()));
        let rt = Runtime::with_workers(world.clone(), 2);
        let coord = ChunkCoord::new(3, -4);
        rt.submit_terrain(coord);
        let results = wait_for(|| rt.drain_terrain_results());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].coord, coord);
        assert!(results[0].occupancy.has_blocks());
        // Worker output matches an inline generation of the same chunk.
        let inline = generate_chunk_grid(&world, coord);
        assert_eq!(
            results[0].grid.get(0, 0, 0),
            inline.grid.get(0, 0, 0)
        );
    }

    #[test]
    fn mesh_job_round_trips_through_the_pool() {
        let world = Arc::new(World::new(5, WorldGenConfig::default()));
        let rt = Runtime::with_workers(world, 1);
        let coord = ChunkCoord::new(0, 0);
        let mut grid = ChunkGrid::new(coord, 16, 128, 16);
        grid.set(8, 64, 8, Block::Stone);
        rt.submit_mesh(coord, Arc::new(grid), NeighborGrids::empty());
        let results = wait_for(|| rt.drain_mesh_results());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].mesh.vertex_count(), 36);
    }

    #[test]
    fn counters_settle_once_work_completes() {
        let world = Arc::new(World::new(9, WorldGenConfig::default()));
        let rt = Runtime::with_workers(world, 2);
        for i in 0..6 {
            rt.submit_terrain(ChunkCoord::new(i, 0));
        }
        let mut done = Vec::new();
        let deadline = Instant::now() + Duration::from_secs(10);
        while done.len() < 6 {
            done.extend(rt.drain_terrain_results());
            assert!(Instant::now() < deadline, "jobs did not all complete");
            thread::sleep(Duration::from_millis(5));
        }
        // All six drained, so nothing is queued or running.
        let deadline = Instant::now() + Duration::from_secs(5);
        while !rt.is_idle() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        assert!(rt.is_idle());
    }

    #[test]
    fn drop_with_pending_results_does_not_hang() {
        let world = Arc::new(World::new(1, WorldGenConfig::default()));
        let rt = Runtime::with_workers(world, 1);
        rt.submit_terrain(ChunkCoord::new(0, 0));
        drop(rt);
    }
}
