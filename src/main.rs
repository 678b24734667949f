//! Headless streaming driver: walks an observer through the world, ticks the
//! chunk controller, and reports what a renderer would have uploaded.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{info, warn};
use strata_runtime::Runtime;
use strata_stream::{ChunkRegistry, StreamingController};
use strata_world::{World, WorldGenConfig};

#[derive(Parser, Debug)]
#[command(name = "strata", about = "Streaming voxel terrain engine, headless")]
struct Args {
    /// World seed.
    #[arg(long, default_value_t = 0)]
    seed: u32,

    /// Render radius in chunks around the observer.
    #[arg(long, default_value_t = 16)]
    radius: i32,

    /// Streaming ticks to run before the summary.
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Observer speed in blocks per tick.
    #[arg(long, default_value_t = 1.5)]
    speed: f32,

    /// Terrain parameter file; stock parameters when omitted or unreadable.
    #[arg(long, default_value = "worldgen.toml")]
    config: PathBuf,

    /// Worker thread count; defaults to hardware threads minus one.
    #[arg(long)]
    workers: Option<usize>,
}

struct UploadStats {
    meshes: usize,
    vertices: usize,
}

fn drain_uploads(
    controller: &mut StreamingController,
    registry: &mut ChunkRegistry,
    pos: (f32, f32, f32),
    radius: i32,
    stats: &mut UploadStats,
) {
    for coord in controller.update_chunks(registry, pos, radius) {
        if let Some(mesh) = registry.get(coord).and_then(|e| e.mesh()) {
            stats.meshes += 1;
            stats.vertices += mesh.vertex_count();
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let cfg = if args.config.is_file() {
        match WorldGenConfig::load_from_path(&args.config) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("ignoring {}: {e}", args.config.display());
                WorldGenConfig::default()
            }
        }
    } else {
        WorldGenConfig::default()
    };

    let world = Arc::new(World::new(args.seed, cfg));
    let runtime = match args.workers {
        Some(n) => Runtime::with_workers(world.clone(), n),
        None => Runtime::new(world.clone()),
    };
    info!(
        "seed {} radius {} workers {}",
        args.seed, args.radius, runtime.workers
    );

    let mut controller = StreamingController::new(world.clone(), runtime);
    let mut registry = ChunkRegistry::new();
    let mut stats = UploadStats {
        meshes: 0,
        vertices: 0,
    };

    let mut pos = (8.0f32, 0.0, 8.0);
    let t_start = Instant::now();
    let mut last_report = Instant::now();

    for tick in 0..args.ticks {
        // Diagonal walk, hugging the terrain, so chunk borders keep crossing.
        pos.0 += args.speed;
        pos.2 += args.speed * 0.5;
        pos.1 = world.surface_height(pos.0 as i32, pos.2 as i32) as f32 + 2.0;

        drain_uploads(&mut controller, &mut registry, pos, args.radius, &mut stats);

        if last_report.elapsed() >= Duration::from_secs(1) {
            let (queued, inflight) = controller.runtime().queue_debug_counts();
            info!(
                "tick {tick} | pos ({:.0}, {:.0}, {:.0}) | chunks {} | queued {} | in-flight {} | uploads {} | verts {}",
                pos.0,
                pos.1,
                pos.2,
                registry.len(),
                queued,
                inflight,
                stats.meshes,
                stats.vertices
            );
            last_report = Instant::now();
        }
        thread::sleep(Duration::from_millis(5));
    }

    // Let in-flight work land so the summary reflects a settled registry.
    let deadline = Instant::now() + Duration::from_secs(10);
    while !controller.runtime().is_idle() && Instant::now() < deadline {
        drain_uploads(&mut controller, &mut registry, pos, args.radius, &mut stats);
        thread::sleep(Duration::from_millis(2));
    }
    drain_uploads(&mut controller, &mut registry, pos, args.radius, &mut stats);

    info!(
        "done: {} ticks in {:.1}s | {} resident chunks | {} mesh uploads | {} vertices total",
        args.ticks,
        t_start.elapsed().as_secs_f32(),
        registry.len(),
        stats.meshes,
        stats.vertices
    );
}
