use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use rainhouse_io::export_obj;
use rainhouse_rain::{RainBounds, RainBuffer, RainSettings, StepParams};
use rainhouse_scene::{FrameSink, FrameState, HouseConfig, SceneNode, assemble_house, run_frames};
use rainhouse_wall::{WindowHole, build_wall_with_holes};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "rainhouse")]
#[command(about = "Rainy house scene: windowed wall builder and rain stepper")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Wall(WallArgs),
    Rain(RainArgs),
    Scene(SceneArgs),
}

#[derive(Args)]
struct WallArgs {
    #[arg(long, default_value_t = 19.0)]
    width: f64,
    #[arg(long, default_value_t = 12.0)]
    height: f64,
    /// Window as `x,y,width,height`, centered at `x,y`. Repeatable.
    #[arg(long = "window", allow_hyphen_values = true)]
    windows: Vec<String>,
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args)]
struct RainArgs {
    #[arg(long, default_value_t = 10_000)]
    count: usize,
    #[arg(long, default_value_t = 1000)]
    frames: u64,
    #[arg(long, default_value_t = 0.5)]
    drop: f32,
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct SceneArgs {
    /// JSON house configuration; defaults apply to missing fields.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 600)]
    frames: u64,
    /// Directory to write every wall mesh into as OBJ.
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Wall(args) => export_wall(args),
        Command::Rain(args) => simulate_rain(args),
        Command::Scene(args) => run_scene(args),
    }
}

fn export_wall(args: WallArgs) -> Result<()> {
    let windows = args
        .windows
        .iter()
        .map(|text| parse_window(text))
        .collect::<Result<Vec<_>>>()?;
    let mesh = build_wall_with_holes(args.width, args.height, &windows)
        .context("failed to build wall")?;

    export_obj(&mesh, &args.out).context("OBJ export failed")?;
    info!(
        path = %args.out.display(),
        vertices = mesh.positions().len(),
        triangles = mesh.triangles().len(),
        "OBJ export complete"
    );
    Ok(())
}

fn simulate_rain(args: RainArgs) -> Result<()> {
    let settings = RainSettings {
        count: args.count,
        drop_per_tick: args.drop,
        ..RainSettings::default()
    };
    let bounds = RainBounds::default();
    let mut buffer = match args.seed {
        Some(seed) => {
            let mut rng = SmallRng::seed_from_u64(seed);
            RainBuffer::initialize_with_rng(settings.count, &bounds, &mut rng)
        }
        None => RainBuffer::initialize(settings.count, &bounds),
    }
    .context("failed to seed rain")?;

    let params = StepParams::from(&settings);
    let mut wrapped = 0;
    for _ in 0..args.frames {
        wrapped += buffer.step(&params).context("rain step failed")?;
    }

    let (low, high) = buffer.y_range().unwrap_or((0.0, 0.0));
    info!(
        particles = buffer.len(),
        frames = args.frames,
        wrapped,
        low,
        high,
        "rain simulation complete"
    );
    Ok(())
}

fn run_scene(args: SceneArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => HouseConfig::default(),
    };
    let scene = assemble_house(&config).context("failed to assemble house")?;

    if let Some(dir) = &args.out_dir {
        for (node, mesh) in scene.walls() {
            let path = dir.join(format!("{}.obj", node.name));
            export_obj(mesh, &path).with_context(|| format!("export {}", node.name))?;
            debug!(path = %path.display(), "wall exported");
        }
    }

    let state = FrameState::new(scene, StepParams::from(&config.rain));
    let mut sink = LogSink::default();
    let state = run_frames(state, args.frames, &mut sink).context("frame loop failed")?;
    info!(
        frames = state.frame,
        uploads = sink.uploads,
        walls = state.scene.walls().count(),
        "scene run complete"
    );
    Ok(())
}

/// Headless stand-in for the renderer.
#[derive(Default)]
struct LogSink {
    uploads: u64,
}

impl FrameSink for LogSink {
    fn upload_rain(&mut self, positions: &[f32]) {
        self.uploads += 1;
        debug!(floats = positions.len(), "rain upload");
    }

    fn present(&mut self, frame: u64, scene: &SceneNode) {
        if frame % 100 == 0 {
            debug!(frame, nodes = scene.iter().count(), "frame presented");
        }
    }
}

fn load_config(path: &Path) -> Result<HouseConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse config {}", path.display()))
}

fn parse_window(text: &str) -> Result<WindowHole> {
    let parts: Vec<&str> = text.split(',').collect();
    if parts.len() != 4 {
        bail!("--window expects four comma-separated numbers, e.g. -6,7,3,2.8");
    }

    let x: f64 = parts[0].trim().parse().context("invalid window x")?;
    let y: f64 = parts[1].trim().parse().context("invalid window y")?;
    let width: f64 = parts[2].trim().parse().context("invalid window width")?;
    let height: f64 = parts[3].trim().parse().context("invalid window height")?;
    Ok(WindowHole::new(x, y, width, height))
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
