mod app;
mod gpu;

use anyhow::{Context, Result};
use clap::Parser;
use winit::event_loop::{ControlFlow, EventLoop};

use cellular_automata::config::{
    LaunchConfig, DEFAULT_CELLS_X, DEFAULT_CELLS_Y, DEFAULT_FPS, DEFAULT_WINDOW_X,
    DEFAULT_WINDOW_Y,
};
use cellular_automata::models::Model;

use crate::app::App;

/// Edit a grid, then watch a cellular automaton evolve.
#[derive(Parser)]
#[command(name = "cellular-automata", about = "Run a cellular automaton in a window")]
struct Args {
    /// Automaton to run.
    #[arg(long, value_enum, default_value_t = Model::Conways)]
    model: Model,

    /// Steps per second once started.
    #[arg(long, default_value_t = DEFAULT_FPS)]
    fps: u32,

    /// Grid width in cells.
    #[arg(long, default_value_t = DEFAULT_CELLS_X)]
    cells_x: usize,

    /// Grid height in cells.
    #[arg(long, default_value_t = DEFAULT_CELLS_Y)]
    cells_y: usize,

    /// Window width in pixels.
    #[arg(long, default_value_t = DEFAULT_WINDOW_X)]
    window_x: usize,

    /// Window height in pixels.
    #[arg(long, default_value_t = DEFAULT_WINDOW_Y)]
    window_y: usize,

    /// Seed for reproducible runs of probabilistic automata.
    #[arg(long)]
    seed: Option<u64>,
}

impl From<Args> for LaunchConfig {
    fn from(args: Args) -> Self {
        Self {
            fps: args.fps,
            cells_x: args.cells_x,
            cells_y: args.cells_y,
            window_x: args.window_x,
            window_y: args.window_y,
            model: args.model,
            seed: args.seed,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = LaunchConfig::from(Args::parse());
    let mut app = App::new(config).context("invalid launch configuration")?;

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop
        .run_app(&mut app)
        .context("event loop terminated with an error")?;

    app.finish()
}
