use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use cellular_automata::config::LaunchConfig;
use cellular_automata::simulation::{Canvas, Grid, Simulation};

use crate::gpu::{FrameBuffers, GpuContext, PresentPipeline};

/// Application state
pub struct App {
    config: LaunchConfig,
    canvas: Canvas,
    simulation: Simulation,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    frame_buffers: Option<FrameBuffers>,
    present_pipeline: Option<PresentPipeline>,
    cursor: Option<PhysicalPosition<f64>>,
    step_interval: Duration,
    last_step: Instant,
    dirty: bool,
    step_counter: StepCounter,
    error: Option<anyhow::Error>,
}

impl App {
    pub fn new(config: LaunchConfig) -> Result<Self> {
        config.validate()?;

        let canvas = Canvas::new(config.cells_x, config.cells_y, config.window_x, config.window_y)?;
        let automaton = config.model.build()?;
        let grid = Grid::new(config.cells_x, config.cells_y)?;
        let simulation = Simulation::new(automaton, grid, config.seed);

        Ok(Self {
            step_interval: Duration::from_secs_f64(1.0 / config.fps as f64),
            config,
            canvas,
            simulation,
            window: None,
            gpu: None,
            frame_buffers: None,
            present_pipeline: None,
            cursor: None,
            last_step: Instant::now(),
            dirty: true,
            step_counter: StepCounter::new(),
            error: None,
        })
    }

    /// Surface the first fatal error hit inside the event loop, if any
    pub fn finish(self) -> Result<()> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        log::info!("Initializing {:?} automaton...", self.config.model);
        log::info!(
            "Grid size: {}x{} cells, {}x{} pixels",
            self.config.cells_x,
            self.config.cells_y,
            self.config.window_x,
            self.config.window_y
        );

        let (width, height) = self.config.window_size()?;
        let window_attrs = Window::default_attributes()
            .with_title("Cellular Automata - Editing")
            .with_inner_size(winit::dpi::PhysicalSize::new(width, height));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        log::info!("Creating GPU context...");
        let gpu = pollster::block_on(GpuContext::new(window.clone()))?;

        let frame_buffers = FrameBuffers::new(&gpu.device, &self.canvas)?;
        let present_pipeline = PresentPipeline::new(&gpu, &frame_buffers);

        log::info!("Initialization complete!");
        log::info!("Controls:");
        log::info!("  Left click: Cycle cell state (before start)");
        log::info!("  R: Randomize grid (before start)");
        log::info!("  C: Clear grid (before start)");
        log::info!("  S: Start simulation");
        log::info!("  Escape: Quit");

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.frame_buffers = Some(frame_buffers);
        self.present_pipeline = Some(present_pipeline);
        self.dirty = true;
        Ok(())
    }

    fn render(&mut self) {
        let (Some(gpu), Some(buffers), Some(present)) = (
            self.gpu.as_ref(),
            self.frame_buffers.as_ref(),
            self.present_pipeline.as_ref(),
        ) else {
            return;
        };

        if self.simulation.is_started() && self.last_step.elapsed() >= self.step_interval {
            self.last_step = Instant::now();
            self.simulation.advance();
            self.dirty = true;

            if let Some(rate) = self.step_counter.tick() {
                if let Some(window) = &self.window {
                    window.set_title(&format!(
                        "Cellular Automata - Generation {} - {:.0} steps/s",
                        self.simulation.generation(),
                        rate
                    ));
                }
            }
        }

        if self.dirty {
            buffers.upload(&gpu.queue, &self.simulation.paint(&self.canvas));
            self.dirty = false;
        }
        buffers.update_params(&gpu.queue, gpu.size());

        if let Some(frame) = gpu.acquire_frame() {
            present.present(gpu, frame);
        }
    }

    fn handle_key(&mut self, key_code: KeyCode) {
        match key_code {
            KeyCode::KeyS => {
                if !self.simulation.is_started() {
                    self.simulation.start();
                    self.last_step = Instant::now();
                    if let Some(window) = &self.window {
                        window.set_title("Cellular Automata - Running");
                    }
                }
            }
            KeyCode::KeyR => {
                if self.simulation.randomize(&mut rand::thread_rng()) {
                    log::info!("Grid randomized");
                    self.dirty = true;
                }
            }
            KeyCode::KeyC => {
                if self.simulation.clear() {
                    log::info!("Grid cleared");
                    self.dirty = true;
                }
            }
            _ => {}
        }
    }

    fn handle_click(&mut self) {
        let (Some(cursor), Some(gpu)) = (self.cursor, self.gpu.as_ref()) else {
            return;
        };

        let Some((px, py)) = surface_to_canvas(cursor, gpu.size(), self.canvas.real_size()) else {
            return;
        };

        if let Some((x, y)) = self.canvas.pixel_to_cell(px, py) {
            if let Some(state) = self.simulation.edit(x, y) {
                log::debug!("Cell ({}, {}) set to state {}", x, y, state);
                self.dirty = true;
            }
        }
    }
}

/// Map a cursor position on the surface to a real pixel of the painted
/// buffer, whose y axis points up.
fn surface_to_canvas(
    cursor: PhysicalPosition<f64>,
    surface_size: (u32, u32),
    real_size: (usize, usize),
) -> Option<(usize, usize)> {
    let (surface_w, surface_h) = (surface_size.0 as f64, surface_size.1 as f64);
    if surface_w <= 0.0 || surface_h <= 0.0 || cursor.x < 0.0 || cursor.y < 0.0 {
        return None;
    }

    let px = (cursor.x / surface_w * real_size.0 as f64) as usize;
    let row = (cursor.y / surface_h * real_size.1 as f64) as usize;
    if px >= real_size.0 || row >= real_size.1 {
        return None;
    }

    Some((px, real_size.1 - 1 - row))
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init(event_loop) {
            log::error!("Initialization failed: {:#}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() && !event.repeat {
                    if let PhysicalKey::Code(key_code) = event.physical_key {
                        if key_code == KeyCode::Escape {
                            log::info!("Escape pressed, exiting...");
                            event_loop.exit();
                        } else {
                            self.handle_key(key_code);
                        }
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some(position);
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                self.handle_click();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    log::info!("Window resized to {}x{}", new_size.width, new_size.height);
                    gpu.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Simple steps-per-second counter
struct StepCounter {
    last_update: Instant,
    step_count: u32,
}

impl StepCounter {
    fn new() -> Self {
        Self {
            last_update: Instant::now(),
            step_count: 0,
        }
    }

    /// Tick the counter, returns Some(rate) every second
    fn tick(&mut self) -> Option<f64> {
        self.step_count += 1;
        let elapsed = self.last_update.elapsed();

        if elapsed.as_secs_f64() >= 1.0 {
            let rate = self.step_count as f64 / elapsed.as_secs_f64();
            self.step_count = 0;
            self.last_update = Instant::now();
            Some(rate)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_corners() {
        let real = (1280, 720);
        let surface = (1280, 720);
        assert_eq!(
            surface_to_canvas(PhysicalPosition::new(0.0, 0.0), surface, real),
            Some((0, 719))
        );
        assert_eq!(
            surface_to_canvas(PhysicalPosition::new(1279.5, 719.5), surface, real),
            Some((1279, 0))
        );
    }

    #[test]
    fn test_surface_scaled() {
        // a HiDPI surface twice the painted size
        let pixel = surface_to_canvas(PhysicalPosition::new(200.0, 100.0), (800, 600), (400, 300));
        assert_eq!(pixel, Some((100, 249)));
    }

    #[test]
    fn test_outside_surface() {
        let real = (100, 100);
        assert_eq!(surface_to_canvas(PhysicalPosition::new(-1.0, 5.0), (100, 100), real), None);
        assert_eq!(surface_to_canvas(PhysicalPosition::new(100.0, 5.0), (100, 100), real), None);
        assert_eq!(surface_to_canvas(PhysicalPosition::new(5.0, 5.0), (0, 0), real), None);
    }

    #[test]
    fn test_click_reaches_cell() {
        let canvas = Canvas::new(4, 2, 40, 20).unwrap();
        // top-left of the window is the top row of cells
        let pixel = surface_to_canvas(PhysicalPosition::new(3.0, 2.0), (40, 20), canvas.real_size());
        assert_eq!(pixel.and_then(|(px, py)| canvas.pixel_to_cell(px, py)), Some((0, 1)));
    }

    #[test]
    fn test_app_rejects_bad_config() {
        let config = LaunchConfig {
            fps: 0,
            ..LaunchConfig::default()
        };
        assert!(App::new(config).is_err());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_app_rejects_window_beyond_u32() {
        let config = LaunchConfig {
            window_x: u32::MAX as usize + 1,
            ..LaunchConfig::default()
        };
        assert!(App::new(config).is_err());
    }
}
