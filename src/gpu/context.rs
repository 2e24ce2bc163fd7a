use std::sync::Arc;

use anyhow::{Context, Result};
use wgpu::{Device, Queue, Surface, SurfaceConfiguration, SurfaceError, SurfaceTexture};
use winit::dpi::PhysicalSize;
use winit::window::Window;

/// The window surface and the device that draws to it
pub struct GpuContext {
    surface: Surface<'static>,
    pub device: Device,
    pub queue: Queue,
    config: SurfaceConfiguration,
}

impl GpuContext {
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no adapter can present to this window")?;
        let info = adapter.get_info();
        log::info!("Presenting with {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("cellular-automata-device"),
                    memory_hints: wgpu::MemoryHints::MemoryUsage,
                    ..Default::default()
                },
                None,
            )
            .await
            .context("failed to open device")?;

        let (width, height) = surface_extent(window.inner_size()).unwrap_or((1, 1));
        let config = surface
            .get_default_config(&adapter, width, height)
            .context("surface is not supported by the adapter")?;
        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
        })
    }

    /// Reconfigure for a new window size. Minimised windows keep the old
    /// configuration.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if let Some((width, height)) = surface_extent(new_size) {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Current surface size in physical pixels
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Next texture to draw into, or `None` when this frame has to be
    /// skipped. A lost or outdated surface is reconfigured for the next one.
    pub fn acquire_frame(&self) -> Option<SurfaceTexture> {
        match self.surface.get_current_texture() {
            Ok(frame) => Some(frame),
            Err(err) if needs_reconfigure(&err) => {
                log::debug!("Surface {:?}, reconfiguring", err);
                self.surface.configure(&self.device, &self.config);
                None
            }
            Err(err) => {
                log::error!("Surface error: {:?}", err);
                None
            }
        }
    }
}

/// A drawable extent, or `None` for a zero-area (minimised) window
fn surface_extent(size: PhysicalSize<u32>) -> Option<(u32, u32)> {
    (size.width > 0 && size.height > 0).then_some((size.width, size.height))
}

fn needs_reconfigure(err: &SurfaceError) -> bool {
    matches!(err, SurfaceError::Lost | SurfaceError::Outdated)
}
