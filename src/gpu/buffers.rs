use anyhow::{Context, Result};
use wgpu::{Buffer, BufferUsages, Device, Queue};

use cellular_automata::simulation::{Canvas, CHANNELS};

/// Storage buffer holding the painted RGBA pixels, plus the uniform that
/// tells the shader how to map surface pixels onto it.
pub struct FrameBuffers {
    pub pixel_buffer: Buffer,
    pub params_buffer: Buffer,
    real_width: u32,
    real_height: u32,
}

/// Present parameters passed to the shader (16 bytes)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PresentParams {
    pub real_width: u32,
    pub real_height: u32,
    pub surface_width: u32,
    pub surface_height: u32,
}

impl FrameBuffers {
    /// Allocate buffers sized for `canvas`
    pub fn new(device: &Device, canvas: &Canvas) -> Result<Self> {
        let (real_width, real_height) = real_extent(canvas)?;
        let buffer_size = (canvas.buffer_len() * std::mem::size_of::<f32>()) as u64;

        let pixel_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("pixel-buffer"),
            size: buffer_size,
            usage: BufferUsages::STORAGE | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let params_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("present-params-buffer"),
            size: std::mem::size_of::<PresentParams>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            pixel_buffer,
            params_buffer,
            real_width,
            real_height,
        })
    }

    /// Upload a painted frame
    pub fn upload(&self, queue: &Queue, pixels: &[f32]) {
        debug_assert_eq!(
            pixels.len(),
            CHANNELS * self.real_width as usize * self.real_height as usize,
            "Painted frame size mismatch"
        );
        queue.write_buffer(&self.pixel_buffer, 0, bytemuck::cast_slice(pixels));
    }

    /// Update present parameters for the current surface size
    pub fn update_params(&self, queue: &Queue, surface_size: (u32, u32)) {
        let params = present_params((self.real_width, self.real_height), surface_size);
        queue.write_buffer(&self.params_buffer, 0, bytemuck::bytes_of(&params));
    }
}

/// Painted size of `canvas` in the `u32` the shader indexes with
fn real_extent(canvas: &Canvas) -> Result<(u32, u32)> {
    let (width, height) = canvas.real_size();
    let width = u32::try_from(width).context("painted width exceeds u32")?;
    let height = u32::try_from(height).context("painted height exceeds u32")?;
    Ok((width, height))
}

fn present_params(real_size: (u32, u32), surface_size: (u32, u32)) -> PresentParams {
    PresentParams {
        real_width: real_size.0,
        real_height: real_size.1,
        surface_width: surface_size.0.max(1),
        surface_height: surface_size.1.max(1),
    }
}
