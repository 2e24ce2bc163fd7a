use wgpu::{BindGroup, BindingType, BufferBindingType, RenderPipeline, SurfaceTexture};

use crate::gpu::{FrameBuffers, GpuContext};

/// Binding slots shared with `present.wgsl`
const PIXELS_BINDING: u32 = 0;
const PARAMS_BINDING: u32 = 1;

/// Stretches the painted pixel buffer over the whole surface, bound to one
/// set of frame buffers.
pub struct PresentPipeline {
    pipeline: RenderPipeline,
    bind_group: BindGroup,
}

impl PresentPipeline {
    pub fn new(gpu: &GpuContext, buffers: &FrameBuffers) -> Self {
        let device = &gpu.device;
        let shader = device.create_shader_module(wgpu::include_wgsl!("../shaders/present.wgsl"));

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("present-bind-group-layout"),
            entries: &[
                fragment_buffer(
                    PIXELS_BINDING,
                    BufferBindingType::Storage { read_only: true },
                ),
                fragment_buffer(PARAMS_BINDING, BufferBindingType::Uniform),
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("present-bind-group"),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: PIXELS_BINDING,
                    resource: buffers.pixel_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: PARAMS_BINDING,
                    resource: buffers.params_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("present-pipeline-layout"),
            bind_group_layouts: &[&layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("present-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(gpu.format().into())],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            bind_group,
        }
    }

    /// Draw the last uploaded frame into `frame` and show it
    pub fn present(&self, gpu: &GpuContext, frame: SurfaceTexture) {
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("present-encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("present-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                ..Default::default()
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.bind_group, &[]);
            // one triangle covering the viewport
            pass.draw(0..3, 0..1);
        }

        gpu.queue.submit([encoder.finish()]);
        frame.present();
    }
}

fn fragment_buffer(binding: u32, ty: BufferBindingType) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: BindingType::Buffer {
            ty,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings_match_shader() {
        let source = include_str!("../shaders/present.wgsl");
        assert!(source.contains(&format!(
            "@binding({}) var<storage, read> pixels",
            PIXELS_BINDING
        )));
        assert!(source.contains(&format!(
            "@binding({}) var<uniform> params",
            PARAMS_BINDING
        )));
    }

    #[test]
    fn test_pixels_are_read_only_in_fragment() {
        let entry = fragment_buffer(PIXELS_BINDING, BufferBindingType::Storage { read_only: true });
        assert_eq!(entry.visibility, wgpu::ShaderStages::FRAGMENT);
        assert!(matches!(
            entry.ty,
            BindingType::Buffer {
                ty: BufferBindingType::Storage { read_only: true },
                ..
            }
        ));
    }
}
