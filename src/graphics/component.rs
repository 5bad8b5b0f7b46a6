//! Render pipeline drawing all rounded rectangles of the canvas in a single instanced call.

use std::borrow::Cow;

use wgpu::{
    util::{BufferInitDescriptor, DeviceExt},
    BindGroup, BindGroupLayout, BlendState, Buffer, BufferUsages, ColorTargetState, ColorWrites,
    CommandEncoder, Device, FragmentState, FrontFace, LoadOp, MultisampleState, Operations,
    PipelineCompilationOptions, PipelineLayoutDescriptor, PolygonMode, PrimitiveState,
    PrimitiveTopology, Queue, RenderPassColorAttachment, RenderPassDescriptor, RenderPipeline,
    RenderPipelineDescriptor, ShaderModuleDescriptor, ShaderSource, StoreOp, TextureView,
    VertexState,
};

use crate::canvas::Canvas;

use super::{instance::Instances, state::PREFERRED_TEXTURE_FORMAT};

/// Amount of vertices of the quad generated in the vertex shader.
const QUAD_VERTICES: u32 = 6;

/// Render state holding the buffers and instances required for drawing the shapes.
pub(crate) struct ShapeRenderState {
    /// Pipeline of the rendering itself.
    render_pipeline: RenderPipeline,
    /// GPU buffer reference to the instances.
    instance_buffer: Buffer,
    /// Instances of the last frame, kept around so the allocation can be reused.
    instances: Instances,
}

impl ShapeRenderState {
    /// Create the pipeline rendering into a texture with the preferred format.
    pub(crate) fn new(device: &Device, screen_info_bind_group_layout: &BindGroupLayout) -> Self {
        log::debug!("Creating rounded rectangle render pipeline");

        // Create a new render pipeline first
        let render_pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("Shape Render Pipeline Layout"),
            bind_group_layouts: &[screen_info_bind_group_layout],
            push_constant_ranges: &[],
        });

        // Load the minified shader from the build script
        let shader = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("Rounded Rectangle Shader"),
            source: ShaderSource::Wgsl(Cow::Borrowed(include_str!(concat!(
                env!("OUT_DIR"),
                "/rounded_rect.wgsl"
            )))),
        });

        let render_pipeline = device.create_render_pipeline(&RenderPipelineDescriptor {
            label: Some("Shape Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: VertexState {
                // The quad vertices are generated from the vertex index
                buffers: &[Instances::descriptor()],
                module: &shader,
                entry_point: "vs_main",
                compilation_options: PipelineCompilationOptions::default(),
            },
            fragment: Some(FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(ColorTargetState {
                    format: PREFERRED_TEXTURE_FORMAT,
                    blend: Some(BlendState::ALPHA_BLENDING),
                    write_mask: ColorWrites::ALL,
                })],
                compilation_options: PipelineCompilationOptions::default(),
            }),
            primitive: PrimitiveState {
                topology: PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: FrontFace::Ccw,
                // Irrelevant since we disable culling
                cull_mode: None,
                polygon_mode: PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: MultisampleState {
                // How many samples the pipeline will use
                count: 1,
                // Use all masks
                mask: !0,
                // Disable anti-aliasing
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        // Create the initial empty instance buffer, will be resized by the render call
        let instance_buffer = device.create_buffer_init(&BufferInitDescriptor {
            label: Some("Instance Buffer"),
            contents: &[],
            usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
        });

        Self {
            render_pipeline,
            instance_buffer,
            instances: Instances::default(),
        }
    }

    /// Clear the target with the canvas color and draw all shapes on top.
    pub(crate) fn render(
        &mut self,
        canvas: &Canvas,
        encoder: &mut CommandEncoder,
        view: &TextureView,
        queue: &Queue,
        device: &Device,
        screen_info_bind_group: &BindGroup,
    ) {
        // Convert the shapes to GPU instances
        self.instances.fill(canvas.shapes());

        let instances_bytes = self.instances.bytes();
        let instances_len = self.instances.len();

        // Upload the instance buffer
        if instances_bytes.len() as u64 <= self.instance_buffer.size() {
            // We still fit in the buffer, we don't have to resize it
            queue.write_buffer(&self.instance_buffer, 0, instances_bytes);
        } else {
            // We have more instances than the buffer size, recreate the buffer
            log::debug!("Previous instance buffer is too small, rescaling to {instances_len} items");

            self.instance_buffer.destroy();
            self.instance_buffer = device.create_buffer_init(&BufferInitDescriptor {
                label: Some("Instance Buffer"),
                contents: instances_bytes,
                usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
            });
        }

        // Start the render pass, always clear even when there's nothing to draw
        let mut render_pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("Shape Render Pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Clear(super::u32_to_wgpu_color(canvas.clear_color())),
                    store: StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if self.instances.is_empty() {
            return;
        }

        // Set our pipeline
        render_pass.set_pipeline(&self.render_pipeline);

        // Bind the screen size
        render_pass.set_bind_group(0, screen_info_bind_group, &[]);

        // Set the instances
        render_pass.set_vertex_buffer(0, self.instance_buffer.slice(..));

        // Draw the instances
        render_pass.draw(0..QUAD_VERTICES, 0..instances_len as u32);
    }
}
