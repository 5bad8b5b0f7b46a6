//! Per-shape data uploaded to the GPU for instanced drawing.

use bytemuck::{Pod, Zeroable};
use wgpu::{VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

use crate::canvas::RoundedRect;

/// Raw representation of a single rounded rectangle send to the GPU.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Pod, Zeroable)]
pub(crate) struct Instance {
    /// X, Y, width and height in buffer pixels.
    rect: [f32; 4],
    /// Linear RGBA color.
    color: [f32; 4],
    /// Radius of the corners in buffer pixels.
    corner_radius: f32,
}

impl From<&RoundedRect> for Instance {
    fn from(shape: &RoundedRect) -> Self {
        Self {
            rect: [
                shape.position.x,
                shape.position.y,
                shape.size.x,
                shape.size.y,
            ],
            color: super::u32_to_linear_rgba(shape.color),
            corner_radius: shape.corner_radius(),
        }
    }
}

/// Raw instance data.
///
/// Shouldn't be used directly outside of the internal rendering code.
#[derive(Debug, Default, Clone)]
pub(crate) struct Instances(Vec<Instance>);

impl Instances {
    /// Replace all instances with the shapes to draw this frame.
    pub(crate) fn fill(&mut self, shapes: &[RoundedRect]) {
        self.0.clear();
        self.0.extend(shapes.iter().map(Instance::from));
    }

    /// Get as raw bytes.
    pub(crate) fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.0)
    }

    /// Amount of instances to draw this frame.
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are any.
    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Shader locations of the instance fields.
    const ATTRIBUTES: [VertexAttribute; 3] = [
        VertexAttribute {
            format: VertexFormat::Float32x4,
            offset: 0,
            shader_location: 0,
        },
        VertexAttribute {
            format: VertexFormat::Float32x4,
            offset: std::mem::size_of::<[f32; 4]>() as u64,
            shader_location: 1,
        },
        VertexAttribute {
            format: VertexFormat::Float32,
            offset: std::mem::size_of::<[f32; 8]>() as u64,
            shader_location: 2,
        },
    ];

    /// WGPU descriptor.
    pub(crate) fn descriptor() -> VertexBufferLayout<'static> {
        VertexBufferLayout {
            array_stride: std::mem::size_of::<Instance>() as u64,
            step_mode: VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::{Instance, Instances};
    use crate::canvas::Canvas;

    #[test]
    fn instance_layout() {
        // Two vec4s and a float without any padding
        assert_eq!(std::mem::size_of::<Instance>(), 36);
    }

    #[test]
    fn fill_replaces_previous_frame() {
        let mut canvas = Canvas::new(Vec2::splat(360.0));
        canvas.draw_rounded_rect(Vec2::new(10.0, 20.0), Vec2::splat(10.0), 0.4, 0xFF_FF_FF_FF);
        canvas.draw_rounded_rect(Vec2::ZERO, Vec2::splat(10.0), 0.4, 0xFF_FF_FF_FF);

        let mut instances = Instances::default();
        instances.fill(canvas.shapes());
        instances.fill(canvas.shapes());
        assert_eq!(instances.len(), 2);
        assert_eq!(instances.bytes().len(), 72);

        let first = Instance::from(&canvas.shapes()[0]);
        assert_eq!(first.rect, [10.0, 20.0, 10.0, 10.0]);
        assert!((first.corner_radius - 2.0).abs() < 1e-6);

        instances.fill(&[]);
        assert!(instances.is_empty());
    }
}
