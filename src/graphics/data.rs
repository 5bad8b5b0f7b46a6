//! Data types that can be send to the GPU.

use bytemuck::{Pod, Zeroable};

/// Screen information passed to the shaders.
///
/// Padded to 16 bytes, which is needed by WebGL.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, Pod, Zeroable)]
pub(crate) struct ScreenInfo {
    /// Size of the buffer in pixels.
    pub(crate) buffer_size: [f32; 2],
    /// Unused.
    pub(crate) _padding: [f32; 2],
}

impl ScreenInfo {
    /// Construct from the buffer size.
    pub(crate) const fn new(buffer_width: f32, buffer_height: f32) -> Self {
        Self {
            buffer_size: [buffer_width, buffer_height],
            _padding: [0.0; 2],
        }
    }
}
