//! Main rendering state.

use glam::Vec2;
use miette::Result;

use crate::{canvas::Canvas, config::Config};

use super::{
    component::ShapeRenderState, data::ScreenInfo, gpu::Gpu, letterbox::Letterbox,
    post_processing::PostProcessingState, uniform::UniformState,
};

/// Texture format we prefer to use for the buffer.
///
/// We choose sRGB since all colors are authored in sRGB and otherwise everything will be quite dark.
pub(crate) const PREFERRED_TEXTURE_FORMAT: wgpu::TextureFormat =
    wgpu::TextureFormat::Rgba8UnormSrgb;

/// Main render state holding the GPU information.
pub(crate) struct MainRenderState<'window> {
    /// GPU state.
    gpu: Gpu<'window>,
    /// Uniform screen info (buffer size) to the shaders.
    screen_info: UniformState<ScreenInfo>,
    /// Pipeline drawing the shapes on the buffer.
    shape_render_state: ShapeRenderState,
    /// Size of the buffer to draw.
    ///
    /// Will be scaled and letterboxed to fit the screen.
    buffer_size: Vec2,
    /// Second pass drawing the buffer scaled into the letterbox.
    upscale: PostProcessingState,
    /// Letterbox output for the final render pass viewport.
    letterbox: Letterbox,
    /// Color of the bars around the letterbox.
    viewport_color: wgpu::Color,
}

impl<'window> MainRenderState<'window> {
    /// Create a GPU surface on the window.
    ///
    /// # Errors
    ///
    /// - When no GPU could be found or accessed.
    pub(crate) async fn new<W>(
        config: &Config,
        window: W,
        width: u32,
        height: u32,
    ) -> Result<Self>
    where
        W: wgpu::WindowHandle + 'window,
    {
        // Setup the GPU and attach it to the window surface
        let gpu = Gpu::new(config, window, width, height).await?;

        // Create the uniforms
        let screen_info = UniformState::new(
            &gpu.device,
            &ScreenInfo::new(config.buffer_width, config.buffer_height),
        );

        let buffer_size = Vec2::new(config.buffer_width, config.buffer_height);

        // Create the texture the first pass renders to and the pass that scales it to the window
        let upscale = PostProcessingState::new(buffer_size, &gpu.device, gpu.surface_format());

        let shape_render_state =
            ShapeRenderState::new(&gpu.device, &screen_info.bind_group_layout);

        // Convert the u32 colors to WGPU colors
        let viewport_color = super::u32_to_wgpu_color(config.viewport_color);

        let (screen_width, screen_height) = gpu.screen_size();
        let letterbox = Letterbox::fit(
            buffer_size,
            Vec2::new(screen_width as f32, screen_height as f32),
        );

        Ok(Self {
            gpu,
            screen_info,
            shape_render_state,
            buffer_size,
            upscale,
            letterbox,
            viewport_color,
        })
    }

    /// Draw the canvas on the buffer and present it scaled in the window.
    ///
    /// # Errors
    ///
    /// - When the GPU ran out of memory.
    pub(crate) fn render(&mut self, canvas: &Canvas) -> Result<()> {
        // Render on the GPU
        let Some(mut frame) = self.gpu.start()? else {
            // Surface had to be reconfigured, try again next frame
            return Ok(());
        };

        // First pass, render the shapes to the buffer texture
        {
            profiling::scope!("Render shapes");

            self.shape_render_state.render(
                canvas,
                &mut frame.encoder,
                &self.upscale.texture_view,
                frame.queue,
                frame.device,
                &self.screen_info.bind_group,
            );
        }

        // Second pass, render the buffer texture to the viewport
        {
            profiling::scope!("Render upscale pass");

            self.upscale.render(&mut frame, &self.letterbox, self.viewport_color);
        }

        // Render the frame
        frame.present();

        Ok(())
    }

    /// Resize the surface.
    pub(crate) fn resize(&mut self, width: u32, height: u32) {
        // Resize the surface
        self.gpu.resize(width, height);

        // Recalculate the letterbox with the new size
        self.recalculate_letterbox();
    }

    /// Recalculate the letterbox based on the size of the surface.
    fn recalculate_letterbox(&mut self) {
        let (screen_width, screen_height) = self.gpu.screen_size();
        let screen_size = Vec2::new(screen_width as f32, screen_height as f32);

        self.letterbox = Letterbox::fit(self.buffer_size, screen_size);

        log::debug!(
            "Setting new letterbox to ({}:{} x {}:{}) with {} scaling",
            self.letterbox.offset.x,
            self.letterbox.offset.y,
            self.letterbox.size.x,
            self.letterbox.size.y,
            self.letterbox.scale,
        );

        if self.letterbox.fills(screen_size) {
            log::debug!("Buffer covers the whole window, no bars are drawn");
        }
    }
}
