//! Abstractions over GPU calls which can be profiled.

use miette::{Context, IntoDiagnostic, Result};

use crate::config::Config;

/// GPU state abstracted so GPU calls can be profiled if the feature flags are enabled.
pub(crate) struct Gpu<'window> {
    /// GPU device.
    pub(crate) device: wgpu::Device,
    /// GPU surface.
    pub(crate) surface: wgpu::Surface<'window>,
    /// GPU queue.
    pub(crate) queue: wgpu::Queue,
    /// GPU surface configuration.
    config: wgpu::SurfaceConfiguration,
}

impl<'window> Gpu<'window> {
    /// Create a GPU surface on the window.
    ///
    /// # Arguments
    ///
    /// * `config` - Game configuration, used for vsync.
    /// * `window` - Window to draw on.
    /// * `width` - Physical width of the window.
    /// * `height` - Physical height of the window.
    ///
    /// # Errors
    ///
    /// - When no GPU could be found or accessed.
    /// - When the GPU can't draw on the window.
    pub(crate) async fn new<W>(
        config: &Config,
        window: W,
        width: u32,
        height: u32,
    ) -> Result<Self>
    where
        W: wgpu::WindowHandle + 'window,
    {
        // Get a handle to our GPU
        let instance = wgpu::Instance::default();

        log::debug!("Creating GPU surface on the window");

        // Create a GPU surface on the window
        let surface = instance
            .create_surface(window)
            .into_diagnostic()
            .wrap_err("Error creating surface on window")?;

        log::debug!("Requesting adapter");

        // Request an adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptionsBase {
                // Ensure the strongest GPU is used
                power_preference: wgpu::PowerPreference::HighPerformance,
                force_fallback_adapter: false,
                // Request an adaptar which can render to our surface
                compatible_surface: Some(&surface),
            })
            .await
            .ok_or_else(|| miette::miette!("Error getting GPU adapter for window"))?;

        log::info!("Using GPU adapter '{}'", adapter.get_info().name);

        // Get the surface capabilities
        let swapchain_capabilities = surface.get_capabilities(&adapter);

        let format = surface_format(&swapchain_capabilities.formats)
            .ok_or_else(|| miette::miette!("GPU adapter can't present to the window surface"))?;
        let alpha_mode = swapchain_capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        // Create the logical device and command queue
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    // Use the lowest limits, we only draw a few rectangles
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                },
                None,
            )
            .await
            .into_diagnostic()
            .wrap_err("Error getting logical GPU device for surface")?;

        // Configure the render surface
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            // Ensure that the render surface is at least 1 pixel big, otherwise an error would occur
            width: width.max(1),
            height: height.max(1),
            present_mode: if config.vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            desired_maximum_frame_latency: 2,
            alpha_mode,
            view_formats: Vec::new(),
        };
        surface.configure(&device, &config);

        log::debug!("Presenting to surface with format {format:?}");

        Ok(Self {
            device,
            surface,
            queue,
            config,
        })
    }

    /// Start a new rendering event.
    ///
    /// # Returns
    ///
    /// - `Ok(None)` when the surface was outdated and had to be reconfigured, the frame must be skipped.
    ///
    /// # Errors
    ///
    /// - When the GPU ran out of memory.
    pub(crate) fn start(&mut self) -> Result<Option<Frame>> {
        profiling::scope!("Create command encoder");

        // Get the main render texture
        let surface_texture = {
            profiling::scope!("Retrieve surface texture");

            match self.surface.get_current_texture() {
                Ok(surface_texture) => surface_texture,
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::warn!("Surface lost or outdated, reconfiguring");

                    self.surface.configure(&self.device, &self.config);

                    return Ok(None);
                }
                Err(wgpu::SurfaceError::Timeout) => {
                    log::warn!("Timeout acquiring next swap chain texture, skipping frame");

                    return Ok(None);
                }
                // Out of memory
                Err(err) => {
                    return Err(err)
                        .into_diagnostic()
                        .wrap_err("Error acquiring next swap chain texture");
                }
            }
        };

        // Create the encoder
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Snake Command Encoder"),
            });

        // Create a texture view from the main render texture
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        Ok(Some(Frame {
            encoder,
            surface_view,
            surface_texture,
            device: &self.device,
            queue: &self.queue,
        }))
    }

    /// Resize the surface.
    pub(crate) fn resize(&mut self, width: u32, height: u32) {
        log::debug!("Resizing the surface to ({width}x{height})");

        // Ensure that the render surface is at least 1 pixel big, otherwise an error would occur
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
    }

    /// Size of the screen in pixels.
    #[inline]
    pub(crate) const fn screen_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Texture format of the window surface.
    #[inline]
    pub(crate) const fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }
}

/// Rendering state for a single frame.
pub(crate) struct Frame<'gpu> {
    /// GPU command encoder.
    pub(crate) encoder: wgpu::CommandEncoder,
    /// GPU surface view.
    pub(crate) surface_view: wgpu::TextureView,
    /// GPU surface texture.
    pub(crate) surface_texture: wgpu::SurfaceTexture,
    /// GPU device.
    pub(crate) device: &'gpu wgpu::Device,
    /// GPU queue.
    pub(crate) queue: &'gpu wgpu::Queue,
}

impl<'gpu> Frame<'gpu> {
    /// Finish rendering event.
    #[inline]
    pub(crate) fn present(self) {
        // Draw to the texture
        {
            profiling::scope!("Submit queue");

            self.queue.submit(Some(self.encoder.finish()));
        }

        // Show the texture in the window
        {
            profiling::scope!("Present surface texture");

            self.surface_texture.present();
        }
    }
}

/// Pick the texture format of the window surface.
///
/// Prefers sRGB so the colors from the buffer are presented unchanged.
/// Otherwise the first supported format is used, which makes everything look darker.
fn surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    if let Some(format) = formats.iter().copied().find(wgpu::TextureFormat::is_srgb) {
        return Some(format);
    }

    let format = formats.first().copied()?;
    log::warn!("No sRGB surface format available, colors will be too dark with {format:?}");

    Some(format)
}

#[cfg(test)]
mod tests {
    use wgpu::TextureFormat;

    #[test]
    fn surface_format_prefers_srgb() {
        let format = super::surface_format(&[
            TextureFormat::Bgra8Unorm,
            TextureFormat::Bgra8UnormSrgb,
            TextureFormat::Rgba8Unorm,
        ]);
        assert_eq!(format, Some(TextureFormat::Bgra8UnormSrgb));
    }

    #[test]
    fn surface_format_falls_back_to_first() {
        let format =
            super::surface_format(&[TextureFormat::Rgba16Float, TextureFormat::Bgra8Unorm]);
        assert_eq!(format, Some(TextureFormat::Rgba16Float));

        assert_eq!(super::surface_format(&[]), None);
    }
}
