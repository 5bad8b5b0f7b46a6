//! Types and helpers for drawing on the GPU.

pub(crate) mod component;
pub(crate) mod data;
pub(crate) mod gpu;
pub(crate) mod instance;
pub(crate) mod letterbox;
pub(crate) mod post_processing;
pub(crate) mod state;
pub(crate) mod uniform;

use state::PREFERRED_TEXTURE_FORMAT;
use wgpu::Color;

/// Split an ARGB `u32` color into `[r, g, b, a]` factors, taking sRGB into account.
///
/// Colors are authored in sRGB, when the render target is an sRGB texture the GPU expects linear values.
pub(crate) fn u32_to_linear_rgba(argb: u32) -> [f32; 4] {
    let a = ((argb & 0xFF00_0000) >> 24) as f32 / 255.0;
    let r = ((argb & 0x00FF_0000) >> 16) as f32 / 255.0;
    let g = ((argb & 0x0000_FF00) >> 8) as f32 / 255.0;
    let b = (argb & 0x0000_00FF) as f32 / 255.0;

    if PREFERRED_TEXTURE_FORMAT.is_srgb() {
        // Convert to linear space, alpha is always linear
        [r.powf(2.2), g.powf(2.2), b.powf(2.2), a]
    } else {
        [r, g, b, a]
    }
}

/// Convert an `u32` color to a WGPU [`wgpu::Color`] taking in account sRGB.
fn u32_to_wgpu_color(argb: u32) -> Color {
    let [r, g, b, a] = u32_to_linear_rgba(argb);

    Color {
        r: f64::from(r),
        g: f64::from(g),
        b: f64::from(b),
        a: f64::from(a),
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn color_channels() {
        let [r, g, b, a] = super::u32_to_linear_rgba(0xFF_FF_00_00);
        assert!((r - 1.0).abs() < 1e-6);
        assert!(g.abs() < 1e-6);
        assert!(b.abs() < 1e-6);
        assert!((a - 1.0).abs() < 1e-6);

        // Alpha is never gamma corrected
        let [_, _, _, a] = super::u32_to_linear_rgba(0x80_00_00_00);
        assert!((a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn wgpu_color_matches() {
        let color = super::u32_to_wgpu_color(0xFF_AE_CC_61);
        let [r, g, b, a] = super::u32_to_linear_rgba(0xFF_AE_CC_61);

        assert!((color.r - f64::from(r)).abs() < 1e-9);
        assert!((color.g - f64::from(g)).abs() < 1e-9);
        assert!((color.b - f64::from(b)).abs() < 1e-9);
        assert!((color.a - f64::from(a)).abs() < 1e-9);
    }
}
