use std::io::Cursor;

use anyhow::Context;

use crate::{
    assets::decode::PreparedImage,
    compose::plan::SlidePlan,
    foundation::{error::SlideResult, math::unpremultiply_rgba8_in_place},
    render::{
        cpu::{CpuBackend, CpuBackendOpts},
        passes::{PassBackend, execute_plan},
    },
    text::shaper::FontFace,
};

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**; the `premultiplied` flag makes that explicit at API
/// boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)` as stored, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy of the pixel data.
    pub fn to_straight_rgba(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }

    /// Encode as PNG (straight alpha).
    pub fn to_png_bytes(&self) -> SlideResult<Vec<u8>> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.to_straight_rgba())
            .ok_or_else(|| anyhow::anyhow!("invalid rgba buffer size"))?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode frame as png")?;
        Ok(buf)
    }
}

/// A rasterizer that executes a [`SlidePlan`] into a [`FrameRGBA`].
pub trait RenderBackend: PassBackend {
    /// Execute `plan` with `image` as the slide's source image.
    fn render_plan(&mut self, plan: &SlidePlan, image: &PreparedImage) -> SlideResult<FrameRGBA> {
        execute_plan(self, plan, image)
    }
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    /// CPU raster backend powered by `vello_cpu`.
    #[default]
    Cpu,
}

/// Create a rendering backend. `font` is required to draw text glyphs.
pub fn create_backend(
    kind: BackendKind,
    font: Option<&FontFace>,
    opts: CpuBackendOpts,
) -> SlideResult<Box<dyn RenderBackend>> {
    match kind {
        BackendKind::Cpu => {
            let backend = match font {
                Some(face) => CpuBackend::with_font(face, opts)?,
                None => CpuBackend::new(opts),
            };
            Ok(Box::new(backend))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
