use crate::foundation::error::{SlideError, SlideResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Export canvas width in pixels (9:16 portrait).
pub const CANVAS_WIDTH: u32 = 1080;
/// Export canvas height in pixels (9:16 portrait).
pub const CANVAS_HEIGHT: u32 = 1920;

/// Pixel dimensions of a render target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// The fixed export canvas, 1080×1920.
    pub const EXPORT: Canvas = Canvas {
        width: CANVAS_WIDTH,
        height: CANVAS_HEIGHT,
    };

    /// Build a canvas, rejecting empty sizes and sizes the rasterizer cannot address.
    pub fn new(width: u32, height: u32) -> SlideResult<Self> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    /// Check that both dimensions are non-zero and fit the rasterizer's `u16` surface limit.
    pub fn validate(self) -> SlideResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SlideError::validation("canvas width and height must be > 0"));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(SlideError::validation(format!(
                "canvas {}x{} exceeds the {} px surface limit",
                self.width,
                self.height,
                u16::MAX
            )));
        }
        Ok(())
    }

    /// Width as `f64`.
    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    /// Height as `f64`.
    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }
}

/// Decomposed 2D transform applied around a pivot.
///
/// Rotation is in radians; `anchor` is the pivot in local space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform2D {
    /// Translation of the local origin.
    pub translate: Vec2,
    /// Rotation in radians, clockwise in y-down space.
    pub rotation_rad: f64,
    /// Scale factors, default (1,1).
    pub scale: Vec2,
    /// Pivot in local space.
    pub anchor: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            rotation_rad: 0.0,
            scale: Vec2::new(1.0, 1.0),
            anchor: Vec2::ZERO,
        }
    }
}

impl Transform2D {
    /// Compose into a single affine.
    pub fn to_affine(self) -> Affine {
        let t_translate = Affine::translate(self.translate);
        let t_anchor = Affine::translate(self.anchor);
        let t_unanchor = Affine::translate(-self.anchor);
        let t_scale = Affine::scale_non_uniform(self.scale.x, self.scale.y);
        let t_rotate = Affine::rotate(self.rotation_rad);

        // Canonical order, read left to right as drawing-context calls:
        // translate -> pivot -> scale -> rotate -> un-pivot
        t_translate * t_anchor * t_scale * t_rotate * t_unanchor
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
