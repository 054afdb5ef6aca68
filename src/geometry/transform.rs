use crate::{
    foundation::core::{Affine, Point, Transform2D, Vec2},
    model::slide::SlideElement,
};

/// Scale substituted for a non-positive or non-finite element scale.
pub const MIN_ELEMENT_SCALE: f64 = 1e-3;

/// Absolute pixel placement of an element's container on a canvas.
///
/// `(translate_x, translate_y)` is the container's top-left corner before scale and rotation,
/// chosen so that the container center lands on the element's normalized center.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ElementTransform {
    /// Left edge of the container in canvas pixels.
    pub translate_x: f64,
    /// Top edge of the container in canvas pixels.
    pub translate_y: f64,
    /// Horizontal scale.
    pub scale_x: f64,
    /// Vertical scale.
    pub scale_y: f64,
    /// Rotation in degrees, clockwise in y-down space.
    pub rotation_deg: f64,
}

/// Resolve a normalized element into canvas pixels for a container of the given size.
///
/// Omitting the container places the translate exactly on the element center.
pub fn resolve_transform(
    element: &SlideElement,
    canvas_w: f64,
    canvas_h: f64,
    container: Option<(f64, f64)>,
) -> ElementTransform {
    let (cw, ch) = container.unwrap_or((0.0, 0.0));
    let scale = clamp_scale(element.scale);
    let rotation_deg = if element.rotation.is_finite() {
        element.rotation
    } else {
        0.0
    };

    ElementTransform {
        translate_x: element.x * canvas_w - cw / 2.0,
        translate_y: element.y * canvas_h - ch / 2.0,
        scale_x: scale,
        scale_y: scale,
        rotation_deg,
    }
}

fn clamp_scale(s: f64) -> f64 {
    if s.is_finite() && s > 0.0 {
        s
    } else {
        MIN_ELEMENT_SCALE
    }
}

impl ElementTransform {
    /// Canvas-space center of a container of the given size.
    pub fn center(&self, container_w: f64, container_h: f64) -> Point {
        Point::new(
            self.translate_x + container_w / 2.0,
            self.translate_y + container_h / 2.0,
        )
    }

    /// The single affine every draw op of this element uses.
    ///
    /// Container-local coordinates (origin at the container's top-left) map to canvas pixels:
    /// translate, pivot on the container center, scale, rotate, un-pivot.
    pub fn to_affine(&self, container_w: f64, container_h: f64) -> Affine {
        Transform2D {
            translate: Vec2::new(self.translate_x, self.translate_y),
            rotation_rad: self.rotation_deg.to_radians(),
            scale: Vec2::new(self.scale_x, self.scale_y),
            anchor: Vec2::new(container_w / 2.0, container_h / 2.0),
        }
        .to_affine()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/transform.rs"]
mod tests;
