use crate::foundation::error::{SlideError, SlideResult};

/// Width of the reference preview surface styles are authored against.
pub const REFERENCE_PREVIEW_WIDTH: f64 = 375.0;

/// `target_width / reference_width`.
///
/// Every absolute size constant is multiplied by this before use, so a style authored on a small
/// preview reproduces on a larger export canvas.
pub fn resolution_scale(target_width: f64, reference_width: f64) -> SlideResult<f64> {
    if !reference_width.is_finite() || reference_width <= 0.0 {
        return Err(SlideError::validation(
            "reference width must be finite and > 0",
        ));
    }
    if !target_width.is_finite() || target_width <= 0.0 {
        return Err(SlideError::validation(
            "target width must be finite and > 0",
        ));
    }
    Ok(target_width / reference_width)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/scale.rs"]
mod tests;
