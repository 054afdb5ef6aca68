use crate::{
    foundation::{
        core::{Point, Rect},
        error::SlideResult,
    },
    style::constants::StyleConstants,
    text::measure::TextMeasurer,
};

/// Backdrop geometry derived from the wrapped lines that will be drawn.
///
/// All lengths are container-local pixels; the origin is the box's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct BackgroundBox {
    /// Total width including horizontal padding.
    pub width: f64,
    /// Total height including vertical padding.
    pub height: f64,
    /// Horizontal padding.
    pub padding_h: f64,
    /// Vertical padding.
    pub padding_v: f64,
    /// Corner radius.
    pub radius: f64,
    /// Advance between line slots.
    pub line_height: f64,
}

impl BackgroundBox {
    /// Top-left of line `index`'s slot for a line of `line_width`, horizontally centered.
    pub fn line_origin(&self, index: usize, line_width: f64) -> Point {
        Point::new(
            (self.width - line_width) / 2.0,
            self.padding_v + index as f64 * self.line_height,
        )
    }

    /// Pill around one line for per-line mode.
    pub fn line_pill(&self, index: usize, line_width: f64) -> Rect {
        let o = self.line_origin(index, line_width);
        Rect::new(
            o.x - self.padding_h,
            o.y,
            o.x + line_width + self.padding_h,
            o.y + self.line_height,
        )
    }

    /// The whole box as a rect at the local origin.
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Measure each wrapped line once. The result feeds both sizing and drawing.
pub fn measure_lines<M: TextMeasurer + ?Sized>(
    lines: &[String],
    measurer: &mut M,
) -> SlideResult<Vec<f64>> {
    lines.iter().map(|l| measurer.measure(l)).collect()
}

/// Size the backdrop for `lines` at pixel `font_size`.
pub fn background_box<M: TextMeasurer + ?Sized>(
    lines: &[String],
    font_size: f64,
    resolution_scale: f64,
    measurer: &mut M,
    constants: &StyleConstants,
) -> SlideResult<BackgroundBox> {
    let widths = measure_lines(lines, measurer)?;
    Ok(box_from_widths(&widths, font_size, resolution_scale, constants))
}

/// Size the backdrop from already-measured line widths.
///
/// One line (or none) gets a floor of `min_box_chars × font_size` so short strings do not
/// produce a sliver; several lines track the longest one.
pub fn box_from_widths(
    widths: &[f64],
    font_size: f64,
    resolution_scale: f64,
    constants: &StyleConstants,
) -> BackgroundBox {
    let longest = widths.iter().copied().fold(0.0_f64, f64::max);
    let text_width = if widths.len() <= 1 {
        longest.max(font_size * constants.min_box_chars)
    } else {
        longest
    };
    let line_height = font_size * constants.line_height;
    let text_height = widths.len().max(1) as f64 * line_height;

    let padding_h = constants.padding_h * resolution_scale;
    let padding_v = constants.padding_v * resolution_scale;
    BackgroundBox {
        width: text_width + 2.0 * padding_h,
        height: text_height + 2.0 * padding_v,
        padding_h,
        padding_v,
        radius: constants.radius * resolution_scale,
        line_height,
    }
}

/// One pill per non-empty line, in the box's local space.
pub fn line_boxes(lines: &[String], widths: &[f64], container: &BackgroundBox) -> Vec<Rect> {
    lines
        .iter()
        .zip(widths)
        .enumerate()
        .filter(|(_, (line, _))| !line.is_empty())
        .map(|(i, (_, &w))| container.line_pill(i, w))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/background.rs"]
mod tests;
