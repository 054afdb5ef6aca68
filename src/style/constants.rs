use serde::{Deserialize, Serialize};

use crate::foundation::{
    color::Rgba8,
    error::{SlideError, SlideResult},
};

/// Design constants shared by the box sizer, style resolver and compositor.
///
/// Lengths are in reference pixels and are multiplied by the resolution scale before use.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleConstants {
    /// Horizontal box padding.
    pub padding_h: f64,
    /// Vertical box padding.
    pub padding_v: f64,
    /// Corner radius of boxes and pills.
    pub radius: f64,
    /// Line advance as a multiple of the font size.
    pub line_height: f64,
    /// Shadow offset in both axes.
    pub shadow_offset: f64,
    /// Minimum single-line box width, in multiples of the font size.
    pub min_box_chars: f64,
    /// Wrap width as a share of the canvas width.
    pub max_text_width_ratio: f64,
    /// Line cap for wrapping; 0 is unbounded.
    pub max_lines: usize,
    /// Shadow color.
    pub shadow_color: Rgba8,
    /// Fill for `half`.
    pub half_fill: Rgba8,
    /// Fill for `full`.
    pub full_fill: Rgba8,
    /// Fill for `white`.
    pub white_fill: Rgba8,
    /// Fill for `per-line`.
    pub per_line_fill: Rgba8,
}

impl Default for StyleConstants {
    fn default() -> Self {
        Self {
            padding_h: 16.0,
            padding_v: 8.0,
            radius: 8.0,
            line_height: 1.2,
            shadow_offset: 1.0,
            min_box_chars: 2.0,
            max_text_width_ratio: 0.8,
            max_lines: 0,
            shadow_color: Rgba8::rgba(0, 0, 0, 0.8),
            half_fill: Rgba8::rgba(0, 0, 0, 0.4),
            full_fill: Rgba8::rgba(0, 0, 0, 0.7),
            white_fill: Rgba8::rgba(255, 255, 255, 0.9),
            per_line_fill: Rgba8::rgba(0, 0, 0, 0.7),
        }
    }
}

impl StyleConstants {
    /// Reject negative or non-finite lengths and ratios.
    pub fn validate(&self) -> SlideResult<()> {
        let non_negative = [
            ("paddingH", self.padding_h),
            ("paddingV", self.padding_v),
            ("radius", self.radius),
            ("shadowOffset", self.shadow_offset),
            ("minBoxChars", self.min_box_chars),
        ];
        for (name, v) in non_negative {
            if !v.is_finite() || v < 0.0 {
                return Err(SlideError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !self.line_height.is_finite() || self.line_height <= 0.0 {
            return Err(SlideError::validation(
                "lineHeight must be finite and > 0",
            ));
        }
        if !self.max_text_width_ratio.is_finite()
            || self.max_text_width_ratio <= 0.0
            || self.max_text_width_ratio > 1.0
        {
            return Err(SlideError::validation(
                "maxTextWidthRatio must be in (0, 1]",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/constants.rs"]
mod tests;
