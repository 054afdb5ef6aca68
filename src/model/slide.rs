use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::foundation::{
    color::Rgba8,
    error::{SlideError, SlideResult},
};

/// Position, scale and rotation of the text overlay.
///
/// `x` and `y` are normalized (0..1) coordinates of the element's *center*, never its top-left
/// corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideElement {
    /// Horizontal center as a fraction of canvas width.
    pub x: f64,
    /// Vertical center as a fraction of canvas height.
    pub y: f64,
    /// Uniform scale multiplier.
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Rotation in degrees, any real value.
    #[serde(default)]
    pub rotation: f64,
}

fn default_scale() -> f64 {
    1.0
}

impl Default for SlideElement {
    fn default() -> Self {
        Self {
            x: 0.5,
            y: 0.5,
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

impl SlideElement {
    /// Rotation normalized into `[0, 360)` for display in editor handles.
    pub fn display_rotation(&self) -> f64 {
        if !self.rotation.is_finite() {
            return 0.0;
        }
        let r = self.rotation.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
        if r >= 360.0 { 0.0 } else { r }
    }

    /// Reject non-finite positions. Degenerate scale and rotation are clamped later, not rejected.
    pub fn validate(&self) -> SlideResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(SlideError::validation(
                "element position must be finite",
            ));
        }
        Ok(())
    }
}

/// CSS-like font weight, 1..=1000.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// `normal` (400).
    pub const NORMAL: FontWeight = FontWeight(400);
    /// `bold` (700).
    pub const BOLD: FontWeight = FontWeight(700);
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl<'de> Deserialize<'de> for FontWeight {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Num(u16),
            Name(String),
        }

        let w = match Repr::deserialize(deserializer)? {
            Repr::Num(n) => n,
            Repr::Name(s) => match s.trim().to_ascii_lowercase().as_str() {
                "normal" => 400,
                "bold" => 700,
                other => other.parse::<u16>().map_err(|_| {
                    serde::de::Error::custom(format!("unknown font weight \"{s}\""))
                })?,
            },
        };
        if !(1..=1000).contains(&w) {
            return Err(serde::de::Error::custom(format!(
                "font weight {w} out of range 1..=1000"
            )));
        }
        Ok(FontWeight(w))
    }
}

/// Upright or italic face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    /// Upright.
    #[default]
    Normal,
    /// Italic.
    Italic,
}

/// Case transform applied to the text before wrapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTransform {
    /// Leave as typed.
    #[default]
    None,
    /// ALL CAPS.
    Uppercase,
    /// all lower.
    Lowercase,
    /// First Letter Of Each Word.
    Capitalize,
}

/// Backdrop ("pill") style behind the text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundMode {
    /// No backdrop.
    #[default]
    None,
    /// Translucent dark box.
    Half,
    /// Mostly opaque dark box.
    Full,
    /// Light box, no shadow.
    White,
    /// One pill per wrapped line.
    PerLine,
}

/// Visual style of a slide's text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextStyle {
    /// Fill color of the glyphs.
    pub color: Rgba8,
    /// Font size in reference pixels (scale 1, resolution scale 1).
    pub font_size: f64,
    /// Font weight.
    pub font_weight: FontWeight,
    /// Upright or italic.
    pub font_style: FontStyle,
    /// Case transform.
    pub text_transform: TextTransform,
    /// Extra advance between characters, in reference pixels.
    pub letter_spacing: f64,
    /// Backdrop style.
    pub background_mode: BackgroundMode,
    /// Overrides the mode's default fill when set (ignored for [`BackgroundMode::None`]).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Rgba8>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Rgba8::WHITE,
            font_size: 24.0,
            font_weight: FontWeight::NORMAL,
            font_style: FontStyle::Normal,
            text_transform: TextTransform::None,
            letter_spacing: 0.0,
            background_mode: BackgroundMode::None,
            background_color: None,
        }
    }
}

impl TextStyle {
    /// Reject sizes the layout engine cannot work with.
    pub fn validate(&self) -> SlideResult<()> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(SlideError::validation(
                "fontSize must be finite and > 0",
            ));
        }
        if !self.letter_spacing.is_finite() {
            return Err(SlideError::validation("letterSpacing must be finite"));
        }
        Ok(())
    }
}

/// One slide of a slideshow: an image with an optional text overlay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// Stable identifier, used in upload keys.
    pub id: String,
    /// Explicit order within the slideshow.
    pub position: u32,
    /// Object-store reference of the background image.
    pub image: String,
    /// Overlay text; empty means no overlay.
    #[serde(default)]
    pub text: String,
    /// Overlay placement.
    #[serde(default)]
    pub element: SlideElement,
    /// Overlay style.
    #[serde(default)]
    pub style: TextStyle,
}

impl Slide {
    /// Build a slide with default placement and style.
    pub fn new(id: impl Into<String>, position: u32, image: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            position,
            image: image.into(),
            text: String::new(),
            element: SlideElement::default(),
            style: TextStyle::default(),
        }
    }

    /// Builder-style text setter.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// `true` when the slide has something to draw over the image.
    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }

    /// Parse a slide from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> SlideResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| SlideError::validation(format!("parse slide JSON: {e}")))
    }

    /// Parse a slide from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SlideResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SlideError::validation(format!("open slide JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check everything that must hold before any rendering starts.
    pub fn validate(&self) -> SlideResult<()> {
        if self.id.trim().is_empty() {
            return Err(SlideError::validation("slide id must be non-empty"));
        }
        if self.image.trim().is_empty() {
            return Err(SlideError::validation(format!(
                "slide '{}' has no image reference",
                self.id
            )));
        }
        self.element
            .validate()
            .and_then(|()| self.style.validate())
            .map_err(|e| SlideError::validation(format!("slide '{}': {e}", self.id)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/slide.rs"]
mod tests;
