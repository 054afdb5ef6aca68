use std::{borrow::Cow, path::Path, sync::Arc};

use anyhow::Context;

use crate::{
    foundation::error::{SlideError, SlideResult},
    text::measure::{TextMeasurer, TextRunStyle},
};

/// Brush carried through parley layouts. Straight RGBA8.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextBrushRgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

/// Font file bytes plus the family name they register under.
#[derive(Clone)]
pub struct FontFace {
    bytes: Arc<Vec<u8>>,
    family: String,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family", &self.family)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl FontFace {
    /// Register `bytes` once to check they parse and to learn the family name.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> SlideResult<Self> {
        let bytes = Arc::new(bytes.into());
        let mut font_ctx = parley::FontContext::default();
        let family = register(&mut font_ctx, &bytes)?;
        Ok(Self { bytes, family })
    }

    /// Read and register a font file.
    pub fn from_path(path: impl AsRef<Path>) -> SlideResult<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Self::from_bytes(bytes)
    }

    /// Family name the bytes registered under.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Raw font bytes.
    pub fn bytes(&self) -> &Arc<Vec<u8>> {
        &self.bytes
    }
}

fn register(font_ctx: &mut parley::FontContext, bytes: &[u8]) -> SlideResult<String> {
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| SlideError::validation("no font families registered from font bytes"))?;
    let name = font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| SlideError::validation("registered font family has no name"))?;
    Ok(name.to_string())
}

/// Measures and lays out single lines with parley against one registered font.
///
/// The CPU backend draws the layouts this produces, so the width used for wrapping and box
/// sizing is the width of the glyphs actually drawn.
pub struct ParleyMeasurer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family: String,
    style: TextRunStyle,
}

impl std::fmt::Debug for ParleyMeasurer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParleyMeasurer")
            .field("family", &self.family)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

impl ParleyMeasurer {
    /// Fresh parley contexts with `face` registered.
    pub fn new(face: &FontFace) -> SlideResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let family = register(&mut font_ctx, face.bytes())?;
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            style: TextRunStyle::default(),
        })
    }

    /// Currently bound style.
    pub fn style(&self) -> &TextRunStyle {
        &self.style
    }

    /// Shape `text` as one unbroken line under the bound style.
    pub fn layout_line(
        &mut self,
        text: &str,
        brush: TextBrushRgba8,
    ) -> SlideResult<parley::Layout<TextBrushRgba8>> {
        self.style.validate()?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(
            self.style.font_size as f32,
        ));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::FontWeight::new(self.style.weight as f32),
        ));
        if self.style.italic {
            builder.push_default(parley::style::StyleProperty::FontStyle(
                parley::FontStyle::Italic,
            ));
        }
        if self.style.letter_spacing != 0.0 {
            builder.push_default(parley::style::StyleProperty::LetterSpacing(
                self.style.letter_spacing as f32,
            ));
        }
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

impl TextMeasurer for ParleyMeasurer {
    fn measure(&mut self, text: &str) -> SlideResult<f64> {
        if text.is_empty() {
            return Ok(0.0);
        }
        let layout = self.layout_line(text, TextBrushRgba8::default())?;
        let w = f64::from(layout.full_width());
        if !w.is_finite() || w < 0.0 {
            return Err(SlideError::measure(format!(
                "shaper returned width {w} for \"{text}\""
            )));
        }
        Ok(w)
    }

    fn configure(&mut self, style: &TextRunStyle) -> SlideResult<()> {
        style.validate()?;
        self.style = *style;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/shaper.rs"]
mod tests;
