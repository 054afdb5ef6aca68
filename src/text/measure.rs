use crate::{
    foundation::error::{SlideError, SlideResult},
    model::slide::{FontStyle, TextStyle},
};

/// Pixel-space style a measurer and a text drawer are bound to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextRunStyle {
    /// Font size in container-local pixels (reference size × resolution scale).
    pub font_size: f64,
    /// CSS weight, 1..=1000.
    pub weight: f64,
    /// Italic face requested.
    pub italic: bool,
    /// Extra advance per character in container-local pixels.
    pub letter_spacing: f64,
}

impl Default for TextRunStyle {
    fn default() -> Self {
        Self {
            font_size: 24.0,
            weight: 400.0,
            italic: false,
            letter_spacing: 0.0,
        }
    }
}

impl TextRunStyle {
    /// Scale a slide style's reference sizes into pixels.
    pub fn from_style(style: &TextStyle, resolution_scale: f64) -> Self {
        Self {
            font_size: style.font_size * resolution_scale,
            weight: f64::from(style.font_weight.0),
            italic: style.font_style == FontStyle::Italic,
            letter_spacing: style.letter_spacing * resolution_scale,
        }
    }

    pub(crate) fn validate(&self) -> SlideResult<()> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(SlideError::measure("font size must be finite and > 0"));
        }
        if !self.letter_spacing.is_finite() {
            return Err(SlideError::measure("letter spacing must be finite"));
        }
        Ok(())
    }
}

/// Returns the rendered pixel width of a string under the currently bound style.
///
/// Wrapping, box sizing and truncation only see widths through this trait, so two renderers
/// with different shapers agree as long as their measurers agree.
pub trait TextMeasurer {
    /// Width of `text` in pixels. Errors are fatal to the slide; callers never substitute an
    /// estimate.
    fn measure(&mut self, text: &str) -> SlideResult<f64>;

    /// Bind the measurer to a pixel-space style before a layout pass.
    fn configure(&mut self, style: &TextRunStyle) -> SlideResult<()> {
        let _ = style;
        Ok(())
    }
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &mut M {
    fn measure(&mut self, text: &str) -> SlideResult<f64> {
        (**self).measure(text)
    }

    fn configure(&mut self, style: &TextRunStyle) -> SlideResult<()> {
        (**self).configure(style)
    }
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for Box<M> {
    fn measure(&mut self, text: &str) -> SlideResult<f64> {
        (**self).measure(text)
    }

    fn configure(&mut self, style: &TextRunStyle) -> SlideResult<()> {
        (**self).configure(style)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Advance {
    Fixed(f64),
    Em(f64),
}

/// Every character advances by the same amount.
///
/// Useful for headless previews and for tests where the arithmetic has to be exact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasurer {
    advance: Advance,
    style: TextRunStyle,
}

impl MonospaceMeasurer {
    /// Fixed `advance_px` per character, independent of font size.
    pub fn fixed(advance_px: f64) -> Self {
        Self {
            advance: Advance::Fixed(advance_px),
            style: TextRunStyle::default(),
        }
    }

    /// `ratio × font_size` per character, following the bound style.
    pub fn em(ratio: f64) -> Self {
        Self {
            advance: Advance::Em(ratio),
            style: TextRunStyle::default(),
        }
    }

    /// Current per-character advance including letter spacing.
    pub fn advance(&self) -> f64 {
        let base = match self.advance {
            Advance::Fixed(px) => px,
            Advance::Em(ratio) => ratio * self.style.font_size,
        };
        base + self.style.letter_spacing
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&mut self, text: &str) -> SlideResult<f64> {
        let w = text.chars().count() as f64 * self.advance();
        if !w.is_finite() {
            return Err(SlideError::measure("monospace advance is not finite"));
        }
        Ok(w)
    }

    fn configure(&mut self, style: &TextRunStyle) -> SlideResult<()> {
        style.validate()?;
        self.style = *style;
        Ok(())
    }
}

/// A piece of a line: plain text for the shaper, or one emoji cluster drawn in a square slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextRun<'a> {
    /// Text the font shapes.
    Text(&'a str),
    /// One emoji cluster (base plus modifiers, joiners and selectors).
    Emoji(&'a str),
}

/// Codepoints treated as emoji bases.
pub fn is_emoji(c: char) -> bool {
    matches!(
        u32::from(c),
        0x1F000..=0x1F2FF | 0x1F300..=0x1FAFF | 0x2600..=0x27BF | 0x2B50 | 0x2B55
    )
}

fn is_emoji_modifier(c: char) -> bool {
    matches!(
        u32::from(c),
        0xFE0F | 0x20E3 | 0x1F3FB..=0x1F3FF | 0xE0020..=0xE007F
    )
}

fn is_regional_indicator(c: char) -> bool {
    matches!(u32::from(c), 0x1F1E6..=0x1F1FF)
}

const ZWJ: char = '\u{200D}';

/// Split a line into text runs and emoji clusters, in order.
pub fn emoji_runs(text: &str) -> Vec<TextRun<'_>> {
    let mut out = Vec::new();
    let mut text_start = 0usize;
    let mut iter = text.char_indices().peekable();

    while let Some((i, c)) = iter.next() {
        if !is_emoji(c) {
            continue;
        }
        if text_start < i {
            out.push(TextRun::Text(&text[text_start..i]));
        }

        let mut end = i + c.len_utf8();
        let mut flag_pending = is_regional_indicator(c);
        while let Some(&(j, n)) = iter.peek() {
            if is_emoji_modifier(n) {
                end = j + n.len_utf8();
                iter.next();
            } else if flag_pending && is_regional_indicator(n) {
                flag_pending = false;
                end = j + n.len_utf8();
                iter.next();
            } else if n == ZWJ {
                iter.next();
                end = j + n.len_utf8();
                if let Some(&(k, joined)) = iter.peek()
                    && is_emoji(joined)
                {
                    end = k + joined.len_utf8();
                    iter.next();
                }
            } else {
                break;
            }
        }

        out.push(TextRun::Emoji(&text[i..end]));
        text_start = end;
    }

    if text_start < text.len() {
        out.push(TextRun::Text(&text[text_start..]));
    }
    out
}

/// Measures emoji clusters as `font_size`-wide squares and everything else with `inner`.
///
/// Keeps the layout width contract independent of whether a backend can draw emoji glyphs.
#[derive(Clone, Debug)]
pub struct EmojiSlotMeasurer<M> {
    inner: M,
    slot: f64,
}

impl<M: TextMeasurer> EmojiSlotMeasurer<M> {
    /// Wrap `inner`.
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            slot: TextRunStyle::default().font_size,
        }
    }

    /// Width of one emoji slot under the bound style.
    pub fn slot_width(&self) -> f64 {
        self.slot
    }

    /// Unwrap the inner measurer.
    pub fn into_inner(self) -> M {
        self.inner
    }
}

impl<M: TextMeasurer> TextMeasurer for EmojiSlotMeasurer<M> {
    fn measure(&mut self, text: &str) -> SlideResult<f64> {
        let mut total = 0.0;
        for run in emoji_runs(text) {
            total += match run {
                TextRun::Text(s) => self.inner.measure(s)?,
                TextRun::Emoji(_) => self.slot,
            };
        }
        Ok(total)
    }

    fn configure(&mut self, style: &TextRunStyle) -> SlideResult<()> {
        self.inner.configure(style)?;
        self.slot = style.font_size;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/measure.rs"]
mod tests;
