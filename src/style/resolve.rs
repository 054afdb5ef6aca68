use crate::{
    foundation::{color::Rgba8, core::Vec2},
    model::slide::{BackgroundMode, TextStyle},
    style::constants::StyleConstants,
};

/// Drop shadow drawn beneath the text fill.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    /// Shadow color.
    pub color: Rgba8,
    /// Offset in container-local pixels.
    pub offset: Vec2,
}

/// Concrete colors for one slide's overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedColors {
    /// Glyph fill.
    pub text: Rgba8,
    /// Box or pill fill; transparent means no box.
    pub background: Rgba8,
    /// `None` exactly when the mode is `white`.
    pub shadow: Option<Shadow>,
}

/// Map a style to concrete fill colors and decide whether a shadow is drawn.
pub fn resolve_colors(
    style: &TextStyle,
    resolution_scale: f64,
    constants: &StyleConstants,
) -> ResolvedColors {
    let mode_fill = match style.background_mode {
        BackgroundMode::None => Rgba8::TRANSPARENT,
        BackgroundMode::Half => constants.half_fill,
        BackgroundMode::Full => constants.full_fill,
        BackgroundMode::White => constants.white_fill,
        BackgroundMode::PerLine => constants.per_line_fill,
    };
    let background = match (style.background_mode, style.background_color) {
        (BackgroundMode::None, _) => Rgba8::TRANSPARENT,
        (_, Some(explicit)) => explicit,
        (_, None) => mode_fill,
    };

    let shadow = (style.background_mode != BackgroundMode::White).then(|| {
        let d = constants.shadow_offset * resolution_scale;
        Shadow {
            color: constants.shadow_color,
            offset: Vec2::new(d, d),
        }
    });

    ResolvedColors {
        text: style.color,
        background,
        shadow,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/resolve.rs"]
mod tests;
