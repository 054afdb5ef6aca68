use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::foundation::{
    error::{SlideError, SlideResult},
    math::premul_u8,
};

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba8 = Rgba8::new(0, 0, 0, 0);
    /// Opaque white.
    pub const WHITE: Rgba8 = Rgba8::new(255, 255, 255, 255);
    /// Opaque black.
    pub const BLACK: Rgba8 = Rgba8::new(0, 0, 0, 255);

    /// Build from 8-bit channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build from 8-bit color channels and a CSS-style `0..=1` alpha.
    pub fn rgba(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        Self::new(r, g, b, unit_to_u8(alpha))
    }

    /// `true` when nothing would be painted with this color.
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Premultiplied `[r, g, b, a]` bytes.
    pub fn to_premul(self) -> [u8; 4] {
        [
            premul_u8(self.r, self.a),
            premul_u8(self.g, self.a),
            premul_u8(self.b, self.a),
            self.a,
        ]
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r, self.g, self.b, self.a
        )
    }
}

impl FromStr for Rgba8 {
    type Err = SlideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s)
    }
}

impl Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Css(String),
            RgbaObj {
                r: u8,
                g: u8,
                b: u8,
                #[serde(default = "one")]
                a: f64,
            },
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Css(s) => parse_color(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Rgba8::rgba(r, g, b, a)),
        }
    }
}

/// Parse a CSS-like color: `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r,g,b)`, `rgba(r,g,b,a)`,
/// `transparent`, `white` or `black`.
pub fn parse_color(input: &str) -> SlideResult<Rgba8> {
    let s = input.trim().to_ascii_lowercase();
    match s.as_str() {
        "transparent" => return Ok(Rgba8::TRANSPARENT),
        "white" => return Ok(Rgba8::WHITE),
        "black" => return Ok(Rgba8::BLACK),
        _ => {}
    }

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(body) = s.strip_prefix("rgba(").or_else(|| s.strip_prefix("rgb(")) {
        let body = body
            .strip_suffix(')')
            .ok_or_else(|| SlideError::validation(format!("unterminated color \"{input}\"")))?;
        return parse_rgb_fn(body, input);
    }

    Err(SlideError::validation(format!(
        "unsupported color \"{input}\""
    )))
}

fn parse_hex(hex: &str) -> SlideResult<Rgba8> {
    fn byte(pair: &str) -> SlideResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| SlideError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    if !hex.is_ascii() {
        return Err(SlideError::validation("hex color must be ASCII"));
    }
    match hex.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = byte(&c.to_string())?;
                out[i] = v * 17;
            }
            Ok(Rgba8::new(out[0], out[1], out[2], 255))
        }
        6 => Ok(Rgba8::new(
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
            255,
        )),
        8 => Ok(Rgba8::new(
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
            byte(&hex[6..8])?,
        )),
        _ => Err(SlideError::validation(
            "hex color must be #RGB, #RRGGBB or #RRGGBBAA",
        )),
    }
}

fn parse_rgb_fn(body: &str, input: &str) -> SlideResult<Rgba8> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(SlideError::validation(format!(
            "color \"{input}\" must have 3 or 4 components"
        )));
    }

    let num = |p: &str| -> SlideResult<f64> {
        let v: f64 = p
            .parse()
            .map_err(|_| SlideError::validation(format!("invalid color component \"{p}\"")))?;
        if !v.is_finite() {
            return Err(SlideError::validation("color components must be finite"));
        }
        Ok(v)
    };

    let channel = |p: &str| -> SlideResult<u8> { Ok(num(p)?.clamp(0.0, 255.0).round() as u8) };
    let alpha = match parts.get(3) {
        Some(p) => num(p)?,
        None => 1.0,
    };

    Ok(Rgba8::rgba(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        alpha,
    ))
}

fn unit_to_u8(x: f64) -> u8 {
    if !x.is_finite() {
        return 0;
    }
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
