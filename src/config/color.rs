use serde::Deserialize;

use crate::foundation::core::Rgba8;

/// A color as written in the configuration file.
///
/// Accepted forms:
/// - `"#RRGGBB"` / `"#RRGGBBAA"` (the `#` is optional, case-insensitive)
/// - a handful of names: `black`, `white`, `red`, `green`, `blue`, `transparent`
/// - `[r, g, b]` / `[r, g, b, a]` with 0–255 channels
/// - `{ r, g, b, a }` with 0–255 channels, `a` defaulting to 255
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorDef(pub Rgba8);

impl ColorDef {
    /// Straight-alpha channels.
    pub fn rgba8(self) -> Rgba8 {
        self.0
    }
}

impl From<Rgba8> for ColorDef {
    fn from(c: Rgba8) -> Self {
        Self(c)
    }
}

impl<'de> Deserialize<'de> for ColorDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            RgbaObj {
                r: i64,
                g: i64,
                b: i64,
                #[serde(default = "opaque")]
                a: i64,
            },
            Arr(Vec<i64>),
        }

        fn opaque() -> i64 {
            255
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => parse_color_str(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => {
                channels(&[r, g, b, a]).map_err(serde::de::Error::custom)
            }
            Repr::Arr(v) => match v.len() {
                3 => channels(&[v[0], v[1], v[2], 255]).map_err(serde::de::Error::custom),
                4 => channels(&v).map_err(serde::de::Error::custom),
                _ => Err(serde::de::Error::custom(
                    "color array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

fn channels(v: &[i64]) -> Result<ColorDef, String> {
    let mut out = [0u8; 4];
    for (slot, &c) in out.iter_mut().zip(v) {
        *slot = u8::try_from(c).map_err(|_| format!("color channel {c} is outside 0..=255"))?;
    }
    Ok(ColorDef(Rgba8::new(out[0], out[1], out[2], out[3])))
}

/// Parse a hex or named color string.
pub fn parse_color_str(s: &str) -> Result<ColorDef, String> {
    let s = s.trim();
    let named = match s.to_ascii_lowercase().as_str() {
        "black" => Some(Rgba8::BLACK),
        "white" => Some(Rgba8::WHITE),
        "red" => Some(Rgba8::RED),
        "green" => Some(Rgba8::new(0, 255, 0, 255)),
        "blue" => Some(Rgba8::new(0, 0, 255, 255)),
        "transparent" | "none" => Some(Rgba8::TRANSPARENT),
        _ => None,
    };
    if let Some(c) = named {
        return Ok(ColorDef(c));
    }

    let hex = s.strip_prefix('#').unwrap_or(s);
    if !hex.is_ascii() {
        return Err(format!("invalid color \"{s}\""));
    }

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    let (r, g, b, a) = match hex.len() {
        6 => (
            hex_byte(&hex[0..2])?,
            hex_byte(&hex[2..4])?,
            hex_byte(&hex[4..6])?,
            255,
        ),
        8 => (
            hex_byte(&hex[0..2])?,
            hex_byte(&hex[2..4])?,
            hex_byte(&hex[4..6])?,
            hex_byte(&hex[6..8])?,
        ),
        _ => {
            return Err(format!(
                "color \"{s}\" must be #RRGGBB, #RRGGBBAA or a known name"
            ));
        }
    };

    Ok(ColorDef(Rgba8::new(r, g, b, a)))
}

#[cfg(test)]
#[path = "../../tests/unit/config/color.rs"]
mod tests;
