//! Color Math - Hex Color Derivations
//!
//! Every function here is total: malformed input maps to a documented
//! fallback constant instead of an error.

/// Fallback for `complementary_color` on malformed input.
pub const COMPLEMENT_FALLBACK: &str = "#4A4A4A";

/// Fallback for `contrast_color` on malformed input.
pub const CONTRAST_FALLBACK: &str = "#FFFFFF";

/// Neutral gray substituted for malformed record colors.
pub const NEUTRAL_GRAY: &str = "#4A4A4A";

pub const BLACK: &str = "#000000";
pub const WHITE: &str = "#FFFFFF";

/// Perceptual luminance threshold separating light from dark backgrounds.
pub const LUMINANCE_THRESHOLD: u32 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Canonical upper-case `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn inverted(self) -> Self {
        Self {
            r: 255 - self.r,
            g: 255 - self.g,
            b: 255 - self.b,
        }
    }

    /// `(299R + 587G + 114B) / 1000`, in `0..=255`.
    pub fn luminance(self) -> u32 {
        (299 * u32::from(self.r) + 587 * u32::from(self.g) + 114 * u32::from(self.b)) / 1000
    }
}

/// Parse `#RGB`, `RGB`, `#RRGGBB` or `RRGGBB` (any case).
pub fn parse_hex(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };

    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Canonical `#RRGGBB` form, or `None` when the input is not a hex color.
pub fn normalize_hex(hex: &str) -> Option<String> {
    parse_hex(hex.trim()).map(Rgb::to_hex)
}

/// Canonical form of a record color, or `NEUTRAL_GRAY`.
pub fn sanitize_color(hex: &str) -> String {
    normalize_hex(hex).unwrap_or_else(|| NEUTRAL_GRAY.to_string())
}

/// Channel-wise inversion of `hex`.
///
/// Inputs shorter than four characters are rejected before parsing, so a bare
/// three-digit shorthand without `#` falls back too.
pub fn complementary_color(hex: &str) -> String {
    if hex.len() < 4 {
        return COMPLEMENT_FALLBACK.to_string();
    }
    match parse_hex(hex) {
        Some(rgb) => rgb.inverted().to_hex(),
        None => COMPLEMENT_FALLBACK.to_string(),
    }
}

/// Black or white, whichever reads better on `hex`.
pub fn contrast_color(hex: &str) -> &'static str {
    match parse_hex(hex) {
        Some(rgb) if rgb.luminance() >= LUMINANCE_THRESHOLD => BLACK,
        Some(_) => WHITE,
        None => CONTRAST_FALLBACK,
    }
}
