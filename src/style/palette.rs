use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::render::Color;

const DEFAULT: [Color; 6] = [
    Color::rgb8(0xff, 0x6b, 0x6b),
    Color::rgb8(0x4e, 0xcd, 0xc4),
    Color::rgb8(0x45, 0xb7, 0xd1),
    Color::rgb8(0x96, 0xce, 0xb4),
    Color::rgb8(0xfe, 0xca, 0x57),
    Color::rgb8(0xff, 0x9f, 0xf3),
];

const VIBRANT: [Color; 6] = [
    Color::rgb8(0xff, 0x47, 0x57),
    Color::rgb8(0x2e, 0xd5, 0x73),
    Color::rgb8(0x37, 0x42, 0xfa),
    Color::rgb8(0xff, 0xa5, 0x02),
    Color::rgb8(0xff, 0x63, 0x48),
    Color::rgb8(0x53, 0x52, 0xed),
];

const PASTEL: [Color; 6] = [
    Color::rgb8(0xff, 0xb3, 0xba),
    Color::rgb8(0xba, 0xff, 0xc9),
    Color::rgb8(0xba, 0xe1, 0xff),
    Color::rgb8(0xff, 0xff, 0xba),
    Color::rgb8(0xff, 0xb3, 0xd9),
    Color::rgb8(0xd4, 0xb3, 0xff),
];

const MONOCHROME: [Color; 6] = [
    Color::rgb8(0xf8, 0xf9, 0xfa),
    Color::rgb8(0xe9, 0xec, 0xef),
    Color::rgb8(0xde, 0xe2, 0xe6),
    Color::rgb8(0xce, 0xd4, 0xda),
    Color::rgb8(0xad, 0xb5, 0xbd),
    Color::rgb8(0x6c, 0x75, 0x7d),
];

const WARM: [Color; 6] = [
    Color::rgb8(0xff, 0x6b, 0x6b),
    Color::rgb8(0xff, 0x8e, 0x53),
    Color::rgb8(0xff, 0xa7, 0x26),
    Color::rgb8(0xff, 0xcc, 0x02),
    Color::rgb8(0xff, 0xeb, 0x3b),
    Color::rgb8(0xff, 0xf1, 0x76),
];

const COOL: [Color; 6] = [
    Color::rgb8(0x21, 0x96, 0xf3),
    Color::rgb8(0x03, 0xa9, 0xf4),
    Color::rgb8(0x00, 0xbc, 0xd4),
    Color::rgb8(0x00, 0x96, 0x88),
    Color::rgb8(0x4c, 0xaf, 0x50),
    Color::rgb8(0x8b, 0xc3, 0x4a),
];

/// Built-in palettes addressable by name, in lookup order.
pub const PALETTES: &[(&str, &[Color])] = &[
    ("default", &DEFAULT),
    ("vibrant", &VIBRANT),
    ("pastel", &PASTEL),
    ("monochrome", &MONOCHROME),
    ("warm", &WARM),
    ("cool", &COOL),
];

/// Palette selection as accepted by chart options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaletteSource {
    Named(String),
    Explicit(Vec<Color>),
}

impl Default for PaletteSource {
    fn default() -> Self {
        Self::Named("default".to_owned())
    }
}

impl From<&str> for PaletteSource {
    fn from(name: &str) -> Self {
        Self::Named(name.to_owned())
    }
}

impl From<Vec<Color>> for PaletteSource {
    fn from(colors: Vec<Color>) -> Self {
        Self::Explicit(colors)
    }
}

#[must_use]
pub fn named_palette(name: &str) -> Option<&'static [Color]> {
    PALETTES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, colors)| *colors)
}

/// Returns exactly `count` colors, cycling through the palette when `count`
/// exceeds its length.
///
/// Unknown names and empty explicit lists fall back to the default palette.
#[must_use]
pub fn resolve_palette(source: &PaletteSource, count: usize) -> Vec<Color> {
    let colors: &[Color] = match source {
        PaletteSource::Explicit(colors) if !colors.is_empty() => colors,
        PaletteSource::Explicit(_) => {
            debug!("empty explicit palette, falling back to default");
            &DEFAULT
        }
        PaletteSource::Named(name) => named_palette(name).unwrap_or_else(|| {
            debug!(palette = %name, "unknown palette name, falling back to default");
            &DEFAULT
        }),
    };
    colors.iter().copied().cycle().take(count).collect()
}

/// Evenly interpolated colors from `start` to `end`, both inclusive.
#[must_use]
pub fn generate_gradient(start: Color, end: Color, steps: usize) -> Vec<Color> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let last = (steps - 1) as f64;
            (0..steps)
                .map(|step| start.interpolate(end, step as f64 / last))
                .collect()
        }
    }
}
