use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::render::Color;

/// Fully resolved color tokens used by every chart kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartTheme {
    pub background: Color,
    pub text: Color,
    pub grid: Color,
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub border: Color,
    pub shadow: Color,
}

impl ChartTheme {
    pub const LIGHT: Self = Self {
        background: Color::rgb8(0xff, 0xff, 0xff),
        text: Color::rgb8(0x33, 0x33, 0x33),
        grid: Color::rgb8(0xe0, 0xe0, 0xe0),
        primary: Color::rgb8(0xff, 0x6b, 0x6b),
        secondary: Color::rgb8(0x4e, 0xcd, 0xc4),
        accent: Color::rgb8(0x45, 0xb7, 0xd1),
        border: Color::rgb8(0xcc, 0xcc, 0xcc),
        shadow: Color::rgba8(0, 0, 0, 0.1),
    };

    pub const DARK: Self = Self {
        background: Color::rgb8(0x1a, 0x1a, 0x1a),
        text: Color::rgb8(0xff, 0xff, 0xff),
        grid: Color::rgb8(0x33, 0x33, 0x33),
        primary: Color::rgb8(0xff, 0x6b, 0x6b),
        secondary: Color::rgb8(0x4e, 0xcd, 0xc4),
        accent: Color::rgb8(0x45, 0xb7, 0xd1),
        border: Color::rgb8(0x44, 0x44, 0x44),
        shadow: Color::rgba8(0xff, 0xff, 0xff, 0.1),
    };
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self::LIGHT
    }
}

/// Built-in themes addressable by name.
pub const THEMES: &[(&str, ChartTheme)] = &[("light", ChartTheme::LIGHT), ("dark", ChartTheme::DARK)];

/// Theme selection as accepted by chart options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeSource {
    Named(String),
    Custom(ChartTheme),
}

impl Default for ThemeSource {
    fn default() -> Self {
        Self::Named("light".to_owned())
    }
}

impl From<&str> for ThemeSource {
    fn from(name: &str) -> Self {
        Self::Named(name.to_owned())
    }
}

impl From<String> for ThemeSource {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<ChartTheme> for ThemeSource {
    fn from(theme: ChartTheme) -> Self {
        Self::Custom(theme)
    }
}

/// Looks up a built-in theme by name.
#[must_use]
pub fn named_theme(name: &str) -> Option<ChartTheme> {
    THEMES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, theme)| *theme)
}

/// Resolves a theme source to concrete tokens; unknown names fall back to light.
#[must_use]
pub fn resolve_theme(source: &ThemeSource) -> ChartTheme {
    match source {
        ThemeSource::Custom(theme) => *theme,
        ThemeSource::Named(name) => named_theme(name).unwrap_or_else(|| {
            debug!(theme = %name, "unknown theme name, falling back to light");
            ChartTheme::LIGHT
        }),
    }
}

/// Partial theme; unset tokens are taken from the light theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeOverrides {
    pub background: Option<Color>,
    pub text: Option<Color>,
    pub grid: Option<Color>,
    pub primary: Option<Color>,
    pub secondary: Option<Color>,
    pub accent: Option<Color>,
    pub border: Option<Color>,
    pub shadow: Option<Color>,
}

#[must_use]
pub fn create_theme(overrides: ThemeOverrides) -> ChartTheme {
    let base = ChartTheme::LIGHT;
    ChartTheme {
        background: overrides.background.unwrap_or(base.background),
        text: overrides.text.unwrap_or(base.text),
        grid: overrides.grid.unwrap_or(base.grid),
        primary: overrides.primary.unwrap_or(base.primary),
        secondary: overrides.secondary.unwrap_or(base.secondary),
        accent: overrides.accent.unwrap_or(base.accent),
        border: overrides.border.unwrap_or(base.border),
        shadow: overrides.shadow.unwrap_or(base.shadow),
    }
}
