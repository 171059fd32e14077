//! Theme and palette lookup tables.
//!
//! Tables are immutable constants; resolution never mutates shared state.

pub mod palette;
pub mod theme;

pub use palette::{PALETTES, PaletteSource, generate_gradient, named_palette, resolve_palette};
pub use theme::{
    ChartTheme, THEMES, ThemeOverrides, ThemeSource, create_theme, named_theme, resolve_theme,
};
