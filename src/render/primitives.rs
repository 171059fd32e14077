use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
///
/// Serialized as a CSS color string (`#rrggbb` when opaque, `rgba(..)`
/// otherwise) so themes and node colors load from plain JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds a color from 8-bit channels.
    #[must_use]
    pub const fn rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba8(red, green, blue, 1.0)
    }

    #[must_use]
    pub const fn rgba8(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Self::rgba(
            red as f64 / 255.0,
            green as f64 / 255.0,
            blue as f64 / 255.0,
            alpha,
        )
    }

    /// Parses `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`, `rgba(r, g, b, a)`
    /// and the keywords `white`, `black`, `transparent`.
    pub fn parse(input: &str) -> ChartResult<Self> {
        let value = input.trim();
        if let Some(hex) = value.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ChartError::InvalidColor(input.to_owned()));
        }
        if let Some(body) = value
            .strip_prefix("rgba(")
            .or_else(|| value.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_functional(body).ok_or_else(|| ChartError::InvalidColor(input.to_owned()));
        }
        match value.to_ascii_lowercase().as_str() {
            "white" => Ok(Self::WHITE),
            "black" => Ok(Self::BLACK),
            "transparent" => Ok(Self::TRANSPARENT),
            _ => Err(ChartError::InvalidColor(input.to_owned())),
        }
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    /// Darkens the color by `0.7^k` per RGB channel.
    #[must_use]
    pub fn darker(self, k: f64) -> Self {
        let factor = 0.7_f64.powf(k);
        Self {
            red: self.red * factor,
            green: self.green * factor,
            blue: self.blue * factor,
            alpha: self.alpha,
        }
    }

    /// Linear RGB interpolation rounded to whole 8-bit channel steps.
    #[must_use]
    pub fn interpolate(self, other: Self, ratio: f64) -> Self {
        let channel = |from: f64, to: f64| {
            let from = from * 255.0;
            let to = to * 255.0;
            (from + (to - from) * ratio).round() / 255.0
        };
        Self {
            red: channel(self.red, other.red),
            green: channel(self.green, other.green),
            blue: channel(self.blue, other.blue),
            alpha: self.alpha + (other.alpha - self.alpha) * ratio,
        }
    }

    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        (
            channel_to_u8(self.red),
            channel_to_u8(self.green),
            channel_to_u8(self.blue),
        )
    }

    /// CSS representation used by the SVG writer.
    #[must_use]
    pub fn to_css(self) -> String {
        let (r, g, b) = self.to_rgb8();
        if self.alpha >= 1.0 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("rgba({r}, {g}, {b}, {})", self.alpha)
        }
    }
}

fn channel_to_u8(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn parse_hex(hex: &str) -> Option<Color> {
    let digit = |index: usize| u8::from_str_radix(hex.get(index..=index)?, 16).ok();
    let pair = |index: usize| u8::from_str_radix(hex.get(index..index + 2)?, 16).ok();
    match hex.len() {
        3 => Some(Color::rgb8(
            digit(0)? * 17,
            digit(1)? * 17,
            digit(2)? * 17,
        )),
        6 => Some(Color::rgb8(pair(0)?, pair(2)?, pair(4)?)),
        8 => Some(Color::rgba8(
            pair(0)?,
            pair(2)?,
            pair(4)?,
            f64::from(pair(6)?) / 255.0,
        )),
        _ => None,
    }
}

fn parse_functional(body: &str) -> Option<Color> {
    let parts: SmallVec<[f64; 4]> = body
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .ok()?;
    let (red, green, blue, alpha) = match parts.as_slice() {
        [r, g, b] => (*r, *g, *b, 1.0),
        [r, g, b, a] => (*r, *g, *b, *a),
        _ => return None,
    };
    let in_range = |v: f64| v.is_finite() && (0.0..=255.0).contains(&v);
    if !in_range(red) || !in_range(green) || !in_range(blue) {
        return None;
    }
    if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
        return None;
    }
    Some(Color::rgba(red / 255.0, green / 255.0, blue / 255.0, alpha))
}

impl FromStr for Color {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_css()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Fill or stroke source: a flat color or a gradient declared in the defs layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Gradient(String),
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Self::Solid(color)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub paint: Paint,
    pub width: f64,
    pub opacity: f64,
    pub dash: SmallVec<[f64; 2]>,
}

impl Stroke {
    #[must_use]
    pub fn new(paint: impl Into<Paint>, width: f64) -> Self {
        Self {
            paint: paint.into(),
            width,
            opacity: 1.0,
            dash: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    #[must_use]
    pub fn with_dash(mut self, dash: &[f64]) -> Self {
        self.dash = SmallVec::from_slice(dash);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Option<Paint>,
    pub stroke: Option<Stroke>,
    pub corner_radius: f64,
}

impl RectPrimitive {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill: None,
            stroke: None,
            corner_radius: 0.0,
        }
    }

    #[must_use]
    pub fn with_fill(mut self, fill: impl Into<Paint>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    #[must_use]
    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (left, right) = ordered(self.x, self.x + self.width);
        let (top, bottom) = ordered(self.y, self.y + self.height);
        x >= left && x <= right && y >= top && y <= bottom
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CirclePrimitive {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub fill: Option<Paint>,
    pub stroke: Option<Stroke>,
}

impl CirclePrimitive {
    #[must_use]
    pub fn new(cx: f64, cy: f64, radius: f64) -> Self {
        Self {
            cx,
            cy,
            radius,
            fill: None,
            stroke: None,
        }
    }

    #[must_use]
    pub fn with_fill(mut self, fill: impl Into<Paint>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (x - self.cx).hypot(y - self.cy) <= self.radius
    }
}

/// Annular sector (pie slice or donut segment).
///
/// Angles are radians measured clockwise from the positive x axis in screen
/// space (y grows downward).
#[derive(Debug, Clone, PartialEq)]
pub struct SectorPrimitive {
    pub cx: f64,
    pub cy: f64,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub fill: Paint,
}

impl SectorPrimitive {
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    #[must_use]
    pub fn large_arc(&self) -> bool {
        self.sweep() > std::f64::consts::PI
    }

    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let distance = (x - self.cx).hypot(y - self.cy);
        if distance > self.outer_radius || distance < self.inner_radius {
            return false;
        }
        let angle = (y - self.cy).atan2(x - self.cx).rem_euclid(TAU);
        [angle, angle + TAU]
            .into_iter()
            .any(|a| a >= self.start_angle && a <= self.end_angle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    CubicTo {
        c1: (f64, f64),
        c2: (f64, f64),
        to: (f64, f64),
    },
    Close,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathPrimitive {
    pub commands: Vec<PathCommand>,
    pub fill: Option<Paint>,
    pub fill_opacity: f64,
    pub stroke: Option<Stroke>,
}

impl PathPrimitive {
    #[must_use]
    pub fn new(commands: Vec<PathCommand>) -> Self {
        Self {
            commands,
            fill: None,
            fill_opacity: 1.0,
            stroke: None,
        }
    }

    /// Straight segments through `points`, optionally closed.
    #[must_use]
    pub fn polyline(points: &[(f64, f64)]) -> Self {
        let commands = points
            .iter()
            .enumerate()
            .map(|(index, &(x, y))| {
                if index == 0 {
                    PathCommand::MoveTo(x, y)
                } else {
                    PathCommand::LineTo(x, y)
                }
            })
            .collect();
        Self::new(commands)
    }

    #[must_use]
    pub fn with_fill(mut self, fill: impl Into<Paint>, opacity: f64) -> Self {
        self.fill = Some(fill.into());
        self.fill_opacity = opacity;
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Vertical anchoring relative to `TextPrimitive::y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextVAlign {
    Baseline,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    SemiBold,
    Bold,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub font_weight: FontWeight,
    pub color: Color,
    pub h_align: TextHAlign,
    pub v_align: TextVAlign,
    pub letter_spacing_px: f64,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            font_weight: FontWeight::Normal,
            color,
            h_align,
            v_align: TextVAlign::Baseline,
            letter_spacing_px: 0.0,
        }
    }

    #[must_use]
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    #[must_use]
    pub fn middle(mut self) -> Self {
        self.v_align = TextVAlign::Middle;
        self
    }

    #[must_use]
    pub fn with_letter_spacing(mut self, spacing_px: f64) -> Self {
        self.letter_spacing_px = spacing_px;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
    pub opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientUnits {
    /// Coordinates are fractions of the painted element's bounding box.
    ObjectBoundingBox,
    /// Coordinates are absolute canvas pixels.
    UserSpace,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradientPrimitive {
    pub id: String,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub units: GradientUnits,
    pub stops: SmallVec<[GradientStop; 2]>,
}

impl LinearGradientPrimitive {
    /// Two-stop gradient spanning `from` to `to`.
    #[must_use]
    pub fn between(
        id: impl Into<String>,
        (x1, y1): (f64, f64),
        (x2, y2): (f64, f64),
        units: GradientUnits,
        from: GradientStop,
        to: GradientStop,
    ) -> Self {
        let mut stops = SmallVec::new();
        stops.push(from);
        stops.push(to);
        Self {
            id: id.into(),
            x1,
            y1,
            x2,
            y2,
            units,
            stops,
        }
    }
}

/// One drawable item on a rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect(RectPrimitive),
    Circle(CirclePrimitive),
    Sector(SectorPrimitive),
    Path(PathPrimitive),
    Text(TextPrimitive),
    LinearGradient(LinearGradientPrimitive),
}

impl Primitive {
    /// Geometric hit test in the primitive's own coordinate space.
    ///
    /// Paths, texts and gradients are never hit by coordinates; they are
    /// addressed by element id instead.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        match self {
            Self::Rect(rect) => rect.contains(x, y),
            Self::Circle(circle) => circle.contains(x, y),
            Self::Sector(sector) => sector.contains(x, y),
            Self::Path(_) | Self::Text(_) | Self::LinearGradient(_) => false,
        }
    }
}

impl From<RectPrimitive> for Primitive {
    fn from(value: RectPrimitive) -> Self {
        Self::Rect(value)
    }
}

impl From<CirclePrimitive> for Primitive {
    fn from(value: CirclePrimitive) -> Self {
        Self::Circle(value)
    }
}

impl From<SectorPrimitive> for Primitive {
    fn from(value: SectorPrimitive) -> Self {
        Self::Sector(value)
    }
}

impl From<PathPrimitive> for Primitive {
    fn from(value: PathPrimitive) -> Self {
        Self::Path(value)
    }
}

impl From<TextPrimitive> for Primitive {
    fn from(value: TextPrimitive) -> Self {
        Self::Text(value)
    }
}

impl From<LinearGradientPrimitive> for Primitive {
    fn from(value: LinearGradientPrimitive) -> Self {
        Self::LinearGradient(value)
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_and_functional_colors_parse_to_same_value() {
        let hex = Color::parse("#ff6b6b").expect("hex");
        let functional = Color::parse("rgb(255, 107, 107)").expect("rgb");
        assert_eq!(hex, functional);
        assert_eq!(hex.to_css(), "#ff6b6b");
    }

    #[test]
    fn translucent_colors_format_as_rgba() {
        let shadow = Color::parse("rgba(0, 0, 0, 0.1)").expect("rgba");
        assert_eq!(shadow.to_css(), "rgba(0, 0, 0, 0.1)");
    }

    #[test]
    fn malformed_colors_are_rejected() {
        for input in ["#12", "#zzzzzz", "rgb(1, 2)", "rgba(300, 0, 0, 1)", "teal"] {
            assert!(Color::parse(input).is_err(), "{input} should not parse");
        }
    }

    #[test]
    fn sector_hit_test_respects_radii_and_angles() {
        let sector = SectorPrimitive {
            cx: 100.0,
            cy: 100.0,
            outer_radius: 50.0,
            inner_radius: 20.0,
            start_angle: 0.0,
            end_angle: std::f64::consts::FRAC_PI_2,
            fill: Paint::Solid(Color::BLACK),
        };
        assert!(sector.contains(130.0, 110.0));
        assert!(!sector.contains(105.0, 105.0), "inside the hole");
        assert!(!sector.contains(70.0, 110.0), "outside the sweep");
    }
}
