use std::f64::consts::{FRAC_PI_2, PI, TAU};

use cairo::{Context, Format, ImageSurface, LinearGradient};
use pango::FontDescription;
use tracing::debug;

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Background, CirclePrimitive, Color, FontWeight, GradientUnits, LinearGradientPrimitive, Paint,
    PathCommand, PathPrimitive, Primitive, RectPrimitive, Scene, SectorPrimitive, Stroke,
    SurfaceLayer, TextHAlign, TextPrimitive, TextVAlign,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub shapes_drawn: usize,
    pub paths_drawn: usize,
    pub texts_drawn: usize,
}

/// Cairo + Pango + PangoCairo rasterizer for `Scene`s.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(viewport: Viewport) -> ChartResult<Self> {
        let invalid = || ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        };
        if !viewport.is_valid() {
            return Err(invalid());
        }
        let width = i32::try_from(viewport.width).map_err(|_| invalid())?;
        let height = i32::try_from(viewport.height).map_err(|_| invalid())?;

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    pub fn render(&mut self, scene: &Scene) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        let painter = ScenePainter {
            context: &context,
            scene,
        };
        self.last_stats = painter.paint()?;
        Ok(())
    }

    /// Encodes the current surface content as PNG.
    pub fn write_png(&self) -> ChartResult<Vec<u8>> {
        let mut bytes = Vec::new();
        self.surface
            .write_to_png(&mut bytes)
            .map_err(|err| ChartError::Export(format!("failed to encode png: {err}")))?;
        Ok(bytes)
    }
}

/// Rasterizes `scene` at its own viewport size into PNG bytes.
pub fn rasterize_png(scene: &Scene) -> ChartResult<Vec<u8>> {
    let mut renderer = CairoRenderer::new(scene.viewport)?;
    renderer.render(scene)?;
    debug!(stats = ?renderer.last_stats(), "rasterized scene");
    renderer.write_png()
}

struct ScenePainter<'a> {
    context: &'a Context,
    scene: &'a Scene,
}

impl ScenePainter<'_> {
    fn paint(&self) -> ChartResult<CairoRenderStats> {
        self.paint_background()?;

        let mut stats = CairoRenderStats::default();
        for layer in [SurfaceLayer::Plot, SurfaceLayer::Overlay] {
            let content = self.scene.layer(layer);
            self.context
                .save()
                .map_err(|err| map_backend_error("failed to save context", err))?;
            self.context
                .translate(content.transform.translate_x, content.transform.translate_y);
            self.context
                .scale(content.transform.scale, content.transform.scale);
            for (_, element) in &content.elements {
                match &element.primitive {
                    Primitive::Rect(rect) => {
                        self.draw_rect(rect)?;
                        stats.shapes_drawn += 1;
                    }
                    Primitive::Circle(circle) => {
                        self.draw_circle(circle)?;
                        stats.shapes_drawn += 1;
                    }
                    Primitive::Sector(sector) => {
                        self.draw_sector(sector)?;
                        stats.shapes_drawn += 1;
                    }
                    Primitive::Path(path) => {
                        self.draw_path(path)?;
                        stats.paths_drawn += 1;
                    }
                    Primitive::Text(text) => {
                        self.draw_text(text);
                        stats.texts_drawn += 1;
                    }
                    Primitive::LinearGradient(_) => {}
                }
            }
            self.context
                .restore()
                .map_err(|err| map_backend_error("failed to restore context", err))?;
        }
        Ok(stats)
    }

    fn paint_background(&self) -> ChartResult<()> {
        let width = f64::from(self.scene.viewport.width);
        let height = f64::from(self.scene.viewport.height);
        match self.scene.background {
            Background::Solid { color } => apply_color(self.context, color, 1.0),
            Background::LinearGradient {
                angle_deg,
                from,
                to,
            } => {
                let ((x1, y1), (x2, y2)) = Background::gradient_vector(angle_deg);
                let gradient = LinearGradient::new(x1 * width, y1 * height, x2 * width, y2 * height);
                add_stop(&gradient, 0.0, from, 1.0);
                add_stop(&gradient, 1.0, to, 1.0);
                self.context
                    .set_source(&gradient)
                    .map_err(|err| map_backend_error("failed to set background", err))?;
            }
        }
        self.context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))
    }

    fn gradient(&self, id: &str) -> Option<&LinearGradientPrimitive> {
        self.scene
            .layer(SurfaceLayer::Defs)
            .elements
            .iter()
            .find_map(|(_, element)| match &element.primitive {
                Primitive::LinearGradient(gradient) if gradient.id == id => Some(gradient),
                _ => None,
            })
    }

    /// Installs `paint` as source for the current path.
    fn apply_paint(&self, paint: &Paint, opacity: f64) -> ChartResult<()> {
        match paint {
            Paint::Solid(color) => {
                apply_color(self.context, *color, opacity);
                Ok(())
            }
            Paint::Gradient(id) => {
                let Some(definition) = self.gradient(id) else {
                    apply_color(self.context, Color::BLACK, opacity);
                    return Ok(());
                };
                let (x1, y1, x2, y2) = match definition.units {
                    GradientUnits::UserSpace => {
                        (definition.x1, definition.y1, definition.x2, definition.y2)
                    }
                    GradientUnits::ObjectBoundingBox => {
                        let (left, top, right, bottom) = self
                            .context
                            .path_extents()
                            .map_err(|err| map_backend_error("failed to measure path", err))?;
                        let (width, height) = (right - left, bottom - top);
                        (
                            left + definition.x1 * width,
                            top + definition.y1 * height,
                            left + definition.x2 * width,
                            top + definition.y2 * height,
                        )
                    }
                };
                let gradient = LinearGradient::new(x1, y1, x2, y2);
                for stop in &definition.stops {
                    add_stop(&gradient, stop.offset, stop.color, stop.opacity * opacity);
                }
                self.context
                    .set_source(&gradient)
                    .map_err(|err| map_backend_error("failed to set gradient", err))
            }
        }
    }

    fn fill_and_stroke(
        &self,
        fill: Option<&Paint>,
        fill_opacity: f64,
        stroke: Option<&Stroke>,
    ) -> ChartResult<()> {
        if let Some(fill) = fill {
            self.apply_paint(fill, fill_opacity)?;
            self.context
                .fill_preserve()
                .map_err(|err| map_backend_error("failed to fill", err))?;
        }
        if let Some(stroke) = stroke {
            self.apply_paint(&stroke.paint, stroke.opacity)?;
            self.context.set_line_width(stroke.width);
            self.context.set_dash(&stroke.dash, 0.0);
            self.context
                .stroke_preserve()
                .map_err(|err| map_backend_error("failed to stroke", err))?;
            self.context.set_dash(&[], 0.0);
        }
        self.context.new_path();
        Ok(())
    }

    fn draw_rect(&self, rect: &RectPrimitive) -> ChartResult<()> {
        append_rect_path(self.context, rect);
        self.fill_and_stroke(rect.fill.as_ref(), 1.0, rect.stroke.as_ref())
    }

    fn draw_circle(&self, circle: &CirclePrimitive) -> ChartResult<()> {
        self.context.new_sub_path();
        self.context
            .arc(circle.cx, circle.cy, circle.radius, 0.0, TAU);
        self.fill_and_stroke(circle.fill.as_ref(), 1.0, circle.stroke.as_ref())
    }

    fn draw_sector(&self, sector: &SectorPrimitive) -> ChartResult<()> {
        let context = self.context;
        context.new_sub_path();
        context.arc(
            sector.cx,
            sector.cy,
            sector.outer_radius,
            sector.start_angle,
            sector.end_angle,
        );
        if sector.inner_radius > 0.0 {
            context.arc_negative(
                sector.cx,
                sector.cy,
                sector.inner_radius,
                sector.end_angle,
                sector.start_angle,
            );
        } else {
            context.line_to(sector.cx, sector.cy);
        }
        context.close_path();
        self.fill_and_stroke(Some(&sector.fill), 1.0, None)
    }

    fn draw_path(&self, path: &PathPrimitive) -> ChartResult<()> {
        let context = self.context;
        for command in &path.commands {
            match *command {
                PathCommand::MoveTo(x, y) => context.move_to(x, y),
                PathCommand::LineTo(x, y) => context.line_to(x, y),
                PathCommand::CubicTo { c1, c2, to } => {
                    context.curve_to(c1.0, c1.1, c2.0, c2.1, to.0, to.1);
                }
                PathCommand::Close => context.close_path(),
            }
        }
        self.fill_and_stroke(path.fill.as_ref(), path.fill_opacity, path.stroke.as_ref())
    }

    fn draw_text(&self, text: &TextPrimitive) {
        let layout = pangocairo::functions::create_layout(self.context);
        let mut font_description =
            FontDescription::from_string(&format!("Sans {}", text.font_size_px));
        font_description.set_weight(match text.font_weight {
            FontWeight::Normal => pango::Weight::Normal,
            FontWeight::SemiBold => pango::Weight::Semibold,
            FontWeight::Bold => pango::Weight::Bold,
        });
        layout.set_font_description(Some(&font_description));
        if text.letter_spacing_px != 0.0 {
            let attributes = pango::AttrList::new();
            attributes.insert(pango::AttrInt::new_letter_spacing(
                (text.letter_spacing_px * f64::from(pango::SCALE)) as i32,
            ));
            layout.set_attributes(Some(&attributes));
        }
        layout.set_text(&text.text);

        let (text_width, text_height) = layout.pixel_size();
        let x = match text.h_align {
            TextHAlign::Left => text.x,
            TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
            TextHAlign::Right => text.x - f64::from(text_width),
        };
        let y = match text.v_align {
            TextVAlign::Baseline => text.y - f64::from(layout.baseline()) / f64::from(pango::SCALE),
            TextVAlign::Middle => text.y - f64::from(text_height) / 2.0,
        };

        apply_color(self.context, text.color, 1.0);
        self.context.move_to(x, y);
        pangocairo::functions::show_layout(self.context, &layout);
    }
}

fn apply_color(context: &Context, color: Color, opacity: f64) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha * opacity);
}

fn add_stop(gradient: &LinearGradient, offset: f64, color: Color, opacity: f64) {
    gradient.add_color_stop_rgba(offset, color.red, color.green, color.blue, color.alpha * opacity);
}

fn append_rect_path(context: &Context, rect: &RectPrimitive) {
    if rect.corner_radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let radius = rect
        .corner_radius
        .min(rect.width * 0.5)
        .min(rect.height * 0.5);
    let left = rect.x;
    let top = rect.y;
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Export(format!("{prefix}: {err}"))
}
