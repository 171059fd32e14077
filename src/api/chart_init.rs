use tracing::info;

use crate::error::{ChartError, ChartResult};
use crate::render::{Background, Container, InstanceToken, RenderSurface, SurfaceHost};
use crate::style::resolve_theme;

use super::{Chart, ChartKind, ChartOptions};

impl<K: ChartKind, S: RenderSurface> Chart<K, S> {
    /// Resolves `container`, attaches a fresh surface to it and draws once.
    ///
    /// Existing children of the container are removed.
    pub fn mount<H>(
        host: &mut H,
        container: impl Into<Container>,
        data: Vec<K::Datum>,
        options: ChartOptions<K>,
    ) -> ChartResult<Self>
    where
        H: SurfaceHost<Surface = S>,
    {
        let container = container.into();
        let element = host
            .resolve(&container)
            .ok_or_else(|| ChartError::ContainerNotFound(container.to_string()))?;

        let theme = resolve_theme(&options.theme);
        let surface =
            host.mount_surface(element, options.viewport(), Background::solid(theme.background))?;

        let mut chart = Self {
            surface,
            data,
            options,
            theme,
            token: InstanceToken::next(),
            render_count: 0,
        };
        chart.render()?;
        info!(
            kind = K::FILE_STEM,
            container = %container,
            width = chart.options.width,
            height = chart.options.height,
            points = chart.data.len(),
            "mounted chart"
        );
        Ok(chart)
    }

    /// Disposes the surface and detaches it from the host.
    pub fn destroy(mut self) {
        self.surface.dispose();
        info!(kind = K::FILE_STEM, renders = self.render_count, "destroyed chart");
    }
}
