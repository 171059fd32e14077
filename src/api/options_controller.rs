use tracing::{debug, warn};

use crate::error::{ChartError, ChartResult};
use crate::render::{Background, RenderSurface};
use crate::style::resolve_theme;

use super::{Chart, ChartKind, OptionsPatch};

impl<K: ChartKind, S: RenderSurface> Chart<K, S> {
    /// Merges `patch` into the current options and redraws.
    ///
    /// The theme is re-resolved when the patch names one; the surface is
    /// resized and repainted when size or theme change. A rejected patch
    /// leaves the stored options and the surface untouched.
    pub fn update_options(&mut self, patch: OptionsPatch<K>) -> ChartResult<()> {
        let theme_touched = patch.theme.is_some();
        let surface_touched = patch.touches_surface();
        debug!(
            kind = K::FILE_STEM,
            theme_touched,
            surface_touched,
            "merge chart options"
        );

        let mut next = self.options.clone();
        next.merge(patch);
        let viewport = next.viewport();
        if !viewport.is_valid() {
            warn!(
                kind = K::FILE_STEM,
                width = viewport.width,
                height = viewport.height,
                "rejected options patch"
            );
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let theme = if theme_touched {
            resolve_theme(&next.theme)
        } else {
            self.theme
        };
        if surface_touched {
            self.surface
                .configure(viewport, Background::solid(theme.background))?;
        }
        self.options = next;
        self.theme = theme;
        self.render()
    }
}
