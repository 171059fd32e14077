use tracing::debug;

use crate::error::ChartResult;
use crate::flow::elements;
use crate::render::{Color, RenderSurface, SurfaceLayer};

use super::{FlowDiagram, TimeFilter};

impl<S: RenderSurface> FlowDiagram<S> {
    pub(super) fn draw_filter_buttons(&mut self) -> ChartResult<()> {
        let viewport = self.config.viewport();
        let count = self.config.time_filters.len();
        for (slot, filter) in self.config.time_filters.iter().enumerate() {
            let origin = elements::filter_button_origin(viewport, slot, count);
            let active = *filter == self.config.active_filter;
            let fill = self.button_fill(active);
            let button = self.surface.append_element(
                SurfaceLayer::Overlay,
                elements::filter_button(slot, origin, fill, active, self.token),
            )?;
            self.surface
                .append_element(SurfaceLayer::Overlay, elements::filter_label(filter, origin))?;
            self.handles.filters.push(button);
        }
        Ok(())
    }

    /// Makes `filter` the active time window, recolors the buttons and
    /// notifies `on_filter_change`.
    pub fn select_filter(&mut self, filter: impl Into<TimeFilter>) -> ChartResult<()> {
        let filter = filter.into();
        debug!(filter = %filter, previous = %self.config.active_filter, "time filter selected");
        self.config.active_filter = filter;

        let viewport = self.config.viewport();
        let count = self.config.time_filters.len();
        for (slot, button) in self.handles.filters.clone().into_iter().enumerate() {
            let Some(label) = self.config.time_filters.get(slot) else {
                continue;
            };
            let active = *label == self.config.active_filter;
            let origin = elements::filter_button_origin(viewport, slot, count);
            let fill = self.button_fill(active);
            self.surface.replace_element(
                button,
                elements::filter_button(slot, origin, fill, active, self.token),
            )?;
        }

        if let Some(handler) = &self.config.on_filter_change {
            handler.call(&self.config.active_filter);
        }
        Ok(())
    }

    /// Selects the filter drawn at button `slot`; `false` when out of range.
    pub(super) fn select_filter_slot(&mut self, slot: usize) -> ChartResult<bool> {
        let Some(filter) = self.config.time_filters.get(slot).cloned() else {
            return Ok(false);
        };
        self.select_filter(filter)?;
        Ok(true)
    }

    fn button_fill(&self, active: bool) -> Color {
        if active {
            self.config.filter_button_color
        } else {
            self.config.filter_button_inactive
        }
    }
}
