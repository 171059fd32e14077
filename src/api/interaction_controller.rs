use tracing::debug;

use crate::render::{ElementId, HitRole, HitTarget, RenderSurface};

use super::{Chart, ChartKind};

impl<K: ChartKind, S: RenderSurface> Chart<K, S> {
    /// Dispatches a click addressed to surface element `id`.
    ///
    /// Returns `true` when the element stands for a datum of this chart; the
    /// click callback, if any, has then been invoked with that datum.
    pub fn click_element(&self, id: ElementId) -> bool {
        self.surface
            .element(id)
            .and_then(|element| element.hit_target)
            .is_some_and(|target| self.dispatch_click(target))
    }

    /// Dispatches a click at canvas coordinates to the topmost hit element.
    pub fn click_at(&self, x: f64, y: f64) -> bool {
        self.surface
            .hit_test(x, y)
            .is_some_and(|(_, target)| self.dispatch_click(target))
    }

    fn dispatch_click(&self, target: HitTarget) -> bool {
        if target.owner != self.token {
            return false;
        }
        let HitRole::Datum(index) = target.role else {
            return false;
        };
        let Some(datum) = self.data.get(index) else {
            return false;
        };
        debug!(kind = K::FILE_STEM, index, "point click");
        if let Some(handler) = &self.options.on_point_click {
            handler.call(datum);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::api::{BarChart, ChartOptions};
    use crate::core::CategoryPoint;
    use crate::render::{Document, HitRole, HitTarget, InstanceToken};

    fn counting_chart(document: &mut Document) -> (BarChart, Rc<RefCell<u32>>) {
        let hits = Rc::new(RefCell::new(0_u32));
        let counter = Rc::clone(&hits);
        document.create_container("chart");
        let chart = BarChart::mount(
            document,
            "#chart",
            vec![CategoryPoint::new("Jan", 30.0), CategoryPoint::new("Feb", 25.0)],
            ChartOptions::default().with_point_click(move |_| *counter.borrow_mut() += 1),
        )
        .expect("mount");
        (chart, hits)
    }

    #[test]
    fn foreign_owner_never_reaches_handler() {
        let mut document = Document::new();
        let (chart, hits) = counting_chart(&mut document);

        let foreign = HitTarget::new(InstanceToken::next(), HitRole::Datum(0));
        assert_ne!(foreign.owner, chart.instance_token());
        assert!(!chart.dispatch_click(foreign));
        assert_eq!(*hits.borrow(), 0);

        assert!(chart.dispatch_click(HitTarget::new(chart.instance_token(), HitRole::Datum(1))));
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn non_datum_and_out_of_range_targets_are_ignored() {
        let mut document = Document::new();
        let (chart, hits) = counting_chart(&mut document);
        let token = chart.instance_token();

        assert!(!chart.dispatch_click(HitTarget::new(token, HitRole::Datum(2))));
        assert!(!chart.dispatch_click(HitTarget::new(token, HitRole::Control(0))));
        assert_eq!(*hits.borrow(), 0);
    }
}
