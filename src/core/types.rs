use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Caller-supplied fields carried alongside a datum and handed back verbatim
/// to click callbacks.
pub type ExtraFields = IndexMap<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[must_use]
    pub fn center(self) -> (f64, f64) {
        (f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

/// Insets between the canvas edge and the drawable region, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    /// Fixed plot insets shared by the cartesian chart kinds.
    pub const PLOT: Self = Self::new(40.0, 40.0, 60.0, 60.0);

    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Pixel rectangle left after applying a `Margin` to a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    #[must_use]
    pub fn inset(viewport: Viewport, margin: Margin) -> Self {
        Self {
            left: margin.left,
            top: margin.top,
            width: f64::from(viewport.width) - margin.left - margin.right,
            height: f64::from(viewport.height) - margin.top - margin.bottom,
        }
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn center_x(self) -> f64 {
        self.left + self.width / 2.0
    }
}

/// Labelled value used by bar and pie charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPoint {
    pub label: String,
    pub value: f64,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl CategoryPoint {
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            extra: ExtraFields::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }
}

/// Cartesian sample used by line and scatter charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XyPoint {
    pub x: f64,
    pub y: f64,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl XyPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            extra: ExtraFields::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_fields_survive_json_round_trip() {
        let point: CategoryPoint =
            serde_json::from_str(r#"{"label":"Jan","value":100,"region":"north","rank":3}"#)
                .expect("parse point");
        assert_eq!(point.label, "Jan");
        assert_eq!(point.value, 100.0);
        assert_eq!(point.field("region"), Some(&serde_json::json!("north")));
        assert_eq!(
            point.extra.keys().collect::<Vec<_>>(),
            vec!["region", "rank"]
        );

        let encoded = serde_json::to_value(&point).expect("encode point");
        assert_eq!(encoded["rank"], serde_json::json!(3));
    }

    #[test]
    fn plot_area_applies_fixed_margins() {
        let plot = PlotArea::inset(Viewport::new(600, 400), Margin::PLOT);
        assert_eq!(plot.left, 60.0);
        assert_eq!(plot.top, 40.0);
        assert_eq!(plot.width, 500.0);
        assert_eq!(plot.height, 300.0);
        assert_eq!(plot.right(), 560.0);
        assert_eq!(plot.bottom(), 340.0);
    }
}
