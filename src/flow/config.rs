use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Margin, Viewport};
use crate::flow::FlowStatistics;
use crate::flow::width::FlowWidthSettings;
use crate::render::{Background, Color};

/// Time-window label such as `1W`, `3M` or `ALL`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeFilter(String);

impl TimeFilter {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.0
    }

    /// Window length encoded by `<count><D|W|M|Y>`; months are 30 days and
    /// years 365. `ALL` and unrecognized labels have no lookback.
    #[must_use]
    pub fn lookback(&self) -> Option<Duration> {
        let label = self.0.trim();
        let unit = label.chars().last()?;
        let count: i64 = label.get(..label.len() - unit.len_utf8())?.parse().ok()?;
        let days = match unit.to_ascii_uppercase() {
            'D' => 1,
            'W' => 7,
            'M' => 30,
            'Y' => 365,
            _ => return None,
        };
        Duration::try_days(count.checked_mul(days)?)
    }

    /// Start of the window ending at `now`; `None` for an unbounded filter.
    #[must_use]
    pub fn window_start(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        now.checked_sub_signed(self.lookback()?)
    }
}

impl From<&str> for TimeFilter {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Callback invoked with the newly selected time filter.
#[derive(Clone)]
pub struct FilterChangeHandler(Rc<dyn Fn(&TimeFilter)>);

impl FilterChangeHandler {
    pub fn new(handler: impl Fn(&TimeFilter) + 'static) -> Self {
        Self(Rc::new(handler))
    }

    pub fn call(&self, filter: &TimeFilter) {
        (self.0)(filter);
    }
}

impl fmt::Debug for FilterChangeHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FilterChangeHandler(..)")
    }
}

#[derive(Debug, Clone)]
pub struct FlowDiagramConfig {
    pub width: u32,
    pub height: u32,
    pub margin: Margin,
    pub background: Background,

    pub show_time_filter: bool,
    pub time_filters: Vec<TimeFilter>,
    pub active_filter: TimeFilter,
    pub on_filter_change: Option<FilterChangeHandler>,
    pub filter_button_color: Color,
    pub filter_button_inactive: Color,

    pub use_custom_flow_width: bool,
    pub custom_flow_width: f64,
    pub min_flow_width: f64,
    pub max_flow_width: f64,
    pub flow_width_multiplier: f64,

    pub show_statistics: bool,
    pub statistics: FlowStatistics,
}

impl Default for FlowDiagramConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            margin: Margin::new(80.0, 50.0, 50.0, 50.0),
            background: Background::LinearGradient {
                angle_deg: 135.0,
                from: Color::rgb8(0x0f, 0x0f, 0x23),
                to: Color::rgb8(0x1a, 0x1a, 0x3e),
            },
            show_time_filter: true,
            time_filters: ["1W", "1M", "3M", "1Y", "ALL"]
                .into_iter()
                .map(TimeFilter::from)
                .collect(),
            active_filter: TimeFilter::from("3M"),
            on_filter_change: None,
            filter_button_color: Color::rgb8(0x63, 0x66, 0xf1),
            filter_button_inactive: Color::rgba8(0xff, 0xff, 0xff, 0.1),
            use_custom_flow_width: false,
            custom_flow_width: 10.0,
            min_flow_width: 4.0,
            max_flow_width: 20.0,
            flow_width_multiplier: 1.0,
            show_statistics: true,
            statistics: FlowStatistics::default(),
        }
    }
}

impl FlowDiagramConfig {
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    #[must_use]
    pub fn flow_width_settings(&self) -> FlowWidthSettings {
        FlowWidthSettings {
            use_custom: self.use_custom_flow_width,
            custom: self.custom_flow_width,
            min: self.min_flow_width,
            max: self.max_flow_width,
            multiplier: self.flow_width_multiplier,
        }
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    #[must_use]
    pub fn with_time_filter(mut self, show: bool) -> Self {
        self.show_time_filter = show;
        self
    }

    #[must_use]
    pub fn with_active_filter(mut self, filter: impl Into<TimeFilter>) -> Self {
        self.active_filter = filter.into();
        self
    }

    #[must_use]
    pub fn with_filter_change(mut self, handler: impl Fn(&TimeFilter) + 'static) -> Self {
        self.on_filter_change = Some(FilterChangeHandler::new(handler));
        self
    }

    #[must_use]
    pub fn with_custom_flow_width(mut self, width: f64) -> Self {
        self.use_custom_flow_width = true;
        self.custom_flow_width = width;
        self
    }

    #[must_use]
    pub fn with_flow_width_range(mut self, min: f64, max: f64) -> Self {
        self.min_flow_width = min;
        self.max_flow_width = max;
        self
    }

    #[must_use]
    pub fn with_flow_width_multiplier(mut self, multiplier: f64) -> Self {
        self.flow_width_multiplier = multiplier;
        self
    }

    #[must_use]
    pub fn with_statistics(mut self, statistics: Option<FlowStatistics>) -> Self {
        self.show_statistics = statistics.is_some();
        if let Some(statistics) = statistics {
            self.statistics = statistics;
        }
        self
    }
}
