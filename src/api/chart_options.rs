use std::fmt;
use std::rc::Rc;

use crate::core::Viewport;
use crate::style::{PaletteSource, ThemeSource};

use super::ChartKind;

pub const DEFAULT_WIDTH: u32 = 600;
pub const DEFAULT_HEIGHT: u32 = 400;

/// Callback invoked synchronously with the clicked datum.
pub struct PointClickHandler<D>(Rc<dyn Fn(&D)>);

impl<D> PointClickHandler<D> {
    pub fn new(handler: impl Fn(&D) + 'static) -> Self {
        Self(Rc::new(handler))
    }

    pub fn call(&self, datum: &D) {
        (self.0)(datum);
    }
}

impl<D> Clone for PointClickHandler<D> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<D> fmt::Debug for PointClickHandler<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PointClickHandler(..)")
    }
}

/// Options shared by every chart kind plus the kind's own extension.
pub struct ChartOptions<K: ChartKind> {
    pub width: u32,
    pub height: u32,
    pub title: Option<String>,
    pub theme: ThemeSource,
    pub colors: PaletteSource,
    /// Stored for hosts; rendering is never animated.
    pub animate: bool,
    /// Stored for hosts; the surface keeps its configured size.
    pub responsive: bool,
    pub on_point_click: Option<PointClickHandler<K::Datum>>,
    pub kind: K::Options,
}

impl<K: ChartKind> ChartOptions<K> {
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: impl Into<ThemeSource>) -> Self {
        self.theme = theme.into();
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: impl Into<PaletteSource>) -> Self {
        self.colors = colors.into();
        self
    }

    #[must_use]
    pub fn with_animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    #[must_use]
    pub fn with_responsive(mut self, responsive: bool) -> Self {
        self.responsive = responsive;
        self
    }

    #[must_use]
    pub fn with_point_click(mut self, handler: impl Fn(&K::Datum) + 'static) -> Self {
        self.on_point_click = Some(PointClickHandler::new(handler));
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: K::Options) -> Self {
        self.kind = kind;
        self
    }

    /// Applies `patch` key by key; unset keys keep their current value.
    pub(crate) fn merge(&mut self, patch: OptionsPatch<K>) {
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(colors) = patch.colors {
            self.colors = colors;
        }
        if let Some(animate) = patch.animate {
            self.animate = animate;
        }
        if let Some(responsive) = patch.responsive {
            self.responsive = responsive;
        }
        if let Some(handler) = patch.on_point_click {
            self.on_point_click = handler;
        }
        K::merge_options(&mut self.kind, patch.kind);
    }
}

impl<K: ChartKind> Default for ChartOptions<K> {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            title: None,
            theme: ThemeSource::default(),
            colors: PaletteSource::default(),
            animate: true,
            responsive: true,
            on_point_click: None,
            kind: K::Options::default(),
        }
    }
}

impl<K: ChartKind> Clone for ChartOptions<K> {
    fn clone(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            title: self.title.clone(),
            theme: self.theme.clone(),
            colors: self.colors.clone(),
            animate: self.animate,
            responsive: self.responsive,
            on_point_click: self.on_point_click.clone(),
            kind: self.kind.clone(),
        }
    }
}

impl<K: ChartKind> fmt::Debug for ChartOptions<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartOptions")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("title", &self.title)
            .field("theme", &self.theme)
            .field("colors", &self.colors)
            .field("animate", &self.animate)
            .field("responsive", &self.responsive)
            .field("on_point_click", &self.on_point_click)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Partial options update; every `None` leaves the current value untouched.
///
/// `title` and `on_point_click` are doubly optional so a patch can clear them.
pub struct OptionsPatch<K: ChartKind> {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub title: Option<Option<String>>,
    pub theme: Option<ThemeSource>,
    pub colors: Option<PaletteSource>,
    pub animate: Option<bool>,
    pub responsive: Option<bool>,
    pub on_point_click: Option<Option<PointClickHandler<K::Datum>>>,
    pub kind: K::OptionsPatch,
}

impl<K: ChartKind> OptionsPatch<K> {
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = Some(title);
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: impl Into<ThemeSource>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: impl Into<PaletteSource>) -> Self {
        self.colors = Some(colors.into());
        self
    }

    #[must_use]
    pub fn with_point_click(mut self, handler: impl Fn(&K::Datum) + 'static) -> Self {
        self.on_point_click = Some(Some(PointClickHandler::new(handler)));
        self
    }

    #[must_use]
    pub fn without_point_click(mut self) -> Self {
        self.on_point_click = Some(None);
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: K::OptionsPatch) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub(crate) fn touches_surface(&self) -> bool {
        self.width.is_some() || self.height.is_some() || self.theme.is_some()
    }
}

impl<K: ChartKind> Default for OptionsPatch<K> {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            title: None,
            theme: None,
            colors: None,
            animate: None,
            responsive: None,
            on_point_click: None,
            kind: K::OptionsPatch::default(),
        }
    }
}

impl<K: ChartKind> fmt::Debug for OptionsPatch<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionsPatch")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("title", &self.title)
            .field("theme", &self.theme)
            .field("colors", &self.colors)
            .field("animate", &self.animate)
            .field("responsive", &self.responsive)
            .field("on_point_click", &self.on_point_click)
            .field("kind", &self.kind)
            .finish()
    }
}
