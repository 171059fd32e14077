use std::fmt;

use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::{Background, RenderSurface};

/// Opaque handle to an element owned by a `SurfaceHost`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementRef(usize);

impl ElementRef {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Where a component should attach its surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Container {
    Element(ElementRef),
    /// `#id`, `.class` or a bare id.
    Selector(String),
}

impl From<ElementRef> for Container {
    fn from(element: ElementRef) -> Self {
        Self::Element(element)
    }
}

impl From<&str> for Container {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_owned())
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(element) => write!(f, "element #{}", element.index()),
            Self::Selector(selector) => f.write_str(selector),
        }
    }
}

/// Host document abstraction: container lookup and surface attachment.
pub trait SurfaceHost {
    type Surface: RenderSurface;

    /// Resolves a container to a live element, if any.
    fn resolve(&self, container: &Container) -> Option<ElementRef>;

    /// Removes every child of `element` and attaches a fresh surface to it.
    fn mount_surface(
        &mut self,
        element: ElementRef,
        viewport: Viewport,
        background: Background,
    ) -> ChartResult<Self::Surface>;
}
