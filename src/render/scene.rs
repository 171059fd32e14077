use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, Primitive};

/// Drawing layers of a surface, in paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceLayer {
    /// Paint servers (gradients); never drawn directly.
    Defs,
    /// Chart content; receives the zoom/pan transform.
    Plot,
    /// Fixed chrome drawn above the plot (tooltip, panels, buttons).
    Overlay,
}

impl SurfaceLayer {
    pub const ALL: [Self; 3] = [Self::Defs, Self::Plot, Self::Overlay];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Defs => 0,
            Self::Plot => 1,
            Self::Overlay => 2,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Defs => "defs",
            Self::Plot => "plot",
            Self::Overlay => "overlay",
        }
    }
}

/// Surface-local identifier of one appended element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(u64);

impl ElementId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of one component instance.
///
/// Hit targets carry the token of the component that drew them so pointer
/// dispatch never reaches a foreign instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceToken(u64);

impl InstanceToken {
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// What a hit-testable element stands for inside its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitRole {
    /// Index into the owner's stored data.
    Datum(usize),
    /// Index into the flow diagram's node list.
    Node(usize),
    /// Index into the flow diagram's link list.
    Link(usize),
    /// Index of an overlay control (e.g. a filter button).
    Control(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HitTarget {
    pub owner: InstanceToken,
    pub role: HitRole,
}

impl HitTarget {
    #[must_use]
    pub const fn new(owner: InstanceToken, role: HitRole) -> Self {
        Self { owner, role }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceElement {
    pub primitive: Primitive,
    pub class: Option<String>,
    pub hit_target: Option<HitTarget>,
}

impl SurfaceElement {
    #[must_use]
    pub fn new(primitive: impl Into<Primitive>) -> Self {
        Self {
            primitive: primitive.into(),
            class: None,
            hit_target: None,
        }
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    #[must_use]
    pub fn with_hit_target(mut self, target: HitTarget) -> Self {
        self.hit_target = Some(target);
        self
    }
}

/// Uniform scale followed by translation: `p' = p × scale + translate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 1.0,
    };

    #[must_use]
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    #[must_use]
    pub fn apply(self, x: f64, y: f64) -> (f64, f64) {
        (
            x * self.scale + self.translate_x,
            y * self.scale + self.translate_y,
        )
    }

    #[must_use]
    pub fn invert(self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.translate_x) / self.scale,
            (y - self.translate_y) / self.scale,
        )
    }

    /// SVG `transform` attribute value.
    #[must_use]
    pub fn to_svg(self) -> String {
        format!(
            "translate({},{}) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Canvas fill painted beneath every layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Background {
    Solid { color: Color },
    /// CSS-style angle: `0` points up, `90` points right.
    LinearGradient { angle_deg: f64, from: Color, to: Color },
}

impl Background {
    #[must_use]
    pub const fn solid(color: Color) -> Self {
        Self::Solid { color }
    }

    /// Gradient endpoints in bounding-box fractions for the CSS angle.
    #[must_use]
    pub fn gradient_vector(angle_deg: f64) -> ((f64, f64), (f64, f64)) {
        let radians = angle_deg.to_radians();
        let (dx, dy) = (radians.sin(), -radians.cos());
        let span = dx.abs().max(dy.abs());
        let snap = |value: f64| (value * 1e6).round() / 1e6;
        let (dx, dy) = (snap(dx / span), snap(dy / span));
        (
            ((1.0 - dx) / 2.0, (1.0 - dy) / 2.0),
            ((1.0 + dx) / 2.0, (1.0 + dy) / 2.0),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneLayer {
    pub transform: Transform,
    pub elements: Vec<(ElementId, SurfaceElement)>,
}

/// Backend-agnostic content of one rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub viewport: Viewport,
    pub background: Background,
    layers: [SceneLayer; 3],
    next_id: u64,
}

impl Scene {
    #[must_use]
    pub fn new(viewport: Viewport, background: Background) -> Self {
        Self {
            viewport,
            background,
            layers: Default::default(),
            next_id: 1,
        }
    }

    #[must_use]
    pub fn layer(&self, layer: SurfaceLayer) -> &SceneLayer {
        &self.layers[layer.index()]
    }

    /// Removes every element and restarts id allocation; transforms survive.
    pub fn clear(&mut self) {
        for layer in &mut self.layers {
            layer.elements.clear();
        }
        self.next_id = 1;
    }

    pub fn append(&mut self, layer: SurfaceLayer, element: SurfaceElement) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.layers[layer.index()].elements.push((id, element));
        id
    }

    pub fn replace(&mut self, id: ElementId, element: SurfaceElement) -> ChartResult<()> {
        let slot = self
            .layers
            .iter_mut()
            .flat_map(|layer| layer.elements.iter_mut())
            .find(|(candidate, _)| *candidate == id)
            .ok_or(ChartError::UnknownElement(id.raw()))?;
        slot.1 = element;
        Ok(())
    }

    pub fn remove(&mut self, id: ElementId) -> ChartResult<SurfaceElement> {
        for layer in &mut self.layers {
            if let Some(position) = layer.elements.iter().position(|(candidate, _)| *candidate == id) {
                return Ok(layer.elements.remove(position).1);
            }
        }
        Err(ChartError::UnknownElement(id.raw()))
    }

    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&SurfaceElement> {
        self.layers
            .iter()
            .flat_map(|layer| layer.elements.iter())
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, element)| element)
    }

    pub fn set_transform(&mut self, layer: SurfaceLayer, transform: Transform) {
        self.layers[layer.index()].transform = transform;
    }

    /// Topmost hit-testable element under canvas point `(x, y)`.
    ///
    /// Overlay wins over plot; later elements win over earlier ones. Each
    /// layer's transform is inverted before testing its primitives.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<(ElementId, HitTarget)> {
        [SurfaceLayer::Overlay, SurfaceLayer::Plot]
            .into_iter()
            .find_map(|layer| {
                let content = self.layer(layer);
                let (local_x, local_y) = content.transform.invert(x, y);
                content.elements.iter().rev().find_map(|(id, element)| {
                    let target = element.hit_target?;
                    element
                        .primitive
                        .contains(local_x, local_y)
                        .then_some((*id, target))
                })
            })
    }

    #[must_use]
    pub fn element_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.elements.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.element_count() == 0
    }
}
