//! Headless in-memory document used as the default `SurfaceHost`.
//!
//! Records of detached surface nodes are recycled on the next mount, so
//! repeated mount and destroy cycles on one container keep the tree size
//! flat. Detached plain elements are not reclaimed.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;
use tracing::debug;

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{Background, Container, ElementRef, Scene, SurfaceHost, SvgSurface, svg};

#[derive(Debug)]
struct NodeRecord {
    tag: String,
    id: Option<String>,
    classes: SmallVec<[String; 2]>,
    parent: Option<usize>,
    children: Vec<usize>,
    scene: Option<Rc<RefCell<Scene>>>,
    attached: bool,
    generation: u64,
}

impl NodeRecord {
    fn new(tag: impl Into<String>, parent: Option<usize>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: SmallVec::new(),
            parent,
            children: Vec::new(),
            scene: None,
            attached: true,
            generation: 0,
        }
    }
}

/// Tree position of a surface node, stamped with the generation of the
/// record that occupied it at mount time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeSlot {
    pub(crate) index: usize,
    generation: u64,
}

#[derive(Debug)]
pub(crate) struct DocumentTree {
    nodes: Vec<NodeRecord>,
    free_surfaces: Vec<usize>,
}

impl DocumentTree {
    fn live(&self, index: usize) -> Option<&NodeRecord> {
        self.nodes.get(index).filter(|node| node.attached)
    }

    fn push(&mut self, parent: usize, record: NodeRecord) -> usize {
        let index = self.nodes.len();
        self.nodes.push(record);
        self.nodes[parent].children.push(index);
        index
    }

    /// Appends a surface record, reusing a detached surface slot if any.
    fn push_surface(&mut self, parent: usize, mut record: NodeRecord) -> NodeSlot {
        let index = match self.free_surfaces.pop() {
            Some(slot) => {
                record.generation = self.nodes[slot].generation + 1;
                self.nodes[slot] = record;
                self.nodes[parent].children.push(slot);
                slot
            }
            None => self.push(parent, record),
        };
        NodeSlot {
            index,
            generation: self.nodes[index].generation,
        }
    }

    fn detach_subtree(&mut self, index: usize) {
        let mut pending = vec![index];
        while let Some(current) = pending.pop() {
            let node = &mut self.nodes[current];
            if node.attached && node.scene.take().is_some() {
                self.free_surfaces.push(current);
            }
            node.attached = false;
            pending.extend(node.children.drain(..));
        }
    }

    fn clear_children(&mut self, index: usize) {
        let children = std::mem::take(&mut self.nodes[index].children);
        for child in children {
            self.detach_subtree(child);
        }
    }

    /// Detaches the surface node in `slot` from its parent.
    ///
    /// No-op when the slot was already detached or has since been reused.
    pub(crate) fn remove_node(&mut self, slot: NodeSlot) {
        let Some(parent) = self
            .nodes
            .get(slot.index)
            .filter(|node| node.attached && node.generation == slot.generation)
            .and_then(|node| node.parent)
        else {
            return;
        };
        self.nodes[parent].children.retain(|child| *child != slot.index);
        self.detach_subtree(slot.index);
    }

    #[cfg(test)]
    fn record_count(&self) -> usize {
        self.nodes.len()
    }
}

/// In-memory element tree standing in for a browser document.
///
/// Clones share the same tree, so a test can keep a handle while charts
/// mount into it.
#[derive(Debug, Clone)]
pub struct Document {
    tree: Rc<RefCell<DocumentTree>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: Rc::new(RefCell::new(DocumentTree {
                nodes: vec![NodeRecord::new("body", None)],
                free_surfaces: Vec::new(),
            })),
        }
    }

    #[must_use]
    pub fn body(&self) -> ElementRef {
        ElementRef::new(0)
    }

    /// Appends a new `tag` element under `parent`.
    pub fn create_element(&mut self, parent: ElementRef, tag: &str) -> ChartResult<ElementRef> {
        let mut tree = self.tree.borrow_mut();
        if tree.live(parent.index()).is_none() {
            return Err(ChartError::ContainerNotFound(format!(
                "element #{}",
                parent.index()
            )));
        }
        let index = tree.push(parent.index(), NodeRecord::new(tag, Some(parent.index())));
        Ok(ElementRef::new(index))
    }

    /// Appends a `div` with the given id under the body.
    pub fn create_container(&mut self, id: &str) -> ElementRef {
        let mut tree = self.tree.borrow_mut();
        let mut record = NodeRecord::new("div", Some(0));
        record.id = Some(id.to_owned());
        ElementRef::new(tree.push(0, record))
    }

    pub fn set_id(&mut self, element: ElementRef, id: &str) {
        if let Some(node) = self.tree.borrow_mut().nodes.get_mut(element.index()) {
            node.id = Some(id.to_owned());
        }
    }

    pub fn add_class(&mut self, element: ElementRef, class: &str) {
        if let Some(node) = self.tree.borrow_mut().nodes.get_mut(element.index()) {
            node.classes.push(class.to_owned());
        }
    }

    /// First live element matching `#id`, `.class` or a bare id.
    #[must_use]
    pub fn query_selector(&self, selector: &str) -> Option<ElementRef> {
        let tree = self.tree.borrow();
        let matches = |node: &NodeRecord| match selector.strip_prefix('.') {
            Some(class) => node.classes.iter().any(|candidate| candidate == class),
            None => {
                let id = selector.strip_prefix('#').unwrap_or(selector);
                node.id.as_deref() == Some(id)
            }
        };
        tree.nodes
            .iter()
            .position(|node| node.attached && node.scene.is_none() && matches(node))
            .map(ElementRef::new)
    }

    #[must_use]
    pub fn tag_name(&self, element: ElementRef) -> Option<String> {
        self.tree
            .borrow()
            .live(element.index())
            .map(|node| node.tag.clone())
    }

    #[must_use]
    pub fn child_count(&self, element: ElementRef) -> usize {
        self.tree
            .borrow()
            .live(element.index())
            .map_or(0, |node| node.children.len())
    }

    /// Number of rendering surfaces attached directly under `element`.
    #[must_use]
    pub fn surface_count(&self, element: ElementRef) -> usize {
        let tree = self.tree.borrow();
        tree.live(element.index()).map_or(0, |node| {
            node.children
                .iter()
                .filter(|child| tree.nodes[**child].scene.is_some())
                .count()
        })
    }

    /// SVG markup of every surface attached under `element`, in order.
    #[must_use]
    pub fn surface_markup(&self, element: ElementRef) -> Vec<String> {
        let tree = self.tree.borrow();
        tree.live(element.index()).map_or_else(Vec::new, |node| {
            node.children
                .iter()
                .filter_map(|child| tree.nodes[*child].scene.as_ref())
                .map(|scene| svg::write_scene(&scene.borrow()))
                .collect()
        })
    }

    fn resolve_element(&self, element: ElementRef) -> Option<ElementRef> {
        let tree = self.tree.borrow();
        tree.live(element.index())
            .filter(|node| node.scene.is_none())
            .map(|_| element)
    }
}

impl SurfaceHost for Document {
    type Surface = SvgSurface;

    fn resolve(&self, container: &Container) -> Option<ElementRef> {
        match container {
            Container::Element(element) => self.resolve_element(*element),
            Container::Selector(selector) => self.query_selector(selector),
        }
    }

    fn mount_surface(
        &mut self,
        element: ElementRef,
        viewport: Viewport,
        background: Background,
    ) -> ChartResult<SvgSurface> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let scene = Rc::new(RefCell::new(Scene::new(viewport, background)));
        let mut tree = self.tree.borrow_mut();
        if tree.live(element.index()).is_none() {
            return Err(ChartError::ContainerNotFound(format!(
                "element #{}",
                element.index()
            )));
        }
        tree.clear_children(element.index());
        let mut record = NodeRecord::new("svg", Some(element.index()));
        record.scene = Some(Rc::clone(&scene));
        let slot = tree.push_surface(element.index(), record);
        debug!(
            container = element.index(),
            node = slot.index,
            generation = slot.generation,
            width = viewport.width,
            height = viewport.height,
            "attached svg surface"
        );
        Ok(SvgSurface::attached(scene, Rc::downgrade(&self.tree), slot))
    }
}

pub(crate) type TreeHandle = Weak<RefCell<DocumentTree>>;
