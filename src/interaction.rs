//! Pointer hit testing and node mouse handlers.

use crate::data_types::{ComputedNode, Margin};
use crate::utils::PixelsExt;
use glam::DVec2;
use gpui::{Bounds, MouseButton, Pixels, Point};
use std::rc::Rc;
use std::sync::Arc;
use tracing::trace;

/// Pointer position relative to the drawing surface origin.
pub fn relative_cursor(bounds: Bounds<Pixels>, position: Point<Pixels>) -> DVec2 {
    DVec2::new(
        (position.x - bounds.origin.x).as_f32() as f64,
        (position.y - bounds.origin.y).as_f32() as f64,
    )
}

/// Finds the circle under the pointer, preferring the innermost one.
pub struct MouseCircleDetector<D> {
    nodes: Arc<[ComputedNode<D>]>,
    /// Node indices by ascending height, leaves first.
    order: Vec<usize>,
    margin: Margin,
}

impl<D> MouseCircleDetector<D> {
    pub fn new(nodes: Arc<[ComputedNode<D>]>, margin: Margin) -> Self {
        let mut order: Vec<usize> = (0..nodes.len()).collect();
        order.sort_by_key(|&i| nodes[i].height);
        Self {
            nodes,
            order,
            margin,
        }
    }

    /// `point` is relative to the drawing surface; the margin is removed here.
    pub fn detect(&self, point: DVec2) -> Option<&ComputedNode<D>> {
        self.find(point - DVec2::new(self.margin.left, self.margin.top))
    }

    /// `point` is already in chart coordinates.
    pub fn find(&self, point: DVec2) -> Option<&ComputedNode<D>> {
        let hit = self
            .order
            .iter()
            .map(|&i| &self.nodes[i])
            .find(|node| node.contains(point));
        trace!(x = point.x, y = point.y, hit = hit.map(|n| n.id.as_str()), "circle hit test");
        hit
    }

    pub fn nodes(&self) -> &Arc<[ComputedNode<D>]> {
        &self.nodes
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodePointerEvent {
    /// Window coordinates.
    pub position: Point<Pixels>,
    /// Chart coordinates, margins removed.
    pub local: DVec2,
    pub button: Option<MouseButton>,
}

pub type NodeMouseHandler<D> = Rc<dyn Fn(&ComputedNode<D>, &NodePointerEvent)>;
pub type BoundMouseHandler = Box<dyn Fn(&NodePointerEvent)>;

pub struct NodeMouseHandlers<D> {
    pub on_mouse_enter: Option<NodeMouseHandler<D>>,
    pub on_mouse_move: Option<NodeMouseHandler<D>>,
    pub on_mouse_leave: Option<NodeMouseHandler<D>>,
    pub on_click: Option<NodeMouseHandler<D>>,
}

impl<D> Default for NodeMouseHandlers<D> {
    fn default() -> Self {
        Self {
            on_mouse_enter: None,
            on_mouse_move: None,
            on_mouse_leave: None,
            on_click: None,
        }
    }
}

impl<D> Clone for NodeMouseHandlers<D> {
    fn clone(&self) -> Self {
        Self {
            on_mouse_enter: self.on_mouse_enter.clone(),
            on_mouse_move: self.on_mouse_move.clone(),
            on_mouse_leave: self.on_mouse_leave.clone(),
            on_click: self.on_click.clone(),
        }
    }
}

/// Handlers already bound to one node. Unset handlers stay `None`.
pub struct BoundNodeHandlers {
    pub on_mouse_enter: Option<BoundMouseHandler>,
    pub on_mouse_move: Option<BoundMouseHandler>,
    pub on_mouse_leave: Option<BoundMouseHandler>,
    pub on_click: Option<BoundMouseHandler>,
}

impl<D: Clone + 'static> NodeMouseHandlers<D> {
    pub fn bind(&self, node: &ComputedNode<D>) -> BoundNodeHandlers {
        let node = Rc::new(node.clone());
        let bind = |handler: &Option<NodeMouseHandler<D>>| -> Option<BoundMouseHandler> {
            handler.clone().map(|handler| {
                let node = node.clone();
                Box::new(move |event: &NodePointerEvent| handler(&node, event)) as BoundMouseHandler
            })
        };
        BoundNodeHandlers {
            on_mouse_enter: bind(&self.on_mouse_enter),
            on_mouse_move: bind(&self.on_mouse_move),
            on_mouse_leave: bind(&self.on_mouse_leave),
            on_click: bind(&self.on_click),
        }
    }
}

impl<D> NodeMouseHandlers<D> {
    pub fn dispatch(&self, events: &[HoverEvent<D>], pointer: &NodePointerEvent) {
        for event in events {
            let (handler, node) = match event {
                HoverEvent::Enter(node) => (&self.on_mouse_enter, node),
                HoverEvent::Move(node) => (&self.on_mouse_move, node),
                HoverEvent::Leave(node) => (&self.on_mouse_leave, node),
            };
            if let Some(handler) = handler {
                handler(node, pointer);
            }
        }
    }

    pub fn click(&self, node: &ComputedNode<D>, pointer: &NodePointerEvent) {
        if let Some(handler) = &self.on_click {
            handler(node, pointer);
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum HoverEvent<D> {
    Enter(ComputedNode<D>),
    Move(ComputedNode<D>),
    Leave(ComputedNode<D>),
}

/// Turns successive hit results into enter / move / leave transitions.
#[derive(Debug)]
pub struct HoverTracker<D> {
    current: Option<ComputedNode<D>>,
}

impl<D> Default for HoverTracker<D> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<D: Clone> HoverTracker<D> {
    pub fn current(&self) -> Option<&ComputedNode<D>> {
        self.current.as_ref()
    }

    pub fn update(&mut self, hit: Option<&ComputedNode<D>>) -> Vec<HoverEvent<D>> {
        let mut events = Vec::new();
        match (self.current.take(), hit) {
            (Some(previous), Some(node)) if previous.path == node.path => {
                events.push(HoverEvent::Move(node.clone()));
                self.current = Some(node.clone());
            }
            (previous, hit) => {
                if let Some(previous) = previous {
                    events.push(HoverEvent::Leave(previous));
                }
                if let Some(node) = hit {
                    events.push(HoverEvent::Enter(node.clone()));
                    self.current = Some(node.clone());
                }
            }
        }
        events
    }

    /// Pointer left the surface.
    pub fn clear(&mut self) -> Vec<HoverEvent<D>> {
        self.update(None)
    }
}
