//! Zoom transform recentering the chart on a focused node.

use crate::data_types::ComputedNode;
use glam::DVec2;
use std::sync::Arc;
use tracing::debug;

/// `screen = layout * ratio + offset`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomTransform {
    pub ratio: f64,
    pub offset: DVec2,
}

impl ZoomTransform {
    /// Transform that centers `node` and scales it to fill the shorter side
    /// of the viewport. `None` when the node has no area.
    pub fn focus<D>(node: &ComputedNode<D>, width: f64, height: f64) -> Option<Self> {
        if !(node.radius > 0.0) {
            return None;
        }
        let ratio = width.min(height) / (node.radius * 2.0);
        let offset = DVec2::new(width / 2.0, height / 2.0) - node.center() * ratio;
        Some(Self { ratio, offset })
    }

    pub fn layout_to_screen(&self, point: DVec2) -> DVec2 {
        point * self.ratio + self.offset
    }

    pub fn screen_to_layout(&self, point: DVec2) -> DVec2 {
        (point - self.offset) / self.ratio
    }

    pub fn apply<D: Clone>(&self, node: &ComputedNode<D>) -> ComputedNode<D> {
        let center = self.layout_to_screen(node.center());
        ComputedNode {
            x: center.x,
            y: center.y,
            radius: node.radius * self.ratio,
            ..node.clone()
        }
    }
}

/// Returns `nodes` remapped around `zoomed_id`.
///
/// Without a focus id, or when no node carries it, the very same list is
/// returned.
pub fn zoom_nodes<D: Clone>(
    nodes: &Arc<[ComputedNode<D>]>,
    zoomed_id: Option<&str>,
    width: f64,
    height: f64,
) -> Arc<[ComputedNode<D>]> {
    let Some(zoomed_id) = zoomed_id else {
        return nodes.clone();
    };

    let Some(transform) = nodes
        .iter()
        .find(|node| node.id == zoomed_id)
        .and_then(|node| ZoomTransform::focus(node, width, height))
    else {
        debug!(zoomed_id, "zoom target not found, keeping layout");
        return nodes.clone();
    };

    nodes.iter().map(|node| transform.apply(node)).collect()
}
