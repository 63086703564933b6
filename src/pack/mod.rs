//! Circle packing of a weighted hierarchy.
//!
//! Leaves get a radius proportional to the square root of their value, each
//! group of siblings is packed with the front-chain algorithm and enclosed in
//! its parent, and the root is finally scaled to fit the viewport.

mod enclose;
mod siblings;

use crate::hierarchy::Hierarchy;
use siblings::pack_siblings;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Circle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

/// Linear congruential generator used to shuffle circles before enclosing
/// them. Seeded identically for every layout so results are reproducible.
#[derive(Clone, Debug)]
pub(crate) struct Lcg {
    state: u64,
}

impl Default for Lcg {
    fn default() -> Self {
        Self { state: 1 }
    }
}

impl Lcg {
    const A: u64 = 1_664_525;
    const C: u64 = 1_013_904_223;
    const M: u64 = 4_294_967_296;

    pub fn next_f64(&mut self) -> f64 {
        self.state = (Self::A * self.state + Self::C) % Self::M;
        self.state as f64 / Self::M as f64
    }
}

/// Lays out `hierarchy` in a `width` × `height` viewport.
///
/// Positions are absolute; the root sits at the viewport center.
pub(crate) fn pack(hierarchy: &mut Hierarchy, width: f64, height: f64, padding: f64) {
    if hierarchy.nodes.is_empty() {
        return;
    }

    let size = width.min(height);
    let mut random = Lcg::default();

    for node in hierarchy.nodes.iter_mut() {
        node.x = 0.0;
        node.y = 0.0;
        node.r = if node.children.is_empty() {
            let r = node.value.sqrt();
            if r.is_nan() {
                0.0
            } else {
                r.max(0.0)
            }
        } else {
            0.0
        };
    }

    pack_children(hierarchy, 0.0, &mut random);
    let k = if size > 0.0 { hierarchy.nodes[0].r / size } else { 0.0 };
    pack_children(hierarchy, padding * k, &mut random);

    let root_r = hierarchy.nodes[0].r;
    if !(root_r > 0.0) || !root_r.is_finite() {
        for node in hierarchy.nodes.iter_mut() {
            node.x = width / 2.0;
            node.y = height / 2.0;
            node.r = 0.0;
        }
        return;
    }

    let scale = size / (2.0 * root_r);
    for index in 0..hierarchy.nodes.len() {
        let (px, py) = match hierarchy.nodes[index].parent {
            Some(parent) => (hierarchy.nodes[parent].x, hierarchy.nodes[parent].y),
            None => (width / 2.0, height / 2.0),
        };
        let node = &mut hierarchy.nodes[index];
        node.r *= scale;
        if node.parent.is_some() {
            node.x = px + scale * node.x;
            node.y = py + scale * node.y;
        } else {
            node.x = px;
            node.y = py;
        }
    }
}

/// Packs every group of siblings bottom-up, growing each circle by `padding`
/// while packing so siblings keep that distance from each other.
fn pack_children(hierarchy: &mut Hierarchy, padding: f64, random: &mut Lcg) {
    // Nodes are stored breadth-first, so reverse order visits children first.
    for index in (0..hierarchy.nodes.len()).rev() {
        if hierarchy.nodes[index].children.is_empty() {
            continue;
        }
        let children = hierarchy.nodes[index].children.clone();
        let mut circles: Vec<Circle> = children
            .iter()
            .map(|&c| {
                let node = &hierarchy.nodes[c];
                Circle {
                    x: node.x,
                    y: node.y,
                    r: node.r + padding,
                }
            })
            .collect();

        let enclosing = pack_siblings(&mut circles, random);

        for (&c, circle) in children.iter().zip(&circles) {
            let node = &mut hierarchy.nodes[c];
            node.x = circle.x;
            node.y = circle.y;
            node.r = circle.r - padding;
        }
        hierarchy.nodes[index].r = enclosing + padding;
    }
}
