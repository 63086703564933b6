//! Weighted hierarchy built over a datum tree.

use crate::accessor::PropertyAccessor;
use crate::data_types::Datum;
use std::collections::VecDeque;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub(crate) struct HierarchyNode {
    /// Child indices from the root datum down to this node's datum.
    pub indices: Arc<[usize]>,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub depth: usize,
    pub height: usize,
    /// Own value plus the sum of all descendants' values.
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

/// Arena of nodes stored breadth-first; index 0 is the root.
#[derive(Clone, Debug, Default)]
pub(crate) struct Hierarchy {
    pub nodes: Vec<HierarchyNode>,
}

impl Hierarchy {
    pub fn build<D: Datum>(root: &D, value: &PropertyAccessor<D, f64>) -> Self {
        let mut nodes: Vec<HierarchyNode> = Vec::new();
        let mut queue: VecDeque<(&D, Vec<usize>, Option<usize>, usize)> = VecDeque::new();
        queue.push_back((root, Vec::new(), None, 0));

        while let Some((datum, indices, parent, depth)) = queue.pop_front() {
            let index = nodes.len();
            if let Some(parent) = parent {
                nodes[parent].children.push(index);
            }
            for (i, child) in datum.children().iter().enumerate() {
                let mut child_indices = indices.clone();
                child_indices.push(i);
                queue.push_back((child, child_indices, Some(index), depth + 1));
            }
            nodes.push(HierarchyNode {
                indices: indices.into(),
                parent,
                children: Vec::new(),
                depth,
                height: 0,
                value: value.get(datum),
                x: 0.0,
                y: 0.0,
                r: 0.0,
            });
        }

        let mut hierarchy = Self { nodes };
        hierarchy.sum();
        hierarchy
    }

    /// Accumulates values and heights bottom-up.
    fn sum(&mut self) {
        for index in (0..self.nodes.len()).rev() {
            let (total, height) = self.nodes[index]
                .children
                .iter()
                .fold((0.0, 0), |(total, height), &c| {
                    let child = &self.nodes[c];
                    (total + child.value, height.max(child.height + 1))
                });
            let node = &mut self.nodes[index];
            node.value += total;
            node.height = height;
        }
    }

    pub fn total(&self) -> f64 {
        self.nodes.first().map(|root| root.value).unwrap_or(0.0)
    }

    /// All nodes, breadth-first.
    pub fn descendants(&self) -> Vec<usize> {
        (0..self.nodes.len()).collect()
    }

    /// Leaf nodes in pre-order.
    pub fn leaves(&self) -> Vec<usize> {
        let mut leaves = Vec::new();
        if self.nodes.is_empty() {
            return leaves;
        }
        let mut stack = vec![0usize];
        while let Some(index) = stack.pop() {
            let children = &self.nodes[index].children;
            if children.is_empty() {
                leaves.push(index);
            } else {
                stack.extend(children.iter().rev());
            }
        }
        leaves
    }

    /// Indices from the root down to `index`, root first.
    pub fn ancestry(&self, index: usize) -> Vec<usize> {
        let mut chain = vec![index];
        let mut current = index;
        while let Some(parent) = self.nodes[current].parent {
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        chain
    }
}
