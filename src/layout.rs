//! Circle packing layout: data tree in, flat list of computed nodes out.

use crate::accessor::{NodeProperty, PropertyAccessor};
use crate::colors::{InheritedColor, OrdinalColorScale, OrdinalColors};
use crate::data_types::{ComputedNode, Datum, DatumRef};
use crate::hierarchy::Hierarchy;
use crate::pack;
use crate::theme::ChartTheme;
use crate::utils::value_formatter::ValueFormat;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Inputs of [`compute_nodes`].
pub struct LayoutParams<'a, D> {
    pub id: &'a PropertyAccessor<D, String>,
    pub value: &'a PropertyAccessor<D, f64>,
    pub value_format: Option<&'a ValueFormat>,
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub leaves_only: bool,
    pub colors: &'a OrdinalColors,
    pub color_by: &'a NodeProperty<D>,
    pub inherit_color_from_parent: bool,
    pub child_color: &'a InheritedColor<D>,
    pub theme: &'a ChartTheme,
}

/// Computes the packed circles for `data`.
///
/// `data` is copied once; the returned nodes reference that copy, never the
/// caller's tree. Nodes come out sorted by depth so parents always precede
/// their children.
pub fn compute_nodes<D: Datum>(data: &D, params: &LayoutParams<'_, D>) -> Vec<ComputedNode<D>> {
    let root = Arc::new(data.clone());

    let mut hierarchy = Hierarchy::build(root.as_ref(), params.value);
    pack::pack(&mut hierarchy, params.width, params.height, params.padding);

    let mut selected = if params.leaves_only {
        hierarchy.leaves()
    } else {
        hierarchy.descendants()
    };
    selected.sort_by_key(|&index| hierarchy.nodes[index].depth);

    let total = hierarchy.total();
    let color_scale = OrdinalColorScale::new(params.colors);

    let ids: Vec<String> = hierarchy
        .nodes
        .iter()
        .map(|node| params.id.get(DatumRef::new(root.clone(), node.indices.clone()).get()))
        .collect();

    let mut emitted: HashMap<&str, usize> = HashMap::with_capacity(selected.len());
    let mut nodes: Vec<ComputedNode<D>> = Vec::with_capacity(selected.len());

    for index in selected {
        let h = &hierarchy.nodes[index];
        let percentage = if total != 0.0 { 100.0 * h.value / total } else { 0.0 };
        let formatted_value = match params.value_format {
            Some(format) => format.format(h.value),
            None => format!("{percentage:.2}%"),
        };

        let mut node = ComputedNode {
            id: ids[index].clone(),
            path: hierarchy
                .ancestry(index)
                .into_iter()
                .map(|i| ids[i].clone())
                .collect(),
            value: h.value,
            percentage,
            formatted_value,
            x: h.x,
            y: h.y,
            radius: h.r,
            color: gpui::transparent_black(),
            depth: h.depth,
            height: h.height,
            data: DatumRef::new(root.clone(), h.indices.clone()),
        };

        let parent = h
            .parent
            .and_then(|p| emitted.get(ids[p].as_str()))
            .map(|&position| &nodes[position]);

        node.color = match parent {
            Some(parent) if params.inherit_color_from_parent && node.depth > 1 => {
                params.child_color.resolve(parent, params.theme)
            }
            _ => color_scale.color(&params.color_by.get(&node)),
        };

        emitted.entry(ids[index].as_str()).or_insert(nodes.len());
        nodes.push(node);
    }

    debug!(
        nodes = nodes.len(),
        total,
        width = params.width,
        height = params.height,
        "computed circle packing layout"
    );

    nodes
}
