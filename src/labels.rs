use crate::accessor::NodeProperty;
use crate::colors::InheritedColor;
use crate::data_types::ComputedNode;
use crate::theme::ChartTheme;
use gpui::Hsla;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub struct ComputedLabel<D> {
    pub label: String,
    pub text_color: Hsla,
    pub node: ComputedNode<D>,
}

pub type LabelFilter<D> = Rc<dyn Fn(&ComputedLabel<D>) -> bool>;

/// Labels for every node at least `skip_radius` wide, in node order, then
/// narrowed by `filter` when one is given.
pub fn compute_labels<D: Clone>(
    nodes: &[ComputedNode<D>],
    label: &NodeProperty<D>,
    skip_radius: f64,
    text_color: &InheritedColor<D>,
    theme: &ChartTheme,
    filter: Option<&LabelFilter<D>>,
) -> Vec<ComputedLabel<D>> {
    nodes
        .iter()
        .filter(|node| node.radius >= skip_radius)
        .map(|node| ComputedLabel {
            label: label.get(node),
            text_color: text_color.resolve(node, theme),
            node: node.clone(),
        })
        .filter(|computed| filter.map_or(true, |f| f(computed)))
        .collect()
}
