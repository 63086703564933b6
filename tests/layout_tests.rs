use gpui_circle_packing::colors::{ColorScheme, InheritedColor, OrdinalColors};
use gpui_circle_packing::{
    compute_nodes, ChartTheme, ColorModifier, ComputedNode, LayoutParams, NodeField, NodeProperty,
    PropertyAccessor, TreeDatum, ValueFormat,
};
use serde_json::json;

struct Inputs<D> {
    id: PropertyAccessor<D, String>,
    value: PropertyAccessor<D, f64>,
    colors: OrdinalColors,
    color_by: NodeProperty<D>,
    child_color: InheritedColor<D>,
    theme: ChartTheme,
}

impl<D> Default for Inputs<D> {
    fn default() -> Self {
        Self {
            id: PropertyAccessor::field("id"),
            value: PropertyAccessor::field("value"),
            colors: OrdinalColors::Scheme(ColorScheme::Category10),
            color_by: NodeProperty::Field(NodeField::Id),
            child_color: InheritedColor::FromColor(vec![ColorModifier::Darker(1.0)]),
            theme: ChartTheme::default(),
        }
    }
}

impl<D> Inputs<D> {
    fn params(&self, size: f64, padding: f64, leaves_only: bool) -> LayoutParams<'_, D> {
        LayoutParams {
            id: &self.id,
            value: &self.value,
            value_format: None,
            width: size,
            height: size,
            padding,
            leaves_only,
            colors: &self.colors,
            color_by: &self.color_by,
            inherit_color_from_parent: false,
            child_color: &self.child_color,
            theme: &self.theme,
        }
    }
}

fn sample_tree() -> TreeDatum {
    TreeDatum::node(
        "root",
        vec![
            TreeDatum::node(
                "group",
                vec![TreeDatum::leaf("g1", 5.0), TreeDatum::leaf("g2", 15.0)],
            ),
            TreeDatum::leaf("solo", 20.0),
        ],
    )
}

fn find<'a, D>(nodes: &'a [ComputedNode<D>], id: &str) -> &'a ComputedNode<D> {
    nodes
        .iter()
        .find(|n| n.id == id)
        .unwrap_or_else(|| panic!("node {id} missing"))
}

#[test]
fn test_two_leaves_example() {
    let data = json!({
        "id": "root",
        "children": [
            { "id": "a", "value": 10 },
            { "id": "b", "value": 30 }
        ]
    });
    let inputs = Inputs::default();
    let nodes = compute_nodes(&data, &inputs.params(100.0, 2.0, true));

    assert_eq!(nodes.len(), 2);
    let a = find(&nodes, "a");
    let b = find(&nodes, "b");
    assert!(b.radius > a.radius);
    assert!((a.percentage - 25.0).abs() < 1e-9);
    assert!((b.percentage - 75.0).abs() < 1e-9);
    assert_eq!(a.formatted_value, "25.00%");
    assert_eq!(b.formatted_value, "75.00%");
}

#[test]
fn test_root_fills_viewport() {
    let data = sample_tree();
    let inputs = Inputs::default();
    let nodes = compute_nodes(&data, &inputs.params(200.0, 0.0, false));

    let root = &nodes[0];
    assert_eq!(root.id, "root");
    assert_eq!(root.depth, 0);
    assert_eq!(root.height, 2);
    assert!((root.x - 100.0).abs() < 1e-9);
    assert!((root.y - 100.0).abs() < 1e-9);
    assert!((root.radius - 100.0).abs() < 1e-9);
    assert_eq!(root.value, 40.0);
    assert_eq!(root.percentage, 100.0);
}

#[test]
fn test_root_children_percentages_sum_to_100() {
    let data = sample_tree();
    let inputs = Inputs::default();
    let nodes = compute_nodes(&data, &inputs.params(300.0, 1.0, false));

    let sum: f64 = nodes.iter().filter(|n| n.depth == 1).map(|n| n.percentage).sum();
    assert!((sum - 100.0).abs() < 1e-9);
    assert_eq!(find(&nodes, "group").value, 20.0);
}

#[test]
fn test_parents_are_emitted_before_children() {
    let data = sample_tree();
    let inputs = Inputs::default();
    let nodes = compute_nodes(&data, &inputs.params(300.0, 1.0, false));

    for (i, node) in nodes.iter().enumerate() {
        if let Some(parent_id) = node.parent_id() {
            let parent_pos = nodes.iter().position(|n| n.id == parent_id).unwrap();
            assert!(parent_pos < i, "{} emitted before its parent", node.id);
        }
    }
    let depths: Vec<usize> = nodes.iter().map(|n| n.depth).collect();
    let mut sorted = depths.clone();
    sorted.sort();
    assert_eq!(depths, sorted);
}

#[test]
fn test_paths_run_from_root_to_node() {
    let data = sample_tree();
    let inputs = Inputs::default();
    let nodes = compute_nodes(&data, &inputs.params(300.0, 0.0, false));

    assert_eq!(find(&nodes, "g2").path, vec!["root", "group", "g2"]);
    assert_eq!(find(&nodes, "root").path, vec!["root"]);
    assert_eq!(find(&nodes, "g2").parent_id(), Some("group"));
}

#[test]
fn test_leaves_only_sorted_by_depth() {
    let data = sample_tree();
    let inputs = Inputs::default();
    let nodes = compute_nodes(&data, &inputs.params(300.0, 0.0, true));

    let ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["solo", "g1", "g2"]);
}

#[test]
fn test_children_stay_inside_parent() {
    let data = sample_tree();
    let inputs = Inputs::default();
    let nodes = compute_nodes(&data, &inputs.params(400.0, 4.0, false));

    for node in &nodes {
        if let Some(parent_id) = node.parent_id() {
            let parent = find(&nodes, parent_id);
            let distance = node.center().distance(parent.center());
            assert!(distance + node.radius <= parent.radius + 1e-6);
        }
    }
}

#[test]
fn test_input_tree_is_not_modified() {
    let data = sample_tree();
    let before = data.clone();
    let inputs = Inputs::default();
    let nodes = compute_nodes(&data, &inputs.params(100.0, 1.0, false));

    assert_eq!(data, before);
    // Nodes reference their own copy of the tree.
    let g1 = find(&nodes, "g1");
    assert_eq!(g1.data.get().id, "g1");
    assert_eq!(g1.data.get().value, Some(5.0));
    assert!(!std::ptr::eq(g1.data.root().as_ref(), &data));
}

#[test]
fn test_zero_total_gives_zero_percentages() {
    let data = TreeDatum::node(
        "root",
        vec![TreeDatum::leaf("a", 0.0), TreeDatum::leaf("b", 0.0)],
    );
    let inputs = Inputs::default();
    let nodes = compute_nodes(&data, &inputs.params(100.0, 0.0, false));

    assert_eq!(nodes.len(), 3);
    for node in &nodes {
        assert_eq!(node.percentage, 0.0);
        assert_eq!(node.formatted_value, "0.00%");
        assert!(node.x.is_finite() && node.y.is_finite());
        assert_eq!(node.radius, 0.0);
    }
}

#[test]
fn test_value_format_is_used_when_set() {
    let data = sample_tree();
    let inputs = Inputs::default();
    let format = ValueFormat::parse(",.1f").unwrap();
    let mut params = inputs.params(100.0, 0.0, true);
    params.value_format = Some(&format);
    let nodes = compute_nodes(&data, &params);

    assert_eq!(find(&nodes, "g2").formatted_value, "15.0");
}

#[test]
fn test_custom_accessors() {
    let data = json!({
        "name": "root",
        "children": [
            { "name": "x", "meta": { "size": 3 } },
            { "name": "y", "meta": { "size": 1 } }
        ]
    });
    let inputs = Inputs {
        id: PropertyAccessor::func(|d: &serde_json::Value| {
            d["name"].as_str().unwrap_or_default().to_uppercase()
        }),
        value: PropertyAccessor::field("meta.size"),
        ..Inputs::default()
    };
    let nodes = compute_nodes(&data, &inputs.params(100.0, 0.0, false));

    assert_eq!(find(&nodes, "X").percentage, 75.0);
    assert_eq!(find(&nodes, "ROOT").value, 4.0);
}

#[test]
fn test_ordinal_colors_by_depth() {
    let data = sample_tree();
    let inputs = Inputs {
        color_by: NodeProperty::Field(NodeField::Depth),
        ..Inputs::default()
    };
    let nodes = compute_nodes(&data, &inputs.params(100.0, 0.0, false));
    let palette = ColorScheme::Category10.colors();

    assert_eq!(find(&nodes, "root").color, palette[0]);
    assert_eq!(find(&nodes, "group").color, palette[1]);
    assert_eq!(find(&nodes, "solo").color, palette[1]);
    assert_eq!(find(&nodes, "g1").color, palette[2]);
}

#[test]
fn test_depth_one_never_inherits() {
    let data = sample_tree();
    let inputs = Inputs::default();
    let mut params = inputs.params(100.0, 0.0, false);
    params.inherit_color_from_parent = true;
    let nodes = compute_nodes(&data, &params);
    let palette = ColorScheme::Category10.colors();

    // Keyed by id in first-seen order: root, group, solo.
    assert_eq!(find(&nodes, "root").color, palette[0]);
    assert_eq!(find(&nodes, "group").color, palette[1]);
    assert_eq!(find(&nodes, "solo").color, palette[2]);

    let group = find(&nodes, "group");
    let expected = ColorModifier::Darker(1.0).apply(group.color);
    assert_eq!(find(&nodes, "g1").color, expected);
    assert_eq!(find(&nodes, "g2").color, expected);
}

#[test]
fn test_leaves_only_cannot_inherit() {
    let data = sample_tree();
    let inputs = Inputs::default();
    let mut params = inputs.params(100.0, 0.0, true);
    params.inherit_color_from_parent = true;
    let nodes = compute_nodes(&data, &params);
    let palette = ColorScheme::Category10.colors();

    // No parent is emitted, so every leaf takes an ordinal color.
    assert_eq!(find(&nodes, "solo").color, palette[0]);
    assert_eq!(find(&nodes, "g1").color, palette[1]);
    assert_eq!(find(&nodes, "g2").color, palette[2]);
}
