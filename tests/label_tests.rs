use gpui_circle_packing::labels::{compute_labels, LabelFilter};
use gpui_circle_packing::theme::ThemeColor;
use gpui_circle_packing::{
    ChartTheme, ComputedLabel, ComputedNode, DatumRef, InheritedColor, NodeField, NodeProperty,
    TreeDatum,
};
use std::rc::Rc;
use std::sync::Arc;

fn node(id: &str, radius: f64, percentage: f64) -> ComputedNode<TreeDatum> {
    ComputedNode {
        id: id.to_string(),
        path: vec!["root".to_string(), id.to_string()],
        value: percentage,
        percentage,
        formatted_value: format!("{percentage:.2}%"),
        x: 0.0,
        y: 0.0,
        radius,
        color: gpui::black(),
        depth: 1,
        height: 0,
        data: DatumRef::new(Arc::new(TreeDatum::default()), Vec::<usize>::new().into()),
    }
}

fn nodes() -> Vec<ComputedNode<TreeDatum>> {
    vec![node("big", 40.0, 60.0), node("edge", 8.0, 30.0), node("tiny", 3.0, 10.0)]
}

#[test]
fn test_small_circles_are_skipped() {
    let theme = ChartTheme::default();
    let labels = compute_labels(
        &nodes(),
        &NodeProperty::Field(NodeField::Id),
        8.0,
        &InheritedColor::Theme(ThemeColor::LabelsText),
        &theme,
        None,
    );

    let texts: Vec<&str> = labels.iter().map(|l| l.label.as_str()).collect();
    assert_eq!(texts, vec!["big", "edge"]);
    assert!(labels.iter().all(|l| l.text_color == theme.labels_text));
}

#[test]
fn test_zero_skip_radius_keeps_everything() {
    let labels = compute_labels(
        &nodes(),
        &NodeProperty::Field(NodeField::FormattedValue),
        0.0,
        &InheritedColor::FromColor(Vec::new()),
        &ChartTheme::default(),
        None,
    );

    let texts: Vec<&str> = labels.iter().map(|l| l.label.as_str()).collect();
    assert_eq!(texts, vec!["60.00%", "30.00%", "10.00%"]);
}

#[test]
fn test_filter_runs_after_skip_radius() {
    let filter: LabelFilter<TreeDatum> =
        Rc::new(|label: &ComputedLabel<TreeDatum>| label.node.percentage < 50.0);
    let labels = compute_labels(
        &nodes(),
        &NodeProperty::custom(|n: &ComputedNode<TreeDatum>| n.id.to_uppercase()),
        5.0,
        &InheritedColor::Static(gpui::white()),
        &ChartTheme::default(),
        Some(&filter),
    );

    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].label, "EDGE");
    assert_eq!(labels[0].node.id, "edge");
    assert_eq!(labels[0].text_color, gpui::white());
}
