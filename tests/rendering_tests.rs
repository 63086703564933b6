use gpui::{point, px, App, Bounds, Pixels, Window};
use gpui_circle_packing::rendering::{circle_paints, label_paints, paint_plan, PaintStep};
use gpui_circle_packing::{
    ChartTheme, ColorModifier, ComputedLabel, ComputedNode, CustomLayer, CustomLayerContext,
    DatumRef, InheritedColor, Layer, TreeDatum,
};
use std::sync::Arc;

struct Noop;

impl CustomLayer<TreeDatum> for Noop {
    fn render(
        &self,
        _window: &mut Window,
        _bounds: Bounds<Pixels>,
        _context: &CustomLayerContext<TreeDatum>,
        _cx: &mut App,
    ) {
    }
}

fn node(id: &str, x: f64, y: f64, radius: f64) -> ComputedNode<TreeDatum> {
    ComputedNode {
        id: id.to_string(),
        path: vec![id.to_string()],
        value: 1.0,
        percentage: 100.0,
        formatted_value: String::new(),
        x,
        y,
        radius,
        color: gpui::white(),
        depth: 0,
        height: 0,
        data: DatumRef::new(Arc::new(TreeDatum::default()), Vec::<usize>::new().into()),
    }
}

#[test]
fn test_circle_paints_geometry() {
    let nodes = vec![node("a", 50.0, 40.0, 10.0), node("empty", 5.0, 5.0, 0.0)];
    let border = InheritedColor::FromColor(vec![ColorModifier::Darker(1.0)]);
    let paints = circle_paints(&nodes, point(px(100.0), px(200.0)), 2.0, &border, &ChartTheme::default());

    assert_eq!(paints.len(), 1);
    let paint = &paints[0];
    assert_eq!(paint.bounds.origin, point(px(140.0), px(230.0)));
    assert_eq!(paint.bounds.size.width, px(20.0));
    assert_eq!(paint.radius(), px(10.0));
    assert_eq!(paint.border_width, px(2.0));
    assert_eq!(paint.border_color, ColorModifier::Darker(1.0).apply(gpui::white()));
}

#[test]
fn test_circle_paints_without_border() {
    let nodes = vec![node("a", 10.0, 10.0, 10.0)];
    let border = InheritedColor::Static(gpui::black());
    let paints = circle_paints(&nodes, point(px(0.0), px(0.0)), 0.0, &border, &ChartTheme::default());

    assert_eq!(paints[0].border_color, gpui::transparent_black());
    assert_eq!(paints[0].fill, gpui::white());
}

#[test]
fn test_paint_plan_follows_layer_order() {
    let layers: Vec<Layer<TreeDatum>> = vec![
        Layer::Labels,
        Layer::custom(Noop),
        Layer::Circles,
    ];
    assert_eq!(
        paint_plan(&layers, true),
        vec![PaintStep::Labels, PaintStep::Custom(1), PaintStep::Circles]
    );

    let layers: Vec<Layer<TreeDatum>> = vec![Layer::Circles, Layer::Labels, Layer::custom(Noop)];
    assert_eq!(
        paint_plan(&layers, true),
        vec![PaintStep::Circles, PaintStep::Labels, PaintStep::Custom(2)]
    );
}

#[test]
fn test_paint_plan_skips_disabled_labels() {
    let layers: Vec<Layer<TreeDatum>> = vec![Layer::Circles, Layer::Labels, Layer::custom(Noop)];
    assert_eq!(
        paint_plan(&layers, false),
        vec![PaintStep::Circles, PaintStep::Custom(2)]
    );
    assert!(paint_plan::<TreeDatum>(&[], true).is_empty());
}

#[test]
fn test_label_paints_center_on_nodes() {
    let labels = vec![ComputedLabel {
        label: "a".to_string(),
        text_color: gpui::black(),
        node: node("a", 30.0, 20.0, 10.0),
    }];
    let paints = label_paints(&labels, point(px(5.0), px(7.0)));

    assert_eq!(paints.len(), 1);
    assert_eq!(paints[0].center, point(px(35.0), px(27.0)));
    assert_eq!(paints[0].text.to_string(), "a");
    assert_eq!(paints[0].color, gpui::black());
}
