use gpui::prelude::*;
use gpui::*;
use gpui_circle_packing::{
    CirclePacking, CirclePackingConfig, CirclePackingView, ColorModifier, ColorScheme,
    CustomLayer, CustomLayerContext, InheritedColorConfig, Layer, Margin, NodeField, TreeDatum,
};
use gpui_circle_packing::colors::OrdinalColors;
use rand::Rng;

/// Ring around the largest leaf.
struct LargestLeafOutline;

impl CustomLayer<TreeDatum> for LargestLeafOutline {
    fn render(
        &self,
        window: &mut Window,
        bounds: Bounds<Pixels>,
        context: &CustomLayerContext<TreeDatum>,
        _cx: &mut App,
    ) {
        let Some(node) = context
            .nodes
            .iter()
            .filter(|n| n.height == 0)
            .max_by(|a, b| a.value.total_cmp(&b.value))
        else {
            return;
        };
        let diameter = px((node.radius * 2.0) as f32);
        let origin = point(
            bounds.origin.x + px((node.x - node.radius) as f32),
            bounds.origin.y + px((node.y - node.radius) as f32),
        );
        window.paint_quad(
            fill(Bounds::new(origin, size(diameter, diameter)), gpui::transparent_black())
                .corner_radii(Corners::all(px(node.radius as f32)))
                .border_widths(Edges::all(px(2.0)))
                .border_color(gpui::black()),
        );
    }
}

fn random_tree(rng: &mut impl Rng) -> TreeDatum {
    let groups = ["core", "network", "storage", "ui", "tooling"];
    TreeDatum::node(
        "project",
        groups
            .iter()
            .map(|group| {
                let modules = rng.random_range(2..7);
                TreeDatum::node(
                    *group,
                    (0..modules)
                        .map(|i| {
                            TreeDatum::leaf(format!("{group}-{i}"), rng.random_range(10.0..400.0))
                        })
                        .collect(),
                )
            })
            .collect(),
    )
}

struct DemoApp {
    chart: Entity<CirclePackingView<TreeDatum>>,
}

impl DemoApp {
    pub fn new(cx: &mut Context<Self>) -> Self {
        let chart = cx.new(|cx| {
            let mut rng = rand::rng();
            let config = CirclePackingConfig {
                padding: 4.0,
                colors: OrdinalColors::Scheme(ColorScheme::Set2),
                color_by: NodeField::Id,
                inherit_color_from_parent: true,
                child_color: InheritedColorConfig::from_color([ColorModifier::Brighter(0.4)]),
                border_width: 1.0,
                value_format: Some(",d".to_string()),
                margin: Margin::all(20.0),
                zoom_on_click: true,
                ..CirclePackingConfig::default()
            };

            let mut model = match CirclePacking::with_config(random_tree(&mut rng), config) {
                Ok(model) => model,
                Err(err) => {
                    tracing::warn!("invalid demo config: {err:?}");
                    CirclePacking::new(random_tree(&mut rng))
                }
            };
            model.add_layer(Layer::custom(LargestLeafOutline));
            model.on_click(|node, _event| {
                tracing::info!(id = node.id.as_str(), value = node.value, "clicked");
            });

            CirclePackingView::new(model, cx)
        });

        Self { chart }
    }
}

impl Render for DemoApp {
    fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .size_full()
            .bg(gpui::white())
            .child(self.chart.clone())
    }
}

fn main() {
    Application::new().run(|cx: &mut App| {
        gpui_circle_packing::init(cx);

        cx.open_window(WindowOptions::default(), |_window, cx| {
            cx.new(|cx| DemoApp::new(cx))
        })
        .expect("failed to open window");
    });
}
