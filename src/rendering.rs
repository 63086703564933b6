// Rendering functions for the circle packing chart

use crate::colors::InheritedColor;
use crate::data_types::{ComputedNode, Margin};
use crate::labels::ComputedLabel;
use crate::layers::Layer;
use crate::theme::ChartTheme;
use crate::utils::PixelsExt;
use glam::DVec2;
use gpui::*;

/// Screen-space description of one circle, ready to paint.
#[derive(Clone, Debug, PartialEq)]
pub struct CirclePaint {
    pub bounds: Bounds<Pixels>,
    pub fill: Hsla,
    pub border_color: Hsla,
    pub border_width: Pixels,
}

impl CirclePaint {
    pub fn radius(&self) -> Pixels {
        px(self.bounds.size.width.as_f32() / 2.0)
    }
}

/// Converts nodes to paint commands. `origin` is the top-left corner of the
/// chart area (surface origin shifted by the margins).
pub fn circle_paints<D>(
    nodes: &[ComputedNode<D>],
    origin: Point<Pixels>,
    border_width: f64,
    border_color: &InheritedColor<D>,
    theme: &ChartTheme,
) -> Vec<CirclePaint> {
    nodes
        .iter()
        .filter(|node| node.radius > 0.0)
        .map(|node| {
            let left = (node.x - node.radius) as f32;
            let top = (node.y - node.radius) as f32;
            let diameter = (node.radius * 2.0) as f32;
            CirclePaint {
                bounds: Bounds::new(
                    Point::new(origin.x + px(left), origin.y + px(top)),
                    Size::new(px(diameter), px(diameter)),
                ),
                fill: node.color,
                border_color: if border_width > 0.0 {
                    border_color.resolve(node, theme)
                } else {
                    gpui::transparent_black()
                },
                border_width: px(border_width as f32),
            }
        })
        .collect()
}

/// Paints the circles, parents first so children land on top.
pub fn paint_circles(window: &mut Window, circles: &[CirclePaint]) {
    for circle in circles {
        window.paint_quad(
            fill(circle.bounds, circle.fill)
                .corner_radii(Corners::all(circle.radius()))
                .border_widths(Edges::all(circle.border_width))
                .border_color(circle.border_color),
        );
    }
}

/// One pass of the canvas paint, in layer order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaintStep {
    Circles,
    Labels,
    /// Index of the custom layer in the layer list.
    Custom(usize),
}

/// Orders the paint passes as the layers are listed. The labels pass is
/// skipped when labels are disabled.
pub fn paint_plan<D>(layers: &[Layer<D>], enable_labels: bool) -> Vec<PaintStep> {
    layers
        .iter()
        .enumerate()
        .filter_map(|(index, layer)| match layer {
            Layer::Circles => Some(PaintStep::Circles),
            Layer::Labels => enable_labels.then_some(PaintStep::Labels),
            Layer::Custom(_) => Some(PaintStep::Custom(index)),
        })
        .collect()
}

/// Screen-space label text centered on `center`.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelPaint {
    pub center: Point<Pixels>,
    pub text: SharedString,
    pub color: Hsla,
}

pub fn label_paints<D>(labels: &[ComputedLabel<D>], origin: Point<Pixels>) -> Vec<LabelPaint> {
    labels
        .iter()
        .map(|label| LabelPaint {
            center: Point::new(
                origin.x + px(label.node.x as f32),
                origin.y + px(label.node.y as f32),
            ),
            text: label.label.clone().into(),
            color: label.text_color,
        })
        .collect()
}

pub fn paint_labels(
    window: &mut Window,
    labels: &[LabelPaint],
    font_size: Pixels,
    clip: Bounds<Pixels>,
    cx: &mut App,
) {
    let font = TextStyle::default().font();
    for label in labels {
        let run = TextRun {
            len: label.text.len(),
            font: font.clone(),
            color: label.color,
            background_color: None,
            underline: None,
            strikethrough: None,
        };
        let Ok(lines) =
            window
                .text_system()
                .shape_text(label.text.clone(), font_size, &[run], None, None)
        else {
            continue;
        };
        for line in lines {
            let origin = point(
                label.center.x - line.width() / 2.0,
                label.center.y - font_size / 2.0,
            );
            let _ = line.paint(origin, font_size, TextAlign::Left, Some(clip), window, cx);
        }
    }
}

/// Tooltip showing the hovered node's id and formatted value next to the
/// pointer. `local` is in chart coordinates.
pub fn tooltip_element<D>(
    node: &ComputedNode<D>,
    local: DVec2,
    margin: &Margin,
    theme: &ChartTheme,
) -> AnyElement {
    let left = (margin.left + local.x) as f32 + 12.0;
    let top = (margin.top + local.y) as f32 + 12.0;
    div()
        .absolute()
        .left(px(left))
        .top(px(top))
        .flex()
        .items_center()
        .gap(px(6.0))
        .px(px(6.0))
        .py(px(4.0))
        .rounded(px(2.0))
        .bg(theme.tooltip_background)
        .text_color(theme.tooltip_text)
        .text_size(theme.tooltip_text_size)
        .child(div().w(px(10.0)).h(px(10.0)).bg(node.color))
        .child(format!("{}: {}", node.id, node.formatted_value))
        .into_any_element()
}
