//! GPUI view painting a [`CirclePacking`] chart and routing pointer input to it.

use crate::chart::CirclePacking;
use crate::data_types::{ComputedNode, Datum};
use crate::interaction::{relative_cursor, HoverTracker, NodePointerEvent};
use crate::layers::Layer;
use crate::rendering::{
    circle_paints, label_paints, paint_circles, paint_labels, paint_plan, tooltip_element, PaintStep,
};
use gpui::prelude::*;
use gpui::*;
use glam::DVec2;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::info;

actions!(circle_packing, [ResetZoom]);

/// Registers the default key bindings.
pub fn init(cx: &mut App) {
    cx.bind_keys([KeyBinding::new("escape", ResetZoom, None)]);
}

#[derive(Clone, Debug)]
struct TooltipState<D> {
    node: ComputedNode<D>,
    /// Pointer in chart coordinates.
    local: DVec2,
}

pub struct CirclePackingView<D: Datum + 'static> {
    pub chart: Rc<RefCell<CirclePacking<D>>>,
    hover: HoverTracker<D>,
    tooltip: Option<TooltipState<D>>,
    bounds: Rc<RefCell<Bounds<Pixels>>>,
    focus_handle: FocusHandle,
}

impl<D: Datum + 'static> CirclePackingView<D> {
    pub fn new(chart: CirclePacking<D>, cx: &mut Context<Self>) -> Self {
        info!("CirclePackingView new called");
        Self {
            chart: Rc::new(RefCell::new(chart)),
            hover: HoverTracker::default(),
            tooltip: None,
            bounds: Rc::new(RefCell::new(Bounds::default())),
            focus_handle: cx.focus_handle(),
        }
    }

    /// Mutates the chart model and schedules a redraw.
    pub fn update_chart(&mut self, f: impl FnOnce(&mut CirclePacking<D>), cx: &mut Context<Self>) {
        f(&mut self.chart.borrow_mut());
        self.tooltip = None;
        cx.notify();
    }

    /// Last bounds the canvas was painted with.
    pub fn bounds(&self) -> Bounds<Pixels> {
        *self.bounds.borrow()
    }

    fn pointer_event(&self, position: Point<Pixels>, button: Option<MouseButton>) -> NodePointerEvent {
        let chart = self.chart.borrow();
        let margin = chart.config().margin;
        let surface = relative_cursor(self.bounds(), position);
        NodePointerEvent {
            position,
            local: surface - DVec2::new(margin.left, margin.top),
            button,
        }
    }

    fn hit_at(&self, position: Point<Pixels>) -> Option<ComputedNode<D>> {
        let bounds = self.bounds();
        let chart = self.chart.borrow();
        let (width, height) = chart.inner_size(bounds.size);
        let detector = chart.detector(width, height);
        detector.detect(relative_cursor(bounds, position)).cloned()
    }

    fn handle_mouse_move(
        &mut self,
        event: &MouseMoveEvent,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if !self.chart.borrow().config().is_interactive {
            return;
        }
        let hit = self.hit_at(event.position);
        let pointer = self.pointer_event(event.position, event.pressed_button);
        let events = self.hover.update(hit.as_ref());
        self.chart.borrow().handlers().dispatch(&events, &pointer);

        self.tooltip = hit.map(|node| TooltipState {
            node,
            local: pointer.local,
        });
        cx.notify();
    }

    fn handle_mouse_down(
        &mut self,
        event: &MouseDownEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        window.focus(&self.focus_handle);
        if !self.chart.borrow().config().is_interactive {
            return;
        }
        let Some(node) = self.hit_at(event.position) else {
            return;
        };
        let pointer = self.pointer_event(event.position, Some(event.button));
        let zoom_on_click = {
            let chart = self.chart.borrow();
            chart.handlers().click(&node, &pointer);
            chart.config().zoom_on_click
        };
        if zoom_on_click {
            self.chart.borrow_mut().toggle_zoom(&node.id);
            self.tooltip = None;
        }
        cx.notify();
    }

    fn handle_hover(&mut self, hovered: &bool, window: &mut Window, cx: &mut Context<Self>) {
        if *hovered {
            return;
        }
        let position = window.mouse_position();
        let pointer = self.pointer_event(position, None);
        let events = self.hover.clear();
        self.chart.borrow().handlers().dispatch(&events, &pointer);
        self.tooltip = None;
        cx.notify();
    }

    fn handle_reset_zoom(&mut self, _: &ResetZoom, _window: &mut Window, cx: &mut Context<Self>) {
        self.chart.borrow_mut().reset_zoom();
        self.tooltip = None;
        cx.notify();
    }
}

impl<D: Datum + 'static> Focusable for CirclePackingView<D> {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl<D: Datum + 'static> Render for CirclePackingView<D> {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let bounds_rc = self.bounds.clone();
        let last_bounds = self.bounds();

        let chart = self.chart.borrow();
        let config = chart.config().clone();
        let theme = chart.theme().clone();
        let (width, height) = chart.inner_size(last_bounds.size);

        let nodes = chart.zoomed_nodes(width, height);
        let layers: Vec<Layer<D>> = chart.layers().to_vec();
        let plan = paint_plan(&layers, config.enable_labels);
        let layer_context = chart.layer_context(width, height);
        let labels = plan
            .contains(&PaintStep::Labels)
            .then(|| chart.labels(width, height));
        let border_color = chart.border_color().clone();
        drop(chart);

        let tooltip = self
            .tooltip
            .as_ref()
            .map(|t| tooltip_element(&t.node, t.local, &config.margin, &theme));

        div()
            .id(("circle-packing", cx.entity_id()))
            .track_focus(&self.focus_handle)
            .size_full()
            .relative()
            .bg(theme.background)
            .on_mouse_move(cx.listener(Self::handle_mouse_move))
            .on_mouse_down(MouseButton::Left, cx.listener(Self::handle_mouse_down))
            .on_hover(cx.listener(Self::handle_hover))
            .on_action(cx.listener(Self::handle_reset_zoom))
            .child(
                canvas(|_, _, _| {}, move |bounds, (), window, cx| {
                    let resized = *bounds_rc.borrow() != bounds;
                    *bounds_rc.borrow_mut() = bounds;
                    if resized {
                        // Layout depends on the size, draw again with the new one.
                        window.refresh();
                    }

                    let margin = config.margin;
                    let origin = Point::new(
                        bounds.origin.x + px(margin.left as f32),
                        bounds.origin.y + px(margin.top as f32),
                    );
                    let inner = Bounds::new(origin, Size::new(px(width as f32), px(height as f32)));

                    window.with_content_mask(Some(ContentMask { bounds }), |window| {
                        for step in &plan {
                            match *step {
                                PaintStep::Circles => {
                                    let circles = circle_paints(
                                        &nodes,
                                        origin,
                                        config.border_width,
                                        &border_color,
                                        &theme,
                                    );
                                    paint_circles(window, &circles);
                                }
                                PaintStep::Labels => {
                                    if let Some(labels) = &labels {
                                        let paints = label_paints(labels, origin);
                                        paint_labels(window, &paints, theme.label_size, bounds, cx);
                                    }
                                }
                                PaintStep::Custom(index) => {
                                    if let Some(Layer::Custom(custom)) = layers.get(index) {
                                        custom.render(window, inner, &layer_context, cx);
                                    }
                                }
                            }
                        }
                    });
                })
                .size_full()
                .absolute(),
            )
            .children(tooltip)
    }
}
