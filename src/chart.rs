//! Chart Model
//!
//! `CirclePacking` owns every input of the chart (data, config, accessors,
//! colors, layers, handlers) and derives the layout, the zoomed layout, the
//! labels, the hit detector and the custom layer context from them.
//!
//! Derived values are memoized: each one is recomputed only when one of the
//! inputs it depends on changed since the last request. Setters bump a
//! revision counter instead of comparing closures.

use crate::accessor::{NodeProperty, PropertyAccessor};
use crate::colors::InheritedColor;
use crate::data_types::{CirclePackingConfig, ComputedNode, Datum};
use crate::interaction::{
    MouseCircleDetector, NodeMouseHandler, NodeMouseHandlers, NodePointerEvent,
};
use crate::labels::{compute_labels, ComputedLabel, LabelFilter};
use crate::layers::{CustomLayerContext, Layer};
use crate::layout::{compute_nodes, LayoutParams};
use crate::memo::Memo;
use crate::theme::ChartTheme;
use crate::transform::zoom_nodes;
use crate::utils::value_formatter::ValueFormat;
use crate::utils::PixelsExt;
use eyre::{Result, WrapErr};
use gpui::{Pixels, Size};
use std::rc::Rc;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq)]
struct LayoutKey {
    revision: u64,
    width: f64,
    height: f64,
}

#[derive(Clone, Debug, PartialEq)]
struct ZoomKey {
    layout: LayoutKey,
    zoomed_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
struct LabelsKey {
    zoom: ZoomKey,
    revision: u64,
}

pub struct CirclePacking<D: Datum> {
    data: D,
    config: CirclePackingConfig,
    theme: ChartTheme,

    id: PropertyAccessor<D, String>,
    value: PropertyAccessor<D, f64>,
    value_format: Option<ValueFormat>,
    color_by: NodeProperty<D>,
    child_color: InheritedColor<D>,
    label: NodeProperty<D>,
    label_text_color: InheritedColor<D>,
    border_color: InheritedColor<D>,
    labels_filter: Option<LabelFilter<D>>,
    layers: Vec<Layer<D>>,
    handlers: NodeMouseHandlers<D>,

    layout_revision: u64,
    labels_revision: u64,
    nodes_memo: Memo<LayoutKey, Arc<[ComputedNode<D>]>>,
    zoom_memo: Memo<ZoomKey, Arc<[ComputedNode<D>]>>,
    labels_memo: Memo<LabelsKey, Arc<[ComputedLabel<D>]>>,
    detector_memo: Memo<ZoomKey, Rc<MouseCircleDetector<D>>>,
    layer_context_memo: Memo<ZoomKey, CustomLayerContext<D>>,
}

impl<D: Datum> CirclePacking<D> {
    pub fn new(data: D) -> Self {
        let config = CirclePackingConfig::default();
        Self {
            data,
            theme: ChartTheme::default(),
            id: PropertyAccessor::field(config.id.as_str()),
            value: PropertyAccessor::field(config.value.as_str()),
            value_format: None,
            color_by: config.color_by.into(),
            child_color: (&config.child_color).into(),
            label: config.label.into(),
            label_text_color: (&config.label_text_color).into(),
            border_color: (&config.border_color).into(),
            labels_filter: None,
            layers: config.layers.iter().map(|&kind| kind.into()).collect(),
            handlers: NodeMouseHandlers::default(),
            config,
            layout_revision: 0,
            labels_revision: 0,
            nodes_memo: Memo::default(),
            zoom_memo: Memo::default(),
            labels_memo: Memo::default(),
            detector_memo: Memo::default(),
            layer_context_memo: Memo::default(),
        }
    }

    pub fn with_config(data: D, config: CirclePackingConfig) -> Result<Self> {
        let mut chart = Self::new(data);
        chart.set_config(config)?;
        Ok(chart)
    }

    /// Replaces the config and rebuilds every accessor and color rule from it.
    /// Custom layers are kept, after the configured built-in ones.
    pub fn set_config(&mut self, config: CirclePackingConfig) -> Result<()> {
        let value_format = config
            .value_format
            .as_deref()
            .map(ValueFormat::parse)
            .transpose()
            .wrap_err("invalid circle packing config")?;

        self.value_format = value_format;
        self.id = PropertyAccessor::field(config.id.as_str());
        self.value = PropertyAccessor::field(config.value.as_str());
        self.color_by = config.color_by.into();
        self.child_color = (&config.child_color).into();
        self.label = config.label.into();
        self.label_text_color = (&config.label_text_color).into();
        self.border_color = (&config.border_color).into();

        let custom: Vec<Layer<D>> = self.layers.drain(..).filter(Layer::is_custom).collect();
        self.layers = config.layers.iter().map(|&kind| kind.into()).collect();
        self.layers.extend(custom);

        self.config = config;
        self.touch_layout();
        Ok(())
    }

    pub fn config(&self) -> &CirclePackingConfig {
        &self.config
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    pub fn theme(&self) -> &ChartTheme {
        &self.theme
    }

    pub fn set_data(&mut self, data: D) {
        self.data = data;
        self.touch_layout();
    }

    pub fn set_theme(&mut self, theme: ChartTheme) {
        self.theme = theme;
        self.touch_layout();
    }

    pub fn set_id(&mut self, id: PropertyAccessor<D, String>) {
        self.id = id;
        self.touch_layout();
    }

    pub fn set_value(&mut self, value: PropertyAccessor<D, f64>) {
        self.value = value;
        self.touch_layout();
    }

    pub fn set_value_format(&mut self, format: Option<ValueFormat>) {
        self.value_format = format;
        self.touch_layout();
    }

    pub fn set_padding(&mut self, padding: f64) {
        self.config.padding = padding;
        self.touch_layout();
    }

    pub fn set_leaves_only(&mut self, leaves_only: bool) {
        self.config.leaves_only = leaves_only;
        self.touch_layout();
    }

    pub fn set_color_by(&mut self, color_by: NodeProperty<D>) {
        self.color_by = color_by;
        self.touch_layout();
    }

    pub fn set_inherit_color_from_parent(&mut self, inherit: bool) {
        self.config.inherit_color_from_parent = inherit;
        self.touch_layout();
    }

    pub fn set_child_color(&mut self, color: InheritedColor<D>) {
        self.child_color = color;
        self.touch_layout();
    }

    pub fn set_label(&mut self, label: NodeProperty<D>) {
        self.label = label;
        self.touch_labels();
    }

    pub fn set_labels_skip_radius(&mut self, radius: f64) {
        self.config.labels_skip_radius = radius;
        self.touch_labels();
    }

    pub fn set_label_text_color(&mut self, color: InheritedColor<D>) {
        self.label_text_color = color;
        self.touch_labels();
    }

    pub fn set_labels_filter(&mut self, filter: Option<LabelFilter<D>>) {
        self.labels_filter = filter;
        self.touch_labels();
    }

    pub fn set_border_color(&mut self, color: InheritedColor<D>) {
        self.border_color = color;
    }

    pub fn border_color(&self) -> &InheritedColor<D> {
        &self.border_color
    }

    pub fn add_layer(&mut self, layer: Layer<D>) {
        self.layers.push(layer);
    }

    pub fn set_layers(&mut self, layers: Vec<Layer<D>>) {
        self.layers = layers;
    }

    pub fn layers(&self) -> &[Layer<D>] {
        &self.layers
    }

    pub fn handlers(&self) -> &NodeMouseHandlers<D> {
        &self.handlers
    }

    pub fn on_mouse_enter(&mut self, handler: impl Fn(&ComputedNode<D>, &NodePointerEvent) + 'static) {
        self.handlers.on_mouse_enter = Some(Rc::new(handler) as NodeMouseHandler<D>);
    }

    pub fn on_mouse_move(&mut self, handler: impl Fn(&ComputedNode<D>, &NodePointerEvent) + 'static) {
        self.handlers.on_mouse_move = Some(Rc::new(handler) as NodeMouseHandler<D>);
    }

    pub fn on_mouse_leave(&mut self, handler: impl Fn(&ComputedNode<D>, &NodePointerEvent) + 'static) {
        self.handlers.on_mouse_leave = Some(Rc::new(handler) as NodeMouseHandler<D>);
    }

    pub fn on_click(&mut self, handler: impl Fn(&ComputedNode<D>, &NodePointerEvent) + 'static) {
        self.handlers.on_click = Some(Rc::new(handler) as NodeMouseHandler<D>);
    }

    pub fn zoomed_id(&self) -> Option<&str> {
        self.config.zoomed_id.as_deref()
    }

    pub fn zoom_to(&mut self, id: impl Into<String>) {
        let id = id.into();
        debug!(id = id.as_str(), "zooming circle packing");
        self.config.zoomed_id = Some(id);
    }

    pub fn reset_zoom(&mut self) {
        self.config.zoomed_id = None;
    }

    /// Zooms on `id`, or back out when it is already the zoomed node.
    pub fn toggle_zoom(&mut self, id: &str) {
        if self.zoomed_id() == Some(id) {
            self.reset_zoom();
        } else {
            self.zoom_to(id);
        }
    }

    /// Chart area left once margins are removed from the outer size.
    pub fn inner_size(&self, outer: Size<Pixels>) -> (f64, f64) {
        let margin = &self.config.margin;
        let width = outer.width.as_f32() as f64 - margin.left - margin.right;
        let height = outer.height.as_f32() as f64 - margin.top - margin.bottom;
        (width.max(0.0), height.max(0.0))
    }

    /// Layout without zoom.
    pub fn nodes(&self, width: f64, height: f64) -> Arc<[ComputedNode<D>]> {
        let key = self.layout_key(width, height);
        self.nodes_memo.get_or_compute(key, || {
            let params = LayoutParams {
                id: &self.id,
                value: &self.value,
                value_format: self.value_format.as_ref(),
                width,
                height,
                padding: self.config.padding,
                leaves_only: self.config.leaves_only,
                colors: &self.config.colors,
                color_by: &self.color_by,
                inherit_color_from_parent: self.config.inherit_color_from_parent,
                child_color: &self.child_color,
                theme: &self.theme,
            };
            compute_nodes(&self.data, &params).into()
        })
    }

    pub fn zoomed_nodes(&self, width: f64, height: f64) -> Arc<[ComputedNode<D>]> {
        let key = self.zoom_key(width, height);
        self.zoom_memo.get_or_compute(key, || {
            let nodes = self.nodes(width, height);
            zoom_nodes(&nodes, self.zoomed_id(), width, height)
        })
    }

    pub fn labels(&self, width: f64, height: f64) -> Arc<[ComputedLabel<D>]> {
        let key = LabelsKey {
            zoom: self.zoom_key(width, height),
            revision: self.labels_revision,
        };
        self.labels_memo.get_or_compute(key, || {
            let nodes = self.zoomed_nodes(width, height);
            compute_labels(
                &nodes,
                &self.label,
                self.config.labels_skip_radius,
                &self.label_text_color,
                &self.theme,
                self.labels_filter.as_ref(),
            )
            .into()
        })
    }

    pub fn detector(&self, width: f64, height: f64) -> Rc<MouseCircleDetector<D>> {
        let key = self.zoom_key(width, height);
        self.detector_memo.get_or_compute(key, || {
            Rc::new(MouseCircleDetector::new(
                self.zoomed_nodes(width, height),
                self.config.margin,
            ))
        })
    }

    pub fn layer_context(&self, width: f64, height: f64) -> CustomLayerContext<D> {
        let key = self.zoom_key(width, height);
        self.layer_context_memo.get_or_compute(key, || CustomLayerContext {
            nodes: self.zoomed_nodes(width, height),
        })
    }

    fn layout_key(&self, width: f64, height: f64) -> LayoutKey {
        LayoutKey {
            revision: self.layout_revision,
            width,
            height,
        }
    }

    fn zoom_key(&self, width: f64, height: f64) -> ZoomKey {
        ZoomKey {
            layout: self.layout_key(width, height),
            zoomed_id: self.config.zoomed_id.clone(),
        }
    }

    fn touch_layout(&mut self) {
        self.layout_revision += 1;
        self.labels_revision += 1;
    }

    fn touch_labels(&mut self) {
        self.labels_revision += 1;
    }
}
