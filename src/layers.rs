//! Paint layers, including user supplied ones.

use crate::data_types::{ComputedNode, LayerKind};
use gpui::*;
use std::rc::Rc;
use std::sync::Arc;

/// What custom layers get to draw with.
pub struct CustomLayerContext<D> {
    /// Current nodes, zoom already applied.
    pub nodes: Arc<[ComputedNode<D>]>,
}

impl<D> Clone for CustomLayerContext<D> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
        }
    }
}

/// Trait for user rendering extensions painted alongside the built-in layers.
pub trait CustomLayer<D> {
    /// `bounds` is the inner chart area, margins already removed.
    fn render(
        &self,
        window: &mut Window,
        bounds: Bounds<Pixels>,
        context: &CustomLayerContext<D>,
        cx: &mut App,
    );
}

pub enum Layer<D> {
    Circles,
    Labels,
    Custom(Rc<dyn CustomLayer<D>>),
}

impl<D> Layer<D> {
    pub fn custom(layer: impl CustomLayer<D> + 'static) -> Self {
        Self::Custom(Rc::new(layer))
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl<D> Clone for Layer<D> {
    fn clone(&self) -> Self {
        match self {
            Self::Circles => Self::Circles,
            Self::Labels => Self::Labels,
            Self::Custom(layer) => Self::Custom(layer.clone()),
        }
    }
}

impl<D> From<LayerKind> for Layer<D> {
    fn from(kind: LayerKind) -> Self {
        match kind {
            LayerKind::Circles => Self::Circles,
            LayerKind::Labels => Self::Labels,
        }
    }
}

impl<D> std::fmt::Debug for Layer<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Circles => f.write_str("Circles"),
            Self::Labels => f.write_str("Labels"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
