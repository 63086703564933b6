//! gpui_circle_packing crate for circle packing charts in GPUI

pub mod accessor;
pub mod chart;
pub mod chart_view;
pub mod colors;
pub mod data_types;
mod hierarchy;
pub mod interaction;
pub mod labels;
pub mod layers;
pub mod layout;
pub mod memo;
mod pack;
pub mod rendering;
pub mod theme;
pub mod transform;
pub mod utils;

pub use accessor::{NodeField, NodeProperty, PropertyAccessor};
pub use chart::CirclePacking;
pub use chart_view::{init, CirclePackingView, ResetZoom};
pub use colors::{ColorModifier, ColorScheme, InheritedColor, InheritedColorConfig, OrdinalColors};
pub use data_types::{CirclePackingConfig, ComputedNode, Datum, DatumRef, Margin, TreeDatum};
pub use interaction::{MouseCircleDetector, NodeMouseHandlers, NodePointerEvent};
pub use labels::ComputedLabel;
pub use layers::{CustomLayer, CustomLayerContext, Layer};
pub use layout::{compute_nodes, LayoutParams};
pub use theme::ChartTheme;
pub use transform::{zoom_nodes, ZoomTransform};
pub use utils::value_formatter::ValueFormat;
