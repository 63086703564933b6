use crate::accessor::NodeField;
use crate::colors::{ColorModifier, InheritedColorConfig, OrdinalColors};
use crate::utils::value_formatter::validate_specifier;
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub fn all(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// Built-in layers, painted in the order they are listed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayerKind {
    Circles,
    Labels,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CirclePackingConfig {
    /// Field path of the node id.
    pub id: String,
    /// Field path of the node value.
    pub value: String,
    /// d3-format style specifier; percentages are shown when unset.
    pub value_format: Option<String>,
    pub padding: f64,
    pub leaves_only: bool,
    pub colors: OrdinalColors,
    pub color_by: NodeField,
    pub inherit_color_from_parent: bool,
    pub child_color: InheritedColorConfig,
    pub enable_labels: bool,
    pub label: NodeField,
    pub labels_skip_radius: f64,
    pub label_text_color: InheritedColorConfig,
    pub border_width: f64,
    pub border_color: InheritedColorConfig,
    pub margin: Margin,
    pub zoomed_id: Option<String>,
    pub is_interactive: bool,
    pub zoom_on_click: bool,
    pub layers: Vec<LayerKind>,
}

impl Default for CirclePackingConfig {
    fn default() -> Self {
        Self {
            id: "id".to_string(),
            value: "value".to_string(),
            value_format: None,
            padding: 0.0,
            leaves_only: false,
            colors: OrdinalColors::default(),
            color_by: NodeField::Depth,
            inherit_color_from_parent: false,
            child_color: InheritedColorConfig::from_color([ColorModifier::Brighter(0.4)]),
            enable_labels: true,
            label: NodeField::Id,
            labels_skip_radius: 8.0,
            label_text_color: InheritedColorConfig::from_color([ColorModifier::Darker(1.0)]),
            border_width: 0.0,
            border_color: InheritedColorConfig::from_color([ColorModifier::Darker(0.3)]),
            margin: Margin::default(),
            zoomed_id: None,
            is_interactive: true,
            zoom_on_click: false,
            layers: vec![LayerKind::Circles, LayerKind::Labels],
        }
    }
}

impl CirclePackingConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).wrap_err("failed to parse circle packing config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(spec) = &self.value_format {
            validate_specifier(spec).wrap_err("invalid valueFormat")?;
        }
        Ok(())
    }
}
