//! Ordinal palettes and inherited colors.

use crate::data_types::ComputedNode;
use crate::theme::{ChartTheme, ThemeColor};
use d3rs::color::D3Color;
use gpui::{rgb, rgba, Hsla, Rgba};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

// Serialization of Hsla as "#rrggbb" / "#rrggbbaa" strings
pub mod hex_color {
    use super::*;
    use eyre::{bail, Result, WrapErr};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(color: &Hsla, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&to_hex_str(*color))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Hsla, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_hex_str(&s).map_err(serde::de::Error::custom)
    }

    pub fn to_hex_str(color: Hsla) -> String {
        let c: Rgba = color.into();
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        if c.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", channel(c.r), channel(c.g), channel(c.b))
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                channel(c.r),
                channel(c.g),
                channel(c.b),
                channel(c.a)
            )
        }
    }

    pub fn parse_hex_str(hex: &str) -> Result<Hsla> {
        let digits = hex.trim().trim_start_matches('#');
        let value = u32::from_str_radix(digits, 16)
            .wrap_err_with(|| format!("invalid hex color {hex:?}"))?;
        let color = match digits.len() {
            3 => {
                let (r, g, b) = ((value >> 8) & 0xf, (value >> 4) & 0xf, value & 0xf);
                rgb((r * 0x11) << 16 | (g * 0x11) << 8 | (b * 0x11))
            }
            6 => rgb(value),
            8 => rgba(value),
            _ => bail!("hex color {hex:?} must have 3, 6 or 8 digits"),
        };
        Ok(color.into())
    }
}

pub mod hex_color_list {
    use super::*;
    use serde::ser::SerializeSeq;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(colors: &[Hsla], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(colors.len()))?;
        for color in colors {
            seq.serialize_element(&hex_color::to_hex_str(*color))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Hsla>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Vec::<String>::deserialize(deserializer)?;
        raw.iter()
            .map(|s| hex_color::parse_hex_str(s).map_err(serde::de::Error::custom))
            .collect()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorScheme {
    #[default]
    Nivo,
    Category10,
    Tableau10,
    Paired,
    Set2,
    Pastel1,
}

impl ColorScheme {
    fn scheme(self) -> d3rs::color::ColorScheme {
        fn from_hex(hexes: &[u32]) -> d3rs::color::ColorScheme {
            d3rs::color::ColorScheme::new(hexes.iter().map(|&hex| D3Color::from_hex(hex)).collect())
        }
        match self {
            Self::Nivo => from_hex(&[0xe8c1a0, 0xf47560, 0xf1e15b, 0xe8a838, 0x61cdbb, 0x97e3d5]),
            Self::Category10 => d3rs::color::ColorScheme::category10(),
            Self::Tableau10 => d3rs::color::ColorScheme::tableau10(),
            Self::Paired => from_hex(&[
                0xa6cee3, 0x1f78b4, 0xb2df8a, 0x33a02c, 0xfb9a99, 0xe31a1c, 0xfdbf6f, 0xff7f00,
                0xcab2d6, 0x6a3d9a, 0xffff99, 0xb15928,
            ]),
            Self::Set2 => from_hex(&[
                0x66c2a5, 0xfc8d62, 0x8da0cb, 0xe78ac3, 0xa6d854, 0xffd92f, 0xe5c494, 0xb3b3b3,
            ]),
            Self::Pastel1 => d3rs::color::ColorScheme::pastel(),
        }
    }

    pub fn colors(self) -> Vec<Hsla> {
        self.scheme()
            .colors()
            .iter()
            .map(|color| color.to_rgba().into())
            .collect()
    }
}

/// Palette used by the ordinal scale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrdinalColors {
    Scheme(ColorScheme),
    List(#[serde(with = "hex_color_list")] Vec<Hsla>),
    Single(#[serde(with = "hex_color")] Hsla),
}

impl Default for OrdinalColors {
    fn default() -> Self {
        Self::Scheme(ColorScheme::Nivo)
    }
}

impl OrdinalColors {
    pub fn palette(&self) -> Vec<Hsla> {
        match self {
            Self::Scheme(scheme) => scheme.colors(),
            Self::List(colors) => colors.clone(),
            Self::Single(color) => vec![*color],
        }
    }
}

/// Assigns palette entries to keys in first-seen order, wrapping around.
#[derive(Debug)]
pub struct OrdinalColorScale {
    palette: Vec<Hsla>,
    domain: RefCell<HashMap<String, usize>>,
}

impl OrdinalColorScale {
    pub fn new(colors: &OrdinalColors) -> Self {
        Self {
            palette: colors.palette(),
            domain: RefCell::new(HashMap::new()),
        }
    }

    pub fn color(&self, key: &str) -> Hsla {
        if self.palette.is_empty() {
            return gpui::black();
        }
        let mut domain = self.domain.borrow_mut();
        let next = domain.len();
        let slot = *domain.entry(key.to_string()).or_insert(next);
        self.palette[slot % self.palette.len()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorModifier {
    Darker(f32),
    Brighter(f32),
    Opacity(f32),
}

impl ColorModifier {
    pub fn apply(&self, color: Hsla) -> Hsla {
        let color = D3Color::from_rgba(color.into());
        let modified = match *self {
            Self::Darker(k) => color.darker(k),
            Self::Brighter(k) => color.brighter(k),
            Self::Opacity(a) => color.with_opacity(a),
        };
        modified.to_rgba().into()
    }
}

/// Serializable form of [`InheritedColor`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InheritedColorConfig {
    Static(#[serde(with = "hex_color")] Hsla),
    Theme(ThemeColor),
    FromColor { modifiers: Vec<ColorModifier> },
}

impl InheritedColorConfig {
    pub fn from_color(modifiers: impl IntoIterator<Item = ColorModifier>) -> Self {
        Self::FromColor {
            modifiers: modifiers.into_iter().collect(),
        }
    }
}

/// Color derived from a node (usually a parent) or from the theme.
pub enum InheritedColor<D> {
    Static(Hsla),
    Theme(ThemeColor),
    /// The node's own color with modifiers applied in order.
    FromColor(Vec<ColorModifier>),
    Custom(Rc<dyn Fn(&ComputedNode<D>) -> Hsla>),
}

impl<D> InheritedColor<D> {
    pub fn custom(f: impl Fn(&ComputedNode<D>) -> Hsla + 'static) -> Self {
        Self::Custom(Rc::new(f))
    }

    pub fn resolve(&self, node: &ComputedNode<D>, theme: &ChartTheme) -> Hsla {
        match self {
            Self::Static(color) => *color,
            Self::Theme(key) => theme.color(*key),
            Self::FromColor(modifiers) => modifiers
                .iter()
                .fold(node.color, |color, modifier| modifier.apply(color)),
            Self::Custom(f) => f(node),
        }
    }
}

impl<D> Clone for InheritedColor<D> {
    fn clone(&self) -> Self {
        match self {
            Self::Static(color) => Self::Static(*color),
            Self::Theme(key) => Self::Theme(*key),
            Self::FromColor(modifiers) => Self::FromColor(modifiers.clone()),
            Self::Custom(f) => Self::Custom(f.clone()),
        }
    }
}

impl<D> From<&InheritedColorConfig> for InheritedColor<D> {
    fn from(config: &InheritedColorConfig) -> Self {
        match config {
            InheritedColorConfig::Static(color) => Self::Static(*color),
            InheritedColorConfig::Theme(key) => Self::Theme(*key),
            InheritedColorConfig::FromColor { modifiers } => Self::FromColor(modifiers.clone()),
        }
    }
}

impl<D> std::fmt::Debug for InheritedColor<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static(color) => f.debug_tuple("Static").field(color).finish(),
            Self::Theme(key) => f.debug_tuple("Theme").field(key).finish(),
            Self::FromColor(modifiers) => f.debug_tuple("FromColor").field(modifiers).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
