use gpui::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq)]
pub struct ChartTheme {
    pub background: Hsla,
    pub labels_text: Hsla,
    pub label_size: Pixels,
    pub tooltip_background: Hsla,
    pub tooltip_text: Hsla,
    pub tooltip_text_size: Pixels,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: gpui::transparent_black(),
            labels_text: rgb(0x333333).into(),
            label_size: px(11.0),
            tooltip_background: gpui::white(),
            tooltip_text: rgb(0x333333).into(),
            tooltip_text_size: px(12.0),
        }
    }
}

/// Theme entries a color can be taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThemeColor {
    Background,
    LabelsText,
    TooltipBackground,
    TooltipText,
}

impl ChartTheme {
    pub fn color(&self, key: ThemeColor) -> Hsla {
        match key {
            ThemeColor::Background => self.background,
            ThemeColor::LabelsText => self.labels_text,
            ThemeColor::TooltipBackground => self.tooltip_background,
            ThemeColor::TooltipText => self.tooltip_text,
        }
    }
}
