use serde::{Deserialize, Serialize};

use crate::palette::{CLASSIC_COLORS, Rgb, VIVID_COLORS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub target_text_size: f64,
    pub target_text_color: String,
    pub target_font_variant: String,
    pub source_text_size: f64,
    pub source_text_color: String,
    pub background: String,
    pub palette: Vec<Rgb>,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "Verdana, Arial, sans-serif".to_string(),
            target_text_size: 12.0,
            target_text_color: "#FFFFFF".to_string(),
            target_font_variant: "small-caps".to_string(),
            source_text_size: 10.0,
            source_text_color: "#000000".to_string(),
            background: "#FFFFFF".to_string(),
            palette: CLASSIC_COLORS.to_vec(),
        }
    }

    pub fn vivid() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            target_text_color: "#1C2430".to_string(),
            palette: VIVID_COLORS.to_vec(),
            ..Self::classic()
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "classic" | "default" => Some(Self::classic()),
            "vivid" => Some(Self::vivid()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
