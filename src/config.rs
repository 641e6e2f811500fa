use std::f64::consts::PI;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DiagramError;
use crate::palette::Rgb;
use crate::theme::Theme;

/// An angular interval in radians, measured clockwise from 3 o'clock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub start: f64,
    pub end: f64,
}

impl Sector {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn span(&self) -> f64 {
        self.end - self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataColumns {
    pub target_id: usize,
    pub weight: usize,
    pub source_id: usize,
    pub position_hint: usize,
}

impl Default for DataColumns {
    fn default() -> Self {
        Self {
            target_id: 0,
            weight: 1,
            source_id: 2,
            position_hint: 3,
        }
    }
}

/// Stroke width range for connection curves; the heaviest connection gets `max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeRange {
    pub min: f64,
    pub max: f64,
}

impl StrokeRange {
    pub fn lerp(&self, t: f64) -> f64 {
        self.min + t * (self.max - self.min)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub center: (f64, f64),
    pub graph_radius: f64,
    pub target_arc_width: f64,
    pub target_sector: Sector,
    pub source_sector: Sector,
    pub connect_width: StrokeRange,
    /// Added to the end of every target arc so adjacent arcs overlap instead
    /// of leaving hairline seams in some renderers.
    pub arc_seam_epsilon: f64,
    /// Estimated glyph advance as a fraction of the font size.
    pub char_width_ratio: f64,
    pub horizontal_labels: bool,
    pub label_path_factor: f64,
    pub radial_label_factor: f64,
    pub source_label_gap: f64,
    pub use_position_hint: bool,
    /// Seeds the random colors used once the palette runs out.
    pub color_seed: Option<u64>,
    pub data_columns: DataColumns,
}

impl LayoutConfig {
    pub fn set_canvas_size(&mut self, size: f64) {
        self.canvas_width = size;
        self.canvas_height = size;
        self.center = (size / 2.0, size / 2.0);
    }

    /// Radius of the center line of the target arcs.
    pub fn target_arc_radius(&self) -> f64 {
        self.graph_radius + self.target_arc_width / 2.0
    }

    /// Radius of the guide path that horizontal target labels follow.
    pub fn label_path_radius(&self) -> f64 {
        self.graph_radius + self.target_arc_width * self.label_path_factor
    }

    /// Radius at which rotated target labels start.
    pub fn radial_label_radius(&self) -> f64 {
        self.graph_radius + self.target_arc_width * self.radial_label_factor
    }

    pub fn source_label_radius(&self) -> f64 {
        self.graph_radius + self.source_label_gap
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: 500.0,
            canvas_height: 500.0,
            center: (250.0, 250.0),
            graph_radius: 150.0,
            target_arc_width: 65.0,
            target_sector: Sector::new(PI * 1.15, PI * 1.85),
            source_sector: Sector::new(PI * -0.1, PI * 1.1),
            connect_width: StrokeRange { min: 1.0, max: 5.0 },
            arc_seam_epsilon: 0.001,
            char_width_ratio: 0.5,
            horizontal_labels: true,
            label_path_factor: 0.4,
            radial_label_factor: 0.2,
            source_label_gap: 2.0,
            use_position_hint: true,
            color_seed: None,
            data_columns: DataColumns::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Raster scale applied when exporting PNG.
    pub scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::classic(),
            layout: LayoutConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataColumnsOptions {
    #[serde(alias = "targetID")]
    pub target_id: Option<usize>,
    pub weight: Option<usize>,
    #[serde(alias = "sourceID")]
    pub source_id: Option<usize>,
    pub position_hint: Option<usize>,
}

/// User-facing options, as accepted from a JSON options file or the wasm API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramOptions {
    pub theme: Option<String>,
    pub canvas_size: Option<f64>,
    pub graph_radius: Option<f64>,
    pub target_text_color: Option<String>,
    pub source_text_color: Option<String>,
    pub target_arc_width: Option<f64>,
    pub data_columns: Option<DataColumnsOptions>,
    pub color_palette: Option<Vec<Rgb>>,
    pub horizontal_labels: Option<bool>,
    pub use_position_hint: Option<bool>,
    pub color_seed: Option<u64>,
    pub font_family: Option<String>,
}

impl Config {
    /// Applies `options` on top of the current configuration. Nothing is
    /// changed when any option is rejected.
    pub fn apply_options(&mut self, options: &DiagramOptions) -> Result<(), DiagramError> {
        let next = self.with_options(options).inspect_err(|err| {
            tracing::warn!(error = %err, "rejected diagram options");
        })?;
        *self = next;
        Ok(())
    }

    fn with_options(&self, options: &DiagramOptions) -> Result<Config, DiagramError> {
        let mut next = self.clone();

        if let Some(name) = options.theme.as_deref() {
            let theme = Theme::by_name(name).ok_or_else(|| {
                DiagramError::invalid_option("theme", format!("unknown theme `{name}`"))
            })?;
            next.theme = theme;
        }

        if let Some(size) = options.canvas_size {
            if !(size.is_finite() && size > 0.0) {
                return Err(DiagramError::invalid_option(
                    "canvasSize",
                    format!("canvas size must be positive, got {size}"),
                ));
            }
            next.layout.set_canvas_size(size);
        }

        if let Some(radius) = options.graph_radius {
            let limit = next.layout.canvas_width.min(next.layout.canvas_height);
            if !(radius.is_finite() && radius > 0.0) {
                return Err(DiagramError::invalid_option(
                    "graphRadius",
                    format!("graph radius must be positive, got {radius}"),
                ));
            }
            if radius > limit {
                return Err(DiagramError::invalid_option(
                    "graphRadius",
                    format!("graph radius ({radius}) larger than canvas size ({limit})"),
                ));
            }
            next.layout.graph_radius = radius;
        }

        if let Some(color) = &options.target_text_color {
            next.theme.target_text_color = color.clone();
        }
        if let Some(color) = &options.source_text_color {
            next.theme.source_text_color = color.clone();
        }

        if let Some(width) = options.target_arc_width {
            if !(width.is_finite() && width >= 0.0) {
                return Err(DiagramError::invalid_option(
                    "targetArcWidth",
                    format!("target arc width must not be negative, got {width}"),
                ));
            }
            next.layout.target_arc_width = width;
        }

        if let Some(columns) = &options.data_columns {
            let current = &mut next.layout.data_columns;
            if let Some(col) = columns.target_id {
                current.target_id = col;
            }
            if let Some(col) = columns.weight {
                current.weight = col;
            }
            if let Some(col) = columns.source_id {
                current.source_id = col;
            }
            if let Some(col) = columns.position_hint {
                current.position_hint = col;
            }
        }

        if let Some(palette) = &options.color_palette {
            if palette.is_empty() {
                return Err(DiagramError::invalid_option(
                    "colorPalette",
                    "palette must contain at least one color",
                ));
            }
            next.theme.palette = palette.clone();
        }

        if let Some(horizontal) = options.horizontal_labels {
            next.layout.horizontal_labels = horizontal;
        }
        if let Some(use_hint) = options.use_position_hint {
            next.layout.use_position_hint = use_hint;
        }
        if let Some(seed) = options.color_seed {
            next.layout.color_seed = Some(seed);
        }
        if let Some(family) = &options.font_family {
            next.theme.font_family = family.clone();
        }

        Ok(next)
    }
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let options: DiagramOptions = serde_json::from_str(&contents)?;
    config.apply_options(&options)?;
    Ok(config)
}
