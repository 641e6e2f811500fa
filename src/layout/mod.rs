pub mod angles;
pub mod geometry;
pub mod text;
pub(crate) mod types;
pub use angles::*;
pub use geometry::*;
pub use text::*;
pub use types::*;

use std::collections::HashSet;

use crate::config::LayoutConfig;
use crate::ir::ChordModel;
use crate::theme::Theme;

/// Id of the guide path that horizontal target labels reference.
pub const LABEL_PATH_ID: &str = "horitexthelper";

/// Hands out SVG-safe primitive ids. Ids are derived from the labels; a
/// clash (a source and a target sharing a label, or two labels that sanitize
/// alike) gets a numeric suffix in draw order.
#[derive(Debug, Default)]
struct PrimitiveIds {
    used: HashSet<String>,
}

impl PrimitiveIds {
    fn new() -> Self {
        let mut ids = Self::default();
        ids.used.insert(LABEL_PATH_ID.to_string());
        ids
    }

    fn claim(&mut self, parts: &[&str], suffix: &str) -> String {
        let mut base = parts
            .iter()
            .map(|part| sanitize_id_part(part))
            .collect::<Vec<_>>()
            .join("_");
        if !suffix.is_empty() {
            base.push('_');
            base.push_str(suffix);
        }
        if base.starts_with(|ch: char| !(ch.is_ascii_alphabetic() || ch == '_')) {
            base.insert(0, '_');
        }

        let mut id = base.clone();
        let mut n = 2;
        while !self.used.insert(id.clone()) {
            id = format!("{base}-{n}");
            n += 1;
        }
        id
    }
}

/// Replaces anything that is not valid inside an XML name.
pub fn sanitize_id_part(label: &str) -> String {
    let sanitized: String = label
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '.' {
                ch
            } else {
                '_'
            }
        })
        .collect();
    if sanitized.is_empty() {
        "_".to_string()
    } else {
        sanitized
    }
}

pub fn compute_layout(model: &ChordModel, theme: &Theme, config: &LayoutConfig) -> Drawing {
    let angles = assign_angles(model, config);
    let mut ids = PrimitiveIds::new();
    let center = Point::new(config.center.0, config.center.1);
    let mut primitives = Vec::with_capacity(
        model.num_sources() + model.num_targets() * 2 + model.num_connections(),
    );

    let label_path = ArcPrimitive {
        id: LABEL_PATH_ID.to_string(),
        path: arc(center, config.label_path_radius(), 0.0, LABEL_PATH_SWEEP),
        stroke: None,
        stroke_width: None,
    };

    let mut sources = Vec::with_capacity(angles.sources.len());
    for placed in &angles.sources {
        let Some(source) = model.source(&placed.id) else {
            continue;
        };
        primitives.push(Primitive::Text(TextPrimitive {
            id: ids.claim(&[&source.id], "txt"),
            text: source.name.clone(),
            role: LabelRole::Source,
            placement: radial_label(
                placed.angle,
                config.source_label_radius(),
                center,
                theme.source_text_size,
            ),
            font_size: theme.source_text_size,
            color: theme.source_text_color.clone(),
        }));
        sources.push(SourceLayout {
            id: source.id.clone(),
            name: source.name.clone(),
            angle: placed.angle,
        });
    }

    let label_style = LabelStyle {
        font_size: theme.target_text_size,
        char_width_ratio: config.char_width_ratio,
        path_radius: config.label_path_radius(),
        radial_radius: config.radial_label_radius(),
        allow_horizontal: config.horizontal_labels,
    };

    let mut targets = Vec::with_capacity(angles.targets.len());
    for placed in &angles.targets {
        let Some(target) = model.target(&placed.id) else {
            continue;
        };
        let interval = placed.interval;

        if interval.span() > 0.0 {
            primitives.push(Primitive::Arc(ArcPrimitive {
                id: ids.claim(&[&target.id], "arc"),
                path: arc(
                    center,
                    config.target_arc_radius(),
                    interval.start,
                    interval.end + config.arc_seam_epsilon,
                ),
                stroke: Some(target.color),
                stroke_width: Some(config.target_arc_width),
            }));
        }

        primitives.push(Primitive::Text(TextPrimitive {
            id: ids.claim(&[&target.id], "txt"),
            text: target.name.clone(),
            role: LabelRole::Target,
            placement: place_label(
                &target.name,
                interval.start,
                interval.end,
                center,
                &label_style,
            ),
            font_size: theme.target_text_size,
            color: theme.target_text_color.clone(),
        }));

        for (idx, (connection, ends)) in target
            .connections
            .iter()
            .zip(&placed.connections)
            .enumerate()
        {
            let weight_t = model.connection_weights.normalize(connection.weight);
            primitives.push(Primitive::Curve(CurvePrimitive {
                id: ids.claim(&[&connection.source_id, &target.id], &idx.to_string()),
                path: quadratic_curve(
                    center,
                    config.graph_radius,
                    ends.source_angle,
                    ends.end_angle,
                ),
                stroke: target.color,
                stroke_width: config.connect_width.lerp(weight_t.value()),
            }));
        }

        targets.push(TargetLayout {
            id: target.id.clone(),
            name: target.name.clone(),
            color: target.color,
            start_angle: interval.start,
            end_angle: interval.end,
            total_weight: target.total_weight,
            connections: target.connections.len(),
        });
    }

    Drawing {
        width: config.canvas_width,
        height: config.canvas_height,
        center,
        label_path,
        primitives,
        target_colors: model.target_colors(),
        targets,
        sources,
        use_position_hint: model.use_position_hint,
    }
}
