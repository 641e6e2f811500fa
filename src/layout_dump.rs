use crate::layout::{Drawing, Primitive, TextPlacement};
use crate::palette::Rgb;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct DrawingDump {
    pub width: f64,
    pub height: f64,
    pub center: [f64; 2],
    pub use_position_hint: bool,
    pub target_colors: Vec<Rgb>,
    pub targets: Vec<TargetDump>,
    pub sources: Vec<SourceDump>,
    pub primitives: Vec<PrimitiveDump>,
}

#[derive(Debug, Serialize)]
pub struct TargetDump {
    pub id: String,
    pub name: String,
    pub color: Rgb,
    pub start_angle: f64,
    pub end_angle: f64,
    pub total_weight: f64,
    pub connections: usize,
}

#[derive(Debug, Serialize)]
pub struct SourceDump {
    pub id: String,
    pub name: String,
    pub angle: f64,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PrimitiveDump {
    Arc {
        id: String,
        start: [f64; 2],
        end: [f64; 2],
        radius: f64,
        large_arc: bool,
        sweep: bool,
        stroke: Option<Rgb>,
        stroke_width: Option<f64>,
    },
    Curve {
        id: String,
        start: [f64; 2],
        control: [f64; 2],
        end: [f64; 2],
        stroke: Rgb,
        stroke_width: f64,
    },
    Text {
        id: String,
        text: String,
        placement: String,
        anchor: Option<String>,
        position: Option<[f64; 2]>,
        rotation: Option<f64>,
        start_offset: Option<f64>,
    },
}

impl DrawingDump {
    pub fn from_drawing(drawing: &Drawing) -> Self {
        let targets = drawing
            .targets
            .iter()
            .map(|target| TargetDump {
                id: target.id.clone(),
                name: target.name.clone(),
                color: target.color,
                start_angle: target.start_angle,
                end_angle: target.end_angle,
                total_weight: target.total_weight,
                connections: target.connections,
            })
            .collect();

        let sources = drawing
            .sources
            .iter()
            .map(|source| SourceDump {
                id: source.id.clone(),
                name: source.name.clone(),
                angle: source.angle,
            })
            .collect();

        let primitives = drawing.primitives.iter().map(dump_primitive).collect();

        DrawingDump {
            width: drawing.width,
            height: drawing.height,
            center: [drawing.center.x, drawing.center.y],
            use_position_hint: drawing.use_position_hint,
            target_colors: drawing.target_colors.clone(),
            targets,
            sources,
            primitives,
        }
    }
}

fn dump_primitive(primitive: &Primitive) -> PrimitiveDump {
    match primitive {
        Primitive::Arc(arc) => PrimitiveDump::Arc {
            id: arc.id.clone(),
            start: [arc.path.start.x, arc.path.start.y],
            end: [arc.path.end.x, arc.path.end.y],
            radius: arc.path.radius,
            large_arc: arc.path.large_arc,
            sweep: arc.path.sweep,
            stroke: arc.stroke,
            stroke_width: arc.stroke_width,
        },
        Primitive::Curve(curve) => PrimitiveDump::Curve {
            id: curve.id.clone(),
            start: [curve.path.start.x, curve.path.start.y],
            control: [curve.path.control.x, curve.path.control.y],
            end: [curve.path.end.x, curve.path.end.y],
            stroke: curve.stroke,
            stroke_width: curve.stroke_width,
        },
        Primitive::Text(text) => match text.placement {
            TextPlacement::AlongPath { start_offset } => PrimitiveDump::Text {
                id: text.id.clone(),
                text: text.text.clone(),
                placement: "along_path".to_string(),
                anchor: None,
                position: None,
                rotation: None,
                start_offset: Some(start_offset),
            },
            TextPlacement::Radial {
                x,
                y,
                anchor,
                rotation,
                ..
            } => PrimitiveDump::Text {
                id: text.id.clone(),
                text: text.text.clone(),
                placement: "radial".to_string(),
                anchor: Some(anchor.as_str().to_string()),
                position: Some([x, y]),
                rotation: Some(rotation),
                start_offset: None,
            },
        },
    }
}

pub fn dump_json(drawing: &Drawing) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&DrawingDump::from_drawing(drawing))?)
}

pub fn write_layout_dump(path: &Path, drawing: &Drawing) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = DrawingDump::from_drawing(drawing);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
