use crate::palette::Rgb;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Endpoints and flags of a circular arc, ready for an SVG `A` command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPath {
    pub start: Point,
    pub end: Point,
    pub radius: f64,
    pub large_arc: bool,
    pub sweep: bool,
}

/// A quadratic Bezier between two points on a circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePath {
    pub start: Point,
    pub control: Point,
    pub end: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextPlacement {
    /// Centered along the drawing's label guide path.
    AlongPath { start_offset: f64 },
    /// Anchored at `(x, y)` and rotated by `rotation` degrees around `origin`.
    Radial {
        x: f64,
        y: f64,
        anchor: TextAnchor,
        rotation: f64,
        origin: Point,
    },
}

impl TextPlacement {
    pub fn is_along_path(&self) -> bool {
        matches!(self, Self::AlongPath { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRole {
    Target,
    Source,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArcPrimitive {
    pub id: String,
    pub path: ArcPath,
    pub stroke: Option<Rgb>,
    pub stroke_width: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurvePrimitive {
    pub id: String,
    pub path: CurvePath,
    pub stroke: Rgb,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub id: String,
    pub text: String,
    pub role: LabelRole,
    pub placement: TextPlacement,
    pub font_size: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Arc(ArcPrimitive),
    Curve(CurvePrimitive),
    Text(TextPrimitive),
}

impl Primitive {
    pub fn id(&self) -> &str {
        match self {
            Self::Arc(arc) => &arc.id,
            Self::Curve(curve) => &curve.id,
            Self::Text(text) => &text.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TargetLayout {
    pub id: String,
    pub name: String,
    pub color: Rgb,
    pub start_angle: f64,
    pub end_angle: f64,
    pub total_weight: f64,
    pub connections: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceLayout {
    pub id: String,
    pub name: String,
    pub angle: f64,
}

/// Everything an SVG (or other) backend needs to draw one chord diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    pub width: f64,
    pub height: f64,
    pub center: Point,
    /// Invisible path that horizontal target labels are laid along.
    pub label_path: ArcPrimitive,
    pub primitives: Vec<Primitive>,
    pub target_colors: Vec<Rgb>,
    pub targets: Vec<TargetLayout>,
    pub sources: Vec<SourceLayout>,
    pub use_position_hint: bool,
}

impl Drawing {
    pub fn arcs(&self) -> impl Iterator<Item = &ArcPrimitive> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Arc(arc) => Some(arc),
            _ => None,
        })
    }

    pub fn curves(&self) -> impl Iterator<Item = &CurvePrimitive> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Curve(curve) => Some(curve),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn primitive(&self, id: &str) -> Option<&Primitive> {
        self.primitives.iter().find(|primitive| primitive.id() == id)
    }
}
