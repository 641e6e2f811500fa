use std::collections::HashMap;

use crate::palette::Rgb;

/// Label used for target or source cells that are not usable text.
pub const FALLBACK_LABEL: &str = "invalid";

/// One formatted cell as handed over by a tabular data source.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Text(String),
    Number(f64),
    Empty,
}

impl RawCell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

impl From<&str> for RawCell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawCell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for RawCell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for RawCell {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

/// An unvalidated `source -> target` row.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEdge {
    pub target: RawCell,
    pub weight: RawCell,
    pub source: RawCell,
    pub position_hint: Option<RawCell>,
}

impl RawEdge {
    pub fn new(
        target: impl Into<RawCell>,
        weight: impl Into<RawCell>,
        source: impl Into<RawCell>,
    ) -> Self {
        Self {
            target: target.into(),
            weight: weight.into(),
            source: source.into(),
            position_hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<RawCell>) -> Self {
        self.position_hint = Some(hint.into());
        self
    }

    /// True when the row carries a non-empty hint cell.
    pub fn has_position_hint(&self) -> bool {
        matches!(&self.position_hint, Some(cell) if *cell != RawCell::Empty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultReason {
    NotText,
    Empty,
    NotANumber,
    Negative,
    UnparseableDate,
    Missing,
    Disabled,
}

impl DefaultReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotText => "not text",
            Self::Empty => "empty",
            Self::NotANumber => "not a number",
            Self::Negative => "negative",
            Self::UnparseableDate => "unparseable date",
            Self::Missing => "missing",
            Self::Disabled => "disabled",
        }
    }
}

/// Outcome of parsing one field: either the parsed value or the default it
/// was replaced with.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed<T> {
    Parsed(T),
    Defaulted(T, DefaultReason),
}

impl<T> Parsed<T> {
    pub fn value(&self) -> &T {
        match self {
            Self::Parsed(value) | Self::Defaulted(value, _) => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Parsed(value) | Self::Defaulted(value, _) => value,
        }
    }

    pub fn reason(&self) -> Option<DefaultReason> {
        match self {
            Self::Parsed(_) => None,
            Self::Defaulted(_, reason) => Some(*reason),
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Self::Defaulted(..))
    }
}

/// A value mapped into `[0, 1]` against an [`Extent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Normalized {
    Scaled(f64),
    /// The extent collapsed to a single value (or was never observed).
    Degenerate,
}

impl Normalized {
    pub const DEGENERATE_VALUE: f64 = 0.5;

    pub fn value(self) -> f64 {
        match self {
            Self::Scaled(t) => t,
            Self::Degenerate => Self::DEGENERATE_VALUE,
        }
    }
}

/// Running min/max of an observed quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    pub const EMPTY: Extent = Extent {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    pub fn observe(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    pub fn span(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max - self.min
        }
    }

    pub fn normalize(&self, value: f64) -> Normalized {
        let span = self.span();
        if !(span.is_finite() && span > 0.0) {
            return Normalized::Degenerate;
        }
        Normalized::Scaled((value - self.min) / span)
    }
}

impl Default for Extent {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub source_id: String,
    pub weight: f64,
    pub position_hint: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub id: String,
    pub name: String,
    pub color: Rgb,
    pub connections: Vec<Connection>,
    pub total_weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub id: String,
    pub name: String,
}

/// Aggregated targets and sources of one diagram, with the statistics the
/// layout normalizes against.
#[derive(Debug, Clone)]
pub struct ChordModel {
    pub targets: HashMap<String, Target>,
    pub target_order: Vec<String>,
    pub sources: HashMap<String, Source>,
    pub source_order: Vec<String>,
    pub connection_weights: Extent,
    pub total_weight: f64,
    pub position_hints: Extent,
    pub target_weights: Extent,
    pub use_position_hint: bool,
    pub rows: usize,
}

impl ChordModel {
    pub fn new(use_position_hint: bool) -> Self {
        Self {
            targets: HashMap::new(),
            target_order: Vec::new(),
            sources: HashMap::new(),
            source_order: Vec::new(),
            connection_weights: Extent::EMPTY,
            total_weight: 0.0,
            position_hints: Extent::EMPTY,
            target_weights: Extent::EMPTY,
            use_position_hint,
            rows: 0,
        }
    }

    /// Returns the target for `id`, creating it with a color from `color`
    /// on first sighting.
    pub fn ensure_target(&mut self, id: &str, color: impl FnOnce() -> Rgb) -> &mut Target {
        if !self.targets.contains_key(id) {
            self.target_order.push(id.to_string());
        }
        self.targets.entry(id.to_string()).or_insert_with(|| Target {
            id: id.to_string(),
            name: id.to_string(),
            color: color(),
            connections: Vec::new(),
            total_weight: 0.0,
        })
    }

    pub fn ensure_source(&mut self, id: &str) -> &mut Source {
        if !self.sources.contains_key(id) {
            self.source_order.push(id.to_string());
        }
        self.sources.entry(id.to_string()).or_insert_with(|| Source {
            id: id.to_string(),
            name: id.to_string(),
        })
    }

    /// Targets in first-sighting order.
    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.target_order
            .iter()
            .filter_map(|id| self.targets.get(id))
    }

    /// Sources in first-sighting order.
    pub fn sources(&self) -> impl Iterator<Item = &Source> {
        self.source_order
            .iter()
            .filter_map(|id| self.sources.get(id))
    }

    pub fn target(&self, id: &str) -> Option<&Target> {
        self.targets.get(id)
    }

    pub fn source(&self, id: &str) -> Option<&Source> {
        self.sources.get(id)
    }

    pub fn num_targets(&self) -> usize {
        self.target_order.len()
    }

    pub fn num_sources(&self) -> usize {
        self.source_order.len()
    }

    pub fn num_connections(&self) -> usize {
        self.targets.values().map(|t| t.connections.len()).sum()
    }

    pub fn target_colors(&self) -> Vec<Rgb> {
        self.targets().map(|target| target.color).collect()
    }
}
