//! Folds raw edge rows into the target/source model.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{DiagramError, MIN_ROWS, Result};
use crate::ir::{
    ChordModel, Connection, DefaultReason, Extent, FALLBACK_LABEL, Parsed, RawCell, RawEdge,
};
use crate::palette::{ColorPalette, Rgb};

/// Below this many rows the position hints are ignored; there are too few
/// points for an ordering to mean anything.
pub const MIN_ROWS_FOR_POSITION_HINT: usize = 4;

const DATE_TIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

#[derive(Debug, Clone)]
pub struct IngestOptions<'a> {
    pub palette: &'a [Rgb],
    pub use_position_hint: bool,
    /// Seeds the random colors handed out once the palette is exhausted.
    pub color_seed: Option<u64>,
}

pub fn ingest(records: &[RawEdge], options: &IngestOptions<'_>) -> Result<ChordModel> {
    let rows = records.len();
    if rows < MIN_ROWS {
        return Err(DiagramError::InsufficientData {
            rows,
            required: MIN_ROWS,
        });
    }

    let use_position_hint = options.use_position_hint
        && rows >= MIN_ROWS_FOR_POSITION_HINT
        && records.iter().any(RawEdge::has_position_hint);

    let mut palette = match options.color_seed {
        Some(seed) => ColorPalette::with_seed(options.palette, seed),
        None => ColorPalette::new(options.palette),
    };
    let mut model = ChordModel::new(use_position_hint);
    model.rows = rows;

    for (row, record) in records.iter().enumerate() {
        let target_id = log_default(row, "target", parse_label(&record.target)).into_value();
        let weight = log_default(row, "weight", parse_weight(&record.weight)).into_value();
        let source_id = log_default(row, "source", parse_label(&record.source)).into_value();
        let position_hint = log_default(
            row,
            "position_hint",
            parse_position_hint(record.position_hint.as_ref(), use_position_hint),
        )
        .into_value();

        let target = model.ensure_target(&target_id, || palette.next_color());
        target.connections.push(Connection {
            source_id: source_id.clone(),
            weight,
            position_hint,
        });
        target.total_weight += weight;

        model.ensure_source(&source_id);
        model.position_hints.observe(position_hint);
        model.connection_weights.observe(weight);
        model.total_weight += weight;
    }

    let mut target_weights = Extent::EMPTY;
    for target in model.targets.values() {
        target_weights.observe(target.total_weight);
    }
    model.target_weights = target_weights;

    tracing::debug!(
        rows,
        targets = model.num_targets(),
        sources = model.num_sources(),
        total_weight = model.total_weight,
        use_position_hint,
        "aggregated chord model"
    );
    Ok(model)
}

fn log_default<T>(row: usize, field: &'static str, parsed: Parsed<T>) -> Parsed<T> {
    if let Some(reason) = parsed.reason() {
        tracing::debug!(row, field, reason = reason.as_str(), "defaulted cell");
    }
    parsed
}

/// Trimmed label text, or [`FALLBACK_LABEL`] for anything unusable.
pub fn parse_label(cell: &RawCell) -> Parsed<String> {
    match cell {
        RawCell::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Parsed::Defaulted(FALLBACK_LABEL.to_string(), DefaultReason::Empty)
            } else {
                Parsed::Parsed(trimmed.to_string())
            }
        }
        RawCell::Number(_) | RawCell::Empty => {
            Parsed::Defaulted(FALLBACK_LABEL.to_string(), DefaultReason::NotText)
        }
    }
}

/// Integer weight; fractional parts are truncated and anything that is not
/// a finite, non-negative number becomes 0.
pub fn parse_weight(cell: &RawCell) -> Parsed<f64> {
    let value = match cell {
        RawCell::Number(value) => *value,
        RawCell::Text(text) => match leading_integer(text) {
            Some(value) => value,
            None => return Parsed::Defaulted(0.0, DefaultReason::NotANumber),
        },
        RawCell::Empty => return Parsed::Defaulted(0.0, DefaultReason::Missing),
    };
    if !value.is_finite() {
        return Parsed::Defaulted(0.0, DefaultReason::NotANumber);
    }
    let value = value.trunc();
    if value < 0.0 {
        return Parsed::Defaulted(0.0, DefaultReason::Negative);
    }
    Parsed::Parsed(value)
}

fn leading_integer(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let unsigned = trimmed.trim_start_matches(['+', '-']);
    let sign_len = trimmed.len() - unsigned.len();
    if sign_len > 1 {
        return None;
    }
    let digits_len = unsigned
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits_len == 0 {
        return None;
    }
    trimmed[..sign_len + digits_len].parse::<f64>().ok()
}

pub fn parse_position_hint(cell: Option<&RawCell>, enabled: bool) -> Parsed<f64> {
    if !enabled {
        return Parsed::Defaulted(0.0, DefaultReason::Disabled);
    }
    match cell {
        Some(RawCell::Number(value)) if value.is_finite() => Parsed::Parsed(*value),
        Some(RawCell::Number(_)) => Parsed::Defaulted(0.0, DefaultReason::NotANumber),
        // Tabular sources hand over formatted text, so plain numbers arrive
        // as strings too.
        Some(RawCell::Text(text)) => match text.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Parsed::Parsed(value),
            _ => match parse_date(text) {
                Some(timestamp) => Parsed::Parsed(timestamp),
                None => Parsed::Defaulted(0.0, DefaultReason::UnparseableDate),
            },
        },
        Some(RawCell::Empty) | None => Parsed::Defaulted(0.0, DefaultReason::Missing),
    }
}

/// Milliseconds since the Unix epoch. Dates without an offset are read as UTC.
pub fn parse_date(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.timestamp_millis() as f64);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(text) {
        return Some(parsed.timestamp_millis() as f64);
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(parsed.and_utc().timestamp_millis() as f64);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(text, format) {
            let midnight = parsed.and_hms_opt(0, 0, 0)?;
            return Some(midnight.and_utc().timestamp_millis() as f64);
        }
    }
    None
}
