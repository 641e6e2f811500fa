use std::collections::HashMap;

use crate::config::{LayoutConfig, Sector};
use crate::ir::{ChordModel, Normalized};

/// A target's share of the target sector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcInterval {
    pub start: f64,
    pub end: f64,
}

impl ArcInterval {
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    pub fn mid(&self) -> f64 {
        self.start + self.span() / 2.0
    }

    /// The angle a fraction `t` of the way through the interval.
    pub fn at(&self, t: f64) -> f64 {
        self.start + t * self.span()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionAngles {
    pub source_angle: f64,
    pub end_angle: f64,
    /// Position of the curve end inside the target interval.
    pub t: Normalized,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TargetAngles {
    pub id: String,
    pub interval: ArcInterval,
    pub connections: Vec<ConnectionAngles>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceAngle {
    pub id: String,
    pub angle: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AngleAssignment {
    pub targets: Vec<TargetAngles>,
    pub sources: Vec<SourceAngle>,
    source_index: HashMap<String, usize>,
}

impl AngleAssignment {
    pub fn source_angle(&self, id: &str) -> Option<f64> {
        self.source_index
            .get(id)
            .map(|&idx| self.sources[idx].angle)
    }

    pub fn target(&self, id: &str) -> Option<&TargetAngles> {
        self.targets.iter().find(|target| target.id == id)
    }

    /// Sum of all target interval lengths.
    pub fn covered_span(&self) -> f64 {
        self.targets.iter().map(|target| target.interval.span()).sum()
    }
}

pub fn assign_angles(model: &ChordModel, config: &LayoutConfig) -> AngleAssignment {
    let mut assignment = AngleAssignment::default();

    for (idx, angle) in source_angles(model.num_sources(), config.source_sector)
        .into_iter()
        .enumerate()
    {
        let id = model.source_order[idx].clone();
        assignment.source_index.insert(id.clone(), idx);
        assignment.sources.push(SourceAngle { id, angle });
    }

    let sector = config.target_sector;
    let target_count = model.num_targets().max(1) as f64;
    let mut cursor = sector.start;
    for target in model.targets() {
        // With no weight anywhere the sector is shared evenly.
        let share = if model.total_weight > 0.0 {
            target.total_weight / model.total_weight
        } else {
            1.0 / target_count
        };
        let interval = ArcInterval {
            start: cursor,
            end: cursor + share * sector.span(),
        };
        cursor = interval.end;

        let connections = target
            .connections
            .iter()
            .map(|connection| {
                let t = if model.use_position_hint {
                    model.position_hints.normalize(connection.position_hint)
                } else {
                    model.connection_weights.normalize(connection.weight)
                };
                ConnectionAngles {
                    source_angle: assignment
                        .source_angle(&connection.source_id)
                        .unwrap_or(config.source_sector.start),
                    end_angle: interval.at(t.value()),
                    t,
                }
            })
            .collect();

        assignment.targets.push(TargetAngles {
            id: target.id.clone(),
            interval,
            connections,
        });
    }

    tracing::debug!(
        targets = assignment.targets.len(),
        sources = assignment.sources.len(),
        covered = assignment.covered_span(),
        "assigned angles"
    );
    assignment
}

/// Evenly spaced angles across `sector`, first at its start and last at its
/// end. A lone source sits at the start.
pub fn source_angles(count: usize, sector: Sector) -> Vec<f64> {
    if count == 1 {
        return vec![sector.start];
    }
    let step = sector.span() / count.saturating_sub(1).max(1) as f64;
    (0..count)
        .map(|idx| sector.start + idx as f64 * step)
        .collect()
}
