use crate::aggregate::{IngestOptions, ingest};
use crate::config::{Config, DiagramOptions};
use crate::error::Result;
use crate::ir::{ChordModel, RawEdge};
use crate::layout::{Drawing, compute_layout};
use crate::render::render_svg;
use crate::table::{DataTable, records_from_table};

/// One configured chord diagram. Every draw call builds its own model, so a
/// diagram can be reused for several data sets.
#[derive(Debug, Clone, Default)]
pub struct ChordDiagram {
    config: Config,
}

impl ChordDiagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Applies user options; on error the previous configuration stays.
    pub fn set_options(&mut self, options: &DiagramOptions) -> Result<()> {
        self.config.apply_options(options)
    }

    pub fn aggregate(&self, records: &[RawEdge]) -> Result<ChordModel> {
        let layout = &self.config.layout;
        ingest(
            records,
            &IngestOptions {
                palette: &self.config.theme.palette,
                use_position_hint: layout.use_position_hint,
                color_seed: layout.color_seed,
            },
        )
    }

    pub fn draw(&self, records: &[RawEdge]) -> Result<Drawing> {
        let model = self.aggregate(records)?;
        Ok(compute_layout(&model, &self.config.theme, &self.config.layout))
    }

    pub fn draw_table<T: DataTable + ?Sized>(&self, table: &T) -> Result<Drawing> {
        let records = records_from_table(table, &self.config.layout.data_columns);
        self.draw(&records)
    }

    pub fn render_svg(&self, records: &[RawEdge]) -> Result<String> {
        let drawing = self.draw(records)?;
        Ok(render_svg(&drawing, &self.config.theme))
    }
}
