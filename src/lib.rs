pub mod aggregate;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod diagram;
pub mod error;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod palette;
pub mod render;
pub mod table;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, DiagramOptions, LayoutConfig};
pub use diagram::ChordDiagram;
pub use error::DiagramError;
pub use ir::{RawCell, RawEdge};
pub use layout::{Drawing, compute_layout};
pub use render::render_svg;
pub use theme::Theme;

/// Parses `csv` (with a header row) and renders it as an SVG chord diagram.
pub fn render_csv_with_options(csv: &str, options: &DiagramOptions) -> anyhow::Result<String> {
    let mut diagram = ChordDiagram::new();
    diagram.set_options(options)?;
    let table = table::CsvTable::parse(csv, true)?;
    let drawing = diagram.draw_table(&table)?;
    Ok(render_svg(&drawing, &diagram.config().theme))
}
