use chord_rs_renderer::{DiagramOptions, render_csv_with_options};
use wasm_bindgen::prelude::*;

fn parse_options(options_json: Option<String>) -> Result<DiagramOptions, String> {
    match options_json {
        Some(raw_options) => {
            serde_json::from_str::<DiagramOptions>(&raw_options).map_err(|error| error.to_string())
        }
        None => Ok(DiagramOptions::default()),
    }
}

fn render(csv: &str, options_json: Option<String>) -> Result<String, String> {
    let options = parse_options(options_json)?;
    render_csv_with_options(csv, &options).map_err(|error| error.to_string())
}

/// Renders a CSV table (header row first) as an SVG chord diagram.
///
/// This crate builds the renderer without OS entropy, so colors past the end
/// of the palette come from `colorSeed` or a fixed default seed.
#[wasm_bindgen]
pub fn render_chord_svg(csv: &str, options_json: Option<String>) -> Result<String, JsValue> {
    render(csv, options_json).map_err(|error| JsValue::from_str(&error))
}
