use crate::config::RenderConfig;
use crate::layout::{
    ArcPath, ArcPrimitive, CurvePath, CurvePrimitive, Drawing, LabelRole, Primitive,
    TextPlacement, TextPrimitive,
};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

pub fn render_svg(drawing: &Drawing, theme: &Theme) -> String {
    let mut svg = String::new();
    let width = drawing.width;
    let height = drawing.height;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" version=\"1.1\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));

    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        escape_xml(&theme.background)
    ));

    svg.push_str("<defs>");
    svg.push_str(&arc_svg(&drawing.label_path));
    svg.push_str("</defs>");

    for primitive in &drawing.primitives {
        match primitive {
            Primitive::Arc(arc) => svg.push_str(&arc_svg(arc)),
            Primitive::Curve(curve) => svg.push_str(&curve_svg(curve)),
            Primitive::Text(text) => {
                svg.push_str(&text_svg(text, &drawing.label_path.id, theme))
            }
        }
    }

    svg.push_str("</svg>");
    svg
}

pub fn arc_path_data(path: &ArcPath) -> String {
    format!(
        "M{:.2},{:.2} A{:.2},{:.2} 0 {} {} {:.2},{:.2}",
        path.start.x,
        path.start.y,
        path.radius,
        path.radius,
        u8::from(path.large_arc),
        u8::from(path.sweep),
        path.end.x,
        path.end.y
    )
}

pub fn curve_path_data(path: &CurvePath) -> String {
    format!(
        "M{:.2},{:.2} Q{:.2},{:.2} {:.2},{:.2}",
        path.start.x, path.start.y, path.control.x, path.control.y, path.end.x, path.end.y
    )
}

fn arc_svg(arc: &ArcPrimitive) -> String {
    let mut attrs = String::new();
    if let Some(stroke) = arc.stroke {
        attrs.push_str(&format!(" stroke=\"{stroke}\""));
    }
    if let Some(width) = arc.stroke_width {
        attrs.push_str(&format!(" stroke-width=\"{width:.2}\""));
    }
    format!(
        "<path id=\"{}\" fill=\"none\"{} d=\"{}\"/>",
        escape_xml(&arc.id),
        attrs,
        arc_path_data(&arc.path)
    )
}

fn curve_svg(curve: &CurvePrimitive) -> String {
    format!(
        "<path id=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{:.2}\" d=\"{}\"/>",
        escape_xml(&curve.id),
        curve.stroke,
        curve.stroke_width,
        curve_path_data(&curve.path)
    )
}

fn text_svg(text: &TextPrimitive, guide_id: &str, theme: &Theme) -> String {
    let common = format!(
        "id=\"{}\" fill=\"{}\" font-size=\"{}\" font-family=\"{}\"",
        escape_xml(&text.id),
        escape_xml(&text.color),
        text.font_size,
        escape_xml(&theme.font_family)
    );
    match text.placement {
        TextPlacement::AlongPath { start_offset } => {
            let variant = match text.role {
                LabelRole::Target => format!(
                    " font-variant=\"{}\"",
                    escape_xml(&theme.target_font_variant)
                ),
                LabelRole::Source => String::new(),
            };
            format!(
                "<text {common}{variant} text-anchor=\"middle\"><textPath xlink:href=\"#{}\" startOffset=\"{start_offset:.2}\">{}</textPath></text>",
                escape_xml(guide_id),
                escape_xml(&text.text)
            )
        }
        TextPlacement::Radial {
            x,
            y,
            anchor,
            rotation,
            origin,
        } => format!(
            "<text {common} x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"{}\" transform=\"rotate({rotation:.2} {:.2},{:.2})\">{}</text>",
            anchor.as_str(),
            origin.x,
            origin.y,
            escape_xml(&text.text)
        ),
    }
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let scale = render_cfg.scale.max(0.01);
    let size = tree
        .size()
        .to_int_size()
        .scale_by(scale)
        .ok_or_else(|| anyhow::anyhow!("Invalid PNG scale {scale}"))?;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap_mut,
    );
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig) -> Result<()> {
    Err(anyhow::anyhow!(
        "PNG output requires the `png` feature"
    ))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
