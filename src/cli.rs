use crate::config::{Config, DiagramOptions, load_config};
use crate::diagram::ChordDiagram;
use crate::layout_dump::{dump_json, write_layout_dump};
use crate::render::{render_svg, write_output_png, write_output_svg};
use crate::table::CsvTable;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "chordr", version, about = "Chord diagram renderer for weighted source/target tables")]
pub struct Args {
    /// Input CSV file or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png/json). Defaults to stdout for SVG and JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Options JSON file (canvasSize, graphRadius, colorPalette, ...)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Color theme
    #[arg(short = 't', long = "theme")]
    pub theme: Option<String>,

    /// Canvas width and height
    #[arg(short = 's', long = "canvas-size")]
    pub canvas_size: Option<f64>,

    /// Radius of the circle the curves end on
    #[arg(short = 'r', long = "graph-radius")]
    pub graph_radius: Option<f64>,

    /// Treat the first CSV row as data instead of a header
    #[arg(long = "no-header")]
    pub no_header: bool,

    /// Always draw target labels radially
    #[arg(long = "radial-labels")]
    pub radial_labels: bool,

    /// Seed for colors generated after the palette runs out
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Also write the computed layout as JSON to this path
    #[arg(long = "dump-layout")]
    pub dump_layout: Option<PathBuf>,

    /// PNG scale factor
    #[arg(long = "scale", default_value_t = 1.0)]
    pub scale: f32,

    /// Log debug output to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    apply_cli_overrides(&mut config, &args)?;

    let input = read_input(args.input.as_deref())?;
    let table = CsvTable::parse(&input, !args.no_header)?;
    let diagram = ChordDiagram::with_config(config);
    let drawing = diagram.draw_table(&table)?;
    let config = diagram.config();

    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &drawing)?;
    }

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&drawing, &config.theme);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            let svg = render_svg(&drawing, &config.theme);
            write_output_png(&svg, &output, &config.render)?;
        }
        OutputFormat::Json => {
            let json = dump_json(&drawing)?;
            write_output_svg(&json, args.output.as_deref())?;
        }
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn apply_cli_overrides(config: &mut Config, args: &Args) -> Result<()> {
    let options = DiagramOptions {
        theme: args.theme.clone(),
        canvas_size: args.canvas_size,
        graph_radius: args.graph_radius,
        horizontal_labels: args.radial_labels.then_some(false),
        color_seed: args.seed,
        ..Default::default()
    };
    config.apply_options(&options)?;
    config.render.scale = args.scale;
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}
