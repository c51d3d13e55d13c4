use crate::config::{Config, load_config};
use crate::graph::load_graph;
use crate::node::NodeDisplayData;
use crate::progress::LoadProgress;
use crate::render::{render_svg, write_output_svg};
use crate::{RenderOptions, record_hover};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{Level, debug};

/// Where `--origin` moves the hovered node before painting.
const ORIGIN_X: f64 = 16.0;
const ORIGIN_Y: f64 = 48.0;

#[derive(Parser, Debug)]
#[command(name = "fhover", version, about = "Render graph node hover labels to SVG/PNG")]
pub struct Args {
    /// Node or graph JSON file, or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Label of the node to render. Defaults to the first node.
    #[arg(short = 'n', long = "node")]
    pub node: Option<String>,

    /// Output file. Defaults to stdout for SVG and JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (style, theme and render sections)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Base label size in px
    #[arg(short = 's', long = "labelSize")]
    pub label_size: Option<f64>,

    /// Label font family
    #[arg(short = 'f', long = "labelFont")]
    pub label_font: Option<String>,

    /// Label font weight
    #[arg(long = "labelWeight")]
    pub label_weight: Option<String>,

    /// Width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f64>,

    /// Height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f64>,

    /// Move the node next to the top-left corner instead of using its graph position
    #[arg(long = "origin")]
    pub origin: bool,

    /// Estimate text widths instead of loading system fonts
    #[arg(long = "fastText")]
    pub fast_text: bool,

    /// Log progress to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
    /// Recorded drawing commands
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = apply_args(load_config(args.config.as_deref())?, &args);
    let input = read_input(args.input.as_deref())?;
    let mut progress = LoadProgress::default();
    let graph = load_graph(&input, &mut progress)?;

    let mut node = match args.node.as_deref() {
        Some(label) => graph.find_node(label)?.clone(),
        None => graph.first_node()?.clone(),
    };
    if args.origin {
        move_to_origin(&mut node);
    }
    debug!(label = %node.label, node_type = %node.node_type, "rendering hover label");

    let mut options = RenderOptions::from(config);
    options.fast_text = args.fast_text;
    let commands = record_hover(&node, &options);

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&commands, &options.render);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => write_png(&commands, &options, args.output.as_deref())?,
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&commands)?;
            match args.output.as_deref() {
                Some(path) => std::fs::write(path, json)?,
                None => println!("{json}"),
            }
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
fn write_png(
    commands: &[crate::surface::DrawCommand],
    options: &RenderOptions,
    output: Option<&Path>,
) -> Result<()> {
    let output = output.ok_or_else(|| anyhow::anyhow!("Output path required for png output"))?;
    let svg = render_svg(commands, &options.render);
    crate::render::write_output_png(&svg, output, &options.render)
}

#[cfg(not(feature = "png"))]
fn write_png(
    _commands: &[crate::surface::DrawCommand],
    _options: &RenderOptions,
    _output: Option<&Path>,
) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .try_init();
}

fn apply_args(mut config: Config, args: &Args) -> Config {
    if let Some(size) = args.label_size {
        config.style.label_size = size;
    }
    if let Some(font) = &args.label_font {
        config.style.label_font = font.clone();
    }
    if let Some(weight) = &args.label_weight {
        config.style.label_weight = weight.clone();
    }
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    config
}

fn move_to_origin(node: &mut NodeDisplayData) {
    node.x = ORIGIN_X;
    node.y = ORIGIN_Y;
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
