#![deny(unsafe_code)]
//! CLI binary for the plotline raster-to-vector system.
//!
//! Subcommands:
//! - `render <renderer> <input>`: turn an image into plotter strokes and export them
//! - `list`: print available renderers and export formats

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use log::info;
use plotline_core::{
    extract_polylines, total_length, LineRenderer, PixelBuffer, RenderRequest, RenderSettings,
};
use plotline_renderers::export::{export, export_to_path};
use plotline_renderers::snapshot::{load_pixels, write_preview_png};
use plotline_renderers::{render, ExportFormat, RendererKind};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "plotline", about = "Raster image to pen-plotter line converter")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert an image into line segments and export them.
    Render {
        /// Renderer name (e.g. "orthogonal", "flow-field").
        renderer: String,

        /// Source image (PNG).
        input: PathBuf,

        /// Output file; segments go to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format (csv, json, text, polylines). Defaults to the
        /// output file's extension, or csv on stdout.
        #[arg(short, long)]
        format: Option<String>,

        /// Base distance between strokes, in pixels.
        #[arg(long)]
        spacing: Option<f64>,

        /// Minimum darkness (0-1) that receives ink.
        #[arg(long)]
        threshold: Option<f64>,

        /// PRNG seed for the random walker.
        #[arg(long)]
        seed: Option<u64>,

        /// Maximum traced path length for the flow field.
        #[arg(long)]
        max_length: Option<f64>,

        /// Number of random walkers.
        #[arg(long)]
        iterations: Option<usize>,

        /// Renderer options as a JSON object.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Also write a black-on-white PNG preview of the strokes.
        #[arg(long)]
        preview: Option<PathBuf>,
    },
    /// List available renderers and export formats.
    List,
}

/// Overlays the flags that were given on top of the default settings.
fn settings_from_flags(
    spacing: Option<f64>,
    threshold: Option<f64>,
    seed: Option<u64>,
    max_length: Option<f64>,
    iterations: Option<usize>,
) -> Result<RenderSettings, CliError> {
    let d = RenderSettings::default();
    Ok(RenderSettings::new(
        spacing.unwrap_or(d.line_spacing()),
        threshold.unwrap_or(d.darkness_threshold()),
        seed.unwrap_or(d.seed()),
        max_length.unwrap_or(d.max_line_length()),
        iterations.unwrap_or(d.iterations()),
    )?)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let renderers = RendererKind::list_renderers();
            let formats = ExportFormat::list_formats();
            if cli.json {
                let mut entries = Vec::with_capacity(renderers.len());
                for name in renderers {
                    let r = RendererKind::from_name(name, &serde_json::json!({}))?;
                    entries.push(serde_json::json!({
                        "name": name,
                        "title": r.name(),
                        "params": r.param_schema(),
                    }));
                }
                let info = serde_json::json!({
                    "renderers": entries,
                    "formats": formats,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Renderers:");
                for name in renderers {
                    println!("  {name}");
                }
                println!("Formats:");
                println!("  {}", formats.join(", "));
            }
        }
        Command::Render {
            renderer,
            input,
            output,
            format,
            spacing,
            threshold,
            seed,
            max_length,
            iterations,
            params,
            preview,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
            let settings = settings_from_flags(spacing, threshold, seed, max_length, iterations)?;
            let request = RenderRequest::new(&renderer, settings).with_params(params);

            let format = match (&format, &output) {
                (Some(name), _) => ExportFormat::from_name(name)?,
                (None, Some(path)) => ExportFormat::from_path(path)?,
                (None, None) => ExportFormat::Csv,
            };

            let image = load_pixels(&input)?;
            let pixels = PixelBuffer::new(&image.pixels, image.width, image.height)?;
            let segments = render(&request, &pixels)?;

            match &output {
                Some(path) => export_to_path(format, &segments, path)?,
                None => {
                    let mut stdout = io::stdout().lock();
                    export(format, &segments, &mut stdout)?;
                    stdout.flush()?;
                }
            }
            if let Some(path) = &preview {
                write_preview_png(&segments, image.width, image.height, path)?;
            }

            let polylines = extract_polylines(&segments).len();
            let length = total_length(&segments);
            info!(
                "{renderer}: {} segments, {polylines} polylines, total length {length:.3}",
                segments.len()
            );

            if cli.json {
                let summary = serde_json::json!({
                    "request": request,
                    "width": image.width,
                    "height": image.height,
                    "segments": segments.len(),
                    "polylines": polylines,
                    "total_length": length,
                    "format": format.name(),
                    "output": output.as_ref().map(|p| p.display().to_string()),
                    "preview": preview.as_ref().map(|p| p.display().to_string()),
                });
                let text = serde_json::to_string_pretty(&summary)?;
                // Keep stdout clean when it carries the export itself.
                if output.is_some() {
                    println!("{text}");
                } else {
                    eprintln!("{text}");
                }
            } else {
                eprintln!(
                    "rendered {renderer} ({}x{}, {} segments, {polylines} polylines) -> {}",
                    image.width,
                    image.height,
                    segments.len(),
                    output
                        .as_ref()
                        .map_or_else(|| "stdout".to_string(), |p| p.display().to_string())
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
