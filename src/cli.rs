//! Command line front end
//!
//! ```text
//! pathpick export auto.json --image field.png --format java-class --library ftclib
//! pathpick show route.csv --image-size 1440x1440
//! pathpick config --init
//! ```

use crate::sink::{ClipboardSink, ExportChain, ExportSink, SinkOutcome};
use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use pathpick_core::{HeadingWrap, ImageSize, PoseTransform};
use pathpick_editor::{DeclarationKind, EditorState, FileFormat, Library};
use pathpick_settings::Config;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("PATHPICK_BUILD_DATE"), ")");

#[derive(Debug, Parser)]
#[command(
    name = "pathpick",
    about = "Convert and inspect robot waypoint paths placed over a field image",
    version = VERSION
)]
pub struct Cli {
    /// Settings file (.toml or .json); defaults to the per-user config
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Import a path file and write it out in another format.
    Export(ExportArgs),

    /// Print a path file as a field-space table.
    Show(ShowArgs),

    /// Print the effective settings, or write a default settings file.
    Config(ConfigArgs),
}

/// Where the field frame's pixel size comes from
#[derive(Debug, Clone, Args)]
pub struct FieldImageArgs {
    /// Field image; only its pixel dimensions are read
    #[arg(long, value_name = "FILE", conflicts_with = "image_size")]
    pub image: Option<PathBuf>,

    /// Field image size in pixels
    #[arg(long, value_name = "WxH", value_parser = parse_image_size)]
    pub image_size: Option<ImageSize>,
}

impl FieldImageArgs {
    pub fn resolve(&self) -> anyhow::Result<ImageSize> {
        if let Some(size) = self.image_size {
            return Ok(size);
        }
        let Some(path) = &self.image else {
            bail!("a field image is required: pass --image <FILE> or --image-size <WxH>");
        };
        let (width, height) = image::image_dimensions(path)
            .with_context(|| format!("failed to read image {}", path.display()))?;
        Ok(ImageSize::new(f64::from(width), f64::from(height)))
    }
}

#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Path file to read (JSON, CSV or Java source)
    pub input: PathBuf,

    #[command(flatten)]
    pub image: FieldImageArgs,

    /// Path slot to load into
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=4))]
    pub path: u8,

    /// Heading display mode; overrides the file's own setting
    #[arg(long, value_name = "full|half")]
    pub heading_wrap: Option<HeadingWrap>,
}

#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format: json, csv, java-class or java-snippet
    #[arg(long, short)]
    pub format: Option<FileFormat>,

    /// Pose2d dialect: rr, ftclib or RilLib
    #[arg(long)]
    pub library: Option<Library>,

    /// Java declaration: list or array
    #[arg(long)]
    pub kind: Option<DeclarationKind>,

    /// Class name, also the base of the output file name
    #[arg(long)]
    pub class_name: Option<String>,

    /// Java package for class output
    #[arg(long)]
    pub package: Option<String>,

    /// Transform applied before export (mirror-x, mirror-y, rotate-ccw,
    /// rotate-cw, rotate-180); repeat to chain
    #[arg(long = "transform", value_name = "TRANSFORM")]
    pub transforms: Vec<PoseTransform>,

    /// Directory to write into
    #[arg(long, short, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Ask for a destination with the native save dialog
    #[arg(long)]
    pub dialog: bool,

    /// Print the file to stdout instead of writing it
    #[arg(long, conflicts_with_all = ["clipboard", "dialog", "output_dir"])]
    pub stdout: bool,

    /// Copy the preview text to the clipboard instead of writing a file
    #[arg(long, conflicts_with_all = ["dialog", "output_dir"])]
    pub clipboard: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Write the default settings to the settings file
    #[arg(long)]
    pub init: bool,

    /// Overwrite an existing file with --init
    #[arg(long, requires = "init")]
    pub force: bool,
}

fn parse_image_size(s: &str) -> Result<ImageSize, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{s}'"))?;
    let width: f64 = w.trim().parse().map_err(|_| format!("invalid width '{w}'"))?;
    let height: f64 = h.trim().parse().map_err(|_| format!("invalid height '{h}'"))?;
    let size = ImageSize::new(width, height);
    if !size.is_valid() {
        return Err(format!("image size must be positive, got '{s}'"));
    }
    Ok(size)
}

pub fn run_from_env() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli, &mut std::io::stdout().lock())
}

pub fn run(cli: Cli, out: &mut dyn Write) -> anyhow::Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    match cli.command {
        Commands::Export(args) => {
            let config = load_config(&config_path)?;
            run_export(&args, &config, out)
        }
        Commands::Show(args) => {
            let config = load_config(&config_path)?;
            run_show(&args, &config, out)
        }
        Commands::Config(args) => run_config(&args, &config_path, out),
    }
}

fn load_config(path: &std::path::Path) -> anyhow::Result<Config> {
    Config::load_or_default(path)
        .with_context(|| format!("failed to load settings from {}", path.display()))
}

/// Builds an editing session holding `source.input` in the requested path slot.
fn load_session(source: &SourceArgs, config: &Config) -> anyhow::Result<EditorState> {
    let size = source.image.resolve()?;
    let mut state =
        EditorState::with_field(config.field).context("invalid field configuration")?;
    state.set_heading_wrap(config.editing.heading_wrap);
    state.set_edit_steps(config.editing.edit_steps());
    state.load_image(size)?;
    state.set_active_path(usize::from(source.path) - 1)?;

    let text = std::fs::read_to_string(&source.input)
        .with_context(|| format!("failed to read {}", source.input.display()))?;
    let file_name = source
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let report = state
        .import_text(&text, &file_name)
        .with_context(|| format!("failed to import {}", source.input.display()))?;
    info!(format = %report.format, poses = report.pose_count, "Loaded {}", file_name);

    if let Some(wrap) = source.heading_wrap {
        state.set_heading_wrap(wrap);
    }
    Ok(state)
}

fn run_export(args: &ExportArgs, config: &Config, out: &mut dyn Write) -> anyhow::Result<()> {
    let mut state = load_session(&args.source, config)?;
    for transform in &args.transforms {
        if !state.transform_active(*transform) {
            warn!(%transform, "Nothing to transform");
        }
    }

    let mut options = config.export.clone();
    if let Some(format) = args.format {
        options.format = format;
    }
    if let Some(library) = args.library {
        options.library = library;
    }
    if let Some(kind) = args.kind {
        options.kind = kind;
    }
    if let Some(class_name) = &args.class_name {
        options.class_name = class_name.clone();
    }
    if args.package.is_some() {
        options.package = args.package.clone();
    }

    let artifact = state.export(&options)?;
    if args.stdout {
        out.write_all(artifact.content.as_bytes())?;
        return Ok(());
    }

    let outcome = if args.clipboard {
        ClipboardSink.deliver(&artifact)?
    } else {
        let dir = args
            .output_dir
            .clone()
            .or_else(|| config.editing.output_directory.clone());
        ExportChain::standard(dir, args.dialog).deliver(&artifact)?
    };
    match outcome {
        SinkOutcome::Written(path) => writeln!(out, "Wrote {}", path.display())?,
        SinkOutcome::Copied => writeln!(out, "Copied {} to the clipboard", artifact.suggested_name)?,
        SinkOutcome::Cancelled => writeln!(out, "Export cancelled")?,
    }
    Ok(())
}

fn run_show(args: &ShowArgs, config: &Config, out: &mut dyn Write) -> anyhow::Result<()> {
    let state = load_session(&args.source, config)?;
    let field = state.field();
    let unit = field.unit.label();
    let wrap = state.heading_wrap();
    let path = state.active_path();

    writeln!(
        out,
        "{} ({} poses) field {} {unit}, origin {}, axes {}",
        path.name,
        path.len(),
        field.field_size,
        field.origin,
        field.axes
    )?;
    writeln!(out, "{:>4} {:>10} {:>10} {:>9}  locked", "#", "x", "y", "heading")?;
    for (i, pose) in state.field_poses()?.iter().enumerate() {
        writeln!(
            out,
            "{:>4} {:>10.3} {:>10.3} {:>8.1}°  {}",
            i + 1,
            pose.x,
            pose.y,
            wrap.degrees(pose.heading),
            if pose.locked { "yes" } else { "" }
        )?;
    }
    if matches!(wrap, HeadingWrap::Half) {
        writeln!(out, "headings shown in (-180°, 180°]")?;
    }
    Ok(())
}

fn run_config(args: &ConfigArgs, path: &std::path::Path, out: &mut dyn Write) -> anyhow::Result<()> {
    if args.init {
        if path.exists() && !args.force {
            bail!("{} already exists; pass --force to overwrite", path.display());
        }
        Config::default()
            .save_to_file(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        writeln!(out, "Wrote {}", path.display())?;
        return Ok(());
    }

    let config = load_config(path)?;
    writeln!(out, "# {}", path.display())?;
    out.write_all(toml::to_string_pretty(&config)?.as_bytes())?;
    Ok(())
}
