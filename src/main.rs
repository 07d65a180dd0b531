//! zinelayout CLI: render layout documents to PNG pages, or check them.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use image::RgbaImage;
use log::{debug, info, warn};

use zinelayout::border::BorderType;
use zinelayout::synthetic::{self, parse_test_dimensions};
use zinelayout::{
    Color, LayoutDocument, Overrides, apply_overrides, check_uniform_inputs, load_documents,
    render_document,
};

#[derive(Parser)]
#[command(name = "zinelayout")]
#[command(about = "Compose equally sized images onto print-ready grid pages")]
#[command(version)]
struct Cli {
    /// Layout document (YAML, may hold several `---` separated documents)
    #[arg(short, long, global = true, default_value = "layout.yaml")]
    spec: PathBuf,

    /// Log page and cell geometry
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every output page of every document
    Render(RenderArgs),

    /// Report every structural problem in the layout
    Validate {
        /// Input images, only counted to check input indices
        inputs: Vec<PathBuf>,
    },
}

#[derive(Args)]
struct RenderArgs {
    /// Input images, in index order
    inputs: Vec<PathBuf>,

    /// Directory for the rendered `<id>.png` files
    #[arg(short, long, default_value = "out")]
    output_dir: PathBuf,

    /// Use numbered color placeholders instead of input images
    #[arg(long)]
    test: bool,

    /// Use numbered black-and-white placeholders instead of input images
    #[arg(long)]
    test_bw: bool,

    /// Placeholder size as WIDTH,HEIGHT measurements (default 600px,800px)
    #[arg(long, value_name = "WIDTH,HEIGHT", default_value = "")]
    test_dimensions: String,

    #[command(flatten)]
    overrides: OverrideArgs,
}

#[derive(Args)]
struct OverrideArgs {
    /// Force the global border on
    #[arg(long)]
    global_border: bool,

    /// Force the page border on
    #[arg(long)]
    page_border: bool,

    /// Force the layout border of every output page on
    #[arg(long)]
    layout_border: bool,

    /// Force the inner border of every cell on
    #[arg(long)]
    inner_border: bool,

    /// Border color: #RRGGBB[AA], a color name, or R,G,B,A
    #[arg(long)]
    border_color: Option<Color>,

    /// Border type (plain, dotted, dashed, corner)
    #[arg(long)]
    border_type: Option<BorderType>,

    /// Resolution in pixels per inch
    #[arg(long)]
    ppi: Option<f64>,
}

impl From<OverrideArgs> for Overrides {
    fn from(args: OverrideArgs) -> Self {
        Self {
            global_border: args.global_border,
            page_border: args.page_border,
            layout_border: args.layout_border,
            inner_border: args.inner_border,
            border_color: args.border_color,
            border_type: args.border_type,
            ppi: args.ppi,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let result = match cli.command {
        Commands::Render(args) => render(&cli.spec, args),
        Commands::Validate { inputs } => validate(&cli.spec, inputs.len()),
    };
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn read_documents(spec: &Path) -> anyhow::Result<Vec<LayoutDocument>> {
    let text = fs::read_to_string(spec).with_context(|| format!("reading {}", spec.display()))?;
    let documents = load_documents(&text).with_context(|| format!("loading {}", spec.display()))?;
    if documents.is_empty() {
        warn!("{} holds no layout documents", spec.display());
    }
    Ok(documents)
}

fn load_inputs(paths: &[PathBuf]) -> anyhow::Result<Vec<RgbaImage>> {
    paths
        .iter()
        .map(|p| {
            image::open(p)
                .map(|img| img.to_rgba8())
                .with_context(|| format!("decoding {}", p.display()))
        })
        .collect()
}

fn render(spec: &Path, args: RenderArgs) -> anyhow::Result<ExitCode> {
    let synthetic = args.test || args.test_bw;
    if synthetic && !args.inputs.is_empty() {
        bail!("input images cannot be combined with --test or --test-bw");
    }
    let overrides = Overrides::from(args.overrides);
    if !overrides.is_empty() {
        debug!("applying overrides {overrides:?}");
    }
    let documents = read_documents(spec)?;
    let real_inputs = load_inputs(&args.inputs)?;

    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("creating {}", args.output_dir.display()))?;

    for (index, document) in documents.into_iter().enumerate() {
        let document = apply_overrides(document, &overrides);

        let generated;
        let inputs = if synthetic {
            let ppi = document.ppi().map_err(|e| zinelayout::Error::from(e).in_document(index))?;
            let size = parse_test_dimensions(&args.test_dimensions, ppi)
                .context("parsing --test-dimensions")?;
            let count = document.required_inputs();
            debug!(
                "document {index}: generating {count} placeholder(s) of {}x{}",
                size.width, size.height
            );
            generated = synthetic::generate(count, size.width, size.height, args.test_bw);
            &generated
        } else {
            &real_inputs
        };
        check_uniform_inputs(inputs)?;

        let pages = render_document(&document, inputs).map_err(|e| e.in_document(index))?;
        for page in pages {
            let path = args.output_dir.join(page.file_name());
            page.image
                .save(&path)
                .with_context(|| format!("writing {}", path.display()))?;
            info!("wrote {}", path.display());
            println!("{}", path.display());
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn validate(spec: &Path, input_count: usize) -> anyhow::Result<ExitCode> {
    let documents = read_documents(spec)?;
    let input_count = (input_count > 0).then_some(input_count);

    let mut problems = 0;
    for (index, document) in documents.iter().enumerate() {
        for issue in document.validate(input_count) {
            println!("{}", issue.in_document(index));
            problems += 1;
        }
    }
    if problems == 0 {
        println!("{}: ok", spec.display());
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{problems} problem(s)");
        Ok(ExitCode::FAILURE)
    }
}
