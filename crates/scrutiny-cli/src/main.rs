//! Exploration report viewer CLI.
//!
//! Provides the `scrutiny` binary:
//! - `render` writes the interactive HTML report (or a bare SVG)
//! - `step` prints what the report shows at one scrub position
//! - `validate` lists every inconsistency between the walk and the graph
//!
//! Exit codes: 0 = success, 1 = invalid report, 2 = viewer error,
//! 3 = I/O error.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use scrutiny_core::{collect_violations, GraphModel, Report};
use scrutiny_render::svg;
use scrutiny_viewer::{export, Frame, ViewerConfig, ViewerContext, ViewerError};

/// Exploration report viewer.
#[derive(Parser)]
#[command(name = "scrutiny", about = "Exploration report viewer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Render a report to a self-contained HTML page.
    Render {
        /// Path to the report JSON.
        #[arg(short, long)]
        report: PathBuf,

        /// Output file.
        #[arg(short, long, default_value = "report.html")]
        output: PathBuf,

        /// Viewer config JSON (palette, surface, layout).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Host surface width in pixels.
        #[arg(long)]
        surface_width: Option<f64>,

        /// Write only the SVG drawing at position 0.
        #[arg(long)]
        svg_only: bool,
    },

    /// Show the step log, styles and error panel at one scrub position.
    Step {
        /// Path to the report JSON.
        #[arg(short, long)]
        report: PathBuf,

        /// Scrub position, 0 through the number of performed transitions.
        #[arg(short, long)]
        position: usize,

        /// Viewer config JSON (palette, surface, layout).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the full frame as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Check a report against its own graph.
    Validate {
        /// Path to the report JSON.
        #[arg(short, long)]
        report: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Render {
            report,
            output,
            config,
            surface_width,
            svg_only,
        } => run_render(&report, &output, config.as_deref(), surface_width, svg_only),
        Commands::Step {
            report,
            position,
            config,
            json,
        } => run_step(&report, position, config.as_deref(), json),
        Commands::Validate { report } => run_validate(&report),
    };
    process::exit(exit_code);
}

/// Maps a viewer error to the documented exit code.
fn exit_code_for(err: &ViewerError) -> i32 {
    match err {
        ViewerError::Report(_) => 1,
        ViewerError::Io(_) | ViewerError::Render(scrutiny_render::RenderError::Io(_)) => 3,
        _ => 2,
    }
}

fn load_config(path: Option<&Path>, surface_width: Option<f64>) -> Result<ViewerConfig, ViewerError> {
    let mut config = match path {
        Some(p) => ViewerConfig::from_json_file(p)?,
        None => ViewerConfig::default(),
    }
    .with_env_overrides();
    if let Some(width) = surface_width {
        config.surface.width = width;
    }
    Ok(config)
}

fn open(
    report_path: &Path,
    config: ViewerConfig,
) -> Result<(ViewerContext, scrutiny_viewer::PlaybackController), ViewerError> {
    let text = std::fs::read_to_string(report_path)?;
    ViewerContext::load_json(&text, config)
}

/// Execute the render subcommand.
fn run_render(
    report_path: &Path,
    output: &Path,
    config_path: Option<&Path>,
    surface_width: Option<f64>,
    svg_only: bool,
) -> i32 {
    let result = load_config(config_path, surface_width)
        .and_then(|config| open(report_path, config))
        .and_then(|(mut ctx, mut controller)| {
            if svg_only {
                svg::save_svg(ctx.drawing(), output)?;
                Ok(())
            } else {
                export::save_html(&mut ctx, &mut controller, output)
            }
        });

    match result {
        Ok(()) => {
            println!("{}", output.display());
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code_for(&e)
        }
    }
}

/// Execute the step subcommand.
fn run_step(report_path: &Path, position: usize, config_path: Option<&Path>, json: bool) -> i32 {
    let result = load_config(config_path, None)
        .and_then(|config| open(report_path, config))
        .and_then(|(mut ctx, mut controller)| {
            controller.on_input(&mut ctx, position)?;
            Ok(Frame::capture(&ctx))
        });

    let frame = match result {
        Ok(frame) => frame,
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_code_for(&e);
        }
    };

    if json {
        match serde_json::to_string_pretty(&frame) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: failed to serialize frame: {}", e);
                return 2;
            }
        }
    } else {
        print!("{}", describe_frame(&frame));
    }
    0
}

/// Plain-text rendering of a frame for terminals.
fn describe_frame(frame: &Frame) -> String {
    let mut out = format!("{}\n", frame.steps);
    for node in frame.nodes.iter().filter(|n| n.fill != "none") {
        out.push_str(&format!("node {}: {}\n", node.name, node.fill));
    }
    for edge in frame.edges.iter().filter(|e| e.stroke != "black") {
        out.push_str(&format!(
            "edge {} -> {}: {} {}\n",
            edge.from, edge.to, edge.stroke, edge.stroke_width
        ));
    }
    if frame.error_panel.visible {
        out.push('\n');
        out.push_str(&frame.error_panel.text);
        out.push('\n');
    }
    out
}

/// Execute the validate subcommand.
fn run_validate(report_path: &Path) -> i32 {
    let text = match std::fs::read_to_string(report_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: failed to read '{}': {}", report_path.display(), e);
            return 3;
        }
    };
    let report = match Report::from_json(&text) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let model = GraphModel::build(&report.graph);
    let violations = collect_violations(&report, &model);
    if violations.is_empty() {
        println!(
            "ok: {} states, {} edges, {} transitions, {} failures",
            model.node_count(),
            model.edge_count(),
            report.len(),
            report.failure_count()
        );
        0
    } else {
        eprintln!("{} violation(s):", violations.len());
        for v in &violations {
            eprintln!("  - {}", v);
        }
        1
    }
}
