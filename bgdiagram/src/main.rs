mod svg;

use std::fs;
use std::path::{Path, PathBuf};

use bgdiagram_core::{DiagramOptions, diagram_from_xgid};
use clap::Parser;

use crate::svg::render_svg;

/// Render a backgammon position diagram from an XGID string.
#[derive(Parser, Debug)]
#[command(name = "bgdiagram", version, about)]
struct Args {
    /// XGID position string, e.g. "XGID=-b----E-C---eE---c-e----B-:0:0:1:31:0:0:0:0"
    #[arg(required_unless_present = "input")]
    xgid: Option<String>,

    /// Read the XGID from a file instead of the command line
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file; the extension picks the format (.svg, .png, .json)
    #[arg(short, long, default_value = "diagram.svg")]
    output: PathBuf,

    /// Home board on the left side
    #[arg(long)]
    flipx: bool,

    /// Scale factor for the rendered output
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Drop the outer text band (point numbers, pip counts, scores)
    #[arg(long)]
    compact: bool,

    /// Draw White's checkers dark and Black's light
    #[arg(long)]
    swap_colors: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let raw = match (&args.xgid, &args.input) {
        (Some(xgid), _) => xgid.clone(),
        (None, Some(path)) => fs::read_to_string(path)?.trim().to_string(),
        (None, None) => unreachable!("clap enforces xgid or --input"),
    };

    let options = DiagramOptions {
        flip_x: args.flipx,
        compact: args.compact,
        scale: args.scale,
        swap_colors: args.swap_colors,
    };

    let diagram = diagram_from_xgid(&raw, options)?;
    log::debug!("decoded {} primitives", diagram.primitives.len());
    for warning in &diagram.warnings {
        log::warn!("{warning}");
    }

    let (svg, w_px, h_px) = render_svg(&diagram);
    log::debug!("rendering {w_px}x{h_px} to {}", args.output.display());

    match extension(&args.output) {
        "png" => write_png(&svg, w_px, h_px, &args.output)?,
        "json" => fs::write(&args.output, serde_json::to_string_pretty(&diagram.primitives)?)?,
        _ => fs::write(&args.output, svg)?,
    }

    Ok(())
}

fn extension(path: &Path) -> &str {
    path.extension().and_then(|e| e.to_str()).unwrap_or("svg")
}

/// Rasterize the SVG and save it as a PNG.
fn write_png(svg: &str, w_px: u32, h_px: u32, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut opt = usvg::Options::default();
    let mut fontdb = usvg::fontdb::Database::new();
    fontdb.load_system_fonts();
    opt.fontdb = std::sync::Arc::new(fontdb);

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|e| format!("SVG parse error: {e:?}"))?;
    let mut pixmap = tiny_skia::Pixmap::new(w_px, h_px).ok_or("pixmap alloc failed")?;
    let mut pm = pixmap.as_mut();
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pm);

    let bytes = bgdiagram_core::encode_rgba_to_png_bytes(w_px, h_px, pixmap.data())?;
    fs::write(output, bytes)?;
    Ok(())
}
