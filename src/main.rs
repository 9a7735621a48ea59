use clap::Parser;
use std::path::PathBuf;

use callig2svg::{svg, ConvertConfig};

#[derive(Parser)]
#[command(
    name = "callig2svg",
    about = "Convert calligrapher.ai pen strokes to a 1-dimensional SVG path for plotters and engravers. \
             Run JSON.stringify(tr) in the browser console after drawing to get the input JSON."
)]
struct Cli {
    /// Path to a JSON file containing the array of [x, y, penUp] samples
    json: PathBuf,

    /// Smooth out paths using cubic bezier curve approximations
    #[arg(short, long)]
    smooth: bool,

    /// Maximum fitting error for --smooth, in input units
    #[arg(short, long, default_value = "1.0")]
    tolerance: f64,

    /// Maintain any whitespace (offset from the top-left corner) present
    /// in the original point array
    #[arg(short, long)]
    whitespace: bool,

    /// Path/filename to save output
    #[arg(short, long, default_value = "./output/output.svg")]
    outfile: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = ConvertConfig {
        smooth: cli.smooth,
        keep_whitespace: cli.whitespace,
        tolerance: cli.tolerance,
    };

    eprintln!();
    eprintln!("  callig2svg \u{00b7} {}", cli.json.display());
    eprintln!();

    // Pipeline (lib prints step-by-step progress to stderr)
    let json = std::fs::read_to_string(&cli.json)?;
    let path = callig2svg::convert(&json, &config)?;
    svg::write(&path, &cli.outfile)?;

    eprintln!();
    eprintln!("  \u{2713} {}", cli.outfile.display());
    eprintln!();

    Ok(())
}
