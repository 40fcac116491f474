use anyhow::Context;
use clap::Parser;
use overpass_geojson::convert;
use overpass_geojson::projection::AxisRange;
use overpass_geojson::renderer::raster::{DEFAULT_CANVAS_SIZE, MAX_CANVAS_SIZE};
use overpass_geojson::renderer::{display_polylines, load_features, PlotOptions, RasterCanvas};
use std::path::PathBuf;

/// Convert JSON format to GeoJSON format (support LineString only).
/// Type of 'way' is converted, and types of 'node' and 'relation' are ignored.
/// Plot features of polyline.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Input json file in geographic coordinate
    input_json: PathBuf,

    /// Output geojson in same coordinate
    output_geojson: PathBuf,

    /// Plot the polylines after converting
    #[arg(long, overrides_with = "no_plot")]
    plot: bool,

    /// Do not plot (default)
    #[arg(long, overrides_with = "plot")]
    no_plot: bool,

    /// PNG written by --plot [default: <output_geojson>.png]
    #[arg(long, value_name = "PNG")]
    plot_output: Option<PathBuf>,

    /// Image drawn underneath the polylines
    #[arg(long, value_name = "IMAGE")]
    background: Option<PathBuf>,

    /// Visible x range
    #[arg(long, value_name = "MIN,MAX", value_parser = parse_range, allow_hyphen_values = true)]
    xlim: Option<AxisRange>,

    /// Visible y range
    #[arg(long, value_name = "MIN,MAX", value_parser = parse_range, allow_hyphen_values = true)]
    ylim: Option<AxisRange>,

    /// Plot width in pixels
    #[arg(long, default_value_t = DEFAULT_CANVAS_SIZE,
          value_parser = clap::value_parser!(u32).range(1..=MAX_CANVAS_SIZE as i64))]
    width: u32,

    /// Plot height in pixels
    #[arg(long, default_value_t = DEFAULT_CANVAS_SIZE,
          value_parser = clap::value_parser!(u32).range(1..=MAX_CANVAS_SIZE as i64))]
    height: u32,

    /// Allow x and y to use different scales
    #[arg(long)]
    no_scale: bool,
}

fn parse_range(s: &str) -> Result<AxisRange, String> {
    let (min, max) = s
        .split_once(',')
        .ok_or_else(|| format!("expected MIN,MAX, got {s:?}"))?;
    let min: f64 = min.trim().parse().map_err(|e| format!("bad minimum {min:?}: {e}"))?;
    let max: f64 = max.trim().parse().map_err(|e| format!("bad maximum {max:?}: {e}"))?;
    if !min.is_finite() || !max.is_finite() {
        return Err(format!("range must be finite, got {s:?}"));
    }
    Ok((min, max))
}

fn plot(args: &Args) -> anyhow::Result<()> {
    let features = load_features(&args.output_geojson)
        .with_context(|| format!("Failed to read back {}", args.output_geojson.display()))?;

    let background = match &args.background {
        Some(path) => Some(
            image::open(path)
                .with_context(|| format!("Failed to load background {}", path.display()))?,
        ),
        None => None,
    };

    let options = PlotOptions {
        background,
        xlim: args.xlim,
        ylim: args.ylim,
        scaled: !args.no_scale,
    };

    let output = args
        .plot_output
        .clone()
        .unwrap_or_else(|| args.output_geojson.with_extension("png"));
    let mut canvas = RasterCanvas::with_size(&output, args.width, args.height);
    display_polylines(&features, &mut canvas, &options)?;

    println!("plotted: {}", canvas.output_path().display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    println!("{:?}", args);

    let summary = convert(&args.input_json, &args.output_geojson)
        .with_context(|| format!("Failed to convert {}", args.input_json.display()))?;
    log::debug!("{:?}", summary);
    println!("saved: {}", args.output_geojson.display());

    if args.plot {
        plot(&args)?;
    }

    Ok(())
}
