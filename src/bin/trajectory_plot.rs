use clap::Parser;
use csv::ReaderBuilder;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render x-y and x-z projections of a trajectory CSV"
)]
struct Cli {
    #[arg(long)]
    input: String,
    #[arg(long, default_value = "artifacts/trajectory.png")]
    output: PathBuf,
    #[arg(long, default_value_t = 1200)]
    width: u32,
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Optional caption drawn above each panel (needs a system font)
    #[arg(long)]
    title: Option<String>,
}

#[derive(Debug, Clone, Copy)]
struct Sample {
    x: f64,
    y: f64,
    z: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let samples = read_samples(&cli.input)?;
    if samples.len() < 2 {
        return Err(anyhow::anyhow!(
            "Trajectory CSV needs at least two finite samples (found {})",
            samples.len()
        ));
    }
    debug!(count = samples.len(), input = %cli.input, "loaded trajectory samples");

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let output_str = cli
        .output
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Output path contains invalid UTF-8"))?;
    let root = BitMapBackend::new(output_str, (cli.width, cli.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let (left, right) = root.split_horizontally((cli.width / 2) as i32);
    let xy: Vec<(f64, f64)> = samples.iter().map(|s| (s.x, s.y)).collect();
    let xz: Vec<(f64, f64)> = samples.iter().map(|s| (s.x, s.z)).collect();
    draw_projection(&left, &xy, cli.title.as_deref().map(|t| format!("{t} (x-y)")))?;
    draw_projection(&right, &xz, cli.title.as_deref().map(|t| format!("{t} (x-z)")))?;

    root.present()?;
    info!(output = %cli.output.display(), "wrote trajectory plot");
    Ok(())
}

fn draw_projection(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    points: &[(f64, f64)],
    caption: Option<String>,
) -> anyhow::Result<()> {
    let (h_range, v_range) = padded_bounds(points);

    let mut builder = ChartBuilder::on(area);
    builder.margin(20);
    if let Some(text) = caption {
        let font = FontDesc::new(select_font_family(), 22.0, FontStyle::Bold);
        builder.caption(text, font);
    }
    let mut chart = builder.build_cartesian_2d(h_range.clone(), v_range.clone())?;

    chart.draw_series(std::iter::once(Rectangle::new(
        [(h_range.start, v_range.start), (h_range.end, v_range.end)],
        ShapeStyle::from(&BLACK.mix(0.6)).stroke_width(1),
    )))?;
    chart.draw_series(LineSeries::new(
        points.iter().copied(),
        ShapeStyle::from(&BLUE).stroke_width(2),
    ))?;
    chart.draw_series(
        points
            .iter()
            .map(|&p| Circle::new(p, 2, ShapeStyle::from(&BLUE.mix(0.6)).filled())),
    )?;

    let start_color = RGBColor(20, 150, 60);
    let end_color = RGBColor(210, 100, 20);
    if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
        chart.draw_series(std::iter::once(Circle::new(
            first,
            6,
            ShapeStyle::from(&start_color).filled(),
        )))?;
        chart.draw_series(std::iter::once(Circle::new(
            last,
            6,
            ShapeStyle::from(&end_color).filled(),
        )))?;
    }
    Ok(())
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}

fn read_samples(path: &str) -> anyhow::Result<Vec<Sample>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow::anyhow!("CSV missing '{}' column", name))
    };
    let (x_idx, y_idx, z_idx) = (column("x")?, column("y")?, column("z")?);

    let mut samples = Vec::new();
    for rec in rdr.records() {
        let r = rec?;
        let parse = |idx: usize| -> f64 { r.get(idx).unwrap_or("").parse().unwrap_or(f64::NAN) };
        let sample = Sample {
            x: parse(x_idx),
            y: parse(y_idx),
            z: parse(z_idx),
        };
        if sample.x.is_finite() && sample.y.is_finite() && sample.z.is_finite() {
            samples.push(sample);
        }
    }
    Ok(samples)
}

/// Axis ranges covering `points` with a 5% margin; flat extents get a unit window.
fn padded_bounds(points: &[(f64, f64)]) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
    let pad = |lo: f64, hi: f64| {
        let span = hi - lo;
        if span.abs() < f64::EPSILON {
            (lo - 0.5)..(hi + 0.5)
        } else {
            (lo - 0.05 * span)..(hi + 0.05 * span)
        }
    };
    let (mut h_lo, mut h_hi) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut v_lo, mut v_hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(h, v) in points {
        h_lo = h_lo.min(h);
        h_hi = h_hi.max(h);
        v_lo = v_lo.min(v);
        v_hi = v_hi.max(v);
    }
    (pad(h_lo, h_hi), pad(v_lo, v_hi))
}
