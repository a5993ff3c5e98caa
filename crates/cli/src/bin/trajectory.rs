use clap::Parser;
use drone_cli::{init_tracing, parse_point};
use drone_sim::export::trajectory::{self as export_trajectory, Metadata, Record};
use drone_sim::trajectory::evenly_spaced_times;
use drone_sim::{MotionModel, Point, TrajectoryGenerator, compute_direction, compute_trajectory_points};
use std::path::PathBuf;
use tracing::info;

/// Sample a straight segment between two points, optionally timed by accelerated motion.
#[derive(Parser, Debug)]
#[command(author, version, about = "Straight-line trajectory generator")]
struct Cli {
    /// Start point as x,y,z
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    from: Point,

    /// End point as x,y,z
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    to: Point,

    /// Number of points, endpoints included
    #[arg(long, default_value_t = 50)]
    points: usize,

    /// Time the samples with uniformly accelerated motion along the segment (m/s²)
    #[arg(long, allow_hyphen_values = true)]
    accel: Option<f64>,

    /// Initial speed along the segment when timing (m/s)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    speed: f64,

    /// Time window covered by timed samples (s)
    #[arg(long, default_value_t = 10.0, allow_hyphen_values = true)]
    duration: f64,

    /// Output CSV file (use '-' for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,

    /// Optional JSON document written next to the CSV
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if !(cli.duration.is_finite() && cli.duration > 0.0) {
        return Err(anyhow::anyhow!("--duration must be a positive number"));
    }

    let timed = cli.accel.is_some() || cli.speed != 0.0;
    let records: Vec<Record> = if timed {
        let model = MotionModel::uniformly_accelerated(0.0, 0.0, cli.speed, cli.accel.unwrap_or(0.0))?;
        let generator = TrajectoryGenerator::new(model);
        let times = evenly_spaced_times(0.0, cli.duration, cli.points)?;
        generator
            .follow(&cli.from, &cli.to, &times)?
            .into_iter()
            .enumerate()
            .map(|(index, tp)| Record {
                index,
                time_s: Some(tp.time),
                point: tp.point,
            })
            .collect()
    } else {
        compute_trajectory_points(&cli.from, &cli.to, cli.points)?
            .into_iter()
            .enumerate()
            .map(|(index, point)| Record {
                index,
                time_s: None,
                point,
            })
            .collect()
    };

    let direction = compute_direction(&cli.from, &cli.to);
    info!(
        points = records.len(),
        dx = direction.x,
        dy = direction.y,
        dz = direction.z,
        timed,
        "computed trajectory"
    );

    let mut writer = export_trajectory::writer_for_path(&cli.output)?;
    export_trajectory::write_csv(writer.as_mut(), &records)?;

    if let Some(json_path) = &cli.json {
        let meta = Metadata {
            from: cli.from,
            to: cli.to,
            motion: timed.then_some("accelerated"),
        };
        export_trajectory::write_json(json_path, &meta, &records)?;
        info!(path = %json_path.display(), "wrote JSON trajectory");
    }

    Ok(())
}
