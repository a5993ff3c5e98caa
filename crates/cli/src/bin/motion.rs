use clap::{Parser, ValueEnum};
use drone_cli::init_tracing;
use drone_sim::{MotionModel, RandomWalk};
use tracing::debug;

/// Largest table the tool will print.
const MAX_ROWS: f64 = 1_000_000.0;

/// Tabulate a one-dimensional motion model over a time window.
#[derive(Parser, Debug)]
#[command(author, version, about = "Evaluate a point-mass motion model")]
struct Cli {
    /// Motion model to evaluate
    #[arg(long, value_enum, default_value_t = Kind::Accelerated)]
    kind: Kind,

    /// Initial time (s)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    time_i: f64,

    /// Initial position (m)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pos_i: f64,

    /// Initial speed for accelerated motion (m/s)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    speed: f64,

    /// Acceleration for accelerated motion (m/s²)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    acc: f64,

    /// Largest single random-walk step (m)
    #[arg(long, default_value_t = 1.0)]
    max_step: f64,

    /// Time between random-walk steps (s)
    #[arg(long, default_value_t = 1.0)]
    interval: f64,

    /// Random-walk excursion limit around the initial position (m)
    #[arg(long, default_value_t = 10.0)]
    bound: f64,

    /// Random-walk seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Last time to evaluate (s)
    #[arg(long, default_value_t = 10.0, allow_hyphen_values = true)]
    until: f64,

    /// Time increment between rows (s)
    #[arg(long, default_value_t = 1.0)]
    step: f64,

    /// Advance the model row by row instead of evaluating from the fixed origin
    #[arg(long, default_value_t = false)]
    stepwise: bool,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum Kind {
    Constant,
    Accelerated,
    Random,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if !(cli.step.is_finite() && cli.step > 0.0) {
        return Err(anyhow::anyhow!("--step must be a positive number"));
    }
    if cli.until < cli.time_i {
        return Err(anyhow::anyhow!("--until must not precede --time-i"));
    }

    let mut model = match cli.kind {
        Kind::Constant => MotionModel::constant(cli.time_i, cli.pos_i)?,
        Kind::Accelerated => {
            MotionModel::uniformly_accelerated(cli.time_i, cli.pos_i, cli.speed, cli.acc)?
        }
        Kind::Random => MotionModel::random(
            cli.time_i,
            cli.pos_i,
            RandomWalk::new(cli.max_step, cli.interval, cli.bound, cli.seed)?,
        )?,
    };
    debug!(?model, stepwise = cli.stepwise, "evaluating motion model");

    let rows = ((cli.until - cli.time_i) / cli.step).floor();
    if !rows.is_finite() || rows > MAX_ROWS {
        return Err(anyhow::anyhow!(
            "--until/--step would print {rows} rows, more than the limit of {MAX_ROWS}"
        ));
    }
    let rows = rows as usize;
    println!("=== {} motion ===", model.name());
    println!("{:>12} {:>16} {:>16}", "t (s)", "position (m)", "velocity (m/s)");
    for i in 0..=rows {
        let t = cli.time_i + i as f64 * cli.step;
        let velocity = model.velocity_at(t)?;
        let position = if cli.stepwise {
            model.update_position(t)?
        } else {
            model.position_at(t)?
        };
        println!("{:>12.3} {:>16.6} {:>16.6}", t, position, velocity);
    }

    Ok(())
}
