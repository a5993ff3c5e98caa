use clap::Parser;
use drone_cli::{find_drone, init_tracing};
use drone_sim::PhysicalConstants;
use drone_sim::config::{EnvironmentConfig, load_drones, load_environment};
use std::path::PathBuf;
use tracing::info;

/// Report the speed and thrust a catalog drone needs to reach a target height.
#[derive(Parser, Debug)]
#[command(author, version, about = "Climb calculator for catalog drones")]
struct Cli {
    /// Drone catalog (YAML list, TOML file, or directory of TOML files)
    #[arg(long, default_value = "configs/drones")]
    drones: PathBuf,

    /// Drone name (case-insensitive, defaults to the first catalog entry)
    #[arg(long)]
    name: Option<String>,

    /// Environment constants file (defaults to g = 9.8 m/s², ρ = 1.0 kg/m³)
    #[arg(long)]
    environment: Option<PathBuf>,

    /// Target height (m)
    #[arg(long, allow_hyphen_values = true)]
    target: f64,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let environment = match &cli.environment {
        Some(path) => load_environment(path)?,
        None => EnvironmentConfig::default(),
    };
    let constants = PhysicalConstants::from(&environment);
    let catalog = load_drones(&cli.drones)?;
    let drone = find_drone(&catalog, cli.name.as_deref())?.to_drone()?;
    info!(drone = %drone.name, rotors = drone.rotors.len(), "loaded drone");

    let speed = drone.required_climb_speed(cli.target, &constants)?;
    let thrust = drone.total_generated_thrust(cli.target, &constants)?;
    let axes = drone.generated_thrust_components(cli.target, &constants)?;

    println!("=== Climb Report ===");
    println!("Drone           : {}", drone.name);
    println!(
        "Environment     : g = {:.3} m/s², ρ = {:.3} kg/m³",
        constants.gravity_m_s2, constants.air_density_kg_m3
    );
    println!("Orientation     : {}", drone.orientation());
    println!(
        "Height          : {:.2} m -> {:.2} m",
        drone.current_height_m(),
        cli.target
    );
    println!("Rotor thrust    : {:.3} N", drone.rotor_thrust(&constants));
    println!("Required speed  : {:.2} m/s", speed);
    println!("Required thrust : {:.3} N", thrust);
    println!(
        "Thrust x/y/z    : {:.3} / {:.3} / {:.3} N",
        axes.x, axes.y, axes.z
    );

    Ok(())
}
