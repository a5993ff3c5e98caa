//! Shared helpers for the drone command-line tools.

use drone_sim::Point;
use drone_sim::config::DroneConfig;
use tracing_subscriber::EnvFilter;

/// Route diagnostics to stderr so stdout stays clean for CSV output.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}

/// Parse `x,y,z` into a [`Point`].
pub fn parse_point(s: &str) -> Result<Point, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected x,y,z but got '{s}'"));
    }
    let mut coords = [0.0; 3];
    for (slot, part) in coords.iter_mut().zip(&parts) {
        *slot = part
            .parse::<f64>()
            .map_err(|e| format!("invalid coordinate '{part}': {e}"))?;
        if !slot.is_finite() {
            return Err(format!("coordinate '{part}' is not finite"));
        }
    }
    Ok(Point::from(coords))
}

/// Pick a drone by case-insensitive name, or the first catalog entry.
pub fn find_drone(drones: &[DroneConfig], name: Option<&str>) -> anyhow::Result<DroneConfig> {
    match name {
        Some(name) => {
            let upper = name.to_uppercase();
            drones
                .iter()
                .find(|d| d.name.to_uppercase() == upper)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("Drone '{}' not found in catalog", name))
        }
        None => drones
            .first()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Drone catalog is empty")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_points() {
        assert_eq!(parse_point("1,2,3").unwrap(), Point::new(1.0, 2.0, 3.0));
        assert_eq!(parse_point(" -1.5, 0 ,2e1").unwrap(), Point::new(-1.5, 0.0, 20.0));
        assert!(parse_point("1,2").is_err());
        assert!(parse_point("1,a,3").is_err());
        assert!(parse_point("1,inf,3").is_err());
    }
}
