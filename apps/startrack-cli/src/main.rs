use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use startrack_common::{position_of, velocity_of};
use startrack_kernel::{Attitude, Method, PointingMode, Preset, WorldObject, WorldObjectError};
use startrack_scenario::ScenarioConfig;

#[derive(Parser)]
#[command(name = "startrack-cli", about = "Propagate and observe star-tracker scenarios")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, integrators and presets
    Info,
    /// Print pointing and position of every object at the given times
    Propagate {
        /// Scenario file (.yaml, .yml or .json)
        scenario: PathBuf,
        /// Query times in seconds, any order
        #[arg(short, long, num_args = 1.., required = true, allow_negative_numbers = true)]
        times: Vec<f64>,
        /// Pointing representation: quaternion or dcm
        #[arg(short, long, default_value = "quaternion")]
        mode: PointingMode,
    },
    /// Print every object's position in the camera frame at the given times
    Observe {
        /// Scenario file (.yaml, .yml or .json)
        scenario: PathBuf,
        /// Query times in seconds, any order
        #[arg(short, long, num_args = 1.., required = true, allow_negative_numbers = true)]
        times: Vec<f64>,
    },
}

#[derive(Serialize)]
struct StateRecord<'a> {
    object: &'a str,
    t: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    attitude: Option<Attitude>,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<[f64; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    velocity: Option<[f64; 3]>,
}

#[derive(Serialize)]
struct ObservationRecord<'a> {
    object: &'a str,
    t: f64,
    camera_frame: [f64; 3],
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("startrack-cli v{}", env!("CARGO_PKG_VERSION"));
            let methods: Vec<&str> = Method::ALL.iter().map(|m| m.name()).collect();
            println!("integrators: {}", methods.join(", "));
            let presets: Vec<&str> = Preset::ALL.iter().map(|p| p.name()).collect();
            println!("presets: {}", presets.join(", "));
        }
        Commands::Propagate {
            scenario,
            times,
            mode,
        } => {
            let mut built = ScenarioConfig::from_path(&scenario)?.build()?;
            tracing::info!(
                objects = built.scene.len(),
                queries = times.len(),
                "propagating scenario"
            );
            print_states("camera", &mut built.camera, &times, mode)?;
            for (_, entry) in built.scene.iter_mut() {
                print_states(&entry.name, &mut entry.object, &times, mode)?;
            }
        }
        Commands::Observe { scenario, times } => {
            let mut built = ScenarioConfig::from_path(&scenario)?.build()?;
            for &t in &times {
                let seen = built.scene.observe(&mut built.camera, t)?;
                for (id, rel) in seen {
                    let name = built.scene.get(id).map_or("?", |e| e.name.as_str());
                    let record = ObservationRecord {
                        object: name,
                        t,
                        camera_frame: rel.to_array(),
                    };
                    println!("{}", serde_json::to_string(&record)?);
                }
            }
        }
    }

    Ok(())
}

fn print_states(
    name: &str,
    object: &mut WorldObject,
    times: &[f64],
    mode: PointingMode,
) -> anyhow::Result<()> {
    for record in state_records(name, object, times, mode)? {
        println!("{}", serde_json::to_string(&record)?);
    }
    Ok(())
}

/// One record per time with whatever the object models.
fn state_records<'a>(
    name: &'a str,
    object: &mut WorldObject,
    times: &[f64],
    mode: PointingMode,
) -> Result<Vec<StateRecord<'a>>, WorldObjectError> {
    let attitudes = if object.model_pointing() {
        Some(object.get_pointing(times, mode)?.into_vec())
    } else {
        None
    };
    // One integration pass yields both position and velocity.
    let states = if object.model_position() {
        let states = times
            .iter()
            .map(|&t| object.position_at(t))
            .collect::<Result<Vec<_>, _>>()?;
        Some(states)
    } else {
        None
    };

    Ok(times
        .iter()
        .enumerate()
        .map(|(i, &t)| StateRecord {
            object: name,
            t,
            attitude: attitudes.as_ref().map(|a| a[i]),
            position: states.as_ref().map(|s| position_of(&s[i]).to_array()),
            velocity: states.as_ref().map(|s| velocity_of(&s[i]).to_array()),
        })
        .collect())
}
