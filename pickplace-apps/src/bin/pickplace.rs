use std::{path::PathBuf, time::Duration};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use pickplace_apps::{utils::init_tracing, PickPlaceConfig};
use pickplace_client::PickPlaceClientConfig;
use pickplace_planner::{
    JointDomain, JointPathInterpolator, PlacementPlanner, RegionDescriptor, RegionShape,
};
use schemars::schema_for;
use tracing::{debug, info};

/// Placement candidates and joint paths for pick and place.
#[derive(Parser, Debug)]
#[clap(name = env!("CARGO_BIN_NAME"))]
struct Args {
    /// Path to the setting file.
    #[clap(short, long, value_parser)]
    config_path: Option<PathBuf>,
    /// Prints the default setting as TOML.
    #[clap(long)]
    show_default_config: bool,
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the placement candidates of a region.
    Candidates {
        /// square / rectangle / circle / disk, the configured region is used if omitted.
        #[clap(long)]
        shape: Option<RegionShape>,
        /// Center of the region [cell]
        #[clap(long, num_args = 2, requires = "shape")]
        center: Option<Vec<f64>>,
        /// Extent of the region [cell]
        #[clap(long, num_args = 2, requires = "shape")]
        extent: Option<Vec<f64>>,
        /// Print the solved field instead of the candidates.
        #[clap(long)]
        field: bool,
    },
    /// Print the trajectory between two joint positions.
    Interpolate {
        /// Start positions, ordered like `joint_names`
        #[clap(long, num_args = 1.., allow_negative_numbers = true)]
        start: Vec<f64>,
        /// End positions, the neutral positions if omitted
        #[clap(long, num_args = 1.., allow_negative_numbers = true)]
        end: Option<Vec<f64>>,
    },
    /// Generate JSON schema for the config file.
    Schema {
        #[clap(value_enum, default_value_t = ConfigKind::PickPlaceConfig)]
        kind: ConfigKind,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ConfigKind {
    PickPlaceConfig,
    PickPlaceClientConfig,
}

fn region_from_args(
    config: &PickPlaceConfig,
    shape: Option<RegionShape>,
    center: Option<Vec<f64>>,
    extent: Option<Vec<f64>>,
) -> Result<RegionDescriptor> {
    let Some(shape) = shape else {
        return Ok(config.region);
    };
    let center = center.unwrap_or_else(|| config.region.center.to_vec());
    let extent = extent.unwrap_or_else(|| config.region.extent.to_vec());
    match (center.as_slice(), extent.as_slice()) {
        ([cx, cy], [ex, ey]) => Ok(RegionDescriptor::new(shape, [*cx, *cy], [*ex, *ey])?),
        _ => bail!("center and extent need two values"),
    }
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    debug!("ParsedArgs {:?}", args);

    if args.show_default_config {
        print!("{}", toml::to_string(&PickPlaceConfig::default())?);
        return Ok(());
    }

    let config = match pickplace_apps::utils::get_config_path(args.config_path) {
        Some(path) => PickPlaceConfig::try_new(path)?,
        None => PickPlaceConfig::default(),
    };

    match args.command {
        Some(Command::Candidates {
            shape,
            center,
            extent,
            field,
        }) => {
            let region = region_from_args(&config, shape, center, extent)?;
            let planner = PlacementPlanner::new(&config.client.placement)?;
            if field {
                for row in planner.solve(&region)?.to_rows() {
                    let line = row
                        .iter()
                        .map(|v| if *v > 0.0 { '#' } else { '.' })
                        .collect::<String>();
                    println!("{line}");
                }
                return Ok(());
            }
            let candidates = planner.plan(&region)?;
            info!("{} candidates for {:?}", candidates.len(), region);
            for candidate in candidates {
                let p = candidate.position();
                let (roll, pitch, yaw) = candidate.euler_angles();
                println!(
                    "{} {:.4} {:.4} {:.4} {:.4} {:.4} {:.4}",
                    candidate.id, p[0], p[1], p[2], roll, pitch, yaw
                );
            }
        }
        Some(Command::Interpolate { start, end }) => {
            let domain = JointDomain::new(config.joint_names.clone())?;
            let start = domain.configuration(&start)?;
            let end = domain.configuration(end.as_ref().unwrap_or(&config.client.neutral_positions))?;
            let interpolator = JointPathInterpolator::new(&config.client.interpolator)?;
            let path = interpolator.interpolate(&start, &end)?;
            let step = Duration::from_secs_f64(config.client.step_duration_sec);
            println!("# time {}", path.joint_names().join(" "));
            for point in path.to_trajectory(step) {
                let positions = point
                    .positions
                    .iter()
                    .map(|p| format!("{p:.4}"))
                    .collect::<Vec<_>>();
                println!(
                    "{:.3} {}",
                    point.time_from_start.as_secs_f64(),
                    positions.join(" ")
                );
            }
        }
        Some(Command::Schema { kind }) => {
            let schema = match kind {
                ConfigKind::PickPlaceConfig => schema_for!(PickPlaceConfig),
                ConfigKind::PickPlaceClientConfig => schema_for!(PickPlaceClientConfig),
            };
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        None => bail!("no command is given, see --help"),
    }
    Ok(())
}
